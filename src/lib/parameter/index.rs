use super::{Error, ParameterCollection, ParameterKey};

use std::collections::{hash_map::Entry, HashMap};

use log::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// What a lookup resolves to when several parameters of the same kind share a name.
pub enum DuplicatePolicy {
    #[default]
    /// The first parameter in node order wins.
    FirstMatch,
    /// The last parameter in node order wins.
    LastMatch,
    /// Building the index fails with [Error::DuplicateParameter].
    Reject,
}

/// Policy used by [CollectionConfig::default](super::CollectionConfig).
pub const DEFAULT_DUPLICATE_POLICY: DuplicatePolicy = DuplicatePolicy::FirstMatch;

#[derive(Clone, Debug, Default, PartialEq)]
/// Mapping of [ParameterKey]s to positions in a [ParameterCollection]'s float or texture list.
pub struct ParameterIndex {
    positions: HashMap<ParameterKey, usize>,
}

impl ParameterIndex {
    /// Index every parameter of `collection`, resolving duplicates with `policy`.
    pub fn new(collection: &ParameterCollection, policy: DuplicatePolicy) -> Result<Self, Error> {
        let mut positions = HashMap::with_capacity(collection.len());

        let floats = collection
            .floats()
            .iter()
            .enumerate()
            .map(|(position, handle)| (ParameterKey::float(handle.borrow().name.clone()), position));
        let textures = collection
            .textures()
            .iter()
            .enumerate()
            .map(|(position, handle)| {
                (ParameterKey::texture(handle.borrow().name.clone()), position)
            });

        for (key, position) in floats.chain(textures) {
            match positions.entry(key) {
                Entry::Vacant(entry) => {
                    entry.insert(position);
                }
                Entry::Occupied(mut entry) => match policy {
                    DuplicatePolicy::FirstMatch => {
                        debug!("Ignoring later duplicate {}", entry.key())
                    }
                    DuplicatePolicy::LastMatch => {
                        debug!("Later duplicate {} shadows the previous one", entry.key());
                        entry.insert(position);
                    }
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateParameter(entry.key().clone()))
                    }
                },
            }
        }

        Ok(Self { positions })
    }

    /// Position of the parameter in its kind's list.
    pub fn get(&self, key: &ParameterKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
