use super::{CollectionConfig, Error, ParameterCollection, ParameterKey};

use crate::{
    material::{self, Material},
    shader::graph::Graph,
};

use log::{debug, trace, warn};

#[derive(Clone, Debug, Default, PartialEq)]
/// Outcome of copying defaults between two collections.
pub struct SyncReport {
    /// Parameters that found their counterpart and were updated.
    pub matched: Vec<ParameterKey>,
    /// Parameters without counterpart, left untouched.
    pub unmatched: Vec<ParameterKey>,
    /// Duplicates the [DuplicatePolicy](super::DuplicatePolicy) did not pick, left untouched.
    pub shadowed: Vec<ParameterKey>,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Outcome of [apply_to_material](ParameterCollection::apply_to_material).
pub struct ApplyReport {
    /// Parameters whose value was set on the material.
    pub applied: Vec<ParameterKey>,
    /// Parameters skipped, with the reason.
    pub skipped: Vec<(ParameterKey, material::Error)>,
}

impl ParameterCollection {
    /// Collect the parameters of `graph`, then give each one the default of the parameter with
    /// the same name and kind in `source`.
    ///
    /// Parameters missing from `source` keep their own default and are reported.
    pub fn rebuild_with_defaults(
        graph: &Graph,
        source: &ParameterCollection,
    ) -> Result<(Self, SyncReport), Error> {
        Self::rebuild_with_defaults_with(graph, source, source.config)
    }

    /// [rebuild_with_defaults](Self::rebuild_with_defaults) with an explicit configuration for
    /// the new collection.
    ///
    /// Duplicate names are resolved on both sides: only the entry of the new collection picked
    /// by its policy inherits, from the entry of `source` picked by `source`'s policy.
    pub fn rebuild_with_defaults_with(
        graph: &Graph,
        source: &ParameterCollection,
        config: CollectionConfig,
    ) -> Result<(Self, SyncReport), Error> {
        let res = Self::build_with(graph, config);
        let own = res.index()?;
        let index = source.index()?;
        let mut report = SyncReport::default();

        for (own_position, parameter) in res.floats.iter().enumerate() {
            let key = ParameterKey::float(parameter.borrow().name.clone());

            if own.get(&key) != Some(own_position) {
                debug!("Not inheriting into shadowed {key}");
                report.shadowed.push(key);
                continue;
            }

            let Some(position) = index.get(&key) else {
                warn!("Missing counterpart for {key}, keeping its own default");
                report.unmatched.push(key);
                continue;
            };

            let value = source.floats[position].borrow().default_value;
            parameter.borrow_mut().default_value = value;
            report.matched.push(key);
        }

        for (own_position, parameter) in res.textures.iter().enumerate() {
            let key = ParameterKey::texture(parameter.borrow().name.clone());

            if own.get(&key) != Some(own_position) {
                debug!("Not inheriting into shadowed {key}");
                report.shadowed.push(key);
                continue;
            }

            let Some(position) = index.get(&key) else {
                warn!("Missing counterpart for {key}, keeping its own default");
                report.unmatched.push(key);
                continue;
            };

            let texture = source.textures[position].borrow().default_texture.clone();
            parameter.borrow_mut().default_texture = texture;
            report.matched.push(key);
        }

        Ok((res, report))
    }

    /// Write this collection's defaults into the matching parameter nodes of `graph`.
    ///
    /// Parameters of this collection that `graph` does not have are skipped. Among duplicates of
    /// this collection, only the one picked by its policy is written.
    pub fn overwrite_into(&self, graph: &Graph) -> Result<SyncReport, Error> {
        let own = self.index()?;
        let target = Self::build_with(graph, self.config);
        let index = target.index()?;
        let mut report = SyncReport::default();

        for (own_position, parameter) in self.floats.iter().enumerate() {
            let key = ParameterKey::float(parameter.borrow().name.clone());

            if own.get(&key) != Some(own_position) {
                debug!("Not writing shadowed {key}");
                report.shadowed.push(key);
                continue;
            }

            let Some(position) = index.get(&key) else {
                trace!("No {key} to overwrite");
                report.unmatched.push(key);
                continue;
            };

            // Read first, the target may be the very same node.
            let value = parameter.borrow().default_value;
            target.floats[position].borrow_mut().default_value = value;
            report.matched.push(key);
        }

        for (own_position, parameter) in self.textures.iter().enumerate() {
            let key = ParameterKey::texture(parameter.borrow().name.clone());

            if own.get(&key) != Some(own_position) {
                debug!("Not writing shadowed {key}");
                report.shadowed.push(key);
                continue;
            }

            let Some(position) = index.get(&key) else {
                trace!("No {key} to overwrite");
                report.unmatched.push(key);
                continue;
            };

            let texture = parameter.borrow().default_texture.clone();
            target.textures[position].borrow_mut().default_texture = texture;
            report.matched.push(key);
        }

        Ok(report)
    }

    /// Set every parameter's effective value on the material property of the same name.
    ///
    /// Properties the material lacks (the shader compiler strips unused ones) are skipped with a
    /// warning; this never fails.
    pub fn apply_to_material(&self, material: &mut Material) -> ApplyReport {
        let mut report = ApplyReport::default();
        let shader = material.shader().clone();

        let mut record = |key: ParameterKey, result: Result<(), material::Error>| match result {
            Ok(()) => report.applied.push(key),
            Err(err) => {
                warn!("Skipping {key} on material `{shader}`: {err}");
                report.skipped.push((key, err));
            }
        };

        for parameter in self.floats.iter() {
            let parameter = parameter.borrow();
            record(
                ParameterKey::float(parameter.name.clone()),
                material.set_float(&parameter.name, parameter.effective_value()),
            );
        }

        for parameter in self.textures.iter() {
            let parameter = parameter.borrow();
            record(
                ParameterKey::texture(parameter.name.clone()),
                material.set_texture(&parameter.name, parameter.default_texture.clone()),
            );
        }

        report
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        color::Color,
        graph,
        material::PropertyKind,
        node,
        parameter::DuplicatePolicy,
        shader::graph::{FloatParameter, Name},
        texture::{Texture, TextureLibrary, TextureRef},
    };

    use float_eq::assert_float_eq;

    struct Fixture {
        library: TextureLibrary,
        graph: Graph,
    }

    fn fixture() -> Fixture {
        let mut library = TextureLibrary::default();
        let albedo = library.add(Texture::solid("albedo", 2, 2, Color::new(1., 0., 0.)));

        let graph = graph! {
            "scale": node!(float "scale" = 4.),
            "roughness": node!(slider "roughness" = 0.25, 0., 2.),
            "albedo": node!(texture "albedo" = albedo),
            "noise": node!(op "noise"),
        };

        Fixture { library, graph }
    }

    fn defaults(parameters: &ParameterCollection) -> (Vec<f32>, Vec<TextureRef>) {
        (
            parameters
                .floats()
                .iter()
                .map(|handle| handle.borrow().default_value)
                .collect(),
            parameters
                .textures()
                .iter()
                .map(|handle| handle.borrow().default_texture.clone())
                .collect(),
        )
    }

    mod rebuild {
        use super::*;

        #[test]
        fn inherits_matching_defaults() {
            let Fixture { mut library, graph } = fixture();
            let source = ParameterCollection::build(&graph);
            source.floats()[0].borrow_mut().default_value = 8.;

            let detail = library.add(Texture::solid("detail", 1, 1, Color::from(0.5)));
            let regenerated = graph! {
                "albedo": node!(texture "albedo"),
                "detail": node!(texture "detail" = detail.clone()),
                "scale": node!(float "scale" = 1.),
                "contrast": node!(float "contrast" = 0.75),
            };

            let (parameters, report) =
                ParameterCollection::rebuild_with_defaults(&regenerated, &source).unwrap();

            let (floats, textures) = defaults(&parameters);
            assert_eq!(floats, vec![8., 0.75]);
            assert_eq!(textures, vec![library.get("albedo").unwrap(), detail]);

            assert_eq!(
                report.matched,
                vec![ParameterKey::float("scale"), ParameterKey::texture("albedo")]
            );
            assert_eq!(
                report.unmatched,
                vec![ParameterKey::float("contrast"), ParameterKey::texture("detail")]
            );
        }

        #[test]
        fn kind_must_match() {
            let Fixture { graph, .. } = fixture();
            let source = ParameterCollection::build(&graph);

            let regenerated = graph! {
                "albedo": node!(float "albedo" = 0.5),
            };

            let (parameters, report) =
                ParameterCollection::rebuild_with_defaults(&regenerated, &source).unwrap();

            assert_eq!(defaults(&parameters).0, vec![0.5]);
            assert_eq!(report.unmatched, vec![ParameterKey::float("albedo")]);
        }

        #[test]
        fn mutates_the_new_graph_only() {
            let Fixture { graph, .. } = fixture();
            let source = ParameterCollection::build(&graph);
            let copy = graph.duplicate();

            ParameterCollection::rebuild_with_defaults(&copy, &source).unwrap();
            source.floats()[0].borrow_mut().default_value = 100.;

            assert_eq!(defaults(&ParameterCollection::build(&copy)).0, vec![4., 0.25]);
        }

        #[test]
        fn idempotent() {
            let Fixture { graph, .. } = fixture();
            let before = defaults(&ParameterCollection::build(&graph));

            let source = ParameterCollection::build(&graph);
            let (first, _) = ParameterCollection::rebuild_with_defaults(&graph, &source).unwrap();
            let (second, report) =
                ParameterCollection::rebuild_with_defaults(&graph, &first).unwrap();

            assert_eq!(defaults(&first), before);
            assert_eq!(defaults(&second), before);
            assert!(report.unmatched.is_empty());
        }

        #[test]
        fn rejects_duplicates_when_asked() {
            let Fixture { graph, .. } = fixture();
            let mut duplicated = graph.duplicate();
            duplicated.push("scale_again", FloatParameter::new("scale", 1.));

            let strict = CollectionConfig {
                duplicate_policy: DuplicatePolicy::Reject,
                ..Default::default()
            };
            let source = ParameterCollection::build_with(&duplicated, strict);

            assert_eq!(
                ParameterCollection::rebuild_with_defaults(&graph, &source).map(|_| ()),
                Err(Error::DuplicateParameter(ParameterKey::float("scale")))
            );
        }

        #[test]
        fn first_duplicate_wins_by_default() {
            let Fixture { graph, .. } = fixture();
            let mut duplicated = graph.duplicate();
            duplicated.push("scale_again", FloatParameter::new("scale", 1.));
            let source = ParameterCollection::build(&duplicated);

            let (parameters, _) =
                ParameterCollection::rebuild_with_defaults(&graph, &source).unwrap();

            assert_eq!(defaults(&parameters).0, vec![4., 0.25]);
        }

        #[test]
        fn only_the_picked_new_duplicate_inherits() {
            let Fixture { graph, .. } = fixture();
            let source = ParameterCollection::build(&graph);
            source.floats()[0].borrow_mut().default_value = 8.;

            let regenerated = graph! {
                "a": node!(float "scale" = 1.),
                "b": node!(float "scale" = 2.),
            };

            let (parameters, report) =
                ParameterCollection::rebuild_with_defaults(&regenerated, &source).unwrap();
            assert_eq!(defaults(&parameters).0, vec![8., 2.]);
            assert_eq!(report.matched, vec![ParameterKey::float("scale")]);
            assert_eq!(report.shadowed, vec![ParameterKey::float("scale")]);

            let regenerated = graph! {
                "a": node!(float "scale" = 1.),
                "b": node!(float "scale" = 2.),
            };
            let last = CollectionConfig {
                duplicate_policy: DuplicatePolicy::LastMatch,
                ..Default::default()
            };
            let (parameters, _) =
                ParameterCollection::rebuild_with_defaults_with(&regenerated, &source, last)
                    .unwrap();
            assert_eq!(defaults(&parameters).0, vec![1., 8.]);
        }

        #[test]
        fn rejects_duplicates_in_the_new_graph() {
            let Fixture { graph, .. } = fixture();
            let source = ParameterCollection::build(&graph);

            let regenerated = graph! {
                "a": node!(float "scale" = 1.),
                "b": node!(float "scale" = 2.),
            };
            let strict = CollectionConfig {
                duplicate_policy: DuplicatePolicy::Reject,
                ..Default::default()
            };

            assert_eq!(
                ParameterCollection::rebuild_with_defaults_with(&regenerated, &source, strict)
                    .map(|_| ()),
                Err(Error::DuplicateParameter(ParameterKey::float("scale")))
            );
            assert_eq!(defaults(&ParameterCollection::build(&regenerated)).0, vec![1., 2.]);
        }
    }

    mod overwrite {
        use super::*;

        #[test]
        fn writes_back_into_graph() {
            let Fixture { mut library, graph } = fixture();
            let edited = ParameterCollection::build(&graph.duplicate());
            let mask = library.add(Texture::solid("mask", 1, 1, Color::default()));

            edited.floats()[1].borrow_mut().default_value = 0.9;
            edited.textures()[0].borrow_mut().default_texture = mask.clone();

            let report = edited.overwrite_into(&graph).unwrap();

            let (floats, textures) = defaults(&ParameterCollection::build(&graph));
            assert_eq!(floats, vec![4., 0.9]);
            assert_eq!(textures, vec![mask]);
            assert_eq!(report.matched.len(), 3);
            assert!(report.unmatched.is_empty());
        }

        #[test]
        fn skips_missing_silently() {
            let Fixture { graph, .. } = fixture();
            let edited = ParameterCollection::build(&graph! {
                "scale": node!(float "scale" = 2.),
                "gone": node!(float "gone" = 3.),
            });

            let report = edited.overwrite_into(&graph).unwrap();

            assert_eq!(defaults(&ParameterCollection::build(&graph)).0, vec![2., 0.25]);
            assert_eq!(report.unmatched, vec![ParameterKey::float("gone")]);
        }

        #[test]
        fn round_trip_is_noop() {
            let Fixture { graph, .. } = fixture();
            let before = defaults(&ParameterCollection::build(&graph));

            ParameterCollection::build(&graph)
                .overwrite_into(&graph)
                .unwrap();

            assert_eq!(defaults(&ParameterCollection::build(&graph)), before);
        }

        fn duplicated_scales(config: CollectionConfig) -> ParameterCollection {
            ParameterCollection::build_with(
                &graph! {
                    "a": node!(float "scale" = 1.),
                    "b": node!(float "scale" = 2.),
                },
                config,
            )
        }

        #[test]
        fn first_duplicate_is_written_by_default() {
            let target = graph! {
                "scale": node!(float "scale" = 0.),
            };

            let report = duplicated_scales(CollectionConfig::default())
                .overwrite_into(&target)
                .unwrap();

            assert_eq!(defaults(&ParameterCollection::build(&target)).0, vec![1.]);
            assert_eq!(report.matched, vec![ParameterKey::float("scale")]);
            assert_eq!(report.shadowed, vec![ParameterKey::float("scale")]);
        }

        #[test]
        fn last_duplicate_is_written_when_asked() {
            let target = graph! {
                "scale": node!(float "scale" = 0.),
            };
            let last = CollectionConfig {
                duplicate_policy: DuplicatePolicy::LastMatch,
                ..Default::default()
            };

            duplicated_scales(last).overwrite_into(&target).unwrap();

            assert_eq!(defaults(&ParameterCollection::build(&target)).0, vec![2.]);
        }

        #[test]
        fn rejects_own_duplicates() {
            let target = graph! {
                "scale": node!(float "scale" = 0.),
            };
            let strict = CollectionConfig {
                duplicate_policy: DuplicatePolicy::Reject,
                ..Default::default()
            };

            assert_eq!(
                duplicated_scales(strict).overwrite_into(&target),
                Err(Error::DuplicateParameter(ParameterKey::float("scale")))
            );
            assert_eq!(defaults(&ParameterCollection::build(&target)).0, vec![0.]);
        }
    }

    mod apply {
        use super::*;

        #[test]
        fn sets_effective_values() {
            let Fixture { library, graph } = fixture();
            let mut material = Material::new("noise_shader");
            material
                .declare_float("scale", 0.)
                .declare_float("roughness", 0.)
                .declare_texture("albedo", TextureRef::none());

            let report = ParameterCollection::build(&graph).apply_to_material(&mut material);

            assert_float_eq!(material.float(&"scale".into()).unwrap(), 4., abs <= 1e-6);
            assert_float_eq!(material.float(&"roughness".into()).unwrap(), 0.5, abs <= 1e-6);
            assert_eq!(
                material.texture(&"albedo".into()).unwrap(),
                &library.get("albedo").unwrap()
            );
            assert_eq!(report.applied.len(), 3);
            assert!(report.skipped.is_empty());
        }

        #[test]
        fn skips_missing_properties_and_continues() {
            let Fixture { graph, .. } = fixture();
            let mut material = Material::new("noise_shader");
            material
                .declare_float("roughness", 0.)
                .declare_float("albedo", 0.);

            let report = ParameterCollection::build(&graph).apply_to_material(&mut material);

            assert_eq!(report.applied, vec![ParameterKey::float("roughness")]);
            assert_eq!(
                report.skipped,
                vec![
                    (
                        ParameterKey::float("scale"),
                        material::Error::MissingProperty(Name::from("scale"))
                    ),
                    (
                        ParameterKey::texture("albedo"),
                        material::Error::MismatchedKind {
                            name: Name::from("albedo"),
                            expected: PropertyKind::Float,
                            got: PropertyKind::Texture,
                        }
                    ),
                ]
            );
            assert_float_eq!(material.float(&"roughness".into()).unwrap(), 0.5, abs <= 1e-6);
            assert!(!material.has_property(&"scale".into()));
        }

        #[test]
        fn empty_material() {
            let Fixture { graph, .. } = fixture();
            let mut material = Material::default();

            let report = ParameterCollection::build(&graph).apply_to_material(&mut material);

            assert!(report.applied.is_empty());
            assert_eq!(report.skipped.len(), 3);
            assert_eq!(material, Material::default());
        }
    }
}
