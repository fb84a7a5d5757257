//! Immediate-mode edit panel for a [ParameterCollection].
//!
//! The widgets themselves belong to the host editor, which exposes them through [EditorUi]. The
//! panel is redrawn every frame; values are read from the graph nodes before each widget and
//! written back right after it.

use super::ParameterCollection;

use crate::{shader::graph::FloatParameter, texture::TextureRef};

use log::trace;

/// Layout primitives the host editor provides to draw parameter rows.
///
/// Widgets edit the value in place; callers compare before and after to detect changes. The
/// panel lays out the rows itself, widgets only draw the control and never add a row of their
/// own. `label` arguments name the edited value (for hover text or accessibility).
pub trait EditorUi {
    /// Lay out everything added by `add_contents` on a single row.
    fn horizontal(&mut self, add_contents: &mut dyn FnMut(&mut dyn EditorUi));

    /// Static text.
    fn label(&mut self, text: &str);

    /// Slider over the normalized `0..=1` range.
    fn slider(&mut self, label: &str, value: &mut f32);

    /// Unbounded numeric field.
    fn float_field(&mut self, label: &str, value: &mut f32);

    /// Picker for a texture asset, or none.
    fn texture_field(&mut self, label: &str, value: &mut TextureRef);
}

fn float_row(ui: &mut dyn EditorUi, parameter: &mut FloatParameter) {
    let name = parameter.name.to_string();

    if parameter.slider {
        let (min, max) = (parameter.min.to_string(), parameter.max.to_string());
        let value = &mut parameter.default_value;

        ui.horizontal(&mut |ui: &mut dyn EditorUi| {
            ui.label(&min);
            ui.slider(&name, value);
            ui.label(&max);
        });
    } else {
        let value = &mut parameter.default_value;

        ui.horizontal(&mut |ui: &mut dyn EditorUi| {
            ui.label(&name);
            ui.float_field(&name, value);
        });
    }
}

impl ParameterCollection {
    /// Draw one row per parameter, floats first, and store the edited values in the graph.
    ///
    /// Returns whether any value changed this frame: floats beyond the configured
    /// [Tolerance](super::Tolerance), textures by identity.
    pub fn render_edit_panel(&self, ui: &mut dyn EditorUi) -> bool {
        let tolerance = self.config.change_tolerance;
        let mut changed = false;

        for parameter in self.floats.iter() {
            // Widgets may call back into the host, don't keep the node borrowed meanwhile.
            let mut edited = parameter.borrow().clone();
            float_row(ui, &mut edited);

            let mut current = parameter.borrow_mut();
            if !tolerance.approx_eq(current.default_value, edited.default_value) {
                trace!("Float parameter `{}` edited", current.name);
                changed = true;
            }
            current.default_value = edited.default_value;
        }

        for parameter in self.textures.iter() {
            let (name, mut texture) = {
                let parameter = parameter.borrow();
                (parameter.name.to_string(), parameter.default_texture.clone())
            };
            ui.horizontal(&mut |ui: &mut dyn EditorUi| {
                ui.label(&name);
                ui.texture_field(&name, &mut texture);
            });

            let mut current = parameter.borrow_mut();
            if !current.default_texture.same(&texture) {
                trace!("Texture parameter `{}` edited", current.name);
                changed = true;
                current.default_texture = texture;
            }
        }

        changed
    }
}
