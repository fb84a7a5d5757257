//! [EditorUi] implementation drawing with [egui].

use super::panel::EditorUi;

use crate::texture::{TextureLibrary, TextureRef};

/// Draws parameter rows into an [egui::Ui], picking textures from a [TextureLibrary].
pub struct EguiEditor<'a> {
    ui: &'a mut egui::Ui,
    library: &'a TextureLibrary,
}

impl<'a> EguiEditor<'a> {
    #[allow(missing_docs)]
    pub fn new(ui: &'a mut egui::Ui, library: &'a TextureLibrary) -> Self {
        Self { ui, library }
    }
}

impl EditorUi for EguiEditor<'_> {
    fn horizontal(&mut self, add_contents: &mut dyn FnMut(&mut dyn EditorUi)) {
        let library = self.library;

        self.ui.horizontal(|ui| {
            add_contents(&mut EguiEditor { ui, library });
        });
    }

    fn label(&mut self, text: &str) {
        self.ui.label(text);
    }

    fn slider(&mut self, label: &str, value: &mut f32) {
        self.ui
            .add(egui::Slider::new(value, 0.0..=1.0).show_value(false))
            .on_hover_text(label);
    }

    fn float_field(&mut self, label: &str, value: &mut f32) {
        self.ui
            .add(egui::DragValue::new(value).speed(0.01))
            .on_hover_text(label);
    }

    fn texture_field(&mut self, label: &str, value: &mut TextureRef) {
        let library = self.library;
        let selected = value.name().unwrap_or_else(|| "None".to_owned());

        egui::ComboBox::from_id_salt(label)
            .selected_text(selected)
            .show_ui(self.ui, |ui| {
                if ui.selectable_label(value.is_none(), "None").clicked() {
                    *value = TextureRef::none();
                }

                for texture in library.iter() {
                    let candidate = TextureRef::from(texture);
                    if ui
                        .selectable_label(value.same(&candidate), texture.name.as_str())
                        .clicked()
                    {
                        *value = candidate;
                    }
                }
            });
    }
}
