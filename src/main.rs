use texgraph::{graph, node, prelude::*, ssref};

use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut library = TextureLibrary::default();
    let albedo = library.add(Texture::solid("albedo", 4, 4, Color::new(0.8, 0.3, 0.2)));
    let grain = library.add(Texture::solid("grain", 4, 4, Color::from(0.5)));

    let graph = graph! {
        "scale": node!(float "scale" = 4.),
        "roughness": node!(slider "roughness" = 0.25, 0., 2.),
        "albedo": node!(texture "albedo" = albedo),
        "noise": node!(op "noise", inputs: "scale": ssref!(node "scale" => "value")),
    };

    // User tweaks the defaults of the original graph.
    let parameters = ParameterCollection::build(&graph);
    if let Some(scale) = parameters.float(&"scale".into())? {
        scale.borrow_mut().default_value = 6.;
    }

    // The graph gets regenerated with a slightly different set of parameters.
    let regenerated = graph! {
        "scale": node!(float "scale" = 1.),
        "albedo": node!(texture "albedo"),
        "grain": node!(texture "grain" = grain),
        "blend": node!(op "blend", inputs: "a": ssref!(node "albedo" => "color"), "b": ssref!(node "grain" => "color")),
    };
    let (inherited, report) = ParameterCollection::rebuild_with_defaults(&regenerated, &parameters)?;
    info!(
        "Inherited {} defaults, {} parameters kept their own",
        report.matched.len(),
        report.unmatched.len()
    );

    // The compiled shader only kept the properties it actually samples.
    let mut material = Material::new("blend_shader");
    material
        .declare_float("scale", 0.)
        .declare_texture("albedo", TextureRef::none());

    let report = inherited.apply_to_material(&mut material);
    info!(
        "Applied {} parameters to `{}`, skipped {}",
        report.applied.len(),
        material.shader(),
        report.skipped.len()
    );

    for (name, property) in material.properties() {
        match property {
            MaterialProperty::Float(value) => info!("{name} = {value}"),
            MaterialProperty::Texture(texture) => match texture.upgrade() {
                Some(texture) => info!("{name} = {} (average {:?})", texture.name, texture.average()),
                None => info!("{name} = none"),
            },
        }
    }

    inherited.overwrite_into(&graph)?;

    Ok(())
}
