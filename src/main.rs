use driftdeck::prelude::*;

fn main() {
    env_logger::init();

    let result = Simulation::new()
        .with_texture(
            "sunset",
            TextureConfig::gradient(64, [240, 120, 60, 255], [90, 30, 90, 255]),
        )
        .with_texture(
            "ocean",
            TextureConfig::gradient(64, [60, 160, 220, 255], [20, 40, 90, 255]),
        )
        .with_texture(
            "forest",
            TextureConfig::gradient(64, [110, 200, 110, 255], [20, 70, 40, 255]),
        )
        .with_texture("slate", TextureConfig::solid(70, 75, 85, 255))
        .with_texture("cherry", TextureConfig::solid(200, 60, 80, 255))
        .with_surface_size(1280.0, 720.0)
        .run();

    if let Err(e) = result {
        eprintln!("driftdeck: {e}");
        std::process::exit(1);
    }
}
