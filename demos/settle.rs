//! Headless run: drops a box and a ball on the floor and logs them settling.
//!
//! ```sh
//! RUST_LOG=info cargo run --example settle
//! RUST_LOG=impulse2d=trace cargo run --example settle   # per-contact impulses
//! ```

use impulse2d::{Color, Material, PhysicsError, PhysicsWorld, RigidBody, Vec2, WorldConfig};
use log::{info, warn};

const FRAME: f64 = 1.0 / 60.0;
const SECONDS: usize = 5;

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let config = match WorldConfig::load_from(".") {
        Ok(config) => config,
        Err(e) => {
            warn!("falling back to default config: {}", e);
            WorldConfig::default()
        }
    };
    let mut world = PhysicsWorld::with_config(config)?;

    world.add_object(
        RigidBody::new_box(Vec2::new(400.0, 0.0), Vec2::new(50.0, 100.0), 5.0)
            .with_color(Color::ORANGE),
    );
    world.try_add_object(
        RigidBody::new_circle(Vec2::new(250.0, 100.0), 20.0, 1.0)
            .with_material(Material::RUBBER)
            .with_color(Color::BLUE),
    )?;

    for frame in 1..=SECONDS * 60 {
        world.update(FRAME)?;
        if frame % 30 == 0 {
            for (index, body) in world.objects().iter().enumerate() {
                info!(
                    "t={:.1}s #{} {:?}: pos=({:.3}, {:.3}) vel=({:.3}, {:.3}) angle={:.4}",
                    frame as f64 * FRAME,
                    index,
                    body.kind(),
                    body.position().x,
                    body.position().y,
                    body.velocity.x,
                    body.velocity.y,
                    body.angle()
                );
            }
        }
    }

    Ok(())
}
