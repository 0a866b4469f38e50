use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Advances one body by `dt` with semi-implicit Euler: velocities first,
/// then position and angle from the new velocities.
pub fn integrate(body: &mut RigidBody, gravity: Vec2, dt: f64) {
    if body.is_static() {
        // Static object, do not integrate
        return;
    }

    // --- Linear Motion --- //
    body.velocity += gravity * dt;

    // --- Angular Motion --- //
    body.angular_velocity *= body.material.angular_damping;

    let position = body.position() + body.velocity * dt;
    let angle = wrap_angle(body.angle() + body.angular_velocity * dt);
    body.set_placement(position, angle);
}

/// Wraps an angle in radians to the range [-PI, PI].
fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}
