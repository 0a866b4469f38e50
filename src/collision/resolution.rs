use super::manifold::CollisionManifold;
use crate::config::SolverSettings;
use crate::objects::rigid_body::RigidBody;
use log::{trace, warn};

/// Resolves one contact: positional correction first, then the normal and
/// friction impulses.
///
/// `body_a` and `body_b` must be the bodies named by `manifold.body_a` and
/// `manifold.body_b`, in that order. Pairs where both bodies are static are
/// skipped.
pub fn resolve_collision(
    manifold: &CollisionManifold,
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    settings: &SolverSettings,
) {
    if body_a.inv_mass() + body_b.inv_mass() == 0.0 {
        warn!(
            "skipping contact between two static bodies ({:?}, {:?})",
            manifold.body_a, manifold.body_b
        );
        return;
    }

    apply_positional_correction(manifold, body_a, body_b, settings);
    apply_collision_impulse(manifold, body_a, body_b, settings);
}

/// Pushes the bodies apart along the normal in proportion to their inverse
/// masses, leaving `settings.slop` of the penetration in place.
pub fn apply_positional_correction(
    manifold: &CollisionManifold,
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    settings: &SolverSettings,
) {
    let inv_mass_sum = body_a.inv_mass() + body_b.inv_mass();
    if inv_mass_sum == 0.0 {
        return;
    }

    let magnitude = (manifold.depth - settings.slop).max(0.0) / inv_mass_sum * settings.correction_percent;
    let correction = manifold.normal * magnitude;

    if body_a.inv_mass() > 0.0 {
        body_a.translate(-correction * body_a.inv_mass());
    }
    if body_b.inv_mass() > 0.0 {
        body_b.translate(correction * body_b.inv_mass());
    }
}

/// Applies the normal impulse, then Coulomb friction, at the manifold's
/// contact point. Does nothing if the bodies are already separating.
pub fn apply_collision_impulse(
    manifold: &CollisionManifold,
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    settings: &SolverSettings,
) {
    let normal = manifold.normal;
    let contact = manifold.contact;
    let ra = contact - body_a.position();
    let rb = contact - body_b.position();

    let rel_vel = body_b.velocity_at(contact) - body_a.velocity_at(contact);
    let vel_along_normal = rel_vel.dot(normal);
    if vel_along_normal >= 0.0 {
        return;
    }

    // --- Normal impulse --- //
    let ra_cross_n = ra.cross(normal);
    let rb_cross_n = rb.cross(normal);
    let inv_mass_normal = body_a.inv_mass()
        + body_b.inv_mass()
        + ra_cross_n * ra_cross_n * body_a.inv_inertia()
        + rb_cross_n * rb_cross_n * body_b.inv_inertia();

    // Slow contacts don't bounce
    let restitution = if vel_along_normal > -settings.restitution_velocity_threshold {
        0.0
    } else {
        body_a.material.combined_restitution(&body_b.material)
    };

    let j = -(1.0 + restitution) * vel_along_normal / inv_mass_normal;
    let impulse = normal * j;
    body_a.apply_impulse(-impulse, ra);
    body_b.apply_impulse(impulse, rb);

    // --- Friction impulse --- //
    let rel_vel = body_b.velocity_at(contact) - body_a.velocity_at(contact);
    let tangent = rel_vel - normal * rel_vel.dot(normal);
    if tangent.magnitude_squared() <= settings.tangent_epsilon {
        trace!("contact {:?}/{:?}: j={:.4}, no slip", manifold.body_a, manifold.body_b, j);
        return;
    }
    let tangent = tangent.normalize();

    let ra_cross_t = ra.cross(tangent);
    let rb_cross_t = rb.cross(tangent);
    let inv_mass_tangent = body_a.inv_mass()
        + body_b.inv_mass()
        + ra_cross_t * ra_cross_t * body_a.inv_inertia()
        + rb_cross_t * rb_cross_t * body_b.inv_inertia();

    let jt = -rel_vel.dot(tangent) / inv_mass_tangent;
    let mu = body_a.material.combined_friction(&body_b.material);
    let jt = clamp_friction_impulse(jt, j, mu);

    let friction_impulse = tangent * jt;
    body_a.apply_impulse(-friction_impulse, ra);
    body_b.apply_impulse(friction_impulse, rb);

    trace!(
        "contact {:?}/{:?}: depth={:.4}, j={:.4}, jt={:.4}",
        manifold.body_a,
        manifold.body_b,
        manifold.depth,
        j,
        jt
    );
}

/// Coulomb clamp: `jt` passes through while `|jt| < j * mu`, otherwise the
/// impulse saturates at `-j * mu`.
pub fn clamp_friction_impulse(jt: f64, j: f64, mu: f64) -> f64 {
    let limit = j * mu;
    if jt.abs() < limit {
        jt
    } else {
        -limit
    }
}
