use super::manifold::{BodyHandle, CollisionManifold};
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::{Shape, ShapeKind};

/// Relative determinant below which the two contact rows are treated as one.
const PRESSURE_DET_EPSILON: f64 = 1e-12;

/// Below this distance the circle center counts as inside the box.
const DEEP_PENETRATION_EPSILON: f64 = 1e-4;

/// Narrow-phase dispatcher. Routes the pair to the test for their shape tags.
///
/// Circle-box pairs are always tested with the circle first, so the returned
/// manifold may list the bodies in the opposite order to the call. Resolve
/// against `manifold.body_a` / `manifold.body_b`, not the argument order.
pub fn check_collision(
    body_a: &RigidBody,
    handle_a: BodyHandle,
    body_b: &RigidBody,
    handle_b: BodyHandle,
) -> Option<CollisionManifold> {
    match (body_a.kind(), body_b.kind()) {
        (ShapeKind::Circle, ShapeKind::Circle) => check_circle_circle(body_a, handle_a, body_b, handle_b),
        (ShapeKind::Box, ShapeKind::Box) => check_box_box(body_a, handle_a, body_b, handle_b),
        (ShapeKind::Box, ShapeKind::Circle) => check_circle_box(body_b, handle_b, body_a, handle_a),
        (ShapeKind::Circle, ShapeKind::Box) => check_circle_box(body_a, handle_a, body_b, handle_b),
    }
}

/// Checks for collision between two circles.
/// Exact tangency is not a collision.
pub fn check_circle_circle(
    body_a: &RigidBody,
    handle_a: BodyHandle,
    body_b: &RigidBody,
    handle_b: BodyHandle,
) -> Option<CollisionManifold> {
    let (radius_a, radius_b) = match (body_a.shape(), body_b.shape()) {
        (Shape::Circle(a), Shape::Circle(b)) => (a.radius, b.radius),
        _ => return None,
    };

    let dist_vec = body_b.position() - body_a.position();
    let dist_sq = dist_vec.magnitude_squared();
    let radii_sum = radius_a + radius_b;

    if dist_sq >= radii_sum * radii_sum {
        return None;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance == 0.0 {
        // Coincident centers
        Vec2::DOWN
    } else {
        dist_vec / distance
    };

    Some(CollisionManifold {
        body_a: handle_a,
        body_b: handle_b,
        normal,
        depth: radii_sum - distance,
        contact: body_a.position() + normal * radius_a,
    })
}

/// Projects vertices onto `axis` and returns the (min, max) interval.
fn project_vertices(vertices: &[Vec2], axis: Vec2) -> (f64, f64) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| (min.min(p), max.max(p)))
}

/// Box-box separating axis test over the two edge directions of each box.
pub fn check_box_box(
    body_a: &RigidBody,
    handle_a: BodyHandle,
    body_b: &RigidBody,
    handle_b: BodyHandle,
) -> Option<CollisionManifold> {
    let (verts_a, verts_b) = (body_a.vertices(), body_b.vertices());
    if verts_a.len() != 4 || verts_b.len() != 4 {
        return None;
    }

    // Edges 2->3 and 3->0 are parallel to these, so four axes suffice.
    let axes = [
        (verts_a[1] - verts_a[0]).normalize(),
        (verts_a[2] - verts_a[1]).normalize(),
        (verts_b[1] - verts_b[0]).normalize(),
        (verts_b[2] - verts_b[1]).normalize(),
    ];

    let mut min_depth = f64::MAX;
    let mut normal = Vec2::ZERO;
    let mut best_axis = 0;

    for (i, &axis) in axes.iter().enumerate() {
        let (min_a, max_a) = project_vertices(verts_a, axis);
        let (min_b, max_b) = project_vertices(verts_b, axis);

        if min_a >= max_b || min_b >= max_a {
            // Separating axis found
            return None;
        }

        let axis_depth = (max_b - min_a).min(max_a - min_b);
        if axis_depth < min_depth {
            min_depth = axis_depth;
            normal = axis;
            best_axis = i;
        }
    }

    if (body_b.position() - body_a.position()).dot(normal) < 0.0 {
        normal = -normal;
    }

    // An axis from A makes B the incident shape, searched against the normal;
    // an axis from B makes A incident, searched along it.
    let contact = if best_axis < 2 {
        incident_contact(body_a, body_b, verts_b, verts_a, -normal, normal)
    } else {
        incident_contact(body_a, body_b, verts_a, verts_b, normal, normal)
    };

    Some(CollisionManifold {
        body_a: handle_a,
        body_b: handle_b,
        normal,
        depth: min_depth,
        contact,
    })
}

/// Single contact point on the incident box.
///
/// The incident edge next to the deepest vertex is clipped to the reference
/// box's extent along the face, and its endpoints that still penetrate are the
/// candidate points. A lone candidate (a corner hit) leaves the deepest vertex
/// as the contact. With two, the contact is their centre of pressure: the
/// point where one normal impulse matches the pair of impulses that would stop
/// both endpoints closing, so a resting edge gets no spurious torque.
fn incident_contact(
    body_a: &RigidBody,
    body_b: &RigidBody,
    incident: &[Vec2],
    reference: &[Vec2],
    direction: Vec2,
    normal: Vec2,
) -> Vec2 {
    let mut best = 0;
    let mut max_dot = incident[0].dot(direction);
    for (i, v) in incident.iter().enumerate().skip(1) {
        let dot = v.dot(direction);
        if dot > max_dot {
            max_dot = dot;
            best = i;
        }
    }
    let support = incident[best];

    // Of the two neighbours, the one whose edge runs closest to the face
    let prev = incident[(best + 3) % 4];
    let next = incident[(best + 1) % 4];
    let partner = if edge_slope(support, prev, direction) < edge_slope(support, next, direction) {
        prev
    } else {
        next
    };

    let tangent = direction.perpendicular();
    let (t_support, t_partner) = (support.dot(tangent), partner.dot(tangent));
    if (t_partner - t_support).abs() < f64::EPSILON {
        return support;
    }

    let (ref_min, ref_max) = project_vertices(reference, tangent);
    let lo = t_support.min(t_partner).max(ref_min);
    let hi = t_support.max(t_partner).min(ref_max);
    if lo > hi {
        return support;
    }

    let face = project_vertices(reference, direction).0;
    let on_edge = |t: f64| support + (partner - support) * ((t - t_support) / (t_partner - t_support));
    let (p1, p2) = (on_edge(lo), on_edge(hi));
    if p1.dot(direction) > face && p2.dot(direction) > face {
        centre_of_pressure(body_a, body_b, normal, p1, p2)
    } else {
        support
    }
}

/// |cos| of the angle between the edge `from -> to` and `direction`.
fn edge_slope(from: Vec2, to: Vec2, direction: Vec2) -> f64 {
    let edge = to - from;
    let length = edge.magnitude();
    if length == 0.0 {
        f64::INFINITY
    } else {
        edge.dot(direction).abs() / length
    }
}

/// Splits the normal impulse between `p1` and `p2` so both stop closing, and
/// returns the impulse-weighted point. Falls back to the endpoint closing
/// fastest when only one of them needs a push, or to the midpoint when
/// neither does.
fn centre_of_pressure(body_a: &RigidBody, body_b: &RigidBody, normal: Vec2, p1: Vec2, p2: Vec2) -> Vec2 {
    let closing = |p: Vec2| (body_b.velocity_at(p) - body_a.velocity_at(p)).dot(normal);
    let arm_a = |p: Vec2| (p - body_a.position()).cross(normal);
    let arm_b = |p: Vec2| (p - body_b.position()).cross(normal);

    let (a1, a2, b1, b2) = (arm_a(p1), arm_a(p2), arm_b(p1), arm_b(p2));
    let inv_mass_sum = body_a.inv_mass() + body_b.inv_mass();
    let k11 = inv_mass_sum + a1 * a1 * body_a.inv_inertia() + b1 * b1 * body_b.inv_inertia();
    let k22 = inv_mass_sum + a2 * a2 * body_a.inv_inertia() + b2 * b2 * body_b.inv_inertia();
    let k12 = inv_mass_sum + a1 * a2 * body_a.inv_inertia() + b1 * b2 * body_b.inv_inertia();

    let (v1, v2) = (closing(p1), closing(p2));
    let midpoint = (p1 + p2) * 0.5;

    let det = k11 * k22 - k12 * k12;
    if det > PRESSURE_DET_EPSILON * k11 * k22 {
        let j1 = (-v1 * k22 + v2 * k12) / det;
        let j2 = (-v2 * k11 + v1 * k12) / det;
        if j1 >= 0.0 && j2 >= 0.0 {
            let total = j1 + j2;
            if total <= 0.0 {
                return midpoint;
            }
            return (p1 * j1 + p2 * j2) / total;
        }
    }

    // One endpoint is separating: push only the other
    if v1 < v2 && v1 < 0.0 {
        p1
    } else if v2 < v1 && v2 < 0.0 {
        p2
    } else {
        midpoint
    }
}

/// Circle-box test in the box's local frame.
///
/// The manifold always has the circle as body A and the normal pointing from
/// the circle towards the box.
pub fn check_circle_box(
    circle_body: &RigidBody,
    circle_handle: BodyHandle,
    box_body: &RigidBody,
    box_handle: BodyHandle,
) -> Option<CollisionManifold> {
    let (radius, rect) = match (circle_body.shape(), box_body.shape()) {
        (Shape::Circle(c), Shape::Rect(r)) => (c.radius, *r),
        _ => return None,
    };

    let transform = box_body.transform();
    let local_center = transform.apply_inverse(circle_body.position());
    let half = rect.half_extents();
    let mut closest = local_center.clamp(-half, half);

    let distance_vec = local_center - closest;
    let dist_sq = distance_vec.magnitude_squared();
    if dist_sq > radius * radius {
        return None;
    }

    let distance = dist_sq.sqrt();
    let (normal_local, depth) = if distance < DEEP_PENETRATION_EPSILON {
        // Center inside the box: push out through the nearest face.
        let pen_x = half.x - local_center.x.abs();
        let pen_y = half.y - local_center.y.abs();
        if pen_x < pen_y {
            let sign = if local_center.x < 0.0 { -1.0 } else { 1.0 };
            closest.x = sign * half.x;
            (Vec2::new(sign, 0.0), pen_x + radius)
        } else {
            let sign = if local_center.y < 0.0 { -1.0 } else { 1.0 };
            closest.y = sign * half.y;
            (Vec2::new(0.0, sign), pen_y + radius)
        }
    } else {
        (distance_vec / distance, radius - distance)
    };

    Some(CollisionManifold {
        body_a: circle_handle,
        body_b: box_handle,
        // Local normal points box -> circle; flip to circle -> box.
        normal: -transform.apply_direction(normal_local),
        depth,
        contact: transform.apply(closest),
    })
}
