use impulse2d::collision::{check_collision, BodyHandle};
use impulse2d::{Material, PhysicsWorld, RigidBody, Vec2};

const FRAME: f64 = 1.0 / 60.0;
const EPSILON: f64 = 1e-9;

fn run(world: &mut PhysicsWorld, frames: usize) {
    for _ in 0..frames {
        world.update(FRAME).expect("valid step");
    }
}

#[test]
fn box_dropped_on_floor_comes_to_rest() {
    let mut world = PhysicsWorld::new(800.0, 650.0);
    world.add_object(RigidBody::new_box(Vec2::new(400.0, 0.0), Vec2::new(50.0, 100.0), 5.0));

    run(&mut world, 600);

    let body = &world.objects()[0];
    // Half-height above the floor, within the slop left by positional correction
    assert!((body.position().y - 600.0).abs() < 0.1, "box at {:?}", body.position());
    assert!((body.position().x - 400.0).abs() < 1e-6);
    assert!(body.velocity.y.abs() < 1e-3, "vy = {}", body.velocity.y);
    assert!(body.angle().abs() < 1e-6);
}

#[test]
fn circle_dropped_on_floor_comes_to_rest() {
    let mut world = PhysicsWorld::default();
    world.add_object(RigidBody::new_circle(Vec2::new(300.0, 0.0), 20.0, 1.0));

    run(&mut world, 600);

    let body = &world.objects()[0];
    assert!((body.position().y - 630.0).abs() < 0.1, "circle at {:?}", body.position());
    assert!(body.velocity.magnitude() < 1e-3);
}

#[test]
fn stacked_boxes_stay_upright() {
    let mut world = PhysicsWorld::default();
    world.add_object(RigidBody::new_box(Vec2::new(400.0, 550.0), Vec2::new(50.0, 100.0), 5.0));
    world.add_object(RigidBody::new_box(Vec2::new(400.0, 440.0), Vec2::new(50.0, 100.0), 5.0));

    run(&mut world, 600);

    let (lower, upper) = (&world.objects()[0], &world.objects()[1]);
    assert!((lower.position().y - 600.0).abs() < 0.5, "lower at {:?}", lower.position());
    assert!((upper.position().y - 500.0).abs() < 0.5, "upper at {:?}", upper.position());
    assert!(lower.angle().abs() < 1e-3 && upper.angle().abs() < 1e-3);
    // Gravity from the last sub-step is only partly cancelled by the pairwise passes
    assert!(lower.velocity.y.abs() < 10.0);
    assert!(upper.velocity.y.abs() < 10.0);
}

#[test]
fn static_bodies_never_move() {
    let mut world = PhysicsWorld::default();
    world.add_object(RigidBody::new_box(Vec2::new(400.0, 400.0), Vec2::new(300.0, 20.0), 0.0));
    world.add_object(RigidBody::new_circle(Vec2::new(200.0, 500.0), 40.0, 0.0));
    world.add_object(RigidBody::new_box(Vec2::new(400.0, 300.0), Vec2::new(40.0, 40.0), 2.0));
    world.add_object(RigidBody::new_circle(Vec2::new(205.0, 300.0), 15.0, 1.0));

    run(&mut world, 300);

    let ledge = &world.objects()[0];
    assert_eq!(ledge.position(), Vec2::new(400.0, 400.0));
    assert_eq!(ledge.velocity, Vec2::ZERO);
    assert_eq!(ledge.angular_velocity, 0.0);

    let post = &world.objects()[1];
    assert_eq!(post.position(), Vec2::new(200.0, 500.0));
    assert_eq!(post.velocity, Vec2::ZERO);

    // The dynamic box landed on the ledge
    let crate_box = &world.objects()[2];
    assert!((crate_box.position().y - 370.0).abs() < 0.1, "box at {:?}", crate_box.position());
}

#[test]
fn overlapping_circles_at_rest_separate_without_velocity() {
    let mut world = PhysicsWorld::default();
    world.set_gravity(Vec2::ZERO);
    let still = Material::new(0.0, 0.2, 0.99);
    world.add_object(RigidBody::new_circle(Vec2::new(390.0, 300.0), 20.0, 1.0).with_material(still));
    world.add_object(RigidBody::new_circle(Vec2::new(400.0, 300.0), 20.0, 1.0).with_material(still));

    world.update(FRAME).unwrap();

    let (a, b) = (&world.objects()[0], &world.objects()[1]);
    let separation = b.position().x - a.position().x;
    assert!(separation > 10.0);
    // Repeated passes push them apart to the slop
    assert!((separation - 40.0).abs() < 0.05, "separation = {}", separation);
    assert_eq!(a.position().y, 300.0);
    assert_eq!(a.velocity, Vec2::ZERO);
    assert_eq!(b.velocity, Vec2::ZERO);
}

#[test]
fn touching_circles_are_not_colliding() {
    let a = RigidBody::new_circle(Vec2::new(0.0, 0.0), 20.0, 1.0);
    let b = RigidBody::new_circle(Vec2::new(35.0, 0.0), 15.0, 1.0);
    assert!(check_collision(&a, BodyHandle::Object(0), &b, BodyHandle::Object(1)).is_none());
}

#[test]
fn axis_aligned_boxes_report_x_overlap() {
    let delta = 3.5;
    let a = RigidBody::new_box(Vec2::new(100.0, 100.0), Vec2::new(40.0, 40.0), 1.0);
    let b = RigidBody::new_box(Vec2::new(140.0 - delta, 105.0), Vec2::new(40.0, 40.0), 1.0);

    let m = check_collision(&a, BodyHandle::Object(0), &b, BodyHandle::Object(1)).expect("overlap");
    assert!((m.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
    assert!((m.depth - delta).abs() < EPSILON);
}

#[test]
fn static_mass_zero_is_exact() {
    for body in [
        RigidBody::new_box(Vec2::ZERO, Vec2::new(123.0, 4.5), 0.0),
        RigidBody::new_circle(Vec2::ZERO, 77.0, 0.0),
    ] {
        assert_eq!(body.inv_mass(), 0.0);
        assert_eq!(body.inv_inertia(), 0.0);
    }
}

#[test]
fn friction_slows_a_rolling_circle() {
    let mut world = PhysicsWorld::default();
    world.add_object(
        RigidBody::new_circle(Vec2::new(100.0, 630.0), 20.0, 1.0).with_velocity(Vec2::new(200.0, 0.0)),
    );

    run(&mut world, 60);

    let ball = &world.objects()[0];
    assert!(ball.velocity.x > 0.0 && ball.velocity.x < 150.0, "vx = {}", ball.velocity.x);
    // Clockwise on screen (positive in y-down coordinates) when rolling right
    assert!(ball.angular_velocity > 0.0);
    assert!((ball.position().y - 630.0).abs() < 0.1);
}

#[test]
fn mixed_bodies_stay_finite_and_above_floor() {
    let mut world = PhysicsWorld::default();
    for i in 0..12 {
        let position = Vec2::new(100.0 + i as f64 * 50.0, 100.0 + (i % 3) as f64 * 60.0);
        let body = if i % 2 == 1 {
            RigidBody::new_circle(position, 20.0, 1.0)
        } else {
            RigidBody::new_box(position, Vec2::new(40.0, 40.0), 2.0)
        };
        world.try_add_object(body).expect("spawn points are clear");
    }

    run(&mut world, 600);

    for body in world.objects() {
        assert!(body.position().is_finite() && body.velocity.is_finite());
        assert!(body.position().y < 650.0, "body sank to {:?}", body.position());
        assert!(body.position().x >= 0.0 && body.position().x <= 800.0);
    }
}

fn assert_settled_upright(world: &PhysicsWorld) {
    let body = &world.objects()[0];
    assert!((body.position().y - 600.0).abs() < 0.1, "box at {:?}", body.position());
    assert!(body.velocity.magnitude() < 0.05, "v = {:?}", body.velocity);
    assert!(body.angular_velocity.abs() < 1e-3, "w = {}", body.angular_velocity);
    assert!(body.angle().abs() < 0.01, "angle = {}", body.angle());
}

#[test]
fn tilted_box_dropped_on_floor_comes_to_rest() {
    let mut world = PhysicsWorld::new(800.0, 650.0);
    world.add_object(RigidBody::new_box(Vec2::new(400.0, 300.0), Vec2::new(50.0, 100.0), 5.0).with_angle(0.05));

    run(&mut world, 600);
    assert_settled_upright(&world);
}

#[test]
fn nearly_flat_box_on_floor_stops_rocking() {
    for angle in [0.002, -0.002, 0.3, -0.4] {
        let mut world = PhysicsWorld::new(800.0, 650.0);
        world.add_object(RigidBody::new_box(Vec2::new(400.0, 600.5), Vec2::new(50.0, 100.0), 5.0).with_angle(angle));

        run(&mut world, 1200);
        assert_settled_upright(&world);
    }
}

#[test]
fn overlapping_spawn_stays_bounded_at_high_iteration_counts() {
    // Free-fall speed from the spawn height to resting on the floor
    let fall_speed = (2.0 * 980.0 * (630.0 - 300.0_f64)).sqrt();

    for iterations in [15, 100, 500] {
        let mut world = PhysicsWorld::default();
        world.set_iterations(iterations);
        for i in 0..20 {
            let position = Vec2::new(371.5 + i as f64 * 3.0, 300.0);
            let body = if i % 2 == 1 {
                RigidBody::new_circle(position, 20.0, 1.0)
            } else {
                RigidBody::new_box(position, Vec2::new(40.0, 40.0), 2.0)
            };
            world.add_object(body);
        }

        let mut peak_speed = 0.0_f64;
        for _ in 0..120 {
            world.update(FRAME).expect("valid step");
            for body in world.objects() {
                assert!(body.position().is_finite() && body.velocity.is_finite());
                assert!(body.angular_velocity.is_finite());
                peak_speed = peak_speed.max(body.velocity.magnitude());
            }
        }

        // Separating the pile adds no energy beyond what gravity supplies
        assert!(peak_speed < fall_speed * 1.25, "{} iterations: peak speed {}", iterations, peak_speed);
        for body in world.objects() {
            assert!(body.position().y < 650.0, "body sank to {:?}", body.position());
            assert!(body.position().x >= 0.0 && body.position().x <= 800.0);
            assert!(body.velocity.magnitude() < 20.0, "{} iterations: v = {:?}", iterations, body.velocity);
        }
    }
}
