use std::f64::consts::{FRAC_PI_2, PI};

use asteroids::vector::Vector2;

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn from_angle_is_unit_length() {
    for i in 0..16 {
        let v = Vector2::from_angle(i as f64 * PI / 8.0);
        assert!(close(v.length(), 1.0));
    }
}

#[test]
fn from_angle_points_along_heading() {
    let v = Vector2::from_angle(FRAC_PI_2);
    assert!(close(v.x, 0.0));
    assert!(close(v.y, 1.0));
    assert!(close(v.angle(), FRAC_PI_2));
}

#[test]
fn scale_multiplies_magnitude() {
    let v = Vector2::from_angle(0.3).scale(5.0);
    assert!(close(v.length(), 5.0));
    assert!(close(v.angle(), 0.3));
}

#[test]
fn rotate_in_place_keeps_magnitude() {
    let mut v = Vector2::new(3.0, 4.0);
    v.rotate(FRAC_PI_2);
    assert!(close(v.x, -4.0));
    assert!(close(v.y, 3.0));
    assert!(close(v.length(), 5.0));
}

#[test]
fn add_and_distance() {
    let mut a = Vector2::new(1.0, 2.0);
    a += Vector2::new(2.0, 2.0);
    assert_eq!(a, Vector2::new(3.0, 4.0));
    assert!(close(a.distance_squared(&Vector2::ZERO), 25.0));
}

#[test]
fn wrap_keeps_points_inside_the_world() {
    let mut v = Vector2::new(-1.0, 551.0);
    v.wrap(550.0);
    assert!(close(v.x, 549.0));
    assert!(close(v.y, 1.0));

    let mut edge = Vector2::new(550.0, 0.0);
    edge.wrap(550.0);
    assert!(close(edge.x, 0.0));
}
