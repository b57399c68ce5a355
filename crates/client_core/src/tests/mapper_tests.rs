use std::f32::consts::{FRAC_PI_4, FRAC_PI_8};

use super::*;

const CX: f32 = 100.0;
const CY: f32 = 100.0;
const R: f32 = 90.0;

fn at(distance: f32, angle: f32) -> Point {
    Point::new(CX + distance * angle.cos(), CY + distance * angle.sin())
}

fn map(point: Point) -> Option<Command> {
    map_touch(point, CX, CY, R)
}

#[test]
fn dead_center_is_standby() {
    assert_eq!(map(Point::new(100.0, 100.0)), Some(Command::Standby));
}

#[test]
fn inner_zone_ignores_angle() {
    for step in 0..16 {
        let angle = step as f32 * FRAC_PI_8;
        assert_eq!(map(at(29.0, angle)), Some(Command::Standby), "angle {angle}");
    }
}

#[test]
fn negative_coordinates_are_rejected() {
    assert_eq!(map(Point::new(-1.0, 50.0)), None);
    assert_eq!(map(Point::new(50.0, -0.5)), None);
    // The guard applies even when the center itself sits near the origin.
    assert_eq!(map_touch(Point::new(-1.0, 0.0), 0.0, 0.0, 90.0), None);
}

#[test]
fn straight_up_in_middle_zone_moves_forward() {
    assert_eq!(map(Point::new(100.0, 45.0)), Some(Command::MoveForward));
}

#[test]
fn middle_zone_starts_at_one_third_radius() {
    assert_eq!(map(Point::new(100.0, 70.0)), Some(Command::MoveForward));
    assert_eq!(map(Point::new(130.0, 100.0)), Some(Command::MoveRight));
}

#[test]
fn outer_zone_starts_at_two_thirds_radius() {
    assert_eq!(map(Point::new(100.0, 40.0)), Some(Command::FastForward));
    assert_eq!(map(Point::new(40.0, 100.0)), Some(Command::TurnLeft));
}

#[test]
fn edge_of_circle_and_beyond_map_to_nothing() {
    assert_eq!(map(Point::new(190.0, 100.0)), None);
    assert_eq!(map(Point::new(100.0, 195.0)), None);
    assert_eq!(map(Point::new(0.0, 0.0)), None);
}

#[test]
fn middle_zone_sector_centers() {
    assert_eq!(map(Point::new(145.0, 100.0)), Some(Command::MoveRight));
    assert_eq!(map(Point::new(100.0, 145.0)), Some(Command::MoveBack));
    assert_eq!(map(Point::new(100.0, 55.0)), Some(Command::MoveForward));
    assert_eq!(map(Point::new(55.0, 100.0)), Some(Command::MoveLeft));
}

#[test]
fn outer_zone_sector_centers() {
    assert_eq!(map(Point::new(175.0, 100.0)), Some(Command::TurnRight));
    assert_eq!(map(Point::new(100.0, 175.0)), Some(Command::FastBack));
    assert_eq!(map(Point::new(100.0, 25.0)), Some(Command::FastForward));
    assert_eq!(map(Point::new(25.0, 100.0)), Some(Command::TurnLeft));
}

#[test]
fn middle_zone_sector_boundaries() {
    let eps = 0.01;
    assert_eq!(map(at(45.0, FRAC_PI_4 - eps)), Some(Command::MoveRight));
    assert_eq!(map(at(45.0, FRAC_PI_4 + eps)), Some(Command::MoveBack));
    assert_eq!(map(at(45.0, 3.0 * FRAC_PI_4 - eps)), Some(Command::MoveBack));
    assert_eq!(map(at(45.0, 3.0 * FRAC_PI_4 + eps)), Some(Command::MoveLeft));
    assert_eq!(map(at(45.0, -FRAC_PI_4 - eps)), Some(Command::MoveForward));
    assert_eq!(map(at(45.0, -FRAC_PI_4 + eps)), Some(Command::MoveRight));
    assert_eq!(map(at(45.0, -3.0 * FRAC_PI_4 + eps)), Some(Command::MoveForward));
    assert_eq!(map(at(45.0, -3.0 * FRAC_PI_4 - eps)), Some(Command::MoveLeft));
}

#[test]
fn outer_zone_sector_boundaries() {
    let eps = 0.01;
    assert_eq!(map(at(75.0, FRAC_PI_4 - eps)), Some(Command::TurnRight));
    assert_eq!(map(at(75.0, FRAC_PI_4 + eps)), Some(Command::FastBack));
    assert_eq!(map(at(75.0, 3.0 * FRAC_PI_4 - eps)), Some(Command::FastBack));
    assert_eq!(map(at(75.0, 3.0 * FRAC_PI_4 + eps)), Some(Command::TurnLeft));
    assert_eq!(map(at(75.0, -FRAC_PI_4 - eps)), Some(Command::FastForward));
    assert_eq!(map(at(75.0, -FRAC_PI_4 + eps)), Some(Command::TurnRight));
    assert_eq!(map(at(75.0, -3.0 * FRAC_PI_4 + eps)), Some(Command::FastForward));
    assert_eq!(map(at(75.0, -3.0 * FRAC_PI_4 - eps)), Some(Command::TurnLeft));
}

#[test]
fn unmeasured_radius_maps_to_nothing() {
    assert_eq!(map_touch(Point::new(0.0, 0.0), 0.0, 0.0, 0.0), None);
    assert_eq!(map_touch(Point::new(10.0, 10.0), 10.0, 10.0, -5.0), None);
    assert_eq!(map_touch(Point::new(10.0, 10.0), 10.0, 10.0, f32::NAN), None);
}

#[test]
fn non_finite_touch_maps_to_nothing() {
    assert_eq!(map(Point::new(f32::NAN, 100.0)), None);
    assert_eq!(map(Point::new(f32::INFINITY, 100.0)), None);
}

#[test]
fn geometry_helper_uses_center_and_radius() {
    let geometry = ControlGeometry::new(200.0, 180.0);
    assert_eq!(
        map_touch_in(&geometry, Point::new(100.0, 90.0)),
        Some(Command::Standby)
    );
    assert_eq!(map_touch_in(&geometry, Point::new(195.0, 90.0)), None);
    assert_eq!(
        map_touch_in(&geometry, Point::new(170.0, 90.0)),
        Some(Command::TurnRight)
    );
}
