// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use proptest::prelude::*;

use gcode2krl::ast::{Letter, Point2, Point3};
use gcode2krl::parse::parse_line;
use gcode2krl::translate::{ArcSegment, Direction, Move};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn on_circle(arc: &ArcSegment, p: Point3) -> bool {
    let d = Point2::new(p.x, p.y).distance(arc.center);
    (d - arc.radius).abs() <= 1e-9 * arc.radius.max(1.)
}

#[test]
fn test_clockwise_quarter() {
    // from 90° to 0° around the origin
    let r = 10.;
    let arc = ArcSegment::resolve(Point3::new(0., r, 0.), Point3::new(r, 0., 0.),
                                  0., -r, Direction::Cw);
    assert_eq!(arc.center, Point2::new(0., 0.));
    assert!(close(arc.radius, r));
    assert!(close(arc.start_angle, FRAC_PI_2));
    assert!(close(arc.end_angle, 0.));
    assert!(close(arc.sweep, FRAC_PI_2));
    assert!(close(arc.via.x, r * FRAC_PI_4.cos()));
    assert!(close(arc.via.y, r * FRAC_PI_4.sin()));
}

#[test]
fn test_counter_clockwise_half() {
    // from 0° to 180° around the origin
    let r = 4.;
    let arc = ArcSegment::resolve(Point3::new(r, 0., 0.), Point3::new(-r, 0., 0.),
                                  -r, 0., Direction::Ccw);
    assert!(close(arc.sweep, PI));
    assert!(close(arc.via.x, 0.));
    assert!(close(arc.via.y, r));
}

#[test]
fn test_long_way_round() {
    // clockwise from 0° to 90° sweeps three quarters
    let arc = ArcSegment::resolve(Point3::new(10., 0., 0.), Point3::new(0., 10., 0.),
                                  -10., 0., Direction::Cw);
    assert!(close(arc.sweep, 3. * FRAC_PI_2));
    assert!(close(arc.via.x, -10. * FRAC_PI_4.cos()));
    assert!(close(arc.via.y, -10. * FRAC_PI_4.sin()));

    // the same end points counter-clockwise take the short way
    let arc = ArcSegment::resolve(Point3::new(10., 0., 0.), Point3::new(0., 10., 0.),
                                  -10., 0., Direction::Ccw);
    assert!(close(arc.sweep, FRAC_PI_2));
    assert!(arc.via.x > 0. && arc.via.y > 0.);
}

#[test]
fn test_via_height() {
    let arc = ArcSegment::resolve(Point3::new(5., 0., 1.), Point3::new(0., 5., 3.),
                                  -5., 0., Direction::Ccw);
    assert!(close(arc.via.z, 2.));
}

#[test]
fn test_from_line() {
    let mv = Move { start: Point3::new(0., 0., 0.), end: Point3::new(10., 0., 0.) };

    let line = parse_line(1, "G2 X10 Y0 I5 J0").unwrap().unwrap();
    let arc = ArcSegment::from_line(&line, mv).unwrap();
    assert_eq!(arc.direction, Direction::Cw);
    assert_eq!(arc.center, Point2::new(5., 0.));

    let line = parse_line(1, "G3 X10 I5").unwrap().unwrap();
    assert_eq!(ArcSegment::from_line(&line, mv).unwrap_err(), vec![Letter::J, Letter::Y]);
}

#[test]
fn test_points() {
    let arc = ArcSegment::resolve(Point3::new(0., 10., 0.), Point3::new(10., 0., 2.),
                                  0., -10., Direction::Cw);
    let pts = arc.points(8);
    assert_eq!(pts.len(), 9);
    assert!(close(pts[0].x, 0.) && close(pts[0].y, 10.));
    assert_eq!(pts[8], Point3::new(10., 0., 2.));
    assert!(close(pts[4].z, 1.));
    // clockwise from the top: x grows, y shrinks
    assert!(pts.windows(2).all(|w| w[1].x > w[0].x - 1e-9 && w[1].y < w[0].y + 1e-9));
    assert!(pts.iter().all(|&p| on_circle(&arc, p)));
}

proptest! {
    #[test]
    fn via_lies_on_circle(
        sx in -300.0..300.0f64,
        sy in -300.0..300.0f64,
        i in -100.0..100.0f64,
        j in -100.0..100.0f64,
        end_angle in -PI..PI,
        cw in any::<bool>(),
    ) {
        let center = Point2::new(sx + i, sy + j);
        let r = i.hypot(j);
        let end = Point3::new(center.x + r * end_angle.cos(), center.y + r * end_angle.sin(), 0.);
        let dir = if cw { Direction::Cw } else { Direction::Ccw };
        let arc = ArcSegment::resolve(Point3::new(sx, sy, 0.), end, i, j, dir);
        prop_assert!(arc.sweep >= 0. && arc.sweep < 2. * PI + 1e-12);
        prop_assert!(on_circle(&arc, arc.via));
    }
}
