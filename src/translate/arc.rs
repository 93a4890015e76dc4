// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Reconstruction of G2/G3 arcs for three-point circular motion.

use std::f64::consts::PI;
use strum_macros::Display;

use crate::ast::{Command, Letter, MotionLine, Point2, Point3};
use super::state::Move;

/// Words an arc line must carry.
pub const ARC_WORDS: [Letter; 4] = [Letter::I, Letter::J, Letter::X, Letter::Y];

/// Rotation sense of an arc, seen from above the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Direction {
    Cw,
    Ccw,
}

impl Direction {
    pub fn from_command(cmd: Command) -> Option<Self> {
        match cmd {
            Command::ArcCw => Some(Direction::Cw),
            Command::ArcCcw => Some(Direction::Ccw),
            _ => None
        }
    }
}

/// A resolved arc.  All angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    pub start: Point3,
    pub end: Point3,
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Angle travelled from start to end in `direction`, in `[0, 2π)`.
    pub sweep: f64,
    pub direction: Direction,
    /// Point halfway along the sweep, at half the height change.
    pub via: Point3,
}

/// Wrap an angle into `(-π, π]`.
fn wrap(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

impl ArcSegment {
    /// Resolve the arc from `start` to `end` around `start + (i, j)`.
    pub fn resolve(start: Point3, end: Point3, i: f64, j: f64, direction: Direction) -> Self {
        let center = Point2::new(start.x + i, start.y + j);
        let radius = i.hypot(j);
        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let end_angle = (end.y - center.y).atan2(end.x - center.x);

        let raw = match direction {
            Direction::Cw => start_angle - end_angle,
            Direction::Ccw => end_angle - start_angle,
        };
        let mut sweep = wrap(raw);
        if sweep < 0. {
            sweep += 2. * PI;
        }
        let via_angle = match direction {
            Direction::Cw => start_angle - sweep / 2.,
            Direction::Ccw => start_angle + sweep / 2.,
        };
        let via = Point3::new(center.x + radius * via_angle.cos(),
                              center.y + radius * via_angle.sin(),
                              end.z - (end.z - start.z) / 2.);

        ArcSegment { start, end, center, radius, start_angle, end_angle, sweep, direction, via }
    }

    /// Resolve the arc described by an arc line and its move.
    ///
    /// On failure, returns the required words missing from the line.
    pub fn from_line(line: &MotionLine, mv: Move) -> Result<Self, Vec<Letter>> {
        let direction = match Direction::from_command(line.command) {
            Some(dir) => dir,
            None => return Err(vec![]),
        };
        match (line.i, line.j, line.x, line.y) {
            (Some(i), Some(j), Some(_), Some(_)) =>
                Ok(Self::resolve(mv.start, mv.end, i, j, direction)),
            _ => Err(line.missing(&ARC_WORDS)),
        }
    }

    /// Approximate the arc by `steps` segments, for previews.
    ///
    /// The returned points include both ends; height changes linearly with
    /// the swept angle.
    pub fn points(&self, steps: usize) -> Vec<Point3> {
        let steps = steps.max(1);
        let signed = match self.direction {
            Direction::Cw => -self.sweep,
            Direction::Ccw => self.sweep,
        };
        let mut pts = Vec::with_capacity(steps + 1);
        for n in 0..=steps {
            let t = n as f64 / steps as f64;
            let angle = self.start_angle + signed * t;
            pts.push(Point3::new(self.center.x + self.radius * angle.cos(),
                                 self.center.y + self.radius * angle.sin(),
                                 self.start.z + (self.end.z - self.start.z) * t));
        }
        // land exactly on the programmed end point
        if let Some(last) = pts.last_mut() {
            *last = self.end;
        }
        pts
    }
}
