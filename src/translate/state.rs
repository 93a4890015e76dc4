// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::ast::{MotionLine, Point3};

/// Running machine state of one translation run.
///
/// Coordinates are sticky: an axis keeps its value until a line sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionState {
    pub position: Point3,
    /// Position before the line currently being processed.
    pub previous: Point3,
    /// Whether an extruder start trigger is in effect.
    pub depositing: bool,
}

/// Start and end of the move described by one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub start: Point3,
    pub end: Point3,
}

impl Move {
    pub fn changes_height(&self) -> bool {
        self.start.z != self.end.z
    }
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the axis words of `line`.
    pub fn advance(&mut self, line: &MotionLine) -> Move {
        self.previous = self.position;
        if let Some(x) = line.x { self.position.x = x; }
        if let Some(y) = line.y { self.position.y = y; }
        if let Some(z) = line.z { self.position.z = z; }
        Move { start: self.previous, end: self.position }
    }
}
