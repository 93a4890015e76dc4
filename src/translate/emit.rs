// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use serde::{Deserialize, Serialize};

use crate::ast::Point3;
use super::Instr;
use super::state::MotionState;

/// Where the print sits in the robot base frame.
///
/// Added to every emitted coordinate; the G-code is assumed to have its
/// origin at 0,0,0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub origin_x: f64,
    pub origin_y: f64,
    pub height_offset: f64,
}

impl Placement {
    pub fn new(origin_x: f64, origin_y: f64, height_offset: f64) -> Self {
        Placement { origin_x, origin_y, height_offset }
    }

    pub fn apply(&self, p: Point3) -> Point3 {
        Point3::new(p.x + self.origin_x, p.y + self.origin_y, p.z + self.height_offset)
    }
}

/// A motion waiting to be emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Linear(Point3),
    Arc { via: Point3, end: Point3 },
}

impl Segment {
    pub fn end(&self) -> Point3 {
        match *self {
            Segment::Linear(end) | Segment::Arc { end, .. } => end,
        }
    }
}

/// Whether a motion instruction has been emitted in this run yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    BeforeFirstMotion,
    AfterFirstMotion,
}

/// Turns segments into KRL instructions.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    placement: Placement,
}

impl Emitter {
    pub fn new(placement: Placement) -> Self {
        Emitter { placement }
    }

    /// Emit the instructions for one segment: an extruder trigger if the
    /// deposition state changes, then the motion itself.
    ///
    /// The first motion of a run is always a PTP to the segment's end point.
    pub fn emit(&self, phase: &mut Phase, state: &mut MotionState,
                extruding: bool, segment: Segment) -> Vec<Instr> {
        let mut out = Vec::with_capacity(2);
        if extruding != state.depositing {
            out.push(Instr::Extruder(extruding));
            state.depositing = extruding;
        }
        out.push(match (*phase, segment) {
            (Phase::BeforeFirstMotion, seg) => Instr::Ptp(self.placement.apply(seg.end())),
            (_, Segment::Linear(end)) => Instr::Lin(self.placement.apply(end)),
            (_, Segment::Arc { via, end }) =>
                Instr::Circ(self.placement.apply(via), self.placement.apply(end)),
        });
        *phase = Phase::AfterFirstMotion;
        out
    }
}
