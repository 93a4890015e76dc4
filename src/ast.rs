// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Formatter};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// All motion lines parsed from one input file.
#[derive(Debug)]
pub struct Program {
    pub filename: String,
    pub lines: Vec<MotionLine>,
}

/// One classified input line, with the parameter words we care about.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionLine {
    /// 1-based line number in the input.
    pub lineno: usize,
    /// The normalized command word, e.g. `G1` or `M104`.
    pub token: String,
    pub command: Command,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub i: Option<f64>,
    pub j: Option<f64>,
    /// Presence of an `E` word; its value is never looked at.
    pub extruding: bool,
}

/// Classification of a motion line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// G0 and G1 alike.
    Move,
    ArcCw,
    ArcCcw,
    /// A command that is recognized but has nothing to translate (G21).
    Ignored,
    Unrecognized,
}

/// Parameter letters the translator interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
         Serialize, Deserialize)]
pub enum Letter {
    X, Y, Z,
    I, J,
    E,
}

/// A point in the G-code (or robot base) frame, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    pub fn distance(&self, other: Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl MotionLine {
    pub fn new(lineno: usize, token: impl Into<String>, command: Command) -> Self {
        MotionLine {
            lineno,
            token: token.into(),
            command,
            x: None,
            y: None,
            z: None,
            i: None,
            j: None,
            extruding: false,
        }
    }

    pub fn get(&self, letter: Letter) -> Option<f64> {
        match letter {
            Letter::X => self.x,
            Letter::Y => self.y,
            Letter::Z => self.z,
            Letter::I => self.i,
            Letter::J => self.j,
            Letter::E => None,
        }
    }

    pub fn has(&self, letter: Letter) -> bool {
        match letter {
            Letter::E => self.extruding,
            _ => self.get(letter).is_some(),
        }
    }

    /// True if this line only changes the height.
    pub fn is_z_only(&self) -> bool {
        self.z.is_some() && self.x.is_none() && self.y.is_none()
    }

    /// Letters among `letters` that are absent on this line.
    pub fn missing(&self, letters: &[Letter]) -> Vec<Letter> {
        letters.iter().copied().filter(|&l| !self.has(l)).collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for MotionLine {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.token)?;
        for &letter in &[Letter::X, Letter::Y, Letter::Z, Letter::I, Letter::J] {
            if let Some(v) = self.get(letter) {
                write!(f, " {}{}", letter, v)?;
            }
        }
        if self.extruding {
            write!(f, " E")?;
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Command::Move => "move",
            Command::ArcCw => "clockwise arc",
            Command::ArcCcw => "counter-clockwise arc",
            Command::Ignored => "no-op",
            Command::Unrecognized => "unrecognized",
        })
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
