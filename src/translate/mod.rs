// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

mod arc;
mod emit;
mod error;
mod state;

use std::f64::consts::PI;
use std::fmt;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::ast::*;
use crate::parse::parse_line;

pub use self::arc::*;
pub use self::emit::*;
pub use self::error::*;
pub use self::state::*;

/// A KRL instruction together with the G-code line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub gcode_line: usize,
    pub instr: Instr,
}

/// The KRL instructions the translator produces.
///
/// Coordinates are already shifted into the robot base frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// Extruder on/off trigger at the start of the next motion.
    Extruder(bool),
    /// Point-to-point move with full pose; only used for the first motion.
    Ptp(Point3),
    /// Continuous linear move.
    Lin(Point3),
    /// Circular move through a via point to an end point.
    Circ(Point3, Point3),
}

// Fixed tool orientation (A, B, C) of every pose.
const ORIENTATION: &str = "A 0, B 90, C 0";

/// Preview segments per full circle of arc sweep.
pub const ARC_RESOLUTION: f64 = 20.;

impl Instr {
    pub fn is_motion(&self) -> bool {
        !matches!(self, Instr::Extruder(_))
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instr::Extruder(on) =>
                write!(f, "TRIGGER WHEN DISTANCE = 0 DELAY = 0 DO O_EXTRUDER_START = {}",
                       if *on { "TRUE" } else { "FALSE" }),
            Instr::Ptp(p) =>
                write!(f, "PTP {{X {:.1}, Y {:.1}, Z {:.1}, {}, E1 0, E2 0, E3 0, E4 0, \
                           S 'B 110'}} C_PTP", p.x, p.y, p.z, ORIENTATION),
            Instr::Lin(p) =>
                write!(f, "LIN{{ X {:.1}, Y {:.1}, Z {:.1}, {} }} C_DIS",
                       p.x, p.y, p.z, ORIENTATION),
            Instr::Circ(via, p) =>
                write!(f, "CIRC {{ X {:.1}, Y {:.1}, Z {:.1}}},{{ X {:.1}, Y {:.1}, Z {:.1}, {}}} C_DIS",
                       via.x, via.y, via.z, p.x, p.y, p.z, ORIENTATION),
        }
    }
}

/// Everything a translation run produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationOutput {
    pub instructions: Vec<Instruction>,
    /// Input lines that produced at least one instruction, verbatim.
    pub filtered_lines: Vec<String>,
    /// End point of every emitted motion, in the G-code frame.
    pub path: Vec<Point3>,
    /// Via points of emitted circular moves, in the G-code frame.
    pub via_points: Vec<Point3>,
    /// Tessellation of every emitted circular move, start to end.
    pub arc_paths: Vec<Vec<Point3>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Data handed to previews and viewers.
#[derive(Debug, Serialize)]
pub struct PreviewData<'a> {
    pub path: &'a [Point3],
    pub via_points: &'a [Point3],
    pub arc_paths: &'a [Vec<Point3>],
    pub gcode: &'a [String],
    pub krl: Vec<String>,
    pub diagnostics: &'a [Diagnostic],
}

impl TranslationOutput {
    /// The program body, one KRL line per instruction.
    pub fn krl_lines(&self) -> Vec<String> {
        self.instructions.iter().map(|i| i.instr.to_string()).collect()
    }

    pub fn motion_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.instr.is_motion()).count()
    }

    pub fn arc_errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_arc_error())
    }

    pub fn preview(&self) -> PreviewData<'_> {
        PreviewData {
            path: &self.path,
            via_points: &self.via_points,
            arc_paths: &self.arc_paths,
            gcode: &self.filtered_lines,
            krl: self.krl_lines(),
            diagnostics: &self.diagnostics,
        }
    }
}

/// The Translator turns G-code lines into KRL instructions, tracking sticky
/// coordinates and the extruder state from line to line.
///
/// A translator is consumed by a run, so every run starts at the origin with
/// the extruder off and no motion emitted.  Translation is a blocking batch
/// job; large files should be handled off any interactive thread.
pub struct Translator {
    emitter: Emitter,
    state: MotionState,
    phase: Phase,
    output: TranslationOutput,
    motion_lines: usize,
}

impl Translator {
    pub fn new(placement: Placement) -> Self {
        Translator {
            emitter: Emitter::new(placement),
            state: MotionState::new(),
            phase: Phase::default(),
            output: TranslationOutput::default(),
            motion_lines: 0,
        }
    }

    /// Translate `lines` in order.
    ///
    /// A malformed number aborts the run; everything else is reported in
    /// the diagnostics of the returned output.
    pub fn translate<'a, I>(mut self, lines: I) -> Result<TranslationOutput, TranslateError>
    where I: IntoIterator<Item = &'a str>
    {
        let mut count = 0;
        for (n, text) in lines.into_iter().enumerate() {
            self.translate_line(n + 1, text)?;
            count += 1;
        }
        if self.motion_lines == 0 {
            warn!("no motion lines to translate");
            self.output.diagnostics.push(Diagnostic { lineno: 0, kind: DiagnosticKind::EmptyInput });
        }
        info!(lines = count,
              instructions = self.output.instructions.len(),
              diagnostics = self.output.diagnostics.len(),
              "translation finished");
        Ok(self.output)
    }

    // -- private API --

    fn translate_line(&mut self, lineno: usize, text: &str) -> Result<(), TranslateError> {
        let line = match parse_line(lineno, text)? {
            Some(line) => line,
            None => {
                if !text.trim().is_empty() {
                    debug!(lineno, text, "discarded line");
                    self.diagnose(lineno, DiagnosticKind::Discarded(text.into()));
                }
                return Ok(());
            }
        };

        let mv = self.state.advance(&line);
        let mut arc = None;

        let segment = match line.command {
            Command::Move => {
                self.motion_lines += 1;
                let planar = line.x.is_some() && line.y.is_some();
                // a height-only move repeating the current height is a no-op
                if planar || (line.is_z_only() && mv.changes_height()) {
                    Some(Segment::Linear(mv.end))
                } else {
                    None
                }
            }
            Command::ArcCw | Command::ArcCcw => {
                self.motion_lines += 1;
                match ArcSegment::from_line(&line, mv) {
                    Ok(resolved) => {
                        let segment = Segment::Arc { via: resolved.via, end: resolved.end };
                        arc = Some(resolved);
                        Some(segment)
                    }
                    Err(missing) => {
                        warn!(lineno, ?missing, "parameters for arc not found");
                        self.diagnose(lineno, DiagnosticKind::ArcParameterMissing { missing });
                        None
                    }
                }
            }
            Command::Ignored => {
                debug!(lineno, token = %line.token, "no-op command");
                None
            }
            Command::Unrecognized => None,
        };

        let processed = segment.is_some();
        if let Some(segment) = segment {
            let instrs = self.emitter.emit(&mut self.phase, &mut self.state,
                                           line.extruding, segment);
            for instr in instrs {
                if let (Instr::Circ(..), Some(arc)) = (&instr, &arc) {
                    let steps = (ARC_RESOLUTION * arc.sweep / (2. * PI)).ceil() as usize;
                    self.output.via_points.push(arc.via);
                    self.output.arc_paths.push(arc.points(steps));
                }
                self.output.instructions.push(Instruction { gcode_line: lineno, instr });
            }
            self.output.path.push(segment.end());
            self.output.filtered_lines.push(text.to_string());
        }
        trace!(lineno, command = %line.command, processed, position = %self.state.position, "{}", text);
        Ok(())
    }

    fn diagnose(&mut self, lineno: usize, kind: DiagnosticKind) {
        self.output.diagnostics.push(Diagnostic { lineno, kind });
    }
}

/// Translate a whole G-code text.
pub fn translate(input: &str, placement: Placement) -> Result<TranslationOutput, TranslateError> {
    Translator::new(placement).translate(input.lines())
}
