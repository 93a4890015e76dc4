// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Translation of layered 3D-printing G-code into KUKA KRL motion programs.
//!
//! The input is slicer output (PrusaSlicer, optionally post-processed by
//! ArcWelder) made of `G0`/`G1` moves and `G2`/`G3` arcs, with `E` words
//! marking material deposition.  The output is a KRL program body of `PTP`,
//! `LIN` and `CIRC` motions, with extruder triggers wherever deposition
//! starts or stops.
//!
//! ## Basic usage
//!
//! Use `gcode2krl::translate::translate` to get the program body, then wrap
//! it into a complete program with `gcode2krl::krl::KrlProgram`.
//!
//! ```rust,no_run
//! use std::{env, fs};
//! use gcode2krl::config::Settings;
//! use gcode2krl::krl::KrlProgram;
//! use gcode2krl::translate::translate;
//!
//! fn main() {
//!     let filename = env::args().nth(1).unwrap();
//!     let input = fs::read_to_string(&filename).unwrap();
//!     let settings = Settings::default();
//!
//!     match translate(&input, settings.placement) {
//!         Err(e) => eprintln!("Translation error: {}", e),
//!         Ok(out) => {
//!             let fc = settings.flow_correction().unwrap();
//!             let prog = KrlProgram::new("ofgen", fc, settings.print_speed, out.krl_lines());
//!             print!("{}", prog);
//!         }
//!     }
//! }
//! ```
//!
//! ## Unsupported features
//!
//! Only `G0`-`G3` and the parameter words X, Y, Z, I, J and E are
//! interpreted.  Arcs are assumed to lie in the XY plane; the `E` value is
//! only checked for presence.

pub mod ast;
pub mod config;
pub mod krl;
pub mod parse;
pub mod translate;

// internal helpers
pub(crate) mod util;
