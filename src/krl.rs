// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! KRL program files: the fixed header and footer around a translated body,
//! the extruder flow correction constant, and file naming.

use std::f64::consts::PI;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Extruder speed that maps to full analog output.
pub const MAX_EXTRUDER_RPM: f64 = 150.0;

/// Extension the controller expects for program sources.
pub const SOURCE_EXTENSION: &str = "src";

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("invalid flow parameter {name}: {value}")]
    InvalidFlowParameter { name: &'static str, value: f64 },
    #[error("cannot write program {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flow correction constant for the extruder's analog output.
///
/// The extruded cross section is a slot of `layer_height` × `layer_width`
/// (mm) with round ends.  At `speed` (m/s) this needs a volume per minute
/// which, divided by `volume_per_rev` (cm³/rev), gives the extruder RPM.  The
/// RPM is mapped onto 0..1 of [`MAX_EXTRUDER_RPM`] and divided by the speed,
/// since the controller multiplies it by the actual velocity.
pub fn flow_correction(layer_height: f64, layer_width: f64, volume_per_rev: f64,
                       speed: f64) -> Result<f64, ProgramError> {
    let check = |name, value: f64| if value > 0. && value.is_finite() {
        Ok(value)
    } else {
        Err(ProgramError::InvalidFlowParameter { name, value })
    };
    let h = check("layer height", layer_height)?;
    let w = check("layer width", layer_width)?;
    let vol_rev = check("volume per revolution", volume_per_rev)?;
    let speed = check("speed", speed)?;

    let surface = h * w - (h * h - PI * (h / 2.) * (h / 2.));
    let mm_per_min = speed * 60. * 1000.;
    let cm3_per_min = mm_per_min * surface / 1000.;
    let rpm = cm3_per_min / vol_rev;
    Ok((rpm / MAX_EXTRUDER_RPM).clamp(0., 1.) / speed)
}

/// Turn a user supplied destination into a valid program path.
///
/// Only the final path segment is touched: everything from its first dot is
/// replaced by the `.src` extension, and hyphens become underscores.
pub fn save_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default().replace('-', "_");
    path.with_file_name(format!("{}.{}", stem, SOURCE_EXTENSION))
}

/// A complete KRL program.
#[derive(Debug, Clone, PartialEq)]
pub struct KrlProgram {
    pub name: String,
    pub flow_correction: f64,
    /// Path velocity `$VEL.CP` in m/s.
    pub cp_velocity: f64,
    pub body: Vec<String>,
}

impl KrlProgram {
    pub fn new(name: impl Into<String>, flow_correction: f64, cp_velocity: f64,
               body: Vec<String>) -> Self {
        KrlProgram { name: name.into(), flow_correction, cp_velocity, body }
    }

    /// Write the program to the sanitized form of `path`, replacing any
    /// existing file, and return the path actually written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, ProgramError> {
        let path = save_path(path);
        fs::write(&path, self.to_string())
            .map_err(|source| ProgramError::Io { path: path.clone(), source })?;
        info!(path = %path.display(), lines = self.body.len(), "program written");
        Ok(path)
    }
}

impl Display for KrlProgram {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "DEF {}()", self.name)?;
        writeln!(f, "GLOBAL INTERRUPT DECL 3 WHEN $STOPMESS==TRUE DO IR_STOPM ( )")?;
        writeln!(f, "INTERRUPT ON 3")?;
        writeln!(f, "BAS (#INITMOV,0 )")?;
        writeln!(f, "ANOUT ON AO_EXTRUDER_RPM = FLOW_CORRECTION * $VEL_ACT +0.0 DELAY=-0.2")?;
        writeln!(f, "FLOW_CORRECTION = {:.3}", self.flow_correction)?;
        writeln!(f, "$BWDSTART = FALSE")?;
        writeln!(f, "PDAT_ACT = {{VEL 15,ACC 100,APO_DIST 50}}")?;
        writeln!(f, "BAS(#PTP_DAT)")?;
        writeln!(f, "FDAT_ACT = {{TOOL_NO 6,BASE_NO 0,IPO_FRAME #BASE}}")?;
        writeln!(f, "BAS(#FRAMES)")?;
        writeln!(f, "BAS (#VEL_PTP,15)")?;
        // safe home pose before the first programmed motion
        writeln!(f, "PTP  {{A1 5,A2 -90,A3 100,A4 5,A5 -10,A6 -5,E1 0,E2 0,E3 0,E4 0}}")?;
        writeln!(f, "$VEL.CP={:.2}", self.cp_velocity)?;
        writeln!(f, "$ADVANCE=3")?;
        for line in &self.body {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "END")
    }
}
