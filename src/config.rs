// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Print settings, loadable from a TOML file.
//!
//! ```toml
//! program_name = "vase"
//! print_speed = 0.08
//!
//! [placement]
//! origin_x = 1200.0
//! origin_y = 800.0
//! height_offset = 15.0
//!
//! [extrusion]
//! layer_height = 2.0
//! layer_width = 6.0
//! volume_per_rev = 1.26
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::krl::{self, ProgramError};
use crate::translate::Placement;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Extruded bead geometry and extruder displacement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extrusion {
    /// Layer height in mm.
    pub layer_height: f64,
    /// Bead width in mm.
    pub layer_width: f64,
    /// Extruder output in cm³ per revolution.
    pub volume_per_rev: f64,
}

impl Default for Extrusion {
    fn default() -> Self {
        Extrusion { layer_height: 1.0, layer_width: 5.0, volume_per_rev: 1.26 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name in the `DEF` line of the generated program.
    pub program_name: String,
    /// Path speed in m/s.
    pub print_speed: f64,
    pub placement: Placement,
    pub extrusion: Extrusion,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            program_name: "ofgen".into(),
            print_speed: 0.05,
            placement: Placement::default(),
            extrusion: Extrusion::default(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.into(), source })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse { path: path.into(), source })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn flow_correction(&self) -> Result<f64, ProgramError> {
        krl::flow_correction(self.extrusion.layer_height, self.extrusion.layer_width,
                             self.extrusion.volume_per_rev, self.print_speed)
    }
}
