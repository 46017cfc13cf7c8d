//! Search limits - the immutable configuration for a selection run
//!
//! All per-gear and system-level thresholds live in one value that is handed
//! to the enumerator and filter at construction. Limits load in layers:
//! built-in defaults, then the global limits file, then an explicit
//! `--limits` file, then individual CLI overrides.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating limits
#[derive(Debug, Error, Diagnostic)]
pub enum LimitsError {
    #[error("failed to read limits file {path}")]
    #[diagnostic(code(ddt::limits::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid limits file {path}: {message}")]
    #[diagnostic(
        code(ddt::limits::parse),
        help("limits files are YAML maps of limit name to value, e.g. `min_ratio: 3.4`")
    )]
    Parse { path: String, message: String },

    #[error("invalid limit: {0}")]
    #[diagnostic(code(ddt::limits::value))]
    Invalid(String),
}

/// Per-gear and system-level limits for the reduction search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchLimits {
    /// Minimum usable bore diameter (mm)
    pub min_bore: u32,

    /// Maximum tooth count on any one gear
    pub max_teeth: u32,

    /// Maximum pitch diameter of any one gear (mm)
    pub max_gear_length: f64,

    /// Minimum gear thickness (catalog units)
    pub min_thickness: f64,

    /// Factor-of-safety floor per gear
    pub min_fos: f64,

    /// Factor-of-safety ceiling per gear
    pub max_fos: f64,

    /// Lower bound on total reduction (exclusive)
    pub min_ratio: f64,

    /// Upper bound on total reduction (exclusive)
    pub max_ratio: f64,

    /// Maximum total mass of all four gears (kg)
    pub max_mass: f64,

    /// Minimum center-to-center span of the train (mm)
    pub min_length: f64,

    /// Maximum CVT reduction upstream of the gearbox
    pub max_cvt: f64,

    /// Maximum engine torque (Nm)
    pub engine_torque: f64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            min_bore: 18,
            max_teeth: 70,
            max_gear_length: 5.0 * 25.4,
            min_thickness: 2.0,
            min_fos: 1.3,
            max_fos: 2.25,
            min_ratio: 3.4,
            max_ratio: 3.6,
            max_mass: 4.0,
            min_length: 7.0 * 25.4,
            max_cvt: 3.9,
            engine_torque: 25.0,
        }
    }
}

impl SearchLimits {
    /// Load limits from defaults plus the global limits file, if one exists
    ///
    /// A missing or unreadable global file is not an error; the defaults are
    /// used unchanged. An explicit file passed to [`SearchLimits::load_file`]
    /// is stricter.
    pub fn load() -> Self {
        if let Some(path) = Self::global_limits_path() {
            if path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&path) {
                    if let Ok(limits) = serde_yml::from_str::<SearchLimits>(&contents) {
                        return limits;
                    }
                }
            }
        }
        SearchLimits::default()
    }

    /// Load limits from an explicit YAML file
    ///
    /// Missing fields fall back to the defaults; unknown fields and
    /// unreadable files are hard errors.
    pub fn load_file(path: &Path) -> Result<Self, LimitsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LimitsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let limits: SearchLimits =
            serde_yml::from_str(&contents).map_err(|e| LimitsError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        limits.validate()?;
        Ok(limits)
    }

    /// Get the path to the global limits file
    fn global_limits_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ddt")
            .map(|dirs| dirs.config_dir().join("limits.yaml"))
    }

    /// Check that the limits describe a solvable search
    pub fn validate(&self) -> Result<(), LimitsError> {
        if !self.engine_torque.is_finite() || self.engine_torque <= 0.0 {
            return Err(LimitsError::Invalid(format!(
                "engine_torque must be positive, got {}",
                self.engine_torque
            )));
        }
        if !self.max_cvt.is_finite() || self.max_cvt <= 0.0 {
            return Err(LimitsError::Invalid(format!(
                "max_cvt must be positive, got {}",
                self.max_cvt
            )));
        }
        if !self.min_fos.is_finite() || self.min_fos <= 0.0 {
            return Err(LimitsError::Invalid(format!(
                "min_fos must be positive, got {}",
                self.min_fos
            )));
        }
        if self.max_fos < self.min_fos {
            return Err(LimitsError::Invalid(format!(
                "max_fos ({}) must be at least min_fos ({})",
                self.max_fos, self.min_fos
            )));
        }
        if self.max_ratio <= self.min_ratio {
            return Err(LimitsError::Invalid(format!(
                "ratio band is empty: ({}, {})",
                self.min_ratio, self.max_ratio
            )));
        }
        if self.min_thickness <= 0.0 {
            return Err(LimitsError::Invalid(format!(
                "min_thickness must be positive, got {}",
                self.min_thickness
            )));
        }
        if self.max_gear_length <= 0.0 {
            return Err(LimitsError::Invalid(format!(
                "max_gear_length must be positive, got {}",
                self.max_gear_length
            )));
        }
        if self.max_mass <= 0.0 {
            return Err(LimitsError::Invalid(format!(
                "max_mass must be positive, got {}",
                self.max_mass
            )));
        }
        Ok(())
    }

    /// Worst-case torque entering gear 1: engine torque through the CVT
    pub fn max_applied_torque(&self) -> f64 {
        self.engine_torque * self.max_cvt
    }
}
