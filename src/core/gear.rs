//! Gear records and the per-gear eligibility filter

use serde::{Deserialize, Serialize};

use crate::core::limits::SearchLimits;

/// One catalog gear
///
/// Built from a validated catalog row at the input boundary. Every `Gear`
/// handed to the search core has passed both the degenerate-value checks
/// ([`Gear::validate`]) and the eligibility filter ([`Gear::is_eligible`]).
///
/// Each gear ships with two selectable bore diameters; `weight1`/`weight2`
/// are the catalog masses when mounted at `bore1`/`bore2` respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    /// Tooth count
    pub teeth: u32,

    /// Axial thickness at catalog width (catalog units)
    pub thickness: f64,

    /// Catalog identifier
    pub id: String,

    /// Allowable torque at full catalog thickness (Nm)
    pub rated_torque: f64,

    /// First selectable bore diameter (mm); 0 means not offered
    pub bore1: u32,

    /// Second selectable bore diameter (mm); 0 means not offered
    pub bore2: u32,

    /// Mass when mounted at `bore1` (kg)
    pub weight1: f64,

    /// Mass when mounted at `bore2` (kg)
    pub weight2: f64,

    /// Pitch diameter (mm)
    pub pitch_diameter: f64,

    /// Catalog form factor designation, passed through to the report
    pub form_factor: String,
}

impl Gear {
    /// Check for degenerate catalog data that the math downstream cannot
    /// tolerate
    ///
    /// A gear failing this check is a data error, not an ineligible part:
    /// zero teeth or zero thickness would divide by zero in the assembly
    /// model, so these abort the batch at the catalog boundary.
    pub fn validate(&self) -> Result<(), String> {
        if self.teeth == 0 {
            return Err("tooth count is zero".to_string());
        }
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(format!("thickness must be positive, got {}", self.thickness));
        }
        if !self.rated_torque.is_finite() || self.rated_torque <= 0.0 {
            return Err(format!(
                "rated torque must be positive, got {}",
                self.rated_torque
            ));
        }
        if !self.pitch_diameter.is_finite() || self.pitch_diameter <= 0.0 {
            return Err(format!(
                "pitch diameter must be positive, got {}",
                self.pitch_diameter
            ));
        }
        if !self.weight1.is_finite() || self.weight1 < 0.0 {
            return Err(format!("weight1 must be non-negative, got {}", self.weight1));
        }
        if !self.weight2.is_finite() || self.weight2 < 0.0 {
            return Err(format!("weight2 must be non-negative, got {}", self.weight2));
        }
        Ok(())
    }

    /// Does this gear meet the per-gear physical limits?
    ///
    /// Pure predicate over this gear's own fields; ineligible gears are
    /// silently dropped at the catalog boundary (absence from a catalog is
    /// expected and common, unlike malformed data).
    pub fn is_eligible(&self, limits: &SearchLimits) -> bool {
        self.teeth <= limits.max_teeth
            && self.pitch_diameter <= limits.max_gear_length
            && (self.bore1 >= limits.min_bore || self.bore2 >= limits.min_bore)
            && self.thickness >= limits.min_thickness
    }
}
