//! Assembly modeling: reductions, factors of safety, width optimization
//!
//! An [`Assembly`] is fully derived from a feasible candidate tuple and
//! never mutated. Derived values are rounded to three decimals at each
//! boundary (reductions, FOS, widths, masses) to match catalog precision
//! and keep equality comparisons stable in filtering and tests.

use serde::Serialize;

use crate::core::combination::Candidate;
use crate::core::gear::Gear;
use crate::core::limits::SearchLimits;

/// Tolerance when comparing already-rounded FOS values against the floor
const FOS_EPS: f64 = 1e-9;

/// Round to three decimal places
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// One fully-evaluated four-gear reduction assembly
///
/// Slots are in drive order: g1 meshes with g2, g3 shares g2's shaft, g3
/// meshes with g4. Gear 1 mounts at its second bore and gear 4 at its
/// first; the inner pair mounts at the resolved shared bore.
#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    /// The four selected gears, g1..g4
    pub gears: [Gear; 4],

    /// Mounted bore per slot (mm)
    pub bores: [u32; 4],

    /// Stage-one reduction, teeth(g2)/teeth(g1)
    pub reduction1: f64,

    /// Stage-two reduction, teeth(g4)/teeth(g3)
    pub reduction2: f64,

    /// Combined reduction, rounded
    pub total_reduction: f64,

    /// FOS per gear at full catalog thickness, under worst-case torque
    pub fos_raw: [f64; 4],

    /// Optimized shared width of the g1/g2 pair
    pub width1: f64,

    /// Optimized shared width of the g3/g4 pair
    pub width2: f64,

    /// FOS per gear after width optimization; gears 1 and 3 sit at the floor
    pub fos_adjusted: [f64; 4],

    /// Catalog mass of all four gears before width optimization (kg)
    pub initial_mass: f64,

    /// Total mass after width optimization (kg)
    pub mass: f64,

    /// Half the summed pitch diameters: the end-to-end span of both meshes (mm)
    pub center_distance: f64,

    /// Catalog masses of g2 and g3 at the resolved inner bore (kg)
    pub inner_masses: (f64, f64),

    /// True when a pair's partner gear fell below the FOS floor after width
    /// optimization, i.e. the assumption that gears 1 and 3 carry the lower
    /// FOS of their pair did not hold for this tuple
    pub fos_inversion: bool,
}

impl Assembly {
    /// Evaluate one bore-resolved candidate against the catalog
    pub fn build(gears: &[Gear], candidate: &Candidate, limits: &SearchLimits) -> Assembly {
        let [i1, i2, i3, i4] = candidate.slots;
        let (g1, g2) = (&gears[i1], &gears[i2]);
        let (g3, g4) = (&gears[i3], &gears[i4]);
        let (mass2, mass3) = candidate.inner_masses;

        let reduction1 = g2.teeth as f64 / g1.teeth as f64;
        let reduction2 = g4.teeth as f64 / g3.teeth as f64;
        let total_reduction = round3(reduction1 * reduction2);

        // Worst-case torque at each gear: engine through the CVT, then
        // multiplied by every reduction upstream of that gear. Gear 3 rides
        // on gear 2's shaft, so both see the stage-one output torque.
        let applied = limits.max_applied_torque();
        let fos1 = round3(g1.rated_torque / applied);
        let fos2 = round3(g2.rated_torque / (applied * reduction1));
        let fos3 = round3(g3.rated_torque / (applied * reduction1));
        let fos4 = round3(g4.rated_torque / (applied * total_reduction));

        // Each meshing pair is machined to one shared width, thinned until
        // the pair's lower-FOS member (assumed to be g1 and g3) sits exactly
        // at the floor
        let width1 = round3(limits.min_fos / fos1 * g1.thickness);
        let width2 = round3(limits.min_fos / fos3 * g3.thickness);

        // Partner FOS scales linearly with the width ratio
        let fos2_adj = round3(fos2 * width1 / g2.thickness);
        let fos4_adj = round3(fos4 * width2 / g4.thickness);

        // If the pairing assumption failed, the "optimized" partner FOS is
        // below the floor; surfaced as a data-quality flag rather than
        // silently accepted (the band filter will reject the record)
        let fos_inversion =
            fos2_adj + FOS_EPS < limits.min_fos || fos4_adj + FOS_EPS < limits.min_fos;

        let initial_mass = round3(mass2 + mass3 + g1.weight2 + g4.weight1);
        let mass = round3(
            width1 / g1.thickness * (g1.weight2 + mass2)
                + width2 / g3.thickness * (g4.weight1 + mass3),
        );

        let center_distance =
            (g1.pitch_diameter + g2.pitch_diameter + g3.pitch_diameter + g4.pitch_diameter) / 2.0;

        Assembly {
            gears: [g1.clone(), g2.clone(), g3.clone(), g4.clone()],
            bores: [g1.bore2, candidate.inner_bore, candidate.inner_bore, g4.bore1],
            reduction1,
            reduction2,
            total_reduction,
            fos_raw: [fos1, fos2, fos3, fos4],
            width1,
            width2,
            fos_adjusted: [limits.min_fos, fos2_adj, limits.min_fos, fos4_adj],
            initial_mass,
            mass,
            center_distance,
            inner_masses: (mass2, mass3),
            fos_inversion,
        }
    }

    /// System-level acceptance: mass budget, FOS band, minimum span
    ///
    /// Mass and span bounds are strict; the FOS band is inclusive on both
    /// ends. Pure predicate, applied in generation order.
    pub fn is_acceptable(&self, limits: &SearchLimits) -> bool {
        self.mass < limits.max_mass
            && self
                .fos_adjusted
                .iter()
                .all(|fos| (limits.min_fos..=limits.max_fos).contains(fos))
            && self.center_distance > limits.min_length
    }
}
