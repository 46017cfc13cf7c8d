//! Search pipeline - enumeration, modeling, and system filtering in one pass

use crate::core::assembly::Assembly;
use crate::core::combination::Combinations;
use crate::core::gear::Gear;
use crate::core::limits::SearchLimits;

/// Result of one search run, with diagnostics for the caller's reporting
#[derive(Debug)]
pub struct SearchOutcome {
    /// Accepted assemblies, in generation (catalog) order
    pub assemblies: Vec<Assembly>,

    /// Assemblies built before the system filter
    pub candidates: usize,

    /// Candidates whose pair partner fell below the FOS floor after width
    /// optimization
    pub fos_inversions: usize,
}

/// Run the full search over an eligible catalog
///
/// Enumeration is sequential and catalog-ordered, so the output is
/// deterministic: re-running over an unchanged catalog yields an identical
/// assembly sequence.
pub fn run_search(gears: &[Gear], limits: &SearchLimits) -> SearchOutcome {
    let mut assemblies = Vec::new();
    let mut candidates = 0;
    let mut fos_inversions = 0;

    for candidate in Combinations::new(gears, limits) {
        let assembly = Assembly::build(gears, &candidate, limits);
        candidates += 1;
        if assembly.fos_inversion {
            fos_inversions += 1;
        }
        if assembly.is_acceptable(limits) {
            assemblies.push(assembly);
        }
    }

    SearchOutcome {
        assemblies,
        candidates,
        fos_inversions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gear(
        id: &str,
        teeth: u32,
        thickness: f64,
        torque: f64,
        bores: (u32, u32),
        weights: (f64, f64),
        pitch_diameter: f64,
    ) -> Gear {
        Gear {
            teeth,
            thickness,
            id: id.to_string(),
            rated_torque: torque,
            bore1: bores.0,
            bore2: bores.1,
            weight1: weights.0,
            weight2: weights.1,
            pitch_diameter,
            form_factor: "MSGA".to_string(),
        }
    }

    fn reference_catalog() -> Vec<Gear> {
        vec![
            gear("20_10", 20, 10.0, 195.0, (0, 25), (0.0, 1.0), 60.0),
            gear("36_10", 36, 10.0, 526.5, (20, 0), (0.8, 0.0), 108.0),
            gear("25_10", 25, 10.0, 351.0, (20, 0), (0.9, 0.0), 70.0),
            gear("48_10", 48, 10.0, 741.312, (22, 0), (1.2, 0.0), 120.0),
        ]
    }

    #[test]
    fn test_reference_catalog_accepts_one_assembly() {
        let limits = SearchLimits::default();
        let outcome = run_search(&reference_catalog(), &limits);

        assert_eq!(outcome.candidates, 1);
        assert_eq!(outcome.assemblies.len(), 1);
        assert_eq!(outcome.fos_inversions, 0);

        let assembly = &outcome.assemblies[0];
        let ids: Vec<&str> = assembly.gears.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["20_10", "36_10", "25_10", "48_10"]);
    }

    #[test]
    fn test_inversions_counted_and_filtered() {
        let limits = SearchLimits::default();
        let mut gears = reference_catalog();
        gears[0].rated_torque = 390.0;

        let outcome = run_search(&gears, &limits);
        assert_eq!(outcome.candidates, 1);
        assert_eq!(outcome.fos_inversions, 1);
        assert!(outcome.assemblies.is_empty());
    }

    #[test]
    fn test_rejections_are_silent() {
        // Over the mass budget: a plain filter rejection, not a warning
        let limits = SearchLimits {
            max_mass: 2.0,
            ..Default::default()
        };
        let outcome = run_search(&reference_catalog(), &limits);
        assert_eq!(outcome.candidates, 1);
        assert_eq!(outcome.fos_inversions, 0);
        assert!(outcome.assemblies.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let limits = SearchLimits::default();
        let outcome = run_search(&[], &limits);
        assert_eq!(outcome.candidates, 0);
        assert!(outcome.assemblies.is_empty());
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let limits = SearchLimits::default();
        let gears = reference_catalog();

        let first = run_search(&gears, &limits);
        let second = run_search(&gears, &limits);

        assert_eq!(first.assemblies.len(), second.assemblies.len());
        for (a, b) in first.assemblies.iter().zip(second.assemblies.iter()) {
            assert_eq!(a.bores, b.bores);
            assert_eq!(a.mass, b.mass);
            assert_eq!(a.total_reduction, b.total_reduction);
        }
    }
}
