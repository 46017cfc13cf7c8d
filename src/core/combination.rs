//! Exhaustive enumeration of four-gear tuples with structural pruning
//!
//! The search space is the full ordered cross product of the eligible
//! catalog (n^4 tuples, gear reuse across slots allowed). [`Combinations`]
//! walks it lazily with index counters so nothing is materialized up front,
//! and rejects tuples as early as the data allows: the stage-one thickness
//! pairing is checked before the inner two loop levels are visited at all,
//! and the remaining checks run in cheapest-first order before any assembly
//! is built.

use std::collections::VecDeque;

use crate::core::gear::Gear;
use crate::core::limits::SearchLimits;

/// A feasible, bore-resolved four-gear tuple ready for assembly modeling
///
/// Slots index into the catalog slice the enumerator was built over, in
/// drive order: g1 meshes with g2, g3 (sharing g2's shaft) meshes with g4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Catalog indices for slots g1..g4
    pub slots: [usize; 4],

    /// Shared bore of the two inner gears (mm)
    pub inner_bore: u32,

    /// Catalog masses of g2 and g3 at the resolved bore (kg)
    pub inner_masses: (f64, f64),
}

/// Total reduction of a tuple: the product of its two stage ratios
pub fn tuple_ratio(g1: &Gear, g2: &Gear, g3: &Gear, g4: &Gear) -> f64 {
    (g2.teeth as f64 / g1.teeth as f64) * (g4.teeth as f64 / g3.teeth as f64)
}

/// Lazy iterator over all feasible candidates in catalog order
pub struct Combinations<'a> {
    gears: &'a [Gear],
    limits: &'a SearchLimits,
    n: usize,
    i: usize,
    j: usize,
    k: usize,
    l: usize,
    pending: VecDeque<Candidate>,
}

impl<'a> Combinations<'a> {
    pub fn new(gears: &'a [Gear], limits: &'a SearchLimits) -> Self {
        Self {
            gears,
            limits,
            n: gears.len(),
            i: 0,
            j: 0,
            k: 0,
            l: 0,
            pending: VecDeque::new(),
        }
    }

    /// Step the innermost counter, carrying into k
    fn advance(&mut self) {
        self.l += 1;
        if self.l == self.n {
            self.l = 0;
            self.k += 1;
            if self.k == self.n {
                self.k = 0;
                self.advance_pair();
            }
        }
    }

    /// Skip the rest of the current (g1, g2) subtree
    fn advance_pair(&mut self) {
        self.k = 0;
        self.l = 0;
        self.j += 1;
        if self.j == self.n {
            self.j = 0;
            self.i += 1;
        }
    }

    /// Evaluate the current tuple and queue any bore-resolved candidates
    fn examine(&mut self) {
        let gears = self.gears;
        let (g1, g2) = (&gears[self.i], &gears[self.j]);
        let (g3, g4) = (&gears[self.k], &gears[self.l]);

        // Strict band on the combined reduction
        let ratio = tuple_ratio(g1, g2, g3, g4);
        if ratio <= self.limits.min_ratio || ratio >= self.limits.max_ratio {
            return;
        }

        // Each meshing pair is machined to one shared width, so the catalog
        // thicknesses must match before optimization
        if g3.thickness != g4.thickness {
            return;
        }

        if [g1, g2, g3, g4]
            .iter()
            .any(|g| g.pitch_diameter > self.limits.max_gear_length)
        {
            return;
        }

        let slots = [self.i, self.j, self.k, self.l];
        for (bore, mass2, mass3) in resolve_inner_bores(g2, g3, self.limits.min_bore) {
            self.pending.push_back(Candidate {
                slots,
                inner_bore: bore,
                inner_masses: (mass2, mass3),
            });
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            if let Some(candidate) = self.pending.pop_front() {
                return Some(candidate);
            }
            if self.i >= self.n {
                return None;
            }

            // Stage-one thickness pairing only involves the outer two loop
            // levels; a mismatch skips the whole n^2 inner subtree
            if self.gears[self.i].thickness != self.gears[self.j].thickness {
                self.advance_pair();
                continue;
            }

            self.examine();
            self.advance();
        }
    }
}

/// Resolve the shared shaft bore between the two inner gears
///
/// Candidate pairings are tried in fixed priority order, each independently,
/// so one tuple can produce up to four candidates. A pairing matches when
/// both gears offer the same bore and it meets the minimum shaft diameter.
fn resolve_inner_bores(g2: &Gear, g3: &Gear, min_bore: u32) -> Vec<(u32, f64, f64)> {
    let pairings = [
        (g2.bore1, g2.weight1, g3.bore1, g3.weight1),
        (g2.bore1, g2.weight1, g3.bore2, g3.weight2),
        (g2.bore2, g2.weight2, g3.bore1, g3.weight1),
        (g2.bore2, g2.weight2, g3.bore2, g3.weight2),
    ];

    pairings
        .iter()
        .filter(|(b2, _, b3, _)| b2 == b3 && *b2 >= min_bore)
        .map(|(bore, mass2, _, mass3)| (*bore, *mass2, *mass3))
        .collect()
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

    /// Four gears whose only surviving tuple is (0, 1, 2, 3)
    fn reference_catalog() -> Vec<Gear> {
        vec![
            gear("20_10", 20, 10.0, 195.0, (0, 25), (0.0, 1.0), 60.0),
            gear("36_10", 36, 10.0, 526.5, (20, 0), (0.8, 0.0), 108.0),
            gear("25_10", 25, 10.0, 351.0, (20, 0), (0.9, 0.0), 70.0),
            gear("48_10", 48, 10.0, 741.3, (22, 0), (1.2, 0.0), 120.0),
        ]
    }

    // ===== Pruning Tests =====

    #[test]
    fn test_ratio_out_of_band_rejected() {
        // 68/20 * 68/20 = 11.56, far outside (3.4, 3.6): rejected at the
        // ratio check regardless of bores or masses
        let limits = SearchLimits::default();
        let gears = vec![
            gear("a", 20, 10.0, 50.0, (20, 0), (0.3, 0.0), 40.0),
            gear("b", 68, 10.0, 150.0, (20, 0), (0.8, 0.0), 130.0),
            gear("c", 20, 10.0, 50.0, (20, 0), (0.3, 0.0), 40.0),
            gear("d", 68, 10.0, 150.0, (20, 0), (0.8, 0.0), 130.0),
        ];

        assert_eq!(Combinations::new(&gears, &limits).count(), 0);
    }

    #[test]
    fn test_ratio_band_is_strict() {
        // 36/20 * 40/21 = 1.8 * 1.9047.. = 3.4285.. sits inside the band;
        // shrinking the band onto it must reject the tuple
        let gears = vec![
            gear("g1", 20, 10.0, 195.0, (0, 25), (0.0, 1.0), 60.0),
            gear("g2", 36, 10.0, 526.5, (20, 0), (0.8, 0.0), 108.0),
            gear("g3", 21, 10.0, 351.0, (20, 0), (0.9, 0.0), 70.0),
            gear("g4", 40, 10.0, 741.3, (22, 0), (1.2, 0.0), 110.0),
        ];
        let limits = SearchLimits::default();
        assert!(Combinations::new(&gears, &limits).count() > 0);

        let ratio = tuple_ratio(&gears[0], &gears[1], &gears[2], &gears[3]);
        let pinched = SearchLimits {
            min_ratio: ratio,
            max_ratio: 3.6,
            ..Default::default()
        };
        assert_eq!(Combinations::new(&gears, &pinched).count(), 0);
    }

    #[test]
    fn test_thickness_mismatch_rejected() {
        let limits = SearchLimits::default();
        let mut gears = reference_catalog();
        gears[1].thickness = 12.0;
        assert_eq!(Combinations::new(&gears, &limits).count(), 0);
    }

    #[test]
    fn test_oversize_pitch_diameter_rejected() {
        let limits = SearchLimits::default();
        let mut gears = reference_catalog();
        gears[3].pitch_diameter = 140.0;
        assert_eq!(Combinations::new(&gears, &limits).count(), 0);
    }

    // ===== Bore Resolution Tests =====

    #[test]
    fn test_reference_catalog_single_candidate() {
        let limits = SearchLimits::default();
        let gears = reference_catalog();
        let candidates: Vec<Candidate> = Combinations::new(&gears, &limits).collect();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].slots, [0, 1, 2, 3]);
        assert_eq!(candidates[0].inner_bore, 20);
        assert_eq!(candidates[0].inner_masses, (0.8, 0.9));
    }

    #[test]
    fn test_all_four_bore_pairings_tried_independently() {
        let limits = SearchLimits::default();
        let mut gears = reference_catalog();
        gears[1] = gear("36_10", 36, 10.0, 526.5, (20, 20), (0.8, 0.85), 108.0);
        gears[2] = gear("25_10", 25, 10.0, 351.0, (20, 20), (0.9, 0.95), 70.0);

        let candidates: Vec<Candidate> = Combinations::new(&gears, &limits).collect();

        // One tuple, four matching pairings, priority order preserved
        assert_eq!(candidates.len(), 4);
        let masses: Vec<(f64, f64)> = candidates.iter().map(|c| c.inner_masses).collect();
        assert_eq!(
            masses,
            vec![(0.8, 0.9), (0.8, 0.95), (0.85, 0.9), (0.85, 0.95)]
        );
        assert!(candidates.iter().all(|c| c.inner_bore == 20));
        assert!(candidates.iter().all(|c| c.slots == [0, 1, 2, 3]));
    }

    #[test]
    fn test_undersize_shared_bore_rejected() {
        let limits = SearchLimits::default();
        let mut gears = reference_catalog();
        gears[1].bore1 = 16;
        gears[2].bore1 = 16;
        assert_eq!(Combinations::new(&gears, &limits).count(), 0);
    }

    #[test]
    fn test_mismatched_inner_bores_rejected() {
        let limits = SearchLimits::default();
        let mut gears = reference_catalog();
        gears[2].bore1 = 22;
        assert_eq!(Combinations::new(&gears, &limits).count(), 0);
    }

    // ===== Enumeration Tests =====

    #[test]
    fn test_gear_reuse_across_slots() {
        // 37/20 squared = 3.4225: the same two gears serve both stages
        let limits = SearchLimits::default();
        let gears = vec![
            gear("20_10", 20, 10.0, 195.0, (20, 0), (0.4, 0.0), 60.0),
            gear("37_10", 37, 10.0, 526.5, (20, 0), (0.8, 0.0), 111.0),
        ];

        let candidates: Vec<Candidate> = Combinations::new(&gears, &limits).collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].slots, [0, 1, 0, 1]);
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let limits = SearchLimits::default();
        let gears: Vec<Gear> = Vec::new();
        assert_eq!(Combinations::new(&gears, &limits).count(), 0);
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let limits = SearchLimits::default();
        let gears = reference_catalog();

        let first: Vec<Candidate> = Combinations::new(&gears, &limits).collect();
        let second: Vec<Candidate> = Combinations::new(&gears, &limits).collect();
        assert_eq!(first, second);
    }
}
