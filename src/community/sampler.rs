//! Boltzmann sampling over energy buckets.
//!
//! For one degree class `k` at temperature `T`, bucket `E` holding `n` labels
//! gets weight
//!
//! ```text
//! w(E) = n · exp((−E − k − C)/T + M),   M = ln(f64::MAX / (n_spins · 10))
//! ```
//!
//! `M` lifts the typical magnitudes up to the top of the `f64` range so that
//! low temperatures underflow as late as possible while the total stays
//! finite. `C` is the largest `−E − k` any vertex of the class can reach: the
//! lowest global energy minus the largest weighted degree `S` in the class,
//! floored at zero. On unweighted graphs `ns ≤ k` and `E ≥ 0`, so `C = 0` and
//! the weight is exactly `n · exp((−E − k)/T + M)`. On weighted graphs the
//! common factor `exp(−C/T)` keeps every exponent at or below `M` without
//! changing any ratio between buckets.
//!
//! The table is a list of cumulative bounds built once per sweep. A bucket
//! whose weight does not change the running sum is left out. When nothing is
//! left the class falls back to steepest descent: the minimum-energy bucket
//! wins outright.
//!
//! Each vertex perturbs a handful of buckets (the labels of its neighbors).
//! Instead of rebuilding, the entries for the touched energies are marked
//! invalid, fresh entries are appended at the tail, and a draw that lands on
//! an invalid entry is retried. [`CumulativeTable::restore`] undoes all of it.

use super::energy::EnergyLevels;
use ordered_float::OrderedFloat;
use rand::Rng;
use rustc_hash::FxHashMap;

/// Rejections tolerated before a draw gives up and the class goes greedy.
const MAX_REJECTIONS: usize = 1 << 16;

/// `ln(f64::MAX / (n_spins · 10))`.
pub fn boltzmann_shift(n_spins: usize) -> f64 {
    (f64::MAX / (n_spins.max(1) as f64 * 10.0)).ln()
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Cumulative weight up to and including this entry.
    bound: f64,
    energy: f64,
    valid: bool,
}

/// Cumulative Boltzmann weights of one degree class for one sweep.
#[derive(Debug, Clone)]
pub struct CumulativeTable {
    entries: Vec<Entry>,
    /// Energy -> position of its sweep-start entry.
    slot: FxHashMap<OrderedFloat<f64>, usize>,
    base_len: usize,
    invalidated: Vec<usize>,
    valid: usize,
    steepest: bool,
    degree: f64,
    /// Largest reachable `−E − k`, at least zero.
    ceiling: f64,
    temperature: f64,
    shift: f64,
}

impl CumulativeTable {
    /// Build the table of `levels` for vertices of degree `degree`.
    ///
    /// `max_strength` bounds the weighted degree of the class's vertices, and
    /// with it how far a perturbation can lower any energy.
    pub fn build(
        levels: &EnergyLevels,
        degree: usize,
        max_strength: f64,
        temperature: f64,
        shift: f64,
    ) -> Self {
        let ceiling = levels
            .minimum()
            .map_or(0.0, |(e, _)| (max_strength - degree as f64 - e).max(0.0));
        let mut table = Self {
            entries: Vec::with_capacity(levels.len()),
            slot: FxHashMap::default(),
            base_len: 0,
            invalidated: Vec::new(),
            valid: 0,
            steepest: false,
            degree: degree as f64,
            ceiling,
            temperature,
            shift,
        };

        let mut total = 0.0;
        for (energy, labels) in levels.iter() {
            let w = table.weight(energy, labels.len());
            if total + w != total {
                total += w;
                table.slot.insert(OrderedFloat(energy), table.entries.len());
                table.entries.push(Entry {
                    bound: total,
                    energy,
                    valid: true,
                });
            }
        }

        table.base_len = table.entries.len();
        table.valid = table.entries.len();
        table.steepest = total == 0.0;
        table
    }

    #[inline]
    fn weight(&self, energy: f64, size: usize) -> f64 {
        let arg = (-energy - self.degree - self.ceiling) / self.temperature + self.shift;
        arg.exp() * size as f64
    }

    /// Whether the class has fallen back to steepest descent.
    pub fn is_steepest(&self) -> bool {
        self.steepest
    }

    /// Fall back to steepest descent for the rest of the sweep.
    pub fn enter_steepest(&mut self) {
        self.steepest = true;
    }

    /// Total cumulative weight, including appended entries.
    pub fn total(&self) -> f64 {
        self.entries.last().map_or(0.0, |e| e.bound)
    }

    /// Number of entries, valid or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reflect changed buckets at `touched` energies (deduplicated).
    ///
    /// Returns how many entries were appended.
    pub fn perturb(&mut self, levels: &EnergyLevels, touched: &[f64]) -> usize {
        let mut appended = 0;
        for &energy in touched {
            if let Some(&idx) = self.slot.get(&OrderedFloat(energy)) {
                let entry = &mut self.entries[idx];
                if entry.valid {
                    entry.valid = false;
                    self.valid -= 1;
                    self.invalidated.push(idx);
                }
            }
            if let Some(labels) = levels.bucket(energy) {
                let w = self.weight(energy, labels.len());
                let tail = self.total();
                if tail + w != tail {
                    self.entries.push(Entry {
                        bound: tail + w,
                        energy,
                        valid: true,
                    });
                    self.valid += 1;
                    appended += 1;
                }
            }
        }
        appended
    }

    /// Drop appended entries and revalidate invalidated ones.
    pub fn restore(&mut self) {
        self.entries.truncate(self.base_len);
        for idx in self.invalidated.drain(..) {
            self.entries[idx].valid = true;
        }
        self.valid = self.entries.len();
    }

    /// Draw an energy proportionally to its weight, skipping invalid entries.
    ///
    /// `None` when no valid entry can be reached.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<f64> {
        if self.valid == 0 {
            return None;
        }
        let span = self.total().max(f64::EPSILON);
        let last = self.entries.len() - 1;
        for _ in 0..MAX_REJECTIONS {
            let u = rng.random::<f64>() * span;
            let idx = self.entries.partition_point(|e| e.bound <= u).min(last);
            let entry = self.entries[idx];
            if entry.valid {
                return Some(entry.energy);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_levels() -> EnergyLevels {
        let mut levels = EnergyLevels::default();
        levels.insert(0.0, 0);
        levels.insert(1.0, 1);
        levels
    }

    #[test]
    fn test_shift_keeps_sum_finite() {
        let m = boltzmann_shift(1000);
        assert!(m.is_finite());
        assert!((m.exp() * 1000.0).is_finite());
    }

    #[test]
    fn test_weights_follow_boltzmann() {
        let mut levels = EnergyLevels::default();
        levels.insert(0.0, 0);
        levels.insert(2f64.ln(), 1);
        levels.insert(2f64.ln(), 2);
        let table = CumulativeTable::build(&levels, 0, 0.0, 1.0, boltzmann_shift(3));
        assert!(!table.is_steepest());
        assert_eq!(table.len(), 2);
        // Second bucket: two labels at half the weight each.
        assert_relative_eq!(table.total() / table.entries[0].bound, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_underflow_switches_to_steepest() {
        let table = CumulativeTable::build(&two_levels(), 2, 2.0, 1e-300, boltzmann_shift(2));
        assert!(table.is_steepest());
        assert!(table.is_empty());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(table.draw(&mut rng), None);
    }

    #[test]
    fn test_invalidated_entries_never_drawn() {
        let mut levels = two_levels();
        let mut table = CumulativeTable::build(&levels, 0, 0.0, 1.0, boltzmann_shift(2));
        assert_eq!(table.len(), 2);

        levels.relocate(0, 0.0, 5.0);
        let appended = table.perturb(&levels, &[0.0, 5.0]);
        assert_eq!(appended, 1);
        assert_eq!(table.len(), 3);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let e = table.draw(&mut rng).unwrap();
            assert!(e == 1.0 || e == 5.0);
        }

        table.restore();
        assert_eq!(table.len(), 2);
        assert!(table.entries.iter().all(|e| e.valid));
    }

    #[test]
    fn test_negligible_perturbation_appends_nothing() {
        let mut levels = two_levels();
        let mut table = CumulativeTable::build(&levels, 0, 0.0, 0.01, boltzmann_shift(2));
        // exp(-100) relative weight vanishes next to the ground bucket.
        assert_eq!(table.len(), 1);

        levels.relocate(1, 1.0, 2.0);
        assert_eq!(table.perturb(&levels, &[1.0, 2.0]), 0);
        table.restore();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_draw_frequencies() {
        let mut levels = EnergyLevels::default();
        levels.insert(0.0, 0);
        levels.insert(0.0, 1);
        levels.insert(0.0, 2);
        levels.insert(10.0, 3);
        let table = CumulativeTable::build(&levels, 0, 0.0, 10.0, boltzmann_shift(4));
        // Ground bucket weight 3, excited bucket weight e^-1.
        let p_ground = 3.0 / (3.0 + (-1.0f64).exp());

        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let hits = (0..n)
            .filter(|_| table.draw(&mut rng) == Some(0.0))
            .count();
        let freq = hits as f64 / n as f64;
        assert!((freq - p_ground).abs() < 0.02, "freq {freq} vs {p_ground}");
    }

    #[test]
    fn test_favourable_energies_keep_their_ratio() {
        // Weighted neighbors pull both buckets below -k.
        let mut levels = EnergyLevels::default();
        levels.insert(-10.0, 0);
        levels.insert(-5.0, 1);
        let table = CumulativeTable::build(&levels, 2, 0.0, 1.0, boltzmann_shift(2));
        assert!(table.total().is_finite());
        assert_eq!(table.len(), 2);
        assert_relative_eq!(
            table.total() / table.entries[0].bound,
            1.0 + (-5.0f64).exp(),
            epsilon = 1e-12
        );

        let p_low = 1.0 / (1.0 + (-5.0f64).exp());
        let mut rng = StdRng::seed_from_u64(3);
        let n = 20_000;
        let hits = (0..n)
            .filter(|_| table.draw(&mut rng) == Some(-10.0))
            .count();
        let freq = hits as f64 / n as f64;
        assert!((freq - p_low).abs() < 0.01, "freq {freq} vs {p_low}");
    }

    #[test]
    fn test_heavy_perturbation_stays_finite() {
        // Global energies near zero; a vertex of strength 50 can pull a label to -50.
        let mut levels = EnergyLevels::default();
        levels.insert(0.5, 0);
        levels.insert(1.0, 1);
        levels.insert(1.0, 2);
        let mut table = CumulativeTable::build(&levels, 2, 50.0, 0.5, boltzmann_shift(3));

        levels.relocate(1, 1.0, -49.0);
        levels.relocate(2, 1.0, -20.0);
        let appended = table.perturb(&levels, &[1.0, -49.0, -20.0]);
        assert!(appended >= 1);
        assert!(table.total().is_finite());

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            assert_eq!(table.draw(&mut rng), Some(-49.0));
        }
    }
}
