//! Label occupancy counts.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Shrink a map whose capacity has grown past twice its length.
///
/// Called after erasures so maps that lose most of their keys during
/// annealing give the buckets back.
pub(crate) fn compact<K: Eq + Hash, V>(map: &mut FxHashMap<K, V>) {
    if map.capacity() > 2 * map.len() {
        map.shrink_to_fit();
    }
}

/// Number of vertices holding each label.
///
/// Only occupied labels have an entry: a label is erased when its count
/// drops to zero and re-created on first use.
#[derive(Debug, Clone, Default)]
pub struct SpinPopulation {
    counts: FxHashMap<usize, usize>,
    total: usize,
}

impl SpinPopulation {
    /// Count the labels of a spin assignment.
    pub fn from_spins(spins: &[usize]) -> Self {
        let mut pop = Self::default();
        for &s in spins {
            pop.add(s);
        }
        pop
    }

    /// One more vertex holds `label`.
    pub fn add(&mut self, label: usize) {
        *self.counts.entry(label).or_insert(0) += 1;
        self.total += 1;
    }

    /// One vertex left `label`.
    ///
    /// # Panics
    ///
    /// If `label` is not occupied.
    pub fn remove(&mut self, label: usize) {
        let count = self
            .counts
            .get_mut(&label)
            .unwrap_or_else(|| panic!("label {label} has no population"));
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&label);
            compact(&mut self.counts);
        }
        self.total -= 1;
    }

    /// Move one vertex from `from` to `to`.
    pub fn transfer(&mut self, from: usize, to: usize) {
        self.remove(from);
        self.add(to);
    }

    /// Vertices holding `label`.
    pub fn get(&self, label: usize) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Number of occupied labels.
    pub fn occupied(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Recount from the stored entries rather than the running total.
    pub fn recount(&self) -> usize {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_counts() {
        let pop = SpinPopulation::from_spins(&[0, 2, 2, 5]);
        assert_eq!(pop.get(2), 2);
        assert_eq!(pop.get(1), 0);
        assert_eq!(pop.occupied(), 3);
        assert_eq!(pop.total(), 4);
    }

    #[test]
    fn test_population_erases_empty_labels() {
        let mut pop = SpinPopulation::from_spins(&[0, 1]);
        pop.transfer(0, 1);
        assert_eq!(pop.occupied(), 1);
        assert_eq!(pop.get(1), 2);
        assert_eq!(pop.total(), 2);
        assert_eq!(pop.recount(), 2);
    }

    #[test]
    #[should_panic(expected = "has no population")]
    fn test_population_remove_unoccupied_panics() {
        let mut pop = SpinPopulation::from_spins(&[0]);
        pop.remove(3);
    }

    #[test]
    fn test_compact_shrinks_sparse_map() {
        let mut map: FxHashMap<usize, usize> = FxHashMap::default();
        for i in 0..1000 {
            map.insert(i, i);
        }
        for i in 1..1000 {
            map.remove(&i);
        }
        compact(&mut map);
        assert!(map.capacity() <= 2 * map.len().max(1) + 8);
        assert_eq!(map.get(&0), Some(&0));
    }
}
