//! Energy index: for each degree class, labels grouped by energy.
//!
//! The global part of the energy of label `s` for a vertex of degree `k` is
//! `gamma · expected(k, s)`. Labels sharing a value share a bucket; buckets
//! are sorted by energy so the minimum is at the front and the Boltzmann
//! table can be built in one ascending walk.
//!
//! Invariants:
//! - every label in `0..n_spins` sits in exactly one bucket of every class;
//! - no bucket is ever empty (emptied buckets are pruned on the spot).

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};

/// Buckets of one degree class.
#[derive(Debug, Clone, Default)]
pub struct EnergyLevels {
    levels: BTreeMap<OrderedFloat<f64>, BTreeSet<usize>>,
}

impl EnergyLevels {
    /// Put `label` in the bucket at `energy`.
    pub fn insert(&mut self, energy: f64, label: usize) {
        self.levels
            .entry(OrderedFloat(energy))
            .or_default()
            .insert(label);
    }

    /// Take `label` out of the bucket at `energy`, pruning the bucket if it empties.
    ///
    /// # Panics
    ///
    /// If the bucket does not hold `label`; the index and the null model
    /// disagree and nothing downstream can be trusted.
    pub fn remove(&mut self, energy: f64, label: usize) {
        let key = OrderedFloat(energy);
        let bucket = self
            .levels
            .get_mut(&key)
            .filter(|b| b.contains(&label))
            .unwrap_or_else(|| panic!("label {label} not indexed at energy {energy}"));
        bucket.remove(&label);
        if bucket.is_empty() {
            self.levels.remove(&key);
        }
    }

    /// Move `label` from the bucket at `from` to the bucket at `to`.
    pub fn relocate(&mut self, label: usize, from: f64, to: f64) {
        self.remove(from, label);
        self.insert(to, label);
    }

    /// Labels at exactly `energy`.
    pub fn bucket(&self, energy: f64) -> Option<&BTreeSet<usize>> {
        self.levels.get(&OrderedFloat(energy))
    }

    /// Lowest energy and its labels.
    pub fn minimum(&self) -> Option<(f64, &BTreeSet<usize>)> {
        self.levels.iter().next().map(|(e, b)| (e.0, b))
    }

    /// Buckets in ascending energy order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &BTreeSet<usize>)> {
        self.levels.iter().map(|(e, b)| (e.0, b))
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of labels over all buckets.
    pub fn label_count(&self) -> usize {
        self.levels.values().map(BTreeSet::len).sum()
    }
}

/// Energy buckets for every degree class present in the graph.
#[derive(Debug, Clone)]
pub struct EnergyIndex {
    degrees: Vec<usize>,
    class_of: FxHashMap<usize, usize>,
    classes: Vec<EnergyLevels>,
}

impl EnergyIndex {
    /// Index labels `0..n_spins` for each degree in `degrees` at `energy(degree, label)`.
    pub fn build(degrees: &[usize], n_spins: usize, energy: impl Fn(usize, usize) -> f64) -> Self {
        let class_of = degrees.iter().enumerate().map(|(c, &k)| (k, c)).collect();
        let classes = degrees
            .iter()
            .map(|&k| {
                let mut levels = EnergyLevels::default();
                for s in 0..n_spins {
                    levels.insert(energy(k, s), s);
                }
                levels
            })
            .collect();
        Self {
            degrees: degrees.to_vec(),
            class_of,
            classes,
        }
    }

    /// Degree of each class, by class index.
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Class index of `degree`, if that degree occurs.
    pub fn class_index(&self, degree: usize) -> Option<usize> {
        self.class_of.get(&degree).copied()
    }

    /// Buckets of class `class`.
    pub fn levels(&self, class: usize) -> &EnergyLevels {
        &self.classes[class]
    }

    /// Mutable buckets of class `class`.
    pub fn levels_mut(&mut self, class: usize) -> &mut EnergyLevels {
        &mut self.classes[class]
    }

    /// Number of degree classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Buckets summed over all classes.
    pub fn level_count(&self) -> usize {
        self.classes.iter().map(EnergyLevels::len).sum()
    }
}
