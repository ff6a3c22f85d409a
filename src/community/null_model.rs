//! Null models: how many neighbors with a given label a vertex "should" have.
//!
//! The spin-glass energy of putting a vertex of degree `k` into label `s`
//! compares the neighbors it actually has in `s` with `expected(k, s)`, the
//! (weighted) number of such neighbors under a random-graph reference model
//! that keeps the current label assignment but erases community structure.
//!
//! | Model | `expected(k, s)` | Preserves |
//! |-------|------------------|-----------|
//! | [`NullModelKind::Independent`] | `p · n_s`, `p = Σk / N²` | edge density |
//! | [`NullModelKind::Uncorrelated`] | `k · K_s / K` | degree sequence |
//! | [`NullModelKind::Correlated`] | `Σ_k' k · P(k, k') · N(k', s) / N(k')` | degree–degree correlations |
//!
//! Here `n_s` is the number of vertices in `s`, `K_s` their degree sum, `K` the
//! total degree, `P(k, k')` the empirical probability that an edge leaving a
//! degree-`k` vertex ends at a degree-`k'` vertex and `N(k', s)` the number of
//! degree-`k'` vertices in `s`.
//!
//! Every model updates in O(1) when one vertex changes label, except
//! `Correlated`, which touches one entry per degree class.
//!
//! ## References
//!
//! Reichardt & Bornholdt (2006). "Statistical mechanics of community detection."
//! Physical Review E 74, 016110.

use super::population::{compact, SpinPopulation};
use crate::graph::GraphView;
use rustc_hash::FxHashMap;

/// Which null model drives the energy function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullModelKind {
    /// Erdős–Rényi-like: expectation proportional to label size only.
    Independent,
    /// Configuration-model-like: expectation proportional to degree times label degree sum.
    #[default]
    Uncorrelated,
    /// Keeps the empirical degree–degree correlation matrix.
    Correlated,
}

/// A null model bound to a graph and a spin assignment.
#[derive(Debug, Clone)]
pub enum NullModel {
    /// See [`NullModelKind::Independent`].
    Independent(Independent),
    /// See [`NullModelKind::Uncorrelated`].
    Uncorrelated(Uncorrelated),
    /// See [`NullModelKind::Correlated`].
    Correlated(Correlated),
}

impl NullModel {
    /// Build the model for `spins` (one label per vertex of `view`).
    pub fn new(kind: NullModelKind, view: &GraphView, spins: &[usize]) -> Self {
        match kind {
            NullModelKind::Independent => NullModel::Independent(Independent::new(view, spins)),
            NullModelKind::Uncorrelated => NullModel::Uncorrelated(Uncorrelated::new(view, spins)),
            NullModelKind::Correlated => NullModel::Correlated(Correlated::new(view, spins)),
        }
    }

    /// Which variant this is.
    pub fn kind(&self) -> NullModelKind {
        match self {
            NullModel::Independent(_) => NullModelKind::Independent,
            NullModel::Uncorrelated(_) => NullModelKind::Uncorrelated,
            NullModel::Correlated(_) => NullModelKind::Correlated,
        }
    }

    /// Expected (weighted) number of neighbors with label `label` for a vertex of degree `degree`.
    #[inline]
    pub fn expected(&self, degree: usize, label: usize) -> f64 {
        match self {
            NullModel::Independent(m) => m.expected(label),
            NullModel::Uncorrelated(m) => m.expected(degree, label),
            NullModel::Correlated(m) => m.expected(degree, label),
        }
    }

    /// A vertex of degree `degree` moved from `old` to `new`.
    pub fn update(&mut self, degree: usize, old: usize, new: usize) {
        match self {
            NullModel::Independent(m) => m.update(old, new),
            NullModel::Uncorrelated(m) => m.update(degree, old, new),
            NullModel::Correlated(m) => m.update(degree, old, new),
        }
    }
}

/// Erdős–Rényi-like null model.
#[derive(Debug, Clone)]
pub struct Independent {
    /// Average degree over vertex count.
    p: f64,
    population: SpinPopulation,
}

impl Independent {
    fn new(view: &GraphView, spins: &[usize]) -> Self {
        let n = view.node_count() as f64;
        let p = if n > 0.0 {
            view.total_degree() as f64 / (n * n)
        } else {
            0.0
        };
        Self {
            p,
            population: SpinPopulation::from_spins(spins),
        }
    }

    #[inline]
    fn expected(&self, label: usize) -> f64 {
        self.p * self.population.get(label) as f64
    }

    fn update(&mut self, old: usize, new: usize) {
        self.population.transfer(old, new);
    }
}

/// Configuration-model-like null model.
#[derive(Debug, Clone)]
pub struct Uncorrelated {
    /// Total degree `K`.
    total: usize,
    /// Degree sum per label, zero sums erased.
    sums: FxHashMap<usize, usize>,
}

impl Uncorrelated {
    fn new(view: &GraphView, spins: &[usize]) -> Self {
        let mut sums: FxHashMap<usize, usize> = FxHashMap::default();
        for (v, &s) in spins.iter().enumerate() {
            let k = view.degree(v);
            if k > 0 {
                *sums.entry(s).or_insert(0) += k;
            }
        }
        Self {
            total: view.total_degree(),
            sums,
        }
    }

    #[inline]
    fn expected(&self, degree: usize, label: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let ks = self.sums.get(&label).copied().unwrap_or(0);
        (degree * ks) as f64 / self.total as f64
    }

    fn update(&mut self, degree: usize, old: usize, new: usize) {
        if degree == 0 {
            return;
        }
        if let Some(sum) = self.sums.get_mut(&old) {
            *sum -= degree;
            if *sum == 0 {
                self.sums.remove(&old);
                compact(&mut self.sums);
            }
        }
        *self.sums.entry(new).or_insert(0) += degree;
    }
}

/// Degree-correlated null model.
#[derive(Debug, Clone)]
pub struct Correlated {
    /// Distinct degrees, ascending; position is the class index.
    degrees: Vec<usize>,
    class_of: FxHashMap<usize, usize>,
    /// Vertices per degree class, `N(k)`.
    class_size: Vec<usize>,
    /// Column view of `P`: for class `c2`, every `(c1, P(c1, c2))` with `P > 0`.
    columns: Vec<Vec<(usize, f64)>>,
    /// `N(k, s)` per class.
    label_counts: Vec<FxHashMap<usize, usize>>,
    /// Vertices per label across all classes.
    label_totals: SpinPopulation,
    /// `expected(k, s)` per class.
    expected: Vec<FxHashMap<usize, f64>>,
}

impl Correlated {
    fn new(view: &GraphView, spins: &[usize]) -> Self {
        let degrees = view.degree_classes();
        let d = degrees.len();
        let class_of: FxHashMap<usize, usize> =
            degrees.iter().enumerate().map(|(c, &k)| (k, c)).collect();

        let mut class_size = vec![0usize; d];
        let mut label_counts: Vec<FxHashMap<usize, usize>> = vec![FxHashMap::default(); d];
        for (v, &s) in spins.iter().enumerate() {
            let c = class_of[&view.degree(v)];
            class_size[c] += 1;
            *label_counts[c].entry(s).or_insert(0) += 1;
        }

        // Degree-degree edge counts, both directions, then row-normalized.
        let mut pkk = vec![0.0f64; d * d];
        for &(i, j, _) in view.edges() {
            let c1 = class_of[&view.degree(i)];
            let c2 = class_of[&view.degree(j)];
            pkk[c1 * d + c2] += 1.0;
            pkk[c2 * d + c1] += 1.0;
        }
        for row in pkk.chunks_mut(d.max(1)) {
            let sum: f64 = row.iter().sum();
            if sum > 0.0 {
                row.iter_mut().for_each(|p| *p /= sum);
            }
        }

        let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); d];
        for c1 in 0..d {
            for (c2, column) in columns.iter_mut().enumerate() {
                let p = pkk[c1 * d + c2];
                if p > 0.0 {
                    column.push((c1, p));
                }
            }
        }

        let mut expected: Vec<FxHashMap<usize, f64>> = vec![FxHashMap::default(); d];
        for (c2, column) in columns.iter().enumerate() {
            let n2 = class_size[c2] as f64;
            for &(c1, p) in column {
                let k1 = degrees[c1] as f64;
                for (&s, &n) in &label_counts[c2] {
                    *expected[c1].entry(s).or_insert(0.0) += k1 * p * n as f64 / n2;
                }
            }
        }

        Self {
            degrees,
            class_of,
            class_size,
            columns,
            label_counts,
            label_totals: SpinPopulation::from_spins(spins),
            expected,
        }
    }

    #[inline]
    fn expected(&self, degree: usize, label: usize) -> f64 {
        self.class_of
            .get(&degree)
            .and_then(|&c| self.expected[c].get(&label))
            .copied()
            .unwrap_or(0.0)
    }

    fn update(&mut self, degree: usize, old: usize, new: usize) {
        let Some(&c) = self.class_of.get(&degree) else {
            return;
        };
        let n = self.class_size[c] as f64;
        for &(c1, p) in &self.columns[c] {
            let delta = self.degrees[c1] as f64 * p / n;
            let row = &mut self.expected[c1];
            if let Some(e) = row.get_mut(&old) {
                *e -= delta;
            }
            *row.entry(new).or_insert(0.0) += delta;
        }

        let counts = &mut self.label_counts[c];
        if let Some(count) = counts.get_mut(&old) {
            *count -= 1;
            if *count == 0 {
                counts.remove(&old);
                compact(counts);
            }
        }
        *counts.entry(new).or_insert(0) += 1;

        self.label_totals.transfer(old, new);
        if self.label_totals.get(old) == 0 {
            // Drop rounding residue: an empty label expects exactly nothing.
            for row in &mut self.expected {
                if row.remove(&old).is_some() {
                    compact(row);
                }
            }
        }
    }
}
