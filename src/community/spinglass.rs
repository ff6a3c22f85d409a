//! Spin-glass community detection by simulated annealing.
//!
//! Every vertex carries a spin (its community label) out of `n_spins`. The
//! energy of vertex `v` (degree `k`) holding label `s` is
//!
//! ```text
//! E(v, s) = γ · expected(k, s) − ns(v, s)
//! ```
//!
//! where `ns(v, s)` is the weight of `v`'s edges into label `s` and
//! `expected` comes from a [`NullModel`]. Low energy means "more neighbors in
//! `s` than the null model predicts", so minimizing it over all vertices
//! maximizes a generalized modularity (Reichardt & Bornholdt 2006).
//!
//! ## Annealing
//!
//! The temperature falls geometrically from `t_max` to `t_min` over `n_iter`
//! sweeps:
//!
//! ```text
//! T(t) = t_max · exp(−c·t),   c = ln(t_max / t_min) / (n_iter − 1)
//! ```
//!
//! Each sweep is **synchronous**: every vertex, in index order, samples a new
//! label against the state at the start of the sweep, and all moves are
//! committed together afterwards. No vertex sees another vertex's move from
//! the same sweep.
//!
//! ## Sampling one vertex
//!
//! The [`EnergyIndex`] holds the global term `γ · expected(k, s)` of every
//! label for every degree class. To sample for `v`:
//!
//! 1. move each label touched by `v`'s neighbors to `global − ns(v, s)`;
//! 2. pick an energy from the class's Boltzmann table (see
//!    [`CumulativeTable`]) or, once the table has underflowed, take the
//!    minimum (steepest descent);
//! 3. pick uniformly among the labels at that energy;
//! 4. put the touched labels back.
//!
//! All randomness comes from one seeded stream consumed in vertex order, so a
//! run is reproducible from `(graph, parameters, seed)`.
//!
//! ## Example
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use spinglass::{NullModelKind, SpinGlass};
//!
//! let mut graph = UnGraph::<(), ()>::new_undirected();
//! let nodes: Vec<_> = (0..6).map(|_| graph.add_node(())).collect();
//! for &(a, b) in &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)] {
//!     graph.add_edge(nodes[a], nodes[b], ());
//! }
//!
//! let detector = SpinGlass::new()
//!     .with_null_model(NullModelKind::Uncorrelated)
//!     .with_iterations(200)
//!     .with_seed(7);
//! let spins = detector.run(&graph, None).unwrap();
//! assert_eq!(spins.len(), 6);
//! ```
//!
//! ## References
//!
//! Reichardt & Bornholdt (2006). "Statistical mechanics of community detection."
//! Physical Review E 74, 016110.

use super::energy::EnergyIndex;
use super::null_model::{NullModel, NullModelKind};
use super::population::SpinPopulation;
use super::sampler::{boltzmann_shift, CumulativeTable};
use super::traits::CommunityDetection;
use crate::error::{Error, Result};
use crate::graph::GraphView;
use log::{debug, info, trace};
use ordered_float::OrderedFloat;
use petgraph::graph::{Graph, IndexType};
use petgraph::EdgeType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

/// Spin-glass community detector.
#[derive(Debug, Clone)]
pub struct SpinGlass {
    /// Resolution parameter (gamma).
    resolution: f64,
    /// Null model behind the energy function.
    null_model: NullModelKind,
    /// Number of sweeps.
    n_iter: usize,
    /// Final temperature.
    t_min: f64,
    /// Initial temperature.
    t_max: f64,
    /// Number of labels; 0 means one per vertex.
    n_spins: usize,
    /// Random seed.
    seed: u64,
    /// Log progress at info level.
    verbose: bool,
}

impl SpinGlass {
    /// Create a detector with default settings.
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            null_model: NullModelKind::Uncorrelated,
            n_iter: 1000,
            t_min: 0.01,
            t_max: 1.0,
            n_spins: 0,
            seed: 42,
            verbose: false,
        }
    }

    /// Set resolution parameter.
    ///
    /// Higher values produce smaller communities.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the null model.
    pub fn with_null_model(mut self, null_model: NullModelKind) -> Self {
        self.null_model = null_model;
        self
    }

    /// Set the number of sweeps. Zero returns the random initial assignment.
    pub fn with_iterations(mut self, n_iter: usize) -> Self {
        self.n_iter = n_iter;
        self
    }

    /// Set the temperature range. `t_min` below machine epsilon is raised to it.
    pub fn with_temperature(mut self, t_min: f64, t_max: f64) -> Self {
        self.t_min = t_min;
        self.t_max = t_max;
        self
    }

    /// Set the number of labels. Zero means one label per vertex.
    pub fn with_spins(mut self, n_spins: usize) -> Self {
        self.n_spins = n_spins;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Log a progress line per sweep at info level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Null model in use.
    pub fn null_model(&self) -> NullModelKind {
        self.null_model
    }

    /// Number of sweeps.
    pub fn iterations(&self) -> usize {
        self.n_iter
    }

    /// Configured `(t_min, t_max)`, before clamping.
    pub fn temperature_range(&self) -> (f64, f64) {
        (self.t_min, self.t_max)
    }

    /// Configured number of labels (0 means one per vertex).
    pub fn spins(&self) -> usize {
        self.n_spins
    }

    /// Random seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Check parameters before any work is done.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(Error::InvalidParameter {
                name: "resolution",
                message: "must be finite and positive",
            });
        }
        if !(self.t_max.is_finite() && self.t_max > 0.0) {
            return Err(Error::InvalidParameter {
                name: "t_max",
                message: "must be finite and positive",
            });
        }
        if !self.t_min.is_finite() {
            return Err(Error::InvalidParameter {
                name: "t_min",
                message: "must be finite",
            });
        }
        Ok(())
    }

    /// Cooling schedule for the configured range and sweep count.
    pub fn schedule(&self) -> CoolingSchedule {
        CoolingSchedule::new(self.t_min, self.t_max, self.n_iter)
    }

    /// Detect communities on a petgraph graph.
    ///
    /// `weights` is indexed by edge index; `None` means unit weights. Returns
    /// one label in `0..n_spins` per vertex.
    pub fn run<N, E, Ty, Ix>(
        &self,
        graph: &Graph<N, E, Ty, Ix>,
        weights: Option<&[f64]>,
    ) -> Result<Vec<usize>>
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        self.run_with(graph, weights, |_| {})
    }

    /// Like [`run`](Self::run), handing a [`SweepReport`] to `observer` after every sweep.
    pub fn run_with<N, E, Ty, Ix, F>(
        &self,
        graph: &Graph<N, E, Ty, Ix>,
        weights: Option<&[f64]>,
        observer: F,
    ) -> Result<Vec<usize>>
    where
        Ty: EdgeType,
        Ix: IndexType,
        F: FnMut(&SweepReport),
    {
        self.validate()?;
        let view = GraphView::from_graph(graph, weights)?;
        self.run_view_with(&view, observer)
    }

    /// Detect communities on a prepared view.
    pub fn run_view(&self, view: &GraphView) -> Result<Vec<usize>> {
        self.run_view_with(view, |_| {})
    }

    /// Detect communities on a prepared view, reporting every sweep.
    pub fn run_view_with<F>(&self, view: &GraphView, mut observer: F) -> Result<Vec<usize>>
    where
        F: FnMut(&SweepReport),
    {
        self.validate()?;
        if view.node_count() == 0 {
            return Err(Error::EmptyInput);
        }

        let schedule = self.schedule();
        let mut annealer = Annealer::new(view, self);
        debug!(
            "spin glass: {} vertices, {} edges, {} spins, {:?} null model, {} sweeps",
            view.node_count(),
            view.edge_count(),
            annealer.n_spins,
            self.null_model,
            self.n_iter
        );

        let width = self.n_iter.to_string().len();
        for t in 0..self.n_iter {
            let temperature = schedule.temperature(t);
            let outcome = annealer.sweep(temperature);
            let report = SweepReport {
                sweep: t,
                total: self.n_iter,
                percent: (t + 1) * 100 / self.n_iter,
                temperature,
                occupied: annealer.population.occupied(),
                energy_levels: annealer.index.level_count(),
                moved: outcome.moved,
                steepest_descent: outcome.steepest_descent,
            };
            if self.verbose {
                info!("{report:width$}");
            } else {
                trace!("{report}");
            }
            observer(&report);
        }

        debug!(
            "spin glass: finished with {} occupied labels",
            annealer.population.occupied()
        );
        Ok(annealer.spins)
    }
}

impl Default for SpinGlass {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for SpinGlass {
    fn detect<N, E, Ty, Ix>(&self, graph: &Graph<N, E, Ty, Ix>) -> Result<Vec<usize>>
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        let spins = self.run(graph, None)?;
        Ok(renumber(&spins))
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }
}

/// Renumber labels to `0..k` in first-seen order.
fn renumber(labels: &[usize]) -> Vec<usize> {
    let mut map: FxHashMap<usize, usize> = FxHashMap::default();
    labels
        .iter()
        .map(|&l| {
            let next = map.len();
            *map.entry(l).or_insert(next)
        })
        .collect()
}

/// Geometric cooling from `t_max` to `t_min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingSchedule {
    t_max: f64,
    rate: f64,
}

impl CoolingSchedule {
    /// Schedule reaching `t_min` at sweep `n_iter − 1`.
    pub fn new(t_min: f64, t_max: f64, n_iter: usize) -> Self {
        let t_min = t_min.max(f64::EPSILON);
        let rate = if n_iter > 1 {
            (t_max.ln() - t_min.ln()) / (n_iter - 1) as f64
        } else {
            0.0
        };
        Self { t_max, rate }
    }

    /// Cooling rate `c`.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Temperature at sweep `t`.
    pub fn temperature(&self, t: usize) -> f64 {
        self.t_max * (-self.rate * t as f64).exp()
    }
}

/// Progress after one sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// Sweep index, from 0.
    pub sweep: usize,
    /// Total number of sweeps.
    pub total: usize,
    /// Completed share, 1..=100.
    pub percent: usize,
    /// Temperature of this sweep.
    pub temperature: f64,
    /// Labels held by at least one vertex.
    pub occupied: usize,
    /// Energy buckets over all degree classes.
    pub energy_levels: usize,
    /// Vertices that changed label.
    pub moved: usize,
    /// Whether any degree class sampled greedily.
    pub steepest_descent: bool,
}

impl std::fmt::Display for SweepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = f.width().unwrap_or(0);
        write!(
            f,
            "{:>width$} of {} ({:>2}%) temperature: {:>14.10} spins: {} energy levels: {}",
            self.sweep, self.total, self.percent, self.temperature, self.occupied, self.energy_levels
        )?;
        if self.steepest_descent {
            write!(f, " (steepest descent)")?;
        }
        Ok(())
    }
}

/// Result of sampling one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Proposal {
    pub(crate) label: usize,
    /// Energy of the chosen bucket, local term included.
    pub(crate) energy: f64,
    /// Lowest energy in the perturbed index.
    pub(crate) min_energy: f64,
    pub(crate) steepest: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SweepOutcome {
    pub(crate) moved: usize,
    pub(crate) steepest_descent: bool,
}

/// Mutable state of one annealing run.
pub(crate) struct Annealer<'g> {
    view: &'g GraphView,
    gamma: f64,
    pub(crate) n_spins: usize,
    shift: f64,
    pub(crate) spins: Vec<usize>,
    pub(crate) population: SpinPopulation,
    pub(crate) null_model: NullModel,
    pub(crate) index: EnergyIndex,
    /// Degree class of every vertex.
    vertex_class: Vec<usize>,
    /// Largest weighted degree per class.
    class_strength: Vec<f64>,
    rng: StdRng,
}

impl<'g> Annealer<'g> {
    /// Random initial spins and the model/index built on them.
    pub(crate) fn new(view: &'g GraphView, config: &SpinGlass) -> Self {
        let n = view.node_count();
        let n_spins = if config.n_spins == 0 { n } else { config.n_spins };
        let gamma = config.resolution;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let spins: Vec<usize> = (0..n).map(|_| rng.random_range(0..n_spins)).collect();
        let population = SpinPopulation::from_spins(&spins);
        let null_model = NullModel::new(config.null_model, view, &spins);

        let index = EnergyIndex::build(&view.degree_classes(), n_spins, |k, s| {
            gamma * null_model.expected(k, s)
        });
        let vertex_class: Vec<usize> = (0..n)
            .map(|v| {
                index
                    .class_index(view.degree(v))
                    .expect("every vertex degree has a class")
            })
            .collect();
        let mut class_strength = vec![0.0f64; index.class_count()];
        for (v, &c) in vertex_class.iter().enumerate() {
            class_strength[c] = class_strength[c].max(view.strength(v));
        }

        Self {
            view,
            gamma,
            n_spins,
            shift: boltzmann_shift(n_spins),
            spins,
            population,
            null_model,
            index,
            vertex_class,
            class_strength,
            rng,
        }
    }

    /// Global energy term of `label` for degree `degree`.
    #[inline]
    fn global_energy(&self, degree: usize, label: usize) -> f64 {
        self.gamma * self.null_model.expected(degree, label)
    }

    /// One synchronous sweep at `temperature`.
    pub(crate) fn sweep(&mut self, temperature: f64) -> SweepOutcome {
        self.sweep_inspect(temperature, |_, _| {})
    }

    /// One sweep, showing every proposal to `inspect` before the commit.
    pub(crate) fn sweep_inspect<F>(&mut self, temperature: f64, mut inspect: F) -> SweepOutcome
    where
        F: FnMut(usize, &Proposal),
    {
        let degrees = self.index.degrees();
        let mut tables: Vec<CumulativeTable> = degrees
            .iter()
            .zip(&self.class_strength)
            .enumerate()
            .map(|(c, (&k, &strength))| {
                CumulativeTable::build(self.index.levels(c), k, strength, temperature, self.shift)
            })
            .collect();
        for (table, &k) in tables.iter().zip(degrees) {
            if table.is_steepest() {
                debug!(
                    "degree {k}: Boltzmann weights underflow at T = {temperature:e}, steepest descent"
                );
            }
        }

        let mut staged: Vec<(usize, usize)> = Vec::new();
        for v in 0..self.view.node_count() {
            let table = &mut tables[self.vertex_class[v]];
            let proposal = self.propose(v, table);
            inspect(v, &proposal);
            if proposal.label != self.spins[v] {
                staged.push((v, proposal.label));
            }
        }

        let steepest_descent = tables.iter().any(CumulativeTable::is_steepest);
        self.commit(&staged);
        SweepOutcome {
            moved: staged.len(),
            steepest_descent,
        }
    }

    /// Sample a label for `v` against the current state, leaving it unchanged.
    pub(crate) fn propose(&mut self, v: usize, table: &mut CumulativeTable) -> Proposal {
        let k = self.view.degree(v);
        let c = self.vertex_class[v];

        // Weighted neighbor count per label.
        let mut local: BTreeMap<usize, f64> = BTreeMap::new();
        for &(u, w) in self.view.neighbors(v) {
            *local.entry(self.spins[u]).or_insert(0.0) += w;
        }

        let mut touched: Vec<f64> = Vec::with_capacity(2 * local.len());
        let mut seen: FxHashSet<OrderedFloat<f64>> = FxHashSet::default();
        for (&s, &ns) in &local {
            let global = self.global_energy(k, s);
            let shifted = global - ns;
            self.index.levels_mut(c).relocate(s, global, shifted);
            for e in [global, shifted] {
                if seen.insert(OrderedFloat(e)) {
                    touched.push(e);
                }
            }
        }

        let levels = self.index.levels(c);
        let appended = table.perturb(levels, &touched);
        let drawn = if table.is_steepest() || (appended == 0 && !touched.is_empty()) {
            None
        } else {
            table.draw(&mut self.rng)
        };
        let (min_energy, _) = levels
            .minimum()
            .expect("every degree class indexes all labels");
        let energy = match drawn {
            Some(e) => e,
            None => {
                table.enter_steepest();
                min_energy
            }
        };

        let bucket = levels
            .bucket(energy)
            .expect("drawn energies always have a bucket");
        let pick = self.rng.random_range(0..bucket.len());
        let label = bucket
            .iter()
            .nth(pick)
            .copied()
            .expect("pick is within the bucket");

        table.restore();
        for (&s, &ns) in &local {
            let global = self.global_energy(k, s);
            self.index.levels_mut(c).relocate(s, global - ns, global);
        }

        Proposal {
            label,
            energy,
            min_energy,
            steepest: table.is_steepest(),
        }
    }

    /// Apply staged moves in order.
    pub(crate) fn commit(&mut self, staged: &[(usize, usize)]) {
        for &(v, new) in staged {
            let old = self.spins[v];
            if old == new {
                continue;
            }

            for c in 0..self.index.class_count() {
                let kc = self.index.degrees()[c];
                let e_old = self.global_energy(kc, old);
                let e_new = self.global_energy(kc, new);
                let levels = self.index.levels_mut(c);
                levels.remove(e_old, old);
                levels.remove(e_new, new);
            }

            self.population.transfer(old, new);
            self.null_model.update(self.view.degree(v), old, new);

            for c in 0..self.index.class_count() {
                let kc = self.index.degrees()[c];
                let e_old = self.global_energy(kc, old);
                let e_new = self.global_energy(kc, new);
                let levels = self.index.levels_mut(c);
                levels.insert(e_old, old);
                levels.insert(e_new, new);
            }

            self.spins[v] = new;
        }
    }

    /// Check the population and index invariants, describing the first violation.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        let n = self.view.node_count();
        if self.population.total() != n || self.population.recount() != n {
            return Err(format!(
                "population sums to {} (recount {}), expected {n}",
                self.population.total(),
                self.population.recount()
            ));
        }
        for (v, &s) in self.spins.iter().enumerate() {
            if s >= self.n_spins {
                return Err(format!("vertex {v} holds out-of-range label {s}"));
            }
        }
        for (c, &k) in self.index.degrees().iter().enumerate() {
            let levels = self.index.levels(c);
            if levels.iter().any(|(_, b)| b.is_empty()) {
                return Err(format!("degree {k}: empty bucket"));
            }
            if levels.label_count() != self.n_spins {
                return Err(format!(
                    "degree {k}: {} labels indexed, expected {}",
                    levels.label_count(),
                    self.n_spins
                ));
            }
            for s in 0..self.n_spins {
                let e = self.global_energy(k, s);
                if !levels.bucket(e).is_some_and(|b| b.contains(&s)) {
                    return Err(format!("degree {k}: label {s} not at its energy {e}"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::UnGraph;

    fn two_triangles() -> UnGraph<(), ()> {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let n: Vec<_> = (0..6).map(|_| graph.add_node(())).collect();
        for &(a, b) in &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)] {
            let _ = graph.add_edge(n[a], n[b], ());
        }
        graph
    }

    #[test]
    fn test_schedule_endpoints() {
        let s = CoolingSchedule::new(0.01, 1.0, 101);
        assert!((s.temperature(0) - 1.0).abs() < 1e-12);
        assert!((s.temperature(100) - 0.01).abs() < 1e-12);
        assert!(s.temperature(50) < 1.0 && s.temperature(50) > 0.01);
    }

    #[test]
    fn test_schedule_clamps_t_min() {
        let s = CoolingSchedule::new(-1.0, 1.0, 11);
        assert!((s.temperature(10) - f64::EPSILON).abs() < 1e-20);
        assert!(s.temperature(10) > 0.0);
    }

    #[test]
    fn test_schedule_single_sweep() {
        let s = CoolingSchedule::new(0.01, 2.0, 1);
        assert_eq!(s.rate(), 0.0);
        assert_eq!(s.temperature(0), 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_resolution() {
        let err = SpinGlass::new().with_resolution(0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "resolution",
                ..
            }
        ));
        assert!(SpinGlass::new().with_resolution(f64::NAN).validate().is_err());
        assert!(SpinGlass::new()
            .with_temperature(0.1, 0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_empty_graph() {
        let graph = UnGraph::<(), ()>::new_undirected();
        assert_eq!(SpinGlass::new().run(&graph, None), Err(Error::EmptyInput));
    }

    #[test]
    fn test_zero_iterations_keeps_initial_assignment() {
        let graph = two_triangles();
        let detector = SpinGlass::new().with_iterations(0).with_seed(3);
        let spins = detector.run(&graph, None).unwrap();

        let view = GraphView::from_graph(&graph, None).unwrap();
        let annealer = Annealer::new(&view, &detector);
        assert_eq!(spins, annealer.spins);
        assert!(spins.iter().all(|&s| s < 6));
    }

    #[test]
    fn test_single_iteration_is_valid() {
        let graph = two_triangles();
        let spins = SpinGlass::new()
            .with_iterations(1)
            .with_spins(4)
            .run(&graph, None)
            .unwrap();
        assert_eq!(spins.len(), 6);
        assert!(spins.iter().all(|&s| s < 4));
    }

    #[test]
    fn test_single_spin_is_trivial() {
        let graph = two_triangles();
        let spins = SpinGlass::new()
            .with_spins(1)
            .with_iterations(20)
            .run(&graph, None)
            .unwrap();
        assert_eq!(spins, vec![0; 6]);
    }

    #[test]
    fn test_clique_chain_recovered() {
        // Four 10-cliques, consecutive cliques joined by one edge.
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let n: Vec<_> = (0..40).map(|_| graph.add_node(())).collect();
        for c in 0..4 {
            for i in 0..10 {
                for j in (i + 1)..10 {
                    let _ = graph.add_edge(n[c * 10 + i], n[c * 10 + j], ());
                }
            }
        }
        for c in 0..3 {
            let _ = graph.add_edge(n[c * 10 + 9], n[(c + 1) * 10], ());
        }

        let communities = SpinGlass::new()
            .with_iterations(200)
            .with_seed(11)
            .detect(&graph)
            .unwrap();
        let expected: Vec<usize> = (0..40).map(|v| v / 10).collect();
        assert_eq!(communities, expected);
    }

    #[test]
    fn test_observer_sees_every_sweep() {
        let graph = two_triangles();
        let mut reports = Vec::new();
        SpinGlass::new()
            .with_iterations(25)
            .run_with(&graph, None, |r| reports.push(r.clone()))
            .unwrap();
        assert_eq!(reports.len(), 25);
        assert_eq!(reports[0].sweep, 0);
        assert_eq!(reports[24].percent, 100);
        assert!(reports[0].temperature > reports[24].temperature);
        assert!(reports.iter().all(|r| r.occupied >= 1 && r.occupied <= 6));
    }

    #[test]
    fn test_report_display() {
        let report = SweepReport {
            sweep: 3,
            total: 10,
            percent: 40,
            temperature: 0.5,
            occupied: 2,
            energy_levels: 7,
            moved: 1,
            steepest_descent: true,
        };
        let line = report.to_string();
        assert!(line.starts_with("3 of 10 (40%) temperature:"));
        assert!(line.ends_with("spins: 2 energy levels: 7 (steepest descent)"));
    }

    #[test]
    fn test_renumber_first_seen() {
        assert_eq!(renumber(&[7, 3, 7, 9, 3]), vec![0, 1, 0, 2, 1]);
    }

    #[test]
    fn test_weight_mismatch_is_reported_before_running() {
        let graph = two_triangles();
        let err = SpinGlass::new().run(&graph, Some(&[1.0; 3])).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 7, found: 3 }));
    }
}
