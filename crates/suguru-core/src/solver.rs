use std::time::{Duration, Instant};

use crate::error::SolveError;
use crate::puzzle::{Assignment, Puzzle};
use crate::rng::SimpleRng;
use crate::value_set::ValueSet;

/// Order in which a cell's candidate values are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrder {
    /// Ascending numeric order. Deterministic.
    Ascending,
    /// Each candidate list shuffled with the seeded RNG. The puzzle generator
    /// uses this to diversify which solution a partition yields.
    Shuffled(u64),
}

/// Search limits and value ordering for one solver instance.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Abort with `BudgetExceeded` after this many decision nodes.
    pub node_budget: Option<u64>,
    /// Abort with `BudgetExceeded` once this much wall time has passed,
    /// checked at the same point as the node budget.
    pub time_budget: Option<Duration>,
    pub value_order: ValueOrder,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            node_budget: None,
            time_budget: None,
            value_order: ValueOrder::Ascending,
        }
    }
}

/// Backtracking solver with MRV variable ordering and forward checking.
///
/// Stateless across calls: every solve owns its domains and working
/// assignment, so a failed or aborted search leaves nothing behind.
pub struct Solver {
    config: SolverConfig,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a solver with unbounded search and ascending value order.
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Find a complete assignment for the puzzle, or prove none exists.
    ///
    /// The first solution found is returned; uniqueness is not checked.
    pub fn solve(&self, puzzle: &Puzzle) -> Result<Assignment, SolveError> {
        let mut search = Search::new(puzzle, &self.config)?;
        match search.run() {
            Ok(true) => {
                log::debug!("solved in {} nodes", search.nodes);
                Ok(search.into_assignment())
            }
            Ok(false) => {
                log::debug!("proved unsatisfiable after {} nodes", search.nodes);
                Err(SolveError::Unsatisfiable)
            }
            Err(err) => {
                log::debug!("aborted after {} nodes: {err}", search.nodes);
                Err(err)
            }
        }
    }
}

/// Per-solve state: flat arenas indexed by row-major cell index.
struct Search<'a> {
    puzzle: &'a Puzzle,
    /// Region mates and 8-adjacent neighbors of each cell, deduplicated,
    /// self excluded.
    peers: Vec<Vec<u32>>,
    domains: Vec<ValueSet>,
    /// 0 = unassigned.
    values: Vec<u8>,
    unassigned: usize,
    nodes: u64,
    node_budget: Option<u64>,
    deadline: Option<Instant>,
    rng: Option<SimpleRng>,
}

impl<'a> Search<'a> {
    /// Initialize domains and propagate every given exactly once. Returns
    /// `Unsatisfiable` immediately if that empties any domain (which also
    /// catches mutually conflicting givens).
    fn new(puzzle: &'a Puzzle, config: &SolverConfig) -> Result<Self, SolveError> {
        let topo = puzzle.topology();
        let map = puzzle.region_map();
        let cell_count = topo.cell_count();

        let mut peers: Vec<Vec<u32>> = vec![Vec::new(); cell_count];
        for (_, cells) in map.regions() {
            for &cell in cells {
                let index = topo.index(cell);
                let mut list: Vec<u32> = cells
                    .iter()
                    .filter(|&&mate| mate != cell)
                    .map(|&mate| topo.index(mate) as u32)
                    .collect();
                for &nb in topo.neighbors(cell) {
                    list.push(topo.index(nb) as u32);
                }
                list.sort_unstable();
                list.dedup();
                peers[index] = list;
            }
        }

        let mut domains: Vec<ValueSet> = (0..cell_count)
            .map(|i| ValueSet::full(map.region_size_of(topo.cell_at(i))))
            .collect();
        let mut values = vec![0u8; cell_count];

        for (&cell, &value) in puzzle.givens() {
            let index = topo.index(cell);
            domains[index] = ValueSet::singleton(value);
            values[index] = value;
        }
        for (&cell, &value) in puzzle.givens() {
            let index = topo.index(cell);
            for &peer in &peers[index] {
                let domain = &mut domains[peer as usize];
                if domain.remove(value) && domain.is_empty() {
                    return Err(SolveError::Unsatisfiable);
                }
            }
        }

        Ok(Self {
            puzzle,
            peers,
            domains,
            values,
            unassigned: cell_count - puzzle.givens().len(),
            nodes: 0,
            node_budget: config.node_budget,
            deadline: config.time_budget.map(|budget| Instant::now() + budget),
            rng: match config.value_order {
                ValueOrder::Ascending => None,
                ValueOrder::Shuffled(seed) => Some(SimpleRng::with_seed(seed)),
            },
        })
    }

    /// One decision node. `Ok(true)` means `values` holds a full solution,
    /// `Ok(false)` means this branch is refuted; `Err` aborts the whole
    /// search.
    fn run(&mut self) -> Result<bool, SolveError> {
        self.nodes += 1;
        if let Some(budget) = self.node_budget {
            if self.nodes > budget {
                return Err(SolveError::BudgetExceeded);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(SolveError::BudgetExceeded);
            }
        }
        if self.unassigned == 0 {
            return Ok(true);
        }

        let cell = match self.select_mrv() {
            Some(cell) => cell,
            // Cannot happen while unassigned > 0, but a missing selection is
            // a refuted branch, not a panic.
            None => return Ok(false),
        };

        let mut candidates: Vec<u8> = self.domains[cell].iter().collect();
        if let Some(rng) = &mut self.rng {
            rng.shuffle(&mut candidates);
        }

        for value in candidates {
            if !self.consistent(cell, value) {
                continue;
            }
            self.values[cell] = value;
            self.unassigned -= 1;

            // Forward checking: prune peers, recording exact removals so
            // backtracking restores domains without widening anything else.
            let mut undo: Vec<u32> = Vec::new();
            let mut dead_end = false;
            for i in 0..self.peers[cell].len() {
                let peer = self.peers[cell][i] as usize;
                if self.values[peer] != 0 {
                    continue;
                }
                if self.domains[peer].remove(value) {
                    undo.push(peer as u32);
                    if self.domains[peer].is_empty() {
                        dead_end = true;
                        break;
                    }
                }
            }

            if !dead_end && self.run()? {
                return Ok(true);
            }

            for &peer in &undo {
                self.domains[peer as usize].insert(value);
            }
            self.values[cell] = 0;
            self.unassigned += 1;
        }
        Ok(false)
    }

    /// MRV with highest-degree tie-break: smallest domain first, then the
    /// cell with the most unassigned peers.
    fn select_mrv(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_size = usize::MAX;
        let mut best_degree = 0usize;
        for cell in 0..self.values.len() {
            if self.values[cell] != 0 {
                continue;
            }
            let size = self.domains[cell].len();
            if size > best_size {
                continue;
            }
            let degree = self.peers[cell]
                .iter()
                .filter(|&&peer| self.values[peer as usize] == 0)
                .count();
            if size < best_size || degree > best_degree {
                best = Some(cell);
                best_size = size;
                best_degree = degree;
            }
        }
        best
    }

    /// Redundant with forward checking, but cheap and keeps the search
    /// correct even for singleton given domains never pruned elsewhere.
    fn consistent(&self, cell: usize, value: u8) -> bool {
        self.peers[cell]
            .iter()
            .all(|&peer| self.values[peer as usize] != value)
    }

    fn into_assignment(self) -> Assignment {
        let topo = self.puzzle.topology();
        self.values
            .iter()
            .enumerate()
            .map(|(index, &value)| (topo.cell_at(index), value))
            .collect()
    }
}
