use crate::error::GenerationFailed;
use crate::partition::random_partition;
use crate::puzzle::{Assignment, Puzzle};
use crate::region::RegionMap;
use crate::rng::SimpleRng;
use crate::solver::{Solver, SolverConfig, ValueOrder};

/// Configuration for puzzle generation.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub cols: usize,
    pub max_region_size: usize,
    /// Fresh partitions to try before giving up.
    pub max_attempts: usize,
    /// Solver node budget per attempt; a partition that busts it just counts
    /// as a failed attempt.
    pub node_budget: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            max_region_size: 5,
            max_attempts: 1000,
            node_budget: 200_000,
        }
    }
}

/// A generated puzzle: the partition, its full solution, and the revealed
/// givens (one cell per region).
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub region_map: RegionMap,
    pub solution: Assignment,
    pub givens: Assignment,
}

/// Suguru puzzle generator.
///
/// Owns the only RNG of the pipeline; partition shapes, solver value
/// shuffling, and given selection all derive from it, so one seed reproduces
/// the whole triple.
pub struct Generator {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    pub fn with_config_and_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Generate a puzzle: carve random partitions and solve them until one
    /// admits a full solution, then reveal one random cell per region.
    pub fn generate(&mut self) -> Result<GeneratedPuzzle, GenerationFailed> {
        for attempt in 1..=self.config.max_attempts {
            let partition_seed = self.rng.next_u64();
            let shuffle_seed = self.rng.next_u64();
            let region_map = random_partition(
                self.config.rows,
                self.config.cols,
                self.config.max_region_size,
                Some(partition_seed),
            );

            let solver = Solver::with_config(SolverConfig {
                node_budget: Some(self.config.node_budget),
                time_budget: None,
                value_order: ValueOrder::Shuffled(shuffle_seed),
            });
            let puzzle = Puzzle::blank(region_map);
            match solver.solve(&puzzle) {
                Ok(solution) => {
                    log::debug!("generated solvable partition on attempt {attempt}");
                    let region_map = puzzle.into_region_map();
                    let mut givens = Assignment::new();
                    for (_, cells) in region_map.regions() {
                        let cell = cells[self.rng.next_usize(cells.len())];
                        givens.insert(cell, solution[&cell]);
                    }
                    return Ok(GeneratedPuzzle {
                        region_map,
                        solution,
                        givens,
                    });
                }
                Err(err) => {
                    log::debug!("attempt {attempt} failed: {err}");
                }
            }
        }

        log::warn!(
            "failed to generate a puzzle after {} attempts",
            self.config.max_attempts
        );
        Err(GenerationFailed {
            attempts: self.config.max_attempts,
        })
    }
}
