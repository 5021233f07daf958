//! Basic walkthrough of the Suguru engine: generate, solve, validate, and
//! round-trip a puzzle through its serialized form.

use suguru_core::{
    check_conflicts, Generator, GeneratorConfig, Puzzle, Solver, SolverConfig, ValueOrder,
};

fn main() {
    env_logger::init();

    println!("Generating a 6x6 puzzle...\n");
    let config = GeneratorConfig {
        rows: 6,
        cols: 6,
        max_region_size: 5,
        ..GeneratorConfig::default()
    };
    let mut generator = Generator::with_config_and_seed(config, 42);
    let generated = match generator.generate() {
        Ok(generated) => generated,
        Err(err) => {
            eprintln!("{err} -- try other parameters or another seed");
            return;
        }
    };

    println!("Regions:\n{}", generated.region_map);
    let sizes: Vec<usize> = generated
        .region_map
        .regions()
        .map(|(_, cells)| cells.len())
        .collect();
    println!("Region sizes: {sizes:?}");
    println!("Givens: {}\n", generated.givens.len());

    let puzzle = match Puzzle::new(generated.region_map.clone(), generated.givens.clone()) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("generated puzzle failed validation: {err}");
            return;
        }
    };
    println!("Puzzle:\n{}", puzzle.render(&generated.givens));
    println!("Solution:\n{}", puzzle.render(&generated.solution));

    // Solve from scratch with a shuffled value order; any solution the
    // solver returns must be conflict-free, though it need not match the
    // generator's (uniqueness is not guaranteed).
    let solver = Solver::with_config(SolverConfig {
        value_order: ValueOrder::Shuffled(7),
        ..SolverConfig::default()
    });
    match solver.solve(&puzzle) {
        Ok(solution) => {
            assert!(check_conflicts(puzzle.region_map(), &solution).is_empty());
            println!("Re-solved from givens:\n{}", puzzle.render(&solution));
        }
        Err(err) => println!("re-solve failed: {err}"),
    }

    // Simulate interactive play: merge a user entry over the givens and
    // re-solve the merged state, as the play UI's solve button does.
    let mut merged = generated.givens.clone();
    let user_cell = *generated
        .solution
        .keys()
        .find(|cell| !merged.contains_key(cell))
        .expect("a 6x6 puzzle has unrevealed cells");
    merged.insert(user_cell, generated.solution[&user_cell]);
    match Puzzle::new(generated.region_map.clone(), merged) {
        Ok(play_state) => match Solver::new().solve(&play_state) {
            Ok(_) => println!("play state at {user_cell} still solvable"),
            Err(err) => println!("play state unsolvable: {err}"),
        },
        Err(err) => println!("invalid play state: {err}"),
    }

    // Export to the flat JSON shape and import it back.
    let data = puzzle.to_data();
    let json = serde_json::to_string_pretty(&data).expect("puzzle data serializes");
    println!("\nExported JSON:\n{json}");
    let reloaded: suguru_core::PuzzleData =
        serde_json::from_str(&json).expect("exported JSON parses");
    let round_tripped = Puzzle::from_data(&reloaded).expect("exported puzzle validates");
    assert_eq!(round_tripped.to_data(), data);
    println!("\nRound trip through JSON: lossless");
}
