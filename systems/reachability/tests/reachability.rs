use std::collections::BTreeSet;

use maze_runner_core::{CellCoord, Dimensions};
use maze_runner_system_generation::generate;
use maze_runner_system_reachability::{is_solvable, reachable_cells};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn generated_mazes_are_solvable_without_doors() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xbeef);
    for _ in 0..50 {
        let width = rng.gen_range(5..=10);
        let height = rng.gen_range(5..=10);
        let dimensions = Dimensions::new(width, height).expect("valid dimensions");
        let grid = generate(dimensions, &mut rng).expect("generate");

        assert!(is_solvable(
            &grid,
            &BTreeSet::new(),
            dimensions.entrance(),
            dimensions.exit()
        ));
        assert_eq!(
            reachable_cells(&grid, &BTreeSet::new(), dimensions.entrance()).len(),
            dimensions.cell_count()
        );
    }
}

#[test]
fn doors_never_reduce_reachability() {
    let dimensions = Dimensions::new(7, 9).expect("valid dimensions");
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let grid = generate(dimensions, &mut rng).expect("generate");
    let doors = BTreeSet::from([CellCoord::new(3, 4), CellCoord::new(6, 0)]);

    assert!(is_solvable(
        &grid,
        &doors,
        dimensions.entrance(),
        dimensions.exit()
    ));
    assert_eq!(
        reachable_cells(&grid, &doors, dimensions.entrance()).len(),
        dimensions.cell_count()
    );
}

#[test]
fn reachable_cells_start_with_the_origin() {
    let dimensions = Dimensions::new(5, 5).expect("valid dimensions");
    let grid = generate(dimensions, &mut ChaCha8Rng::seed_from_u64(12)).expect("generate");

    let cells = reachable_cells(&grid, &BTreeSet::new(), CellCoord::new(2, 2));

    assert_eq!(cells.first(), Some(&CellCoord::new(2, 2)));
}
