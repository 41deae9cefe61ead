use std::collections::VecDeque;

use maze_runner_core::{CellCoord, Dimensions, Direction, Grid};
use maze_runner_system_generation::generate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn connected_cells(grid: &Grid) -> usize {
    let dimensions = grid.dimensions();
    let mut seen = vec![false; dimensions.cell_count()];
    let mut queue = VecDeque::from([dimensions.entrance()]);
    seen[0] = true;
    let mut count = 0;

    while let Some(cell) = queue.pop_front() {
        count += 1;
        for direction in Direction::ALL {
            let Some(neighbor) = dimensions.neighbor(cell, direction) else {
                continue;
            };
            let index = dimensions.index(neighbor).expect("neighbor in bounds");
            if grid.is_open(cell, direction) && !seen[index] {
                seen[index] = true;
                queue.push_back(neighbor);
            }
        }
    }

    count
}

#[test]
fn generated_mazes_are_spanning_trees() {
    for width in 5..=10 {
        for height in 5..=10 {
            let dimensions = Dimensions::new(width, height).expect("valid dimensions");
            let mut rng = ChaCha8Rng::seed_from_u64(u64::from(width * 31 + height));

            let grid = generate(dimensions, &mut rng).expect("generate");

            assert_eq!(
                grid.passage_count(),
                dimensions.cell_count() - 1,
                "{dimensions} maze should carve exactly one passage per non-root cell"
            );
            assert!(grid.is_consistent(), "{dimensions} maze has one-sided passages");
            assert_eq!(
                connected_cells(&grid),
                dimensions.cell_count(),
                "{dimensions} maze leaves cells unreachable from the entrance"
            );
        }
    }
}

#[test]
fn every_cell_has_at_least_one_opening() {
    let dimensions = Dimensions::new(8, 6).expect("valid dimensions");
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    let grid = generate(dimensions, &mut rng).expect("generate");

    for cell in dimensions.cells() {
        let mask = grid.mask(cell).expect("cell in bounds");
        assert_ne!(mask.bits(), 0, "cell {cell} was never carved");
    }
}

#[test]
fn same_seed_reproduces_the_same_maze() {
    let dimensions = Dimensions::new(10, 10).expect("valid dimensions");

    let first = generate(dimensions, &mut ChaCha8Rng::seed_from_u64(99)).expect("generate");
    let second = generate(dimensions, &mut ChaCha8Rng::seed_from_u64(99)).expect("generate");

    assert_eq!(first, second);
}

#[test]
fn different_seeds_produce_different_mazes() {
    let dimensions = Dimensions::new(10, 10).expect("valid dimensions");

    let layouts: Vec<Grid> = (0..8)
        .map(|seed| generate(dimensions, &mut ChaCha8Rng::seed_from_u64(seed)).expect("generate"))
        .collect();

    assert!(
        layouts.windows(2).any(|pair| pair[0] != pair[1]),
        "eight seeds should not all carve the identical 10x10 maze"
    );
}

#[test]
fn entrance_is_never_isolated() {
    let dimensions = Dimensions::new(5, 5).expect("valid dimensions");
    for seed in 0..32 {
        let grid = generate(dimensions, &mut ChaCha8Rng::seed_from_u64(seed)).expect("generate");
        let entrance = CellCoord::new(0, 0);
        assert!(
            grid.is_open(entrance, Direction::East) || grid.is_open(entrance, Direction::South),
            "seed {seed} left the entrance walled in"
        );
    }
}
