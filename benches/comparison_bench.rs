use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::{grid::ValueGrid, Point};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use waypoint_pathfinding::{
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver},
    CoarseStrategy, MovementModel, OccupancyGrid, Pathfinder, PathfinderConfig, WaypointGraph,
};

const N: usize = 64;

fn random_grid(rng: &mut StdRng, movement: &MovementModel) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(N, N, false);
    grid.set_connectivity(movement.connectivity(), true);
    for x in 0..N as i32 {
        for y in 0..N as i32 {
            grid.set(x, y, rng.gen_bool(0.2));
        }
    }
    grid
}

/// Start and end pairs that are reachable from each other on `grid`.
fn scenarios(grid: &OccupancyGrid, rng: &mut StdRng, number: usize) -> Vec<(Point, Point)> {
    let mut scenarios = Vec::new();
    while scenarios.len() < number {
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        if grid.reachable(&start, &end) {
            scenarios.push((start, end));
        }
    }
    scenarios
}

fn random_bench<const ALLOW_DIAGONAL: bool>(c: &mut Criterion) {
    let movement = if ALLOW_DIAGONAL {
        MovementModel::octile()
    } else {
        MovementModel::default()
    };
    let diag_str = if ALLOW_DIAGONAL { "8-grid" } else { "4-grid" };
    let mut rng = StdRng::seed_from_u64(0);
    let mut grid = random_grid(&mut rng, &movement);
    grid.generate_components();
    let scenarios = scenarios(&grid, &mut rng, 32);

    let astar = AstarSolver::with_movement(movement);
    c.bench_function(format!("random {N}x{N}, Astar {diag_str}").as_str(), |b| {
        b.iter(|| {
            for (start, end) in &scenarios {
                black_box(astar.get_path_single_goal(&grid, *start, *end));
            }
        })
    });
    let dijkstra = DijkstraSolver::new(movement);
    c.bench_function(format!("random {N}x{N}, Dijkstra {diag_str}").as_str(), |b| {
        b.iter(|| {
            for (start, end) in &scenarios {
                black_box(dijkstra.get_path_single_goal(&grid, *start, *end));
            }
        })
    });
    c.bench_function(format!("random {N}x{N}, waypoint graph").as_str(), |b| {
        b.iter(|| {
            for (start, end) in &scenarios {
                black_box(WaypointGraph::build(&grid, *start, *end));
            }
        })
    });
    for strategy in [CoarseStrategy::Greedy, CoarseStrategy::ShortestPath] {
        let config = PathfinderConfig::default()
            .with_movement(movement)
            .with_coarse_strategy(strategy);
        let mut pathfinders: Vec<Pathfinder> = scenarios
            .iter()
            .map(|(start, end)| {
                let mut pathfinder = Pathfinder::new(grid.clone(), config.clone());
                pathfinder.set_start(*start).unwrap();
                pathfinder.set_end(*end).unwrap();
                pathfinder
            })
            .collect();
        c.bench_function(
            format!("random {N}x{N}, hierarchical {strategy:?} {diag_str}").as_str(),
            |b| {
                b.iter(|| {
                    for pathfinder in pathfinders.iter_mut() {
                        black_box(pathfinder.find_path().passes);
                    }
                })
            },
        );
    }
}

criterion_group!(benches, random_bench<false>, random_bench<true>);
criterion_main!(benches);
