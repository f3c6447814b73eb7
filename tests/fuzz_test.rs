/// Fuzzes the pathfinding system by checking for many random grids that a path is found exactly when
/// the goal is reachable by being part of the same connected component. Both movement models are
/// tested, and the hierarchical search is checked to only ever return valid paths.
use grid_util::*;
use rand::prelude::*;
use waypoint_pathfinding::{
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver},
    CoarseStrategy, Connectivity, MovementModel, OccupancyGrid, Pathfinder, PathfinderConfig,
};

fn random_grid(w: usize, h: usize, rng: &mut StdRng, movement: &MovementModel) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(w, h, false);
    grid.set_connectivity(movement.connectivity(), true);
    for x in 0..grid.width() as i32 {
        for y in 0..grid.height() as i32 {
            grid.set(x, y, rng.gen_bool(0.4))
        }
    }
    grid
}

fn clear_endpoints(grid: &mut OccupancyGrid, start: &Point, end: &Point) {
    grid.set(start.x, start.y, false);
    grid.set(end.x, end.y, false);
    grid.generate_components();
}

fn is_step(movement: &MovementModel, a: &Point, b: &Point) -> bool {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    match movement.connectivity() {
        Connectivity::Four => dx + dy == 1,
        Connectivity::Eight => dx.max(dy) == 1,
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 10000;
    let mut rng = StdRng::seed_from_u64(0);
    for movement in [MovementModel::default(), MovementModel::octile()] {
        let solver = AstarSolver::with_movement(movement);
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, N, &mut rng, &movement);
            clear_endpoints(&mut grid, &start, &end);
            let reachable = grid.reachable(&start, &end);
            let path = solver.get_path_single_goal(&grid, start, end);
            // Show the grid if a path is not found
            if path.is_some() != reachable {
                println!("{}", grid.render_with(Some(start), Some(end), &[]));
            }
            assert!(path.is_some() == reachable);
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 5;
    const N_GRIDS: usize = 10000;
    let mut rng = StdRng::seed_from_u64(0);
    let movement = MovementModel::default();
    let astar_solver = AstarSolver::new();
    let dijkstra_solver = DijkstraSolver::new(movement);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng, &movement);
        clear_endpoints(&mut grid, &start, &end);
        if grid.reachable(&start, &end) {
            let astar = astar_solver.search(&grid, start, end).unwrap();
            let dijkstra = dijkstra_solver.search(&grid, start, end).unwrap();
            if astar.cost != dijkstra.cost {
                println!("Astar path: {:?}\nDijkstra path: {:?}", astar.path, dijkstra.path);
                println!("{}", grid.render_with(Some(start), Some(end), &astar.path));
            }
            assert_eq!(astar.cost, dijkstra.cost);
            assert!(astar.passes <= dijkstra.passes);
        }
    }
}

#[test]
fn fuzz_hierarchical() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for movement in [MovementModel::default(), MovementModel::octile()] {
        let mut reachable_count = 0;
        let mut shortest_found = 0;
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, N, &mut rng, &movement);
            clear_endpoints(&mut grid, &start, &end);
            let reachable = grid.reachable(&start, &end);
            if reachable {
                reachable_count += 1;
            }
            for strategy in [CoarseStrategy::Greedy, CoarseStrategy::ShortestPath] {
                let config = PathfinderConfig::default()
                    .with_movement(movement)
                    .with_coarse_strategy(strategy);
                let mut pathfinder = Pathfinder::new(grid.clone(), config);
                pathfinder.set_start(start).unwrap();
                pathfinder.set_end(end).unwrap();
                let result = pathfinder.find_path().clone();
                if !reachable {
                    assert!(!result.is_found());
                    continue;
                }
                if !result.is_found() {
                    continue;
                }
                if strategy == CoarseStrategy::ShortestPath {
                    shortest_found += 1;
                }
                assert_eq!(result.path.first(), Some(&start));
                assert_eq!(result.path.last(), Some(&end));
                assert!(result.path.iter().all(|p| pathfinder.grid().is_free(p)));
                assert!(result
                    .path
                    .windows(2)
                    .all(|w| is_step(&movement, &w[0], &w[1])));
                assert_eq!(result.trace.len(), result.passes);
            }
        }
        assert!(reachable_count > 0);
        // Shortest-path routing succeeds whenever the waypoint graph connects start and end,
        // which holds for most 4-way grids
        if movement.connectivity() == Connectivity::Four {
            assert!(
                shortest_found * 5 >= reachable_count * 3,
                "{shortest_found} of {reachable_count} reachable grids routed"
            );
        }
    }
}
