use grid_util::{Point, ValueGrid};
use waypoint_pathfinding::{OccupancyGrid, Pathfinder, PathfinderConfig};

// The heuristic_factor can be set to scale the heuristic, causing nodes that are closer to the goal (ignoring obstacles)
// to be evaluated quicker than in normal operation. This is called Weighted A* and it can speed up the algorithm in certain scenarios.

fn fill(grid: &mut OccupancyGrid, x: i32, y: i32, w: i32, h: i32, blocked: bool) {
    for i in x..x + w {
        for j in y..y + h {
            grid.set(i, j, blocked);
        }
    }
}

fn main() {
    env_logger::init();
    const N: i32 = 30;
    let mut grid = OccupancyGrid::new(N as usize, N as usize, false);
    fill(&mut grid, 8, 8, 8, 8, true);
    fill(&mut grid, 0, 3, 6, 6, true);
    fill(&mut grid, 10, 0, 6, 6, true);
    grid.generate_components();
    println!("{}", grid);
    let start = Point::new(1, 1);
    let end = Point::new(N - 3, N - 3);
    for factor in [1.0, 1.3, 2.0] {
        let config = PathfinderConfig::default().with_heuristic_factor(factor);
        let mut pathfinder = Pathfinder::new(grid.clone(), config);
        pathfinder.set_start(start).unwrap();
        pathfinder.set_end(end).unwrap();
        let direct = pathfinder.find_path_direct().clone();
        let hierarchical = pathfinder.find_path().clone();
        println!("heuristic_factor {factor}");
        println!("direct:\n{direct}");
        println!("hierarchical:\n{hierarchical}\n");
    }
}
