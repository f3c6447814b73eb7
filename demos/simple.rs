use grid_util::Point;
use waypoint_pathfinding::{OccupancyGrid, Pathfinder, PathfinderConfig};

// In this example a path is found on a grid with shape
// #####
// #..E#
// #.#.#
// #S..#
// #####
// S marks the start
// E marks the end
fn main() {
    env_logger::init();
    let grid = OccupancyGrid::from_ascii(&["#####", "#...#", "#.#.#", "#...#", "#####"]);
    let mut pathfinder = Pathfinder::new(grid, PathfinderConfig::default());
    pathfinder.set_start(Point::new(1, 1)).unwrap();
    pathfinder.set_end(Point::new(3, 3)).unwrap();
    let result = pathfinder.find_path();
    println!("{result}");
    if result.is_found() {
        println!("Waypoints: {:?}", result.route);
        println!("A path has been found:");
        for p in &result.path {
            println!("{:?}", p);
        }
    }
}
