use std::thread::sleep;
use std::time::Duration;

use grid_util::{Point, ValueGrid};
use waypoint_pathfinding::{OccupancyGrid, Pathfinder, PathfinderConfig, ReplayEvent};

// Replays a finished search pass by pass, the way an animated view would show it.
// `o` marks opened cells, `x` closed cells and `*` the final path.
fn main() {
    env_logger::init();
    let rows = [
        "..........",
        "..........",
        "...####...",
        "......#...",
        "......#...",
        "..#####...",
        "..........",
        "..........",
    ];
    let grid = OccupancyGrid::from_ascii(&rows);
    let height = grid.height();
    let mut pathfinder = Pathfinder::new(grid, PathfinderConfig::default());
    pathfinder.set_start(Point::new(0, 0)).unwrap();
    pathfinder.set_end(Point::new(8, 6)).unwrap();
    let result = pathfinder.find_path().clone();

    let mut canvas: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
    let show = |canvas: &Vec<Vec<char>>| {
        let frame: Vec<String> = canvas.iter().map(|r| r.iter().collect()).collect();
        println!("{}\n", frame.join("\n"));
    };
    for event in result.trace.replay(&result.path) {
        let (p, c) = match event {
            ReplayEvent::Open(p) => (p, 'o'),
            ReplayEvent::Closed(p) => (p, 'x'),
            ReplayEvent::Path(p) => (p, '*'),
        };
        canvas[height - 1 - p.y as usize][p.x as usize] = c;
        if let ReplayEvent::Closed(_) = event {
            show(&canvas);
            sleep(Duration::from_millis(20));
        }
    }
    show(&canvas);
    println!("{result}");
}
