//! Shortest route between the entrance and the exit

use std::collections::VecDeque;

use log::debug;

use crate::maze::{Direction, Location, Maze};

/// Parent slot of a square the search has not reached
const UNVISITED: usize = usize::MAX;

/// Find a shortest route from the start to the goal
///
/// Breadth-first search over all non-wall squares. Neighbours are expanded
/// in [Direction::ALL] order, which decides the route among equally short
/// ones. The returned route includes both endpoints and runs from start to
/// goal; it is empty if the goal cannot be reached.
///
/// The maze is not modified, see [Maze::set_route].
///
/// # Examples
/// ```
/// use dig_maze::{find_route, MazeGenerator};
///
/// let maze = MazeGenerator::new(Some(3)).generate_fixed(15, 15).unwrap();
/// let route = find_route(&maze);
/// assert_eq!(route.first(), Some(&maze.start()));
/// assert_eq!(route.last(), Some(&maze.goal()));
/// ```
pub fn find_route(maze: &Maze) -> Vec<Location> {
    let (width, height) = (maze.width(), maze.height());
    let (start, goal) = (maze.start(), maze.goal());
    if start == goal {
        return vec![start];
    }

    let cells = maze.cells();
    let index = |loc: Location| loc.y * width + loc.x;

    // Linear index of the square each square was reached from
    let mut parent = vec![UNVISITED; width * height];
    parent[index(start)] = index(start);

    let mut queue = VecDeque::from([start]);
    let mut found = false;
    'search: while let Some(current) = queue.pop_front() {
        for direction in Direction::ALL {
            let Some(next) = current.step(direction, width, height) else {
                continue;
            };
            let next_index = index(next);
            if parent[next_index] != UNVISITED || !cells[next_index].is_traversable() {
                continue;
            }
            parent[next_index] = index(current);
            if next == goal {
                found = true;
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !found {
        debug!("No route from {} to {}", start, goal);
        return Vec::new();
    }

    let mut route = vec![goal];
    let mut now = index(goal);
    while now != index(start) {
        now = parent[now];
        route.push(maze.location_of(now));
    }
    route.reverse();
    debug!("Found route of {} squares", route.len());
    route
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::maze::Cell;
    use crate::MazeGenerator;

    /// Steps from start to goal, found independently of [find_route]
    fn distance(maze: &Maze) -> Option<usize> {
        let mut dist = vec![None; maze.width() * maze.height()];
        dist[maze.index_of(maze.start()).unwrap()] = Some(0);
        let mut queue = VecDeque::from([maze.start()]);
        while let Some(loc) = queue.pop_front() {
            let d = dist[maze.index_of(loc).unwrap()].unwrap();
            for direction in Direction::ALL {
                let Some(next) = loc.step(direction, maze.width(), maze.height()) else {
                    continue;
                };
                let i = maze.index_of(next).unwrap();
                if dist[i].is_none() && maze.cells()[i] != Cell::Wall {
                    dist[i] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist[maze.index_of(maze.goal()).unwrap()]
    }

    #[test]
    fn route_through_generated_mazes() {
        let mut gen = MazeGenerator::new(Some(11));
        for (w, h) in [(5, 5), (7, 7), (15, 9), (33, 33)] {
            for _ in 0..10 {
                let maze = gen.generate_fixed(w, h).unwrap();
                let route = find_route(&maze);

                assert_eq!(route.first(), Some(&maze.start()));
                assert_eq!(route.last(), Some(&maze.goal()));
                assert_eq!(Some(route.len()), distance(&maze).map(|d| d + 1));
                for (a, b) in route.iter().tuple_windows() {
                    assert_eq!(a.distance(*b), 1);
                    assert_ne!(maze.cell_at(a.x, a.y).unwrap(), Cell::Wall);
                    assert_ne!(maze.cell_at(b.x, b.y).unwrap(), Cell::Wall);
                }
            }
        }
    }

    #[test]
    fn ties_follow_direction_order() {
        let maze = Maze::parse(
            "
🟫🏃🟫🟫🟫
🟫🟩🟩🟩🟫
🟫🟩🟫🟩🟫
🟫🟩🟩🟩🟫
🟫🟫🟫❎🟫"
                .trim(),
        )
        .unwrap();
        let expected = [(1, 0), (1, 1), (1, 2), (1, 3), (2, 3), (3, 3), (3, 4)]
            .map(|(x, y)| Location::new(x, y))
            .to_vec();
        assert_eq!(find_route(&maze), expected);
    }

    #[test]
    fn route_markers_are_traversable() {
        let mut maze = MazeGenerator::new(Some(12))
            .generate_fixed(21, 21)
            .unwrap();
        let route = find_route(&maze);
        maze.set_route(route.clone()).unwrap();
        assert_eq!(find_route(&maze), route);
    }

    #[test]
    fn unreachable_goal_gives_empty_route() {
        let maze = Maze::parse(
            "
🟫🏃🟫🟫🟫
🟫🟩🟩🟩🟫
🟫🟫🟫🟫🟫
🟫🟩🟩🟩🟫
🟫❎🟫🟫🟫"
                .trim(),
        )
        .unwrap();
        assert!(find_route(&maze).is_empty());
    }

    #[test]
    fn start_equal_to_goal() {
        let loc = Location::new(1, 1);
        let maze = Maze::new(3, 3, vec![Cell::Path; 9], loc, loc).unwrap();
        assert_eq!(find_route(&maze), vec![loc]);
    }

    #[test]
    fn end_to_end_seven_by_seven() {
        let mut maze = MazeGenerator::new(Some(13)).generate_fixed(7, 7).unwrap();
        assert_eq!((maze.width(), maze.height()), (7, 7));
        let (start, goal) = (maze.start(), maze.goal());
        assert!((start.y == 0 && goal.y == 6) || (start.x == 0 && goal.x == 6));

        let route = find_route(&maze);
        assert!(route.len() >= 2 && route.len() <= 49);

        maze.set_route(route.clone()).unwrap();
        for loc in &route[1..route.len() - 1] {
            assert_eq!(maze.cell_at(loc.x, loc.y).unwrap(), Cell::RouteMarker);
        }
        assert_eq!(maze.cell_at(start.x, start.y).unwrap(), Cell::Start);
        assert_eq!(maze.cell_at(goal.x, goal.y).unwrap(), Cell::Goal);
    }
}
