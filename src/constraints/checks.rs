//! Stateless constraint predicates over a puzzle and an assignment

use super::Assignment;
use crate::puzzle::Puzzle;
use std::collections::VecDeque;

/// Every island's bridge count equals its required value. Only meaningful
/// on complete assignments; unassigned edges count as 0.
pub fn degree_exact(puzzle: &Puzzle, assignment: &Assignment) -> bool {
    let degrees = island_degrees(puzzle, assignment);
    puzzle
        .islands()
        .iter()
        .all(|island| degrees[island.id] == island.value as u32)
}

/// No island's bridge count exceeds its required value. Run after each
/// speculative assignment to cut branches that already overshoot.
pub fn degree_partial(puzzle: &Puzzle, assignment: &Assignment) -> bool {
    let degrees = island_degrees(puzzle, assignment);
    puzzle
        .islands()
        .iter()
        .all(|island| degrees[island.id] <= island.value as u32)
}

/// No two edges from the precomputed intersection set both carry bridges
pub fn crossing_ok(puzzle: &Puzzle, assignment: &Assignment) -> bool {
    puzzle
        .intersections()
        .iter()
        .all(|&(e1, e2)| assignment.bridges(e1) == 0 || assignment.bridges(e2) == 0)
}

/// All islands form one component under edges with at least one bridge.
/// A multi-island puzzle with no active edge fails outright.
pub fn connectivity_exact(puzzle: &Puzzle, assignment: &Assignment) -> bool {
    reaches_all(puzzle, |edge| assignment.bridges(edge) > 0)
}

/// Like [`connectivity_exact`] but unassigned edges are treated as
/// potentially connecting, so a failure means the branch can never become
/// connected.
pub fn connectivity_partial(puzzle: &Puzzle, assignment: &Assignment) -> bool {
    reaches_all(puzzle, |edge| assignment.get(edge) != Some(0))
}

fn island_degrees(puzzle: &Puzzle, assignment: &Assignment) -> Vec<u32> {
    let mut degrees = vec![0u32; puzzle.islands().len()];
    for edge in puzzle.edges() {
        let bridges = assignment.bridges(edge.id) as u32;
        degrees[edge.u] += bridges;
        degrees[edge.v] += bridges;
    }
    degrees
}

/// BFS from the first island across edges accepted by `active`
fn reaches_all(puzzle: &Puzzle, active: impl Fn(usize) -> bool) -> bool {
    let islands = puzzle.islands();
    if islands.len() <= 1 {
        return true;
    }

    let mut visited = vec![false; islands.len()];
    let mut queue = VecDeque::new();
    visited[0] = true;
    queue.push_back(0);

    let mut reached = 1;
    while let Some(current) = queue.pop_front() {
        for &edge_id in puzzle.incident_edges(current) {
            if !active(edge_id) {
                continue;
            }
            let edge = &puzzle.edges()[edge_id];
            let neighbor = if edge.u == current { edge.v } else { edge.u };
            if !visited[neighbor] {
                visited[neighbor] = true;
                reached += 1;
                queue.push_back(neighbor);
            }
        }
    }

    reached == islands.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Grid;

    fn puzzle_from(rows: Vec<Vec<u8>>) -> Puzzle {
        Puzzle::build(&Grid::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_degree_checks() {
        // Single edge between two 2-islands
        let puzzle = puzzle_from(vec![vec![2, 2]]);

        let double = Assignment::from_counts(vec![2]);
        assert!(degree_exact(&puzzle, &double));
        assert!(degree_partial(&puzzle, &double));

        let single = Assignment::from_counts(vec![1]);
        assert!(!degree_exact(&puzzle, &single));
        assert!(degree_partial(&puzzle, &single));
    }

    #[test]
    fn test_degree_partial_rejects_overshoot() {
        let puzzle = puzzle_from(vec![vec![1, 1]]);
        let overshoot = Assignment::from_counts(vec![2]);
        assert!(!degree_partial(&puzzle, &overshoot));
    }

    #[test]
    fn test_crossing_constraint() {
        let puzzle = puzzle_from(vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
        assert_eq!(puzzle.intersections().len(), 1);

        // Both crossing edges active -> violation
        let both = Assignment::from_counts(vec![1, 1]);
        assert!(!crossing_ok(&puzzle, &both));

        // Either alone is fine
        let one = Assignment::from_counts(vec![1, 0]);
        assert!(crossing_ok(&puzzle, &one));
        let other = Assignment::from_counts(vec![0, 1]);
        assert!(crossing_ok(&puzzle, &other));
    }

    #[test]
    fn test_connectivity_exact() {
        // 1 - 1 chain
        let chain = puzzle_from(vec![vec![1, 1]]);
        assert!(connectivity_exact(&chain, &Assignment::from_counts(vec![1])));
        assert!(!connectivity_exact(&chain, &Assignment::from_counts(vec![0])));
    }

    #[test]
    fn test_disconnected_pairs_rejected() {
        // Two island pairs, each degree-satisfiable, no path between them
        let puzzle = puzzle_from(vec![
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 2, 2],
        ]);
        assert_eq!(puzzle.edges().len(), 2);

        let assignment = Assignment::from_counts(vec![2, 2]);
        assert!(degree_exact(&puzzle, &assignment));
        assert!(crossing_ok(&puzzle, &assignment));
        assert!(!connectivity_exact(&puzzle, &assignment));
        // Not even potentially connected
        assert!(!connectivity_partial(&puzzle, &Assignment::empty(2)));
    }

    #[test]
    fn test_connectivity_partial_keeps_open_branches() {
        let puzzle = puzzle_from(vec![vec![1, 0, 1]]);
        let mut assignment = Assignment::empty(1);
        assert!(connectivity_partial(&puzzle, &assignment));

        // Ruling the only edge out disconnects the islands for good
        assignment.set(0, 0);
        assert!(!connectivity_partial(&puzzle, &assignment));
    }

    #[test]
    fn test_single_island_trivially_connected() {
        let puzzle = puzzle_from(vec![vec![1]]);
        assert!(connectivity_exact(&puzzle, &Assignment::empty(0)));
    }
}
