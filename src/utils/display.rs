//! Rendering a solved assignment back onto a printable grid

use crate::constraints::Assignment;
use crate::puzzle::{Direction, Puzzle};
use anyhow::Result;

pub const H_SINGLE: char = '-';
pub const H_DOUBLE: char = '=';
pub const V_SINGLE: char = '|';
pub const V_DOUBLE: char = '$';

/// Map a complete assignment onto the output grid: islands keep their
/// digit, bridge cells get the direction/count symbol, everything else
/// stays `0`.
pub fn render_solution(puzzle: &Puzzle, assignment: &Assignment) -> Vec<Vec<String>> {
    let grid = puzzle.grid();
    let mut rendered: Vec<Vec<String>> = (0..grid.rows)
        .map(|row| {
            (0..grid.cols)
                .map(|col| grid.get(row, col).to_string())
                .collect()
        })
        .collect();

    for edge in puzzle.edges() {
        let bridges = assignment.bridges(edge.id);
        if bridges == 0 {
            continue;
        }

        let symbol = bridge_symbol(edge.direction, bridges);
        for &(row, col) in &edge.cells {
            rendered[row][col] = symbol.to_string();
        }
    }

    rendered
}

fn bridge_symbol(direction: Direction, bridges: u8) -> char {
    match (direction, bridges) {
        (Direction::Horizontal, 1) => H_SINGLE,
        (Direction::Horizontal, _) => H_DOUBLE,
        (Direction::Vertical, 1) => V_SINGLE,
        (Direction::Vertical, _) => V_DOUBLE,
    }
}

/// Recover per-edge bridge counts from a rendered grid, given the puzzle's
/// edge geometry. Inverse of [`render_solution`]; used by the `check`
/// command and the round-trip tests.
///
/// Edges between directly adjacent islands have no intervening cells and
/// leave no mark in the rendered form, so their count cannot be recovered.
pub fn derive_assignment(puzzle: &Puzzle, rendered: &[Vec<String>]) -> Result<Assignment> {
    let grid = puzzle.grid();
    if rendered.len() != grid.rows || rendered.iter().any(|row| row.len() != grid.cols) {
        anyhow::bail!(
            "Rendered grid dimensions don't match the {}x{} puzzle",
            grid.rows,
            grid.cols
        );
    }

    let mut assignment = Assignment::empty(puzzle.edges().len());

    for edge in puzzle.edges() {
        if edge.cells.is_empty() {
            anyhow::bail!(
                "Edge {} joins adjacent islands; its bridge count is not recoverable from the rendered grid",
                edge.id
            );
        }

        let mut count = None;
        for &(row, col) in &edge.cells {
            let symbol = rendered[row][col].as_str();
            let cell_count = symbol_to_count(edge.direction, symbol).ok_or_else(|| {
                anyhow::anyhow!(
                    "Cell ({}, {}) holds {:?}, expected a {:?} bridge symbol or 0",
                    row,
                    col,
                    symbol,
                    edge.direction
                )
            })?;

            match count {
                None => count = Some(cell_count),
                Some(previous) if previous != cell_count => {
                    anyhow::bail!(
                        "Edge {} has inconsistent symbols along its span at ({}, {})",
                        edge.id,
                        row,
                        col
                    );
                }
                Some(_) => {}
            }
        }

        assignment.set(edge.id, count.unwrap_or(0));
    }

    Ok(assignment)
}

fn symbol_to_count(direction: Direction, symbol: &str) -> Option<u8> {
    match (direction, symbol) {
        (_, "0") => Some(0),
        (Direction::Horizontal, "-") => Some(1),
        (Direction::Horizontal, "=") => Some(2),
        (Direction::Vertical, "|") => Some(1),
        (Direction::Vertical, "$") => Some(2),
        _ => None,
    }
}

/// Space-joined console form of a rendered grid
pub fn format_solution_grid(rendered: &[Vec<String>]) -> String {
    let mut output = String::new();
    for row in rendered {
        output.push_str(&row.join(" "));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Grid;

    fn puzzle_from(rows: Vec<Vec<u8>>) -> Puzzle {
        Puzzle::build(&Grid::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_render_symbols() {
        // Horizontal and vertical edges, one gap cell each
        let puzzle = puzzle_from(vec![vec![3, 0, 2], vec![0, 0, 0], vec![1, 0, 0]]);
        // Edge 0: (0,0)-(0,2) horizontal; edge 1: (0,0)-(2,0) vertical
        let assignment = Assignment::from_counts(vec![2, 1]);
        let rendered = render_solution(&puzzle, &assignment);

        assert_eq!(rendered[0], vec!["3", "=", "2"]);
        assert_eq!(rendered[1][0], "|");
        assert_eq!(rendered[2][0], "1");
        assert_eq!(rendered[1][1], "0");
    }

    #[test]
    fn test_render_derive_round_trip() {
        let puzzle = puzzle_from(vec![vec![3, 0, 2], vec![0, 0, 0], vec![1, 0, 0]]);
        for counts in [vec![0, 0], vec![1, 0], vec![2, 1], vec![1, 2]] {
            let assignment = Assignment::from_counts(counts);
            let rendered = render_solution(&puzzle, &assignment);
            let derived = derive_assignment(&puzzle, &rendered).unwrap();
            assert_eq!(derived, assignment);
        }
    }

    #[test]
    fn test_derive_rejects_corrupt_symbol() {
        let puzzle = puzzle_from(vec![vec![1, 0, 1]]);
        let mut rendered = render_solution(&puzzle, &Assignment::from_counts(vec![1]));
        // A vertical symbol on a horizontal span is a defect
        rendered[0][1] = "|".to_string();
        assert!(derive_assignment(&puzzle, &rendered).is_err());
    }

    #[test]
    fn test_derive_rejects_adjacent_island_edge() {
        let puzzle = puzzle_from(vec![vec![2, 2]]);
        let rendered = render_solution(&puzzle, &Assignment::from_counts(vec![2]));
        assert!(derive_assignment(&puzzle, &rendered).is_err());
    }
}
