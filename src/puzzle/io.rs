//! Reading puzzle grids and writing rendered solutions

use super::Grid;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a puzzle grid from a text file.
///
/// Each non-empty line is one row; values are separated by spaces or
/// commas. 0 is water, 1-8 an island.
pub fn load_grid_from_file(path: &Path) -> Result<Grid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.display()))?;

    parse_grid(&content).with_context(|| format!("Failed to parse puzzle file: {}", path.display()))
}

/// Parse a grid from text, one row per non-empty line
pub fn parse_grid(content: &str) -> Result<Grid> {
    let mut rows = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row: Vec<u8> = line
            .replace(',', " ")
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u8>()
                    .with_context(|| format!("Invalid cell {:?} on line {}", token, line_no + 1))
            })
            .collect::<Result<_>>()?;
        rows.push(row);
    }

    Grid::from_rows(rows)
}

/// Write a rendered solution grid to a file, one space-joined row per line
pub fn write_solution_to_file(path: &Path, rendered: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = crate::utils::format_solution_grid(rendered);
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write solution file: {}", path.display()))?;

    Ok(())
}

/// Print a rendered solution grid to the console
pub fn display_solution(rendered: &[Vec<String>]) {
    print!("{}", crate::utils::format_solution_grid(rendered));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_space_separated() {
        let grid = parse_grid("0 2 0 5 0\n0 0 0 0 0\n3 0 0 0 4\n").unwrap();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 5);
        assert_eq!(grid.get(0, 3), 5);
    }

    #[test]
    fn test_parse_comma_separated_and_blank_lines() {
        let grid = parse_grid("1,0,1\n\n0,0,0\n").unwrap();
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.get(0, 2), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_grid("1 x 2\n").is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "2 0 2\n").unwrap();
        let grid = load_grid_from_file(input.path()).unwrap();
        assert_eq!(grid.island_count(), 2);

        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("solutions/out.txt");
        let rendered = vec![vec!["2".to_string(), "=".to_string(), "2".to_string()]];
        write_solution_to_file(&out_path, &rendered).unwrap();

        let written = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(written, "2 = 2\n");
    }
}
