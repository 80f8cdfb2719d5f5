//! Clause generation for the boolean encoding of a puzzle
//!
//! Families are generated in a fixed order and their boundaries recorded in
//! the resulting [`CnfFormula`]:
//! 1. implication: an edge cannot be double without being at least single
//! 2. crossing: no two intersecting edges may both carry bridges
//! 3. degree: every island's incident bridge weight sums to its value

use super::{cnf, Clause, CnfFormula, VariableMap};
use crate::puzzle::Puzzle;

/// A puzzle's clause set together with the variable mapping that produced
/// it. The mapping is needed again to decode models and to synthesize
/// blocking clauses.
#[derive(Debug, Clone)]
pub struct SatEncoding {
    pub formula: CnfFormula,
    pub variables: VariableMap,
}

/// Encode the puzzle into CNF
pub fn encode(puzzle: &Puzzle) -> SatEncoding {
    let mut variables = VariableMap::for_edges(puzzle.edges().len());
    let mut clauses = Vec::new();

    generate_implication_clauses(puzzle, &variables, &mut clauses);
    let implication_end = clauses.len();

    generate_crossing_clauses(puzzle, &variables, &mut clauses);
    let crossing_end = clauses.len();

    generate_degree_clauses(puzzle, &mut variables, &mut clauses);

    let variable_count = variables.variable_count();
    SatEncoding {
        formula: CnfFormula::new(clauses, implication_end, crossing_end, variable_count),
        variables,
    }
}

/// b2 => b1 for every edge
fn generate_implication_clauses(
    puzzle: &Puzzle,
    variables: &VariableMap,
    clauses: &mut Vec<Clause>,
) {
    for edge in puzzle.edges() {
        clauses.push(Clause::binary(-variables.b2(edge.id), variables.b1(edge.id)));
    }
}

/// For every intersecting pair, at most one edge carries any bridge.
/// The rule is symmetric in b1: a double bridge may not cross a single
/// either, since b2 implies b1.
fn generate_crossing_clauses(puzzle: &Puzzle, variables: &VariableMap, clauses: &mut Vec<Clause>) {
    for &(e1, e2) in puzzle.intersections() {
        clauses.push(Clause::binary(-variables.b1(e1), -variables.b1(e2)));
    }
}

/// Exactly-`value` cardinality per island over its incident (b1, b2)
/// literal multiset; b1 contributes one unit of weight, b2 a second.
/// An island with bridges required but no candidate edges produces the
/// empty clause: unsolvable by construction.
fn generate_degree_clauses(
    puzzle: &Puzzle,
    variables: &mut VariableMap,
    clauses: &mut Vec<Clause>,
) {
    for island in puzzle.islands() {
        let literals: Vec<i32> = puzzle
            .incident_edges(island.id)
            .iter()
            .flat_map(|&edge| [variables.b1(edge), variables.b2(edge)])
            .collect();

        clauses.extend(cnf::exactly_k(&literals, island.value as usize, variables));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Grid;

    fn encode_grid(rows: Vec<Vec<u8>>) -> SatEncoding {
        let puzzle = Puzzle::build(&Grid::from_rows(rows).unwrap()).unwrap();
        encode(&puzzle)
    }

    #[test]
    fn test_family_order_and_boundaries() {
        // One crossing pair: vertical (0,1)-(2,1), horizontal (1,0)-(1,2)
        let encoding = encode_grid(vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
        let formula = &encoding.formula;

        // Two edges -> two implication clauses, then one crossing clause
        assert!(!formula.is_degree_clause(0));
        assert!(!formula.is_crossing_clause(0));
        assert!(formula.is_crossing_clause(2));
        assert!(formula.is_degree_clause(3));
        assert!(formula.len() > 3);
    }

    #[test]
    fn test_implication_clause_shape() {
        let encoding = encode_grid(vec![vec![1, 0, 1]]);
        let b1 = encoding.variables.b1(0);
        let b2 = encoding.variables.b2(0);
        assert_eq!(encoding.formula.clauses[0], Clause::binary(-b2, b1));
    }

    #[test]
    fn test_crossing_clause_is_symmetric_in_b1() {
        let encoding = encode_grid(vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
        let clause = &encoding.formula.clauses[2];
        let expected: Vec<i32> = vec![
            -encoding.variables.b1(0),
            -encoding.variables.b1(1),
        ];
        let mut actual = clause.literals.clone();
        actual.sort_unstable_by_key(|lit| lit.abs());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_stranded_island_yields_empty_clause() {
        let encoding = encode_grid(vec![vec![3]]);
        assert!(encoding.formula.has_empty_clause());
    }

    #[test]
    fn test_aux_variables_extend_id_space() {
        let encoding = encode_grid(vec![vec![2, 0, 2]]);
        // One edge -> two edge variables; cardinality aux ids follow
        assert!(encoding.variables.variable_count() >= 2);
        assert_eq!(encoding.variables.edge_count(), 1);
    }
}
