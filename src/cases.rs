//! Last-layer case tables.
//!
//! Each entry is `(name, pattern, moves)`: the pattern an unsolved top layer
//! shows, and the moves that solve it. Orientation patterns mark top-colored
//! side stickers with `B`; permutation patterns are relational (see
//! [`crate::pattern`]). The tables are parsed once, on first use.

use std::sync::LazyLock;

use crate::pattern::ColorPattern;

/// A recognizable last-layer state and the algorithm that solves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub name: &'static str,
    pub pattern: ColorPattern,
    pub moves: &'static str,
}

/// Ordered by ascending number of `B` descriptors, so that the first match
/// is never a case with extra top-colored stickers.
const OLL_3X3: &[(&str, &str, &str)] = &[
    ("23", "DDDDDDBDBDDD", "R2 D' R U2 R' D R U2 R"),
    ("24", "BDDDDDDDBDDD", "r U R' U' r' F R F'"),
    ("25", "DDBDDDDDDBDD", "F' r U R' U' r' F R"),
    ("28", "DBDDBDDDDDDD", "r U R' U' r' R U R U' R'"),
    ("57", "DBDDDDDBDDDD", "R U R' U' M' U R U' r'"),
    ("26", "BDDBDDDDDBDD", "R U2 R' U' R U' R'"),
    ("27", "DDBDDBDDBDDD", "R U R' U R U2 R'"),
    ("20", "DBDDBDDBDDBD", "r U R' U' M2 U R U' R' U' M'"),
    ("21", "BDBDDDBDBDDD", "R U2 R' U' R U R' U' R U' R'"),
    ("22", "DDBDDDBDDBDB", "R U2 R2 U' R2 U' R2 U2 R"),
    ("29", "BBDDBDDDBDDD", "R U R' U' R U' R' F' U' F R U R'"),
    ("30", "DBDDBBDDDBDD", "F R' F R2 U' R' U' R U R' F2"),
    ("31", "BBDDDDDDBDBD", "R' U' F U R U' R' F' R"),
    ("32", "DBBDBDBDDDDD", "L U F' U' L' U L F L'"),
    ("33", "BBDDDDDBBDDD", "R U R' U' R' F R F'"),
    ("34", "DBDDDBDBDBDD", "R U R2 U' R' F R U R U' F'"),
    ("35", "BDDDDBDBDDBD", "R U2 R2 F R F' R U2 R'"),
    ("36", "DBDDDDBDDDBB", "L' U' L U' L' U L U L F' L' F"),
    ("37", "BBDDBBDDDDDD", "F R' F' R U R U' R'"),
    ("38", "DBDBBDDDBDDD", "R U R' U R U' R' U' R' F R F'"),
    ("39", "DBDBDDDBBDDD", "L F' L' U' L U F U' L'"),
    ("40", "DBDDDDBBDDDB", "R' F R U R' U' F' U R"),
    ("41", "DBDDBDBDBDDD", "R U R' U R U2 R' F R U R' U' F'"),
    ("42", "BDBDBDDBDDDD", "R' U' R U' R' U2 R F R U R' U' F'"),
    ("43", "DBDDDDDDDBBB", "F' U' L' U L F"),
    ("44", "DBDBBBDDDDDD", "F U R U' R' F'"),
    ("45", "DBDDDDDBDBDB", "F R U R' U' F'"),
    ("46", "DDDBBBDDDDBD", "R' U' R' F R F' U R"),
    ("5", "DDDDDBDBBDBB", "r' U2 R U R' U r"),
    ("6", "BBDBDDDDDBBD", "r U2 R' U' R U' r'"),
    ("7", "DBBDBBDDBDDD", "r U R' U R U2 r'"),
    ("8", "BBDDDDBDDBBD", "l' U' L U' L' U2 l"),
    ("9", "BBDDBDBDDBDD", "R U R' U' R' F R2 U R' U' F'"),
    ("10", "DDBDBDDBBDDB", "R U R' U R' F R F' R U2 R'"),
    ("11", "DBBDBDDDBDDB", "r U R' U R' F R F' R U2 r'"),
    ("12", "BBDBDDBDDDBD", "M' R' U' R U' R' U2 R U' M"),
    ("13", "DBBDDBDBBDDD", "F U R U' R2 F' R U R U' R'"),
    ("14", "BBDDDDBBDBDD", "R' F R U R' F' R F U' F'"),
    ("15", "DBDDDBDBBDDB", "r' U' r R' U' R U r' U r"),
    ("16", "BBDBDDDBDBDD", "r U r' R U R' U' r U' r'"),
    ("17", "DBDDBDBBDDBB", "R U R' U R' F R F' U2 R' F R F'"),
    ("18", "BBBDBDDBDDBD", "r U R' U R U2 r2 U' R U' R' U2 r"),
    ("19", "DBDBBDDBDDBB", "r' R U R U R' U' M' R' F R F'"),
    ("47", "BBDBDBDDBDBD", "R' U' R' F R F' R' F R F' U R"),
    ("48", "DBBDBDBDDBDB", "F R U R' U' R U R' U' F'"),
    ("49", "DBBDDDBDDBBB", "r U' r2 U r2 U r2 U' r"),
    ("50", "DDBDDDBBDBBB", "r' U r2 U' r2 U' r2 U r'"),
    ("51", "BBDBDBDBBDDD", "F U R U' R' U R U' R' F'"),
    ("52", "BDDBBBDDBDBD", "R U R' U R U' B U' B' R'"),
    ("53", "BBBDDDBDBDBD", "l' U2 L U L' U' L U L' U l"),
    ("54", "BBBDBDBDBDDD", "r U2 R' U' R U R' U' R U' r'"),
    ("55", "BBBDDDBBBDDD", "R' F R U R U' R2 F' R2 U' R' U R U R'"),
    ("56", "DBDBDBDBDBDB", "r' U' r U' R' U R U' R' U R r' U r"),
    ("3", "DBDDBBDBBDBB", "f R U R' U' f' U' F R U R' U' F'"),
    ("4", "BBDBBDDBDBBD", "f R U R' U' f' U F R U R' U' F'"),
    ("1", "DBDBBBDBDBBB", "R U2 R2 F R F' U2 R' F R F'"),
    ("2", "DBBDBDBBDBBB", "F R U R' U' F' f R U R' U' f'"),
];

const PLL_3X3: &[(&str, &str, &str)] = &[
    ("Aa", "RSOROLRRLRRS", "R' F R' B2 R F' R' B2 R2"),
    ("Ab", "RLRRLOROSRSR", "R B' R F2 R' B R F2 R2"),
    ("E", "RRRRLLRRRRLL", "x' R U' R' D R U R' D' R U R' D R U' R' D' x"),
    ("F", "ROLRLLRLORSS", "R' U' F' R U R' U' R' F R2 U' R' U' R U R' U R"),
    ("Ga", "RRSRRRRLORLR", "R2 U R' U R' U' R U' R2 U' D R' U R D'"),
    ("Gb", "ROLROSROLROO", "R' U' R U D' R2 U R' U R U' R U' R2 D"),
    ("Gc", "ROLRRRRSRRRL", "R2 U' R U' R U R' U R2 U D' R U' R' D"),
    ("Gd", "RLORSORLOROO", "R U R' U' D R2 U' R U' R' U R' U R2 D'"),
    ("H", "ROOROOROOROO", "M2 U M2 U2 M2 U M2"),
    ("Ja", "RSSRSRRSORSR", "R' U L' U2 R U' R' U2 R L"),
    ("Jb", "RRSROSRRSRSS", "R U R' F' R U R' U' R' F R2 U' R'"),
    ("Na", "ROSROSROSROS", "R U R' U R U R' F' R U R' U' R' F R2 U' R' U2 R U' R'"),
    ("Nb", "RSORSORSORSO", "R' U R U' R' F' U' F R U R' F R' F' R U' R"),
    ("Ra", "RSRRLLROLRLR", "R U' R' U' R U R D R' U' R D' R' U2 R'"),
    ("Rb", "RLORLLRRSRRL", "R2 F R U R U' R' F' R U2 R' U2 R"),
    ("T", "RSRRRRRRSROO", "R U R' U' R' F R2 U' R' U' R U R' F'"),
    ("Ua", "RRLROORSSRRL", "M2 U M U2 M' U M2"),
    ("Ub", "RLRRLRRSSROO", "M2 U' M U2 M' U' M2"),
    ("V", "RLLRLLROSRSO", "R U' R U R' D R D' R U' D R2 U R2 D' R2"),
    ("Y", "RSOROSRRRRRR", "F R U' R' U' R U R' F' R U R' U' R' F R F'"),
    ("Z", "RLRRRLRLRRRL", "M' U M2 U M2 U M' U2 M2"),
];

const OLL_2X2: &[(&str, &str, &str)] = &[
    ("U", "BBDDDDDD", "R2 D R' U2 R D' R' U2 R'"),
    ("T", "BDDDDBDD", "R U R' U' R' F R F'"),
    ("L", "BDDBDDDD", "F R U' R' U' R U R' F'"),
    ("Sune", "DBDBDBDD", "R U R' U R U2 R'"),
    ("Antisune", "BDBDDDBD", "R U2 R' U' R U' R'"),
    ("H", "BBDDBBDD", "R2 U2 R U2 R2"),
    ("Pi", "DBDDBDBB", "R U2 R2 U' R2 U' R2 U2 R"),
];

/// Only the two permutations other than "solved" that a 2x2 can show after
/// orientation, up to a top-layer turn.
const PLL_2X2: &[(&str, &str, &str)] = &[
    ("Adj", "RRRORRRS", "R U R' U' R' F R2 U' R' U' R U R' F'"),
    ("Diag", "RORORORO", "F R U' R' U' R U R' F' R U R' U' R' F R F'"),
];

static OLL_3X3_CASES: LazyLock<Vec<Case>> = LazyLock::new(|| parse_table(OLL_3X3));
static PLL_3X3_CASES: LazyLock<Vec<Case>> = LazyLock::new(|| parse_table(PLL_3X3));
static OLL_2X2_CASES: LazyLock<Vec<Case>> = LazyLock::new(|| parse_table(OLL_2X2));
static PLL_2X2_CASES: LazyLock<Vec<Case>> = LazyLock::new(|| parse_table(PLL_2X2));

fn parse_table(table: &'static [(&'static str, &'static str, &'static str)]) -> Vec<Case> {
    table
        .iter()
        .map(|&(name, pattern, moves)| Case {
            name,
            pattern: pattern
                .parse()
                .unwrap_or_else(|err| panic!("case {name} has a bad pattern: {err}")),
            moves,
        })
        .collect()
}

/// Orientation cases for a cube of the given size, if it has a table.
pub fn orientation_cases(size: usize) -> Option<&'static [Case]> {
    match size {
        2 => Some(OLL_2X2_CASES.as_slice()),
        3 => Some(OLL_3X3_CASES.as_slice()),
        _ => None,
    }
}

/// Permutation cases for a cube of the given size, if it has a table.
pub fn permutation_cases(size: usize) -> Option<&'static [Case]> {
    match size {
        2 => Some(PLL_2X2_CASES.as_slice()),
        3 => Some(PLL_3X3_CASES.as_slice()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::cube::Cube;
    use crate::pattern::ColorDescriptor;
    use crate::pieces::FaceColor;

    /// Undoes `moves`, leaving the cube in the state the case solves.
    fn inverse(moves: &str) -> String {
        moves
            .split_whitespace()
            .rev()
            .map(|token| match token.strip_suffix('\'') {
                Some(half) if half.ends_with('2') => half.to_string(),
                Some(quarter) => quarter.to_string(),
                None if token.ends_with('2') => token.to_string(),
                None => format!("{token}'"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(orientation_cases(3).map(<[Case]>::len), Some(57));
        assert_eq!(permutation_cases(3).map(<[Case]>::len), Some(21));
        assert_eq!(orientation_cases(2).map(<[Case]>::len), Some(7));
        assert_eq!(permutation_cases(2).map(<[Case]>::len), Some(2));
        assert!(orientation_cases(4).is_none());
        assert!(permutation_cases(1).is_none());
    }

    #[test]
    fn test_patterns_fit_their_cube() {
        for size in [2, 3] {
            let cases = orientation_cases(size)
                .into_iter()
                .chain(permutation_cases(size))
                .flatten();
            for case in cases {
                assert_eq!(case.pattern.side_length(), size, "case {}", case.name);
            }
        }
    }

    #[test]
    fn test_cases_are_distinct() {
        for size in [2, 3] {
            for cases in [orientation_cases(size), permutation_cases(size)].into_iter().flatten() {
                let mut names = FxHashSet::default();
                let mut patterns = FxHashSet::default();
                for case in cases {
                    assert!(names.insert(case.name), "duplicate case name {}", case.name);
                    assert!(
                        patterns.insert(case.pattern.canonical()),
                        "case {} repeats an earlier pattern",
                        case.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_orientation_tables_are_ordered_by_base_count() {
        for size in [2, 3] {
            let counts: Vec<usize> = orientation_cases(size)
                .into_iter()
                .flatten()
                .map(|case| case.pattern.count(ColorDescriptor::BaseColor))
                .collect();
            assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[test]
    fn test_permutation_tables_skip_the_solved_state() {
        for size in [2, 3] {
            let solved = ColorPattern::solved_relations(size).canonical();
            for case in permutation_cases(size).into_iter().flatten() {
                assert_ne!(case.pattern.canonical(), solved, "case {}", case.name);
                assert!(!case.pattern.contains(ColorDescriptor::DontCare));
            }
        }
    }

    #[test]
    fn test_each_case_recognizes_its_own_state() {
        for size in [2, 3] {
            for case in orientation_cases(size).into_iter().flatten() {
                let mut cube = Cube::new(size);
                cube.make_moves(&inverse(case.moves));
                let observed = ColorPattern::orientation(&cube, FaceColor::White);
                assert_eq!(observed, case.pattern, "orientation case {}", case.name);
            }
            for case in permutation_cases(size).into_iter().flatten() {
                let mut cube = Cube::new(size);
                cube.make_moves(&inverse(case.moves));
                let observed = ColorPattern::relations(&cube);
                assert_eq!(observed, case.pattern, "permutation case {}", case.name);
            }
        }
    }

    #[test]
    fn test_inverse_helper() {
        assert_eq!(inverse("R U2 R' F2'"), "F2 R U2 R'");
    }
}
