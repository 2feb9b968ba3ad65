//! Reader for unweighted METIS adjacency files.
//!
//! ```text
//! % comment
//! 4 4          <- node count, edge count, optional fmt (must be 0)
//! 2 4          <- neighbors of node 1
//! 1 3
//! 2 4
//! 3 1
//! ```
//!
//! Node ids are the 1-based line positions. A blank vertex line is an
//! isolated node.

use super::{AdjacencyList, NodeId};
use crate::error::{JabejaError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Opens and parses a METIS graph file.
pub fn read_metis_file(path: impl AsRef<Path>) -> Result<AdjacencyList> {
    let file = File::open(path.as_ref())?;
    read_metis(BufReader::new(file))
}

/// Parses METIS text into adjacency lists.
///
/// Symmetry is not checked here; [`Graph::new`](super::Graph::new) does that.
pub fn read_metis<R: BufRead>(reader: R) -> Result<AdjacencyList> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)))
        .filter(|res| !matches!(res, Ok((_, l)) if l.trim_start().starts_with('%')));

    let (header_line, header) = loop {
        match lines.next() {
            Some(res) => {
                let (no, line) = res?;
                if !line.trim().is_empty() {
                    break (no, line);
                }
            }
            None => {
                return Err(JabejaError::Parse {
                    line: 0,
                    message: "missing header".into(),
                })
            }
        }
    };

    let fields: Vec<usize> = parse_fields(header_line, &header)?;
    let (n, m) = match fields.as_slice() {
        [n, m] | [n, m, 0] => (*n, *m),
        [_, _, fmt, ..] => {
            return Err(JabejaError::Parse {
                line: header_line,
                message: format!("weighted format {fmt} is not supported"),
            })
        }
        _ => {
            return Err(JabejaError::Parse {
                line: header_line,
                message: "header must be `<nodes> <edges> [fmt]`".into(),
            })
        }
    };

    let mut adjacency = Vec::with_capacity(n);
    let mut last_line = header_line;
    for id in 1..=n {
        let (no, line) = match lines.next() {
            Some(res) => res?,
            None => {
                return Err(JabejaError::Parse {
                    line: last_line,
                    message: format!("expected {n} vertex lines, found {}", id - 1),
                })
            }
        };
        last_line = no;

        let mut nbrs = Vec::new();
        for v in parse_fields(no, &line)? {
            if v == 0 || v > n {
                return Err(JabejaError::Parse {
                    line: no,
                    message: format!("neighbor {v} out of range 1..={n}"),
                });
            }
            nbrs.push(v as NodeId);
        }
        adjacency.push((id as NodeId, nbrs));
    }

    for res in lines {
        let (no, line) = res?;
        if !line.trim().is_empty() {
            return Err(JabejaError::Parse {
                line: no,
                message: "unexpected content after last vertex".into(),
            });
        }
    }

    let directed: usize = adjacency.iter().map(|(_, nbrs)| nbrs.len()).sum();
    if directed != 2 * m {
        log::warn!(
            "header declares {m} edges but adjacency lists hold {directed} endpoints"
        );
    }

    Ok(adjacency)
}

fn parse_fields(line_no: usize, line: &str) -> Result<Vec<usize>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<usize>().map_err(|_| JabejaError::Parse {
                line: line_no,
                message: format!("`{tok}` is not a non-negative integer"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cycle() {
        let text = "% a 4-cycle\n4 4\n2 4\n1 3\n2 4\n3 1\n";
        let adjacency = read_metis(text.as_bytes()).unwrap();
        assert_eq!(
            adjacency,
            vec![(1, vec![2, 4]), (2, vec![1, 3]), (3, vec![2, 4]), (4, vec![3, 1])]
        );
    }

    #[test]
    fn test_blank_line_is_isolated_node() {
        let text = "3 1 0\n2\n1\n\n";
        let adjacency = read_metis(text.as_bytes()).unwrap();
        assert_eq!(adjacency[2], (3, vec![]));
    }

    #[test]
    fn test_trailing_blank_lines_ok() {
        let text = "2 1\n2\n1\n\n\n";
        assert_eq!(read_metis(text.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn test_weighted_format_rejected() {
        let err = read_metis("2 1 11\n2\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, JabejaError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_out_of_range_neighbor() {
        let err = read_metis("2 1\n3\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, JabejaError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_vertex_lines() {
        let err = read_metis("3 1\n2\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, JabejaError::Parse { .. }));
    }

    #[test]
    fn test_garbage_token() {
        let err = read_metis("2 1\nx\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, JabejaError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(read_metis("".as_bytes()).is_err());
    }
}
