use crate::{
    error::{Err, Result},
    types::{EType, VId, Weight},
};
use std::{fs, path::Path, str::FromStr};

/// An edge list read from a text file.
///
/// Each non-empty line not starting with `#` holds `src dst [weight [type]]`,
/// separated by whitespace or commas. A weight (type) column is kept only if
/// every line has one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeList {
    pub num_vertices: usize,
    pub edges: Vec<(VId, VId)>,
    pub weights: Option<Vec<Weight>>,
    pub types: Option<Vec<EType>>,
}

fn field<T: FromStr>(lineno: usize, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Err::Parse(format!("line {}: bad value {:?}", lineno, value)))
}

impl EdgeList {
    pub fn parse(text: &str) -> Result<Self> {
        let mut list = EdgeList::default();
        let (mut weights, mut types) = (Some(Vec::new()), Some(Vec::new()));
        for (lineno, line) in text.lines().enumerate().map(|(i, l)| (i + 1, l.trim())) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|f| !f.is_empty())
                .collect();
            if fields.len() < 2 || fields.len() > 4 {
                return Err(Err::Parse(format!(
                    "line {}: expected 2 to 4 fields, got {}",
                    lineno,
                    fields.len()
                )));
            }
            let (src, dst): (VId, VId) = (field(lineno, fields[0])?, field(lineno, fields[1])?);
            if src < 0 || dst < 0 {
                return Err(Err::Parse(format!("line {}: negative vertex id", lineno)));
            }
            list.num_vertices = list.num_vertices.max(src.max(dst) as usize + 1);
            list.edges.push((src, dst));
            weights = match (weights, fields.get(2)) {
                (Some(mut w), Some(value)) => {
                    w.push(field(lineno, value)?);
                    Some(w)
                }
                _ => None,
            };
            types = match (types, fields.get(3)) {
                (Some(mut t), Some(value)) => {
                    t.push(field(lineno, value)?);
                    Some(t)
                }
                _ => None,
            };
        }
        if !list.edges.is_empty() {
            list.weights = weights;
            list.types = types;
        }
        Ok(list)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let list = EdgeList::parse("# src dst weight\n1 2 0.5\n\n1,3,1.5\n2\t4 2\n").unwrap();
        assert_eq!(list.num_vertices, 5);
        assert_eq!(list.edges, vec![(1, 2), (1, 3), (2, 4)]);
        assert_eq!(list.weights, Some(vec![0.5, 1.5, 2.0]));
        assert_eq!(list.types, None);
    }

    #[test]
    fn test_parse_partial_columns() {
        let list = EdgeList::parse("0 1 1.0 3\n1 0\n").unwrap();
        assert_eq!(list.weights, None);
        assert_eq!(list.types, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(EdgeList::parse("1\n").is_err());
        assert!(EdgeList::parse("1 x\n").is_err());
        assert!(EdgeList::parse("1 -2\n").is_err());
    }
}
