use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::SimError;

const BODY_FIELD_COUNT: usize = 5;

/// A point mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Mass, in units where the gravitational constant is `G`.
    pub mass: f64,
    /// Position within the unit square.
    pub position: [f64; 2],
    /// Velocity, in position units per time unit.
    pub velocity: [f64; 2],
}

impl Body {
    /// Parses a body from `mass x y vx vy`.
    fn parse(line: &str, line_number: usize) -> Result<Self, SimError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != BODY_FIELD_COUNT {
            return Err(SimError::FieldCount {
                line: line_number,
                found: tokens.len(),
            });
        }

        let mut fields = [0.0; BODY_FIELD_COUNT];
        for (field, token) in fields.iter_mut().zip(&tokens) {
            *field = token.parse().map_err(|_| SimError::InvalidNumber {
                line: line_number,
                token: token.to_string(),
            })?;
        }

        let [mass, x, y, vx, vy] = fields;
        Ok(Self {
            mass,
            position: [x, y],
            velocity: [vx, vy],
        })
    }
}

/// Reads bodies, one per non-blank line.
///
/// If `limit` is given, exactly that many bodies are read and any further
/// lines are ignored.
pub fn read_bodies(reader: impl BufRead, limit: Option<usize>) -> Result<Vec<Body>, SimError> {
    let mut bodies = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if limit.is_some_and(|limit| bodies.len() >= limit) {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        bodies.push(Body::parse(&line, index + 1)?);
    }

    match limit {
        Some(requested) if bodies.len() < requested => Err(SimError::NotEnoughBodies {
            requested,
            found: bodies.len(),
        }),
        _ if bodies.is_empty() => Err(SimError::NoBodies),
        _ => Ok(bodies),
    }
}

/// Reads bodies from a file. See [read_bodies].
pub fn load_bodies(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Vec<Body>, SimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|error| SimError::from(error).file("open", path))?;
    let bodies =
        read_bodies(BufReader::new(file), limit).map_err(|error| error.file("read", path))?;
    tracing::info!("Loaded {} bodies from {}", bodies.len(), path.display());
    Ok(bodies)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    const INPUT: &str = "\
9.0 0.1 0.2 0.0 0.01
5.0 0.5 0.5 -0.02 0.0

1.5 0.9 0.8 0.0 0.0
";

    #[test]
    fn test_read_all_bodies() {
        let bodies = read_bodies(Cursor::new(INPUT), None).unwrap();
        assert_eq!(bodies.len(), 3);
        assert_eq!(
            bodies[0],
            Body {
                mass: 9.0,
                position: [0.1, 0.2],
                velocity: [0.0, 0.01],
            }
        );
        assert_eq!(bodies[2].mass, 1.5);
    }

    #[test]
    fn test_limit() {
        let bodies = read_bodies(Cursor::new(INPUT), Some(2)).unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[1].velocity, [-0.02, 0.0]);
    }

    #[test]
    fn test_limit_ignores_later_bad_lines() {
        let bodies = read_bodies(Cursor::new("1 0 0 0 0\nnot a body\n"), Some(1)).unwrap();
        assert_eq!(bodies.len(), 1);
    }

    #[test]
    fn test_not_enough_bodies() {
        match read_bodies(Cursor::new(INPUT), Some(5)) {
            Err(SimError::NotEnoughBodies {
                requested: 5,
                found: 3,
            }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            read_bodies(Cursor::new("\n\n"), None),
            Err(SimError::NoBodies)
        ));
    }

    #[test]
    fn test_bad_lines() {
        assert!(matches!(
            read_bodies(Cursor::new("1 0 0 0\n"), None),
            Err(SimError::FieldCount { line: 1, found: 4 })
        ));
        assert!(matches!(
            read_bodies(Cursor::new("1 0 0 0 0\n1 0 0 0 fast\n"), None),
            Err(SimError::InvalidNumber { line: 2, .. })
        ));
    }
}
