use std::str::FromStr;

use crate::RecordParseError;

/// Number of whitespace separated fields on a trace line.
pub const RECORD_FIELD_COUNT: usize = 4;

/// A single body at a single iteration, as read from one trace line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRecord {
    /// Simulation iteration. Records with equal iterations share a frame.
    pub iteration: f64,
    /// Body mass, used only to pick the marker style.
    pub mass: f64,
    /// Horizontal position in simulation units.
    pub x: f64,
    /// Vertical position in simulation units.
    pub y: f64,
}

impl FromStr for TraceRecord {
    type Err = RecordParseError;

    /// Parses `iteration mass x y`.
    ///
    /// Exactly four tokens are required. A bad token among the first four is
    /// reported before a bad field count.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = [0.0; RECORD_FIELD_COUNT];
        let mut found = 0;

        for token in line.split_whitespace() {
            if let Some(field) = fields.get_mut(found) {
                *field = token
                    .parse()
                    .map_err(|error| RecordParseError::InvalidNumber {
                        token: token.to_string(),
                        error,
                    })?;
            }
            found += 1;
        }

        if found != RECORD_FIELD_COUNT {
            return Err(RecordParseError::FieldCount { found });
        }

        let [iteration, mass, x, y] = fields;
        Ok(Self {
            iteration,
            mass,
            x,
            y,
        })
    }
}
