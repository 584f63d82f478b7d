//! Reading, classifying and pacing N-body simulation traces.
//!
//! A trace is a plain text file with one record per line:
//!
//! ```text
//! iteration mass x y
//! ```
//!
//! Consecutive records with the same `iteration` make up one frame. The
//! pieces here are:
//! - [TraceReader], which parses records lazily from any [BufRead](std::io::BufRead)
//! - [MarkerClass] and [Projection], which turn a record into a [Marker] on
//!   the fixed-size canvas
//! - [FrameSequencer], which decides where the frame boundaries are
//! - [Player], which paces frames against a clock without ever blocking the
//!   caller
//!
//! # Example
//! ```
//! use std::{io::Cursor, time::{Duration, Instant}};
//!
//! use nbody_trace::{Player, PlaybackStatus, TraceReader};
//!
//! let trace = "1 9.0 0.1 0.2\n1 2.0 -0.1 0.0\n2 9.0 0.11 0.21\n";
//! let mut player = Player::new(TraceReader::new(Cursor::new(trace)));
//!
//! let start = Instant::now();
//! player.tick(start);
//! player.tick(start + Duration::from_secs(1));
//! assert_eq!(player.markers().len(), 2);
//!
//! player.tick(start + Duration::from_secs(2));
//! assert_eq!(player.markers().len(), 1);
//! assert_eq!(player.status(), PlaybackStatus::Finished);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use error::*;
pub use marker::*;
pub use player::*;
pub use projection::*;
pub use reader::*;
pub use record::*;
pub use sequencer::*;

mod error;
mod marker;
mod player;
mod projection;
mod reader;
mod record;
mod sequencer;
