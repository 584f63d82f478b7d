//! A direct-summation gravitational N-body integrator that produces traces
//! for `nbody_trace`.
//!
//! Bodies live in the unit square: after every position update each
//! coordinate is wrapped with a sign-preserving remainder by 1. Forces are
//! computed for all bodies from the positions at the start of the
//! iteration, in parallel, before any body moves.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use body::*;
pub use error::*;
pub use output::*;
pub use simulation::*;

mod body;
mod error;
mod output;
mod simulation;
