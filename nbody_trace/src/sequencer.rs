use crate::{Marker, Projection, TraceRecord};

/// The drawing work for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// True if the canvas must be cleared, after the frame pause, before
    /// drawing `marker`.
    pub starts_frame: bool,
    /// Iteration of the record.
    pub iteration: f64,
    /// The marker to draw.
    pub marker: Marker,
}

/// Splits a stream of records into frames.
///
/// A frame starts whenever a record's iteration differs from the previous
/// record's. The iteration before the first record is taken to be `0`, so a
/// trace starting at iteration 0 does not pause before its first frame.
/// Iterations are compared exactly and ordering is not checked: going
/// backwards, or returning to an earlier iteration, starts a new frame like
/// any other change.
#[derive(Debug, Clone)]
pub struct FrameSequencer {
    projection: Projection,
    prev_iteration: f64,
}

impl Default for FrameSequencer {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

impl FrameSequencer {
    /// Creates a sequencer drawing through `projection`.
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            prev_iteration: 0.0,
        }
    }

    /// The projection used for markers.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Processes the next record.
    pub fn feed(&mut self, record: &TraceRecord) -> Step {
        // NaN never equals itself, so every NaN iteration starts a frame.
        let starts_frame = record.iteration != self.prev_iteration;
        if starts_frame {
            self.prev_iteration = record.iteration;
        }
        Step {
            starts_frame,
            iteration: record.iteration,
            marker: Marker::for_record(record, &self.projection),
        }
    }
}
