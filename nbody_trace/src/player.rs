use std::time::{Duration, Instant};

use crate::{FrameSequencer, Marker, Step, TraceError, TraceRecord};

/// How long a finished frame stays on screen before the next one replaces it.
pub const FRAME_PAUSE: Duration = Duration::from_secs(1);

/// The most records a single [Player::tick] will read.
pub const DEFAULT_RECORDS_PER_TICK: usize = 4096;

/// What a [Player] is doing, as of its last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Records are available to read right now. Tick again as soon as possible.
    Playing,
    /// The current frame is complete and stays on screen until the deadline.
    Waiting {
        /// The earliest time at which the next frame can start.
        until: Instant,
    },
    /// Paused by the user.
    Paused,
    /// The trace ended. The last frame stays on screen.
    Finished,
    /// Reading stopped at an error. See [Player::error].
    Failed,
}

/// Plays a trace against a clock.
///
/// The player never sleeps. Each call to [tick](Self::tick) reads records
/// until it either reaches a frame boundary whose pause has not elapsed yet,
/// or has read its per-tick budget. When a boundary is reached the current
/// frame stays visible and the first marker of the next frame is held back
/// until the pause deadline; on the first tick at or after it, the canvas is
/// cleared and drawing continues.
///
/// The first error from the record source stops playback for good. Nothing
/// read after it is drawn.
#[derive(Debug)]
pub struct Player<I> {
    records: I,
    sequencer: FrameSequencer,
    frame_pause: Duration,
    records_per_tick: usize,
    markers: Vec<Marker>,
    iteration: Option<f64>,
    frames_started: usize,
    held: Option<Step>,
    wait_until: Option<Instant>,
    paused: bool,
    stepping: bool,
    finished: bool,
    error: Option<TraceError>,
}

impl<I> Player<I>
where
    I: Iterator<Item = Result<TraceRecord, TraceError>>,
{
    /// Creates a player with the default projection, pause and read budget.
    pub fn new(records: I) -> Self {
        Self::with_sequencer(records, FrameSequencer::default())
    }

    /// Creates a player that builds markers with the given sequencer.
    pub fn with_sequencer(records: I, sequencer: FrameSequencer) -> Self {
        Self {
            records,
            sequencer,
            frame_pause: FRAME_PAUSE,
            records_per_tick: DEFAULT_RECORDS_PER_TICK,
            markers: Vec::new(),
            iteration: None,
            frames_started: 0,
            held: None,
            wait_until: None,
            paused: false,
            stepping: false,
            finished: false,
            error: None,
        }
    }

    /// Sets the pause between frames.
    pub fn with_frame_pause(mut self, frame_pause: Duration) -> Self {
        self.frame_pause = frame_pause;
        self
    }

    /// Sets the maximum number of records read per tick. Must be nonzero.
    pub fn with_records_per_tick(mut self, records_per_tick: usize) -> Self {
        assert!(records_per_tick > 0, "records_per_tick must be nonzero");
        self.records_per_tick = records_per_tick;
        self
    }

    /// Advances playback to `now`.
    pub fn tick(&mut self, now: Instant) -> PlaybackStatus {
        if self.paused && !self.stepping {
            return self.status();
        }

        let mut budget = self.records_per_tick;
        while !self.is_done() {
            if let Some(until) = self.wait_until {
                if self.stepping {
                    // A step ends at the next boundary.
                    self.stepping = false;
                    break;
                }
                if now < until {
                    break;
                }
                self.wait_until = None;
                self.begin_held_frame();
            }

            if budget == 0 {
                break;
            }
            budget -= 1;

            match self.records.next() {
                None => {
                    tracing::info!("Trace finished after {} frames", self.frames_started);
                    self.finished = true;
                }
                Some(Err(error)) => {
                    tracing::error!("Stopping playback: {}", error);
                    self.error = Some(error);
                }
                Some(Ok(record)) => {
                    let step = self.sequencer.feed(&record);
                    if step.starts_frame {
                        self.held = Some(step);
                        self.wait_until = Some(now + self.frame_pause);
                    } else {
                        self.draw(step);
                    }
                }
            }
        }

        if self.is_done() {
            self.stepping = false;
        }
        self.status()
    }

    /// Ends the current frame pause immediately, if there is one.
    ///
    /// While paused this also plays the rest of the next frame on the
    /// following ticks, then pauses again at the boundary after it.
    pub fn step(&mut self) {
        if self.is_done() {
            return;
        }
        if self.wait_until.take().is_some() {
            self.begin_held_frame();
        }
        if self.paused {
            self.stepping = true;
        }
    }

    /// Pauses or resumes playback.
    ///
    /// A frame pause keeps its original deadline while paused, so resuming
    /// after the deadline shows the next frame immediately.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if !paused {
            self.stepping = false;
        }
    }

    /// Returns whether playback is paused by the user.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// The current status.
    pub fn status(&self) -> PlaybackStatus {
        if self.error.is_some() {
            PlaybackStatus::Failed
        } else if self.finished {
            PlaybackStatus::Finished
        } else if self.paused && !self.stepping {
            PlaybackStatus::Paused
        } else if let Some(until) = self.wait_until {
            PlaybackStatus::Waiting { until }
        } else {
            PlaybackStatus::Playing
        }
    }

    /// The markers currently on the canvas, in drawing order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The iteration of the frame on the canvas, or `None` before anything
    /// has been drawn.
    pub fn iteration(&self) -> Option<f64> {
        self.iteration
    }

    /// The number of frame boundaries crossed so far.
    pub fn frames_started(&self) -> usize {
        self.frames_started
    }

    /// The error that stopped playback, if any.
    pub fn error(&self) -> Option<&TraceError> {
        self.error.as_ref()
    }

    /// Takes the error that stopped playback. Playback stays stopped.
    pub fn take_error(&mut self) -> Option<TraceError> {
        let error = self.error.take();
        if error.is_some() {
            self.finished = true;
        }
        error
    }

    /// The sequencer used to build markers.
    pub fn sequencer(&self) -> &FrameSequencer {
        &self.sequencer
    }

    fn is_done(&self) -> bool {
        self.finished || self.error.is_some()
    }

    fn begin_held_frame(&mut self) {
        self.markers.clear();
        self.frames_started += 1;
        if let Some(step) = self.held.take() {
            tracing::debug!("Starting frame for iteration {}", step.iteration);
            self.draw(step);
        }
    }

    fn draw(&mut self, step: Step) {
        self.iteration = Some(step.iteration);
        self.markers.push(step.marker);
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::TraceReader;

    const TRACE: &str = "\
1 9.0 0.0 0.0
1 5.0 0.1 0.1
1 1.0 0.2 0.2
2 9.0 0.0 0.1
2 5.0 0.1 0.2
3 9.0 0.0 0.2
";

    fn player(text: &str) -> Player<TraceReader<Cursor<String>>> {
        Player::new(TraceReader::new(Cursor::new(text.to_string())))
    }

    fn secs(seconds: f64) -> Duration {
        Duration::from_secs_f64(seconds)
    }

    #[test]
    fn test_pause_before_first_frame() {
        let start = Instant::now();
        let mut player = player(TRACE);

        assert_eq!(
            player.tick(start),
            PlaybackStatus::Waiting {
                until: start + FRAME_PAUSE
            }
        );
        assert!(player.markers().is_empty());
        assert_eq!(player.iteration(), None);

        player.tick(start + secs(0.999));
        assert!(player.markers().is_empty());

        player.tick(start + secs(1.0));
        assert_eq!(player.markers().len(), 3);
        assert_eq!(player.iteration(), Some(1.0));
        assert_eq!(player.frames_started(), 1);
    }

    #[test]
    fn test_frame_stays_until_deadline() {
        let start = Instant::now();
        let mut player = player(TRACE);
        player.tick(start);
        player.tick(start + secs(1.0));

        // The next frame is held back for a full pause after the boundary.
        player.tick(start + secs(1.5));
        assert_eq!(player.markers().len(), 3);
        player.tick(start + secs(1.999));
        assert_eq!(player.iteration(), Some(1.0));

        player.tick(start + secs(2.0));
        assert_eq!(player.markers().len(), 2);
        assert_eq!(player.iteration(), Some(2.0));

        assert_eq!(player.tick(start + secs(3.0)), PlaybackStatus::Finished);
        assert_eq!(player.markers().len(), 1);
        assert_eq!(player.iteration(), Some(3.0));
        assert_eq!(player.frames_started(), 3);
    }

    #[test]
    fn test_late_tick_clears_once() {
        let start = Instant::now();
        let mut player = player(TRACE);
        player.tick(start);

        // A very late tick still shows every frame for one pause each.
        player.tick(start + secs(60.0));
        assert_eq!(player.iteration(), Some(1.0));
        assert_eq!(player.frames_started(), 1);
    }

    #[test]
    fn test_trace_starting_at_zero_draws_immediately() {
        let start = Instant::now();
        let mut player = player("0 9 0 0\n0 9 0.1 0\n1 9 0 0\n");
        player.tick(start);
        assert_eq!(player.markers().len(), 2);
        assert_eq!(player.iteration(), Some(0.0));
        assert_eq!(player.frames_started(), 0);
    }

    #[test]
    fn test_error_stops_drawing() {
        let start = Instant::now();
        let mut player = player("0 9 0 0\n0 9 0.1 0\n0 9 bad 0\n0 9 0.2 0\n");
        assert_eq!(player.tick(start), PlaybackStatus::Failed);
        assert_eq!(player.markers().len(), 2);
        assert_eq!(player.error().and_then(TraceError::line), Some(3));

        assert_eq!(player.tick(start + secs(10.0)), PlaybackStatus::Failed);
        assert_eq!(player.markers().len(), 2);
    }

    #[test]
    fn test_error_in_held_frame_is_not_drawn() {
        let start = Instant::now();
        let mut player = player("1 9 0 0\n2 9 0 0\n2 9 0 0 0\n");
        player.tick(start);
        player.tick(start + secs(1.0));
        assert_eq!(player.iteration(), Some(1.0));

        assert_eq!(player.tick(start + secs(2.0)), PlaybackStatus::Failed);
        assert_eq!(player.iteration(), Some(2.0));
        assert_eq!(player.markers().len(), 1);
    }

    #[test]
    fn test_records_per_tick_budget() {
        let start = Instant::now();
        let text: String = (0..10).map(|i| format!("0 1 {} 0\n", i)).collect();
        let mut player = player(&text).with_records_per_tick(4);

        assert_eq!(player.tick(start), PlaybackStatus::Playing);
        assert_eq!(player.markers().len(), 4);
        player.tick(start);
        assert_eq!(player.markers().len(), 8);
        player.tick(start);
        assert_eq!(player.markers().len(), 10);
        assert_eq!(player.tick(start), PlaybackStatus::Finished);
    }

    #[test]
    fn test_paused_player_does_not_read() {
        let start = Instant::now();
        let mut player = player(TRACE);
        player.set_paused(true);
        assert_eq!(player.tick(start + secs(5.0)), PlaybackStatus::Paused);
        assert!(player.markers().is_empty());

        player.set_paused(false);
        player.tick(start + secs(5.0));
        assert_eq!(
            player.tick(start + secs(6.0)),
            PlaybackStatus::Waiting {
                until: start + secs(7.0)
            }
        );
        assert_eq!(player.iteration(), Some(1.0));
    }

    #[test]
    fn test_resume_after_deadline_shows_next_frame() {
        let start = Instant::now();
        let mut player = player(TRACE);
        player.tick(start);
        player.set_paused(true);
        assert_eq!(player.tick(start + secs(5.0)), PlaybackStatus::Paused);
        assert!(player.markers().is_empty());

        // The frame pause expired while paused, so resuming draws at once.
        player.set_paused(false);
        assert_eq!(
            player.tick(start + secs(5.0)),
            PlaybackStatus::Waiting {
                until: start + secs(6.0)
            }
        );
        assert_eq!(player.markers().len(), 3);
        assert_eq!(player.iteration(), Some(1.0));
    }

    #[test]
    fn test_step_skips_pause() {
        let start = Instant::now();
        let mut player = player(TRACE);
        player.tick(start);
        player.step();
        assert_eq!(player.iteration(), Some(1.0));
        assert_eq!(player.markers().len(), 1);

        player.tick(start);
        assert_eq!(player.markers().len(), 3);
        assert!(matches!(player.status(), PlaybackStatus::Waiting { .. }));
    }

    #[test]
    fn test_step_while_paused_plays_one_frame() {
        let start = Instant::now();
        let mut player = player(TRACE);
        player.tick(start);
        player.set_paused(true);

        player.step();
        assert_eq!(player.tick(start), PlaybackStatus::Paused);
        assert_eq!(player.iteration(), Some(1.0));
        assert_eq!(player.markers().len(), 3);

        player.step();
        assert_eq!(player.tick(start), PlaybackStatus::Paused);
        assert_eq!(player.iteration(), Some(2.0));
        assert_eq!(player.markers().len(), 2);

        player.step();
        assert_eq!(player.tick(start), PlaybackStatus::Finished);
        assert_eq!(player.iteration(), Some(3.0));
    }

    #[test]
    fn test_zero_pause() {
        let start = Instant::now();
        let mut player = player(TRACE).with_frame_pause(Duration::ZERO);
        assert_eq!(player.tick(start), PlaybackStatus::Finished);
        assert_eq!(player.iteration(), Some(3.0));
        assert_eq!(player.markers().len(), 1);
        assert_eq!(player.frames_started(), 3);
    }
}
