use std::time::{Duration, Instant};

/// How long frames are accumulated before the measurement is refreshed.
const MEASUREMENT_PERIOD: Duration = Duration::from_secs(3);

/// Measures frame rate over fixed periods.
#[derive(Debug, Clone)]
pub(crate) struct FpsCounter {
    frames: u32,
    period_start: Instant,
    measurement: Option<(u32, Duration)>,
}

impl FpsCounter {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            period_start: now,
            measurement: None,
        }
    }

    pub(crate) fn end_frame(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.period_start);
        if elapsed >= MEASUREMENT_PERIOD {
            self.measurement = Some((self.frames, elapsed));
            self.period_start = now;
            self.frames = 0;
        }
    }

    pub(crate) fn fps(&self) -> f32 {
        match self.measurement {
            Some((frames, elapsed)) if frames > 0 && !elapsed.is_zero() => {
                frames as f32 / elapsed.as_secs_f32()
            }
            _ => 0.0,
        }
    }

    pub(crate) fn mspf(&self) -> f32 {
        match self.measurement {
            Some((frames, elapsed)) if frames > 0 && !elapsed.is_zero() => {
                elapsed.as_secs_f32() / frames as f32 * 1000.0
            }
            _ => 0.0,
        }
    }
}
