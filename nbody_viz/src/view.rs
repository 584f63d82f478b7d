use std::{cell::RefCell, fs::File, io::BufReader, path::Path, rc::Rc, time::Instant};

use egui::{emath::RectTransform, Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};
use nbody_trace::{Marker, PlaybackStatus, Player, TraceError, TraceReader};
use nbody_window::{KeyCode, WindowConfig, WindowEnv};

use crate::error::AppError;

pub(crate) const TITLE: &str = "N-body Visualization";

/// The trace played when no path is given.
pub(crate) const DEFAULT_TRACE_FILE: &str = "viz_data_25_25.txt";

/// Returns the window configuration for viewing traces: a fixed canvas-sized
/// window that cannot be resized.
pub(crate) fn window_config() -> WindowConfig {
    let [width, height] = nbody_trace::CANVAS_SIZE;
    WindowConfig::new()
        .with_title(TITLE)
        .with_inner_size([width as f32, height as f32])
        .with_resizable(false)
}

/// Plays the trace at `trace_path` in a window until the window is closed.
///
/// A read error closes the window and is returned.
pub(crate) fn view(config: &WindowConfig, trace_path: &Path) -> Result<(), AppError> {
    let _span = tracing::info_span!("view").entered();
    let reader = TraceReader::open(trace_path)?;
    let mut view = TraceView::new(Player::new(reader));

    let failure: Rc<RefCell<Option<TraceError>>> = Rc::new(RefCell::new(None));
    let window_failure = Rc::clone(&failure);
    nbody_window::run(config, move |env| {
        if let Some(error) = view.show(env) {
            *window_failure.borrow_mut() = Some(error);
            env.request_close();
        }
    })?;

    let failure = failure.borrow_mut().take();
    match failure {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

struct TraceView {
    player: Player<TraceReader<BufReader<File>>>,
}

impl TraceView {
    fn new(player: Player<TraceReader<BufReader<File>>>) -> Self {
        Self { player }
    }

    /// Handles input, advances playback and draws. Returns the error that
    /// stopped playback, once.
    fn show(&mut self, env: &dyn WindowEnv) -> Option<TraceError> {
        let input = env.input();
        if input.key_pressed(KeyCode::Escape) {
            env.request_close();
        }
        if input.key_pressed(KeyCode::Space) {
            let paused = !self.player.paused();
            self.player.set_paused(paused);
            tracing::info!("{}", if paused { "Paused" } else { "Resumed" });
        }
        if input.key_pressed(KeyCode::ArrowRight) {
            self.player.step();
        }

        let now = Instant::now();
        let status = self.player.tick(now);
        match status {
            PlaybackStatus::Playing => env.request_redraw_at(now),
            PlaybackStatus::Waiting { until } => env.request_redraw_at(until),
            PlaybackStatus::Paused | PlaybackStatus::Finished => {}
            PlaybackStatus::Failed => return self.player.take_error(),
        }

        let canvas_size = self.player.sequencer().projection().canvas_size();
        let status_line = status_line(
            status,
            self.player.iteration(),
            self.player.markers().len(),
            env.fps(),
        );

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(env.egui_ctx(), |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let to_screen = canvas_transform(canvas_size, response.rect);

                for marker in self.player.markers() {
                    paint_marker(&painter, &to_screen, marker);
                }

                painter.text(
                    response.rect.left_bottom() + Vec2::new(8.0, -8.0),
                    Align2::LEFT_BOTTOM,
                    status_line,
                    FontId::monospace(12.0),
                    Color32::GRAY,
                );
            });

        None
    }
}

/// Maps canvas coordinates onto the largest rect with the canvas's aspect
/// ratio that fits in `available`, centered.
fn canvas_transform(canvas_size: [f64; 2], available: Rect) -> RectTransform {
    let canvas = Vec2::new(canvas_size[0] as f32, canvas_size[1] as f32);
    let scale = (available.width() / canvas.x).min(available.height() / canvas.y);
    let screen = Rect::from_center_size(available.center(), canvas * scale);
    RectTransform::from_to(Rect::from_min_size(Pos2::ZERO, canvas), screen)
}

fn paint_marker(painter: &Painter, to_screen: &RectTransform, marker: &Marker) {
    let [x, y] = marker.center();
    let center = to_screen.transform_pos(Pos2::new(x as f32, y as f32));
    let radius = marker.radius() as f32 * to_screen.scale().x;
    let [r, g, b] = marker.color().rgb();
    painter.circle(
        center,
        radius,
        Color32::from_rgb(r, g, b),
        Stroke::new(1.0, Color32::BLACK),
    );
}

fn status_line(
    status: PlaybackStatus,
    iteration: Option<f64>,
    bodies: usize,
    fps: f32,
) -> String {
    let iteration = match iteration {
        Some(iteration) => format!("iteration {}", iteration),
        None => "waiting for first frame".to_string(),
    };
    let state = match status {
        PlaybackStatus::Playing | PlaybackStatus::Waiting { .. } => "playing",
        PlaybackStatus::Paused => "paused (space: resume, right: step)",
        PlaybackStatus::Finished => "finished",
        PlaybackStatus::Failed => "failed",
    };
    format!(
        "{} | {} bodies | {} | {:.1} fps",
        iteration, bodies, state, fps
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_canvas_transform_same_size() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(1900.0, 1000.0));
        let to_screen = canvas_transform([1900.0, 1000.0], available);
        assert_eq!(
            to_screen.transform_pos(Pos2::new(950.0, 500.0)),
            Pos2::new(950.0, 500.0)
        );
        assert_eq!(to_screen.scale(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_canvas_transform_keeps_aspect_ratio() {
        let available = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(950.0, 1000.0));
        let to_screen = canvas_transform([1900.0, 1000.0], available);
        assert_eq!(to_screen.scale(), Vec2::new(0.5, 0.5));
        // Letterboxed vertically around the center.
        assert_eq!(to_screen.transform_pos(Pos2::ZERO), Pos2::new(10.0, 270.0));
        assert_eq!(
            to_screen.transform_pos(Pos2::new(1900.0, 1000.0)),
            Pos2::new(960.0, 770.0)
        );
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            status_line(PlaybackStatus::Finished, Some(25.0), 5, 59.96),
            "iteration 25 | 5 bodies | finished | 60.0 fps"
        );
        assert_eq!(
            status_line(PlaybackStatus::Playing, None, 0, 0.0),
            "waiting for first frame | 0 bodies | playing | 0.0 fps"
        );
    }

    #[test]
    fn test_window_config() {
        let config = window_config();
        assert_eq!(config.title(), TITLE);
        assert_eq!(config.inner_size(), [1900.0, 1000.0]);
        assert!(!config.resizable());
    }
}
