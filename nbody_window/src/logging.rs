use std::{
    backtrace::Backtrace,
    fmt, fs,
    io::Write,
    panic::{self, PanicInfo},
    path::Path,
    sync::{Arc, Mutex},
};

use once_cell::sync::OnceCell;
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::Context, prelude::*, registry::LookupSpan, Layer};

use crate::WindowError;

/// Targets that are only logged at warning level or above.
const NOISY_TARGETS: &[&str] = &["wgpu", "naga", "winit", "egui"];

static LOG_FILE: OnceCell<Mutex<fs::File>> = OnceCell::new();

/// Opens the log file in append mode and installs the global subscriber and
/// panic hook.
///
/// Returns false if logging was already initialized.
pub(crate) fn init(log_file_path: &Path) -> Result<bool, WindowError> {
    if LOG_FILE.get().is_some() {
        return Ok(false);
    }

    let log_file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_file_path)
        .map_err(|error| WindowError::LogFile {
            path: log_file_path.to_path_buf(),
            error: Arc::new(error),
        })?;
    if LOG_FILE.set(Mutex::new(log_file)).is_err() {
        return Ok(false);
    }

    panic::set_hook(Box::new(panic_hook));
    LogTracer::init().map_err(|_| WindowError::LoggingAlreadySet)?;
    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(SinkLayer))
        .map_err(|_| WindowError::LoggingAlreadySet)?;
    Ok(true)
}

pub(crate) fn print_to_log_file(line: &str) {
    if let Some(log_file) = LOG_FILE.get() {
        let mut log_file = log_file.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(log_file, "{}", line).and_then(|_| log_file.flush());
    }
}

fn emit(line: &str) {
    eprintln!("{}", line);
    print_to_log_file(line);
}

fn format_line(
    timestamp: &str,
    level: Level,
    span_path: Option<&str>,
    target: &str,
    message: &str,
) -> String {
    match span_path {
        Some(span_path) => format!(
            "[{}] [{:5}] [{}] [{}] {}",
            timestamp, level, span_path, target, message
        ),
        None => format!("[{}] [{:5}] [{}] {}", timestamp, level, target, message),
    }
}

fn is_suppressed(target: &str, level: Level) -> bool {
    if level > Level::INFO {
        return true;
    }
    let noisy = NOISY_TARGETS
        .iter()
        .any(|prefix| target.starts_with(prefix));
    noisy && level >= Level::INFO
}

fn panic_message<'a>(info: &'a PanicInfo<'_>) -> &'a str {
    if let Some(s) = info.payload().downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s
    } else {
        "Box<Any>"
    }
}

fn panic_hook(info: &PanicInfo<'_>) {
    let location = info
        .location()
        .map_or_else(|| "<unknown>".to_string(), |location| location.to_string());
    tracing::error!(
        "Panicked at {}: {}\n{}",
        location,
        panic_message(info),
        Backtrace::force_capture()
    );
}

/// Writes every event that passes the level filter to stderr and the log file.
struct SinkLayer;

#[derive(Default)]
struct MessageVisitor {
    message: String,
    log_target: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "log.target" => self.log_target = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

impl<S> Layer<S> for SinkLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let level = *metadata.level();
        let target = visitor
            .log_target
            .unwrap_or_else(|| metadata.target().to_string());
        if is_suppressed(&target, level) {
            return;
        }

        let span_path = ctx.event_scope(event).map(|scope| {
            scope
                .from_root()
                .map(|span| span.name())
                .collect::<Vec<_>>()
                .join(".")
        });

        let timestamp = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S%.3f")
            .to_string();
        emit(&format_line(
            &timestamp,
            level,
            span_path.as_deref(),
            &target,
            &visitor.message,
        ));
    }
}
