//! Colorful console output for constraint events.
//!
//! Provides a custom `tracing` layer that formats WeightForge events with
//! colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Constraint sets applied to a parameter map
//! - **WARN**: Constraints whose parameter is missing
//! - **DEBUG**: Constraints resolved from names or config dictionaries
//! - **TRACE**: Individual constraint applications

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Initializes console output for constraint events.
///
/// Safe to call multiple times - only the first call has effect. The
/// `RUST_LOG` environment variable overrides the default
/// `weightforge=info` directive; other crates stay silent unless enabled.
pub fn init() {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);

        let filter = EnvFilter::builder()
            .with_default_directive(default_directive())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ConstraintConsoleLayer)
            .try_init();
    });
}

fn default_directive() -> Directive {
    "weightforge=info"
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into())
}

fn elapsed_secs() -> f64 {
    EPOCH
        .get()
        .map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

/// A tracing layer that formats constraint events with colors.
pub struct ConstraintConsoleLayer;

impl<S: Subscriber> Layer<S> for ConstraintConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("weightforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(
                io::stdout(),
                "{} {}",
                format!("{:>7.3}s", elapsed_secs()).bright_black(),
                output
            );
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    class_name: Option<String>,
    parameter: Option<String>,
    shape: Option<String>,
    params: Option<u64>,
    applied: Option<u64>,
    skipped: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "class_name" => self.class_name = Some(s.trim_matches('"').to_string()),
            "parameter" => self.parameter = Some(s.trim_matches('"').to_string()),
            "shape" => self.shape = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "params" => self.params = Some(value),
            "applied" => self.applied = Some(value),
            "skipped" => self.skipped = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "class_name" => self.class_name = Some(value.to_string()),
            "parameter" => self.parameter = Some(value.to_string()),
            "shape" => self.shape = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "constraint_resolved" => format_resolved(v),
        "constraint_applied" => format_applied(v, level),
        "constraint_set_applied" => format_set_applied(v),
        "constraint_missing_parameter" => format_missing_parameter(v),
        _ => String::new(),
    }
}

fn format_resolved(v: &EventVisitor) -> String {
    let class_name = v.class_name.as_deref().unwrap_or("Unknown");
    format!(
        "{} Resolved {} │ {} params",
        "◆".bright_blue(),
        class_name.white().bold(),
        v.params.unwrap_or(0).bright_yellow()
    )
}

fn format_applied(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let class_name = v.class_name.as_deref().unwrap_or("Unknown");
    let shape = v.shape.as_deref().unwrap_or("?");
    format!(
        "{} {} │ shape {}",
        "·".bright_black(),
        class_name.bright_black(),
        shape.bright_black()
    )
}

fn format_set_applied(v: &EventVisitor) -> String {
    let applied = v.applied.unwrap_or(0);
    let skipped = v.skipped.unwrap_or(0);

    let mut output = format!(
        "{} Constraints applied │ {} parameters",
        "■".bright_green().bold(),
        applied.bright_yellow()
    );
    if skipped > 0 {
        output.push_str(&format!(" │ {} skipped", skipped.bright_red()));
    }
    output
}

fn format_missing_parameter(v: &EventVisitor) -> String {
    let parameter = v.parameter.as_deref().unwrap_or("?");
    let class_name = v.class_name.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} has no parameter '{}'",
        "⚠".bright_yellow().bold(),
        class_name.white().bold(),
        parameter.bright_red()
    )
}
