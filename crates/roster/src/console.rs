//! Colorful console output for roster events.
//!
//! Provides a custom `tracing` layer that formats import, derivation and
//! scoring events with colors. Available with the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "roster=info";

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing beyond printing the banner if another global subscriber is
/// already installed.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RosterConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____            _
|  _ \ ___  ___| |_ ___ _ __
| |_) / _ \/ __| __/ _ \ '__|
|  _ < (_) \__ \ ||  __/ |
|_| \_\___/|___/\__\___|_|
"#;

    let version_line = format!(
        "      v{} - Fair shift rostering\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats roster events with colors.
pub struct RosterConsoleLayer;

impl<S: Subscriber> Layer<S> for RosterConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("roster") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    employee: Option<String>,
    score: Option<String>,
    counts: Vec<(&'static str, u64)>,
}

impl EventVisitor {
    fn count(&self, name: &str) -> u64 {
        self.counts
            .iter()
            .find(|(field, _)| *field == name)
            .map_or(0, |(_, value)| *value)
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.counts.push((field.name(), value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "employee" => self.employee = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "roster_imported" => format_imported(v),
        "availability_derived" => format_derived(v),
        "unknown_vacation_employee" => format_unknown_employee(v),
        "score_initialized" => format_score_line(v),
        _ => String::new(),
    }
}

fn format_imported(v: &EventVisitor) -> String {
    format!(
        "{} {} {} time slots ({}), spots ({}), employees ({}), shifts ({}), fixed ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Import]".bright_cyan(),
        number(v.count("time_slots")),
        number(v.count("spots")),
        number(v.count("employees")),
        number(v.count("shifts")),
        number(v.count("fixed")),
    )
}

fn format_derived(v: &EventVisitor) -> String {
    format!(
        "{} {} {} employees ({}): unavailable slots ({}), undesirable slots ({}), before vacation ({}), after vacation ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Availability]".bright_cyan(),
        number(v.count("employees")),
        number(v.count("unavailable_slots")),
        number(v.count("undesirable_slots")),
        number(v.count("before_vacation_slots")),
        number(v.count("after_vacation_slots")),
    )
}

fn format_unknown_employee(v: &EventVisitor) -> String {
    format!(
        "{} {} {} vacation of unknown employee ({}) skipped",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Import]".bright_cyan(),
        v.employee.as_deref().unwrap_or("?").white().bold(),
    )
}

fn format_score_line(v: &EventVisitor) -> String {
    format!(
        "    {} Score {}",
        "->".bright_blue(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn number(n: u64) -> String {
    n.to_formatted_string(&Locale::en).bright_yellow().to_string()
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

// Colors a "-2hard/5soft" score: red hard and yellow soft when negative.
fn format_score(score: &str) -> String {
    let Some((hard, soft)) = score.split_once('/').filter(|_| score.contains("hard")) else {
        return score.white().to_string();
    };
    let hard = hard.trim_end_matches("hard");
    let soft = soft.trim_end_matches("soft");
    let hard_num: i64 = hard.parse().unwrap_or(0);
    let soft_num: i64 = soft.parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };
    let soft_str = if soft_num < 0 {
        format!("{}soft", soft).yellow().to_string()
    } else {
        format!("{}soft", soft).white().to_string()
    };
    format!("{}/{}", hard_str, soft_str)
}
