//! Console log formatting for the simulator binary.

use std::fmt;
use std::io::IsTerminal;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const MAGENTA: &str = "\x1b[35m";
const RESET: &str = "\x1b[0m";

const COMPONENT_WIDTH: usize = 10;

/// Tag an info event with a component column value
#[macro_export]
macro_rules! component_info {
    ($component:expr, $($arg:tt)*) => {
        tracing::info!(component = $component, $($arg)*)
    };
}

/// Tag a warn event with a component column value
#[macro_export]
macro_rules! component_warn {
    ($component:expr, $($arg:tt)*) => {
        tracing::warn!(component = $component, $($arg)*)
    };
}

/// Event formatter producing `HH:MM:SS.mmm LEVEL component message k=v` lines.
///
/// The component column prefers an explicit `component` field on the event
/// and otherwise falls back to the crate that emitted it, so library logs
/// line up with the binary's own without every call site tagging itself.
pub struct SimLogFormatter {
    fallback: String,
    colors: bool,
}

impl SimLogFormatter {
    pub fn new(fallback: impl Into<String>) -> Self {
        let colors = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            fallback: fallback.into(),
            colors,
        }
    }

    fn level_color(&self, level: &Level) -> &'static str {
        if !self.colors {
            return "";
        }
        match *level {
            Level::ERROR => RED,
            Level::WARN => YELLOW,
            Level::INFO => GREEN,
            Level::DEBUG | Level::TRACE => MAGENTA,
        }
    }
}

impl<S, N> FormatEvent<S, N> for SimLogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        let component = fields
            .component
            .unwrap_or_else(|| crate_of(event.metadata().target(), &self.fallback));
        let level = event.metadata().level();

        let (dim, reset) = if self.colors { (DIM, RESET) } else { ("", "") };
        let color = self.level_color(level);

        write!(
            writer,
            "{}{}{} ",
            dim,
            chrono::Utc::now().format("%H:%M:%S%.3f"),
            reset
        )?;
        write!(writer, "{}{:>5}{} ", color, level, if self.colors { RESET } else { "" })?;
        write!(
            writer,
            "{:<width$} {}",
            component,
            fields.message,
            width = COMPONENT_WIDTH
        )?;
        if !fields.extra.is_empty() {
            write!(writer, " {}{}{}", dim, fields.extra.join(" "), reset)?;
        }
        writeln!(writer)
    }
}

/// Leading crate segment of an event target, with the shared `ndn_` prefix
/// stripped so the column stays narrow
fn crate_of(target: &str, fallback: &str) -> String {
    let krate = target.split("::").next().unwrap_or(target);
    if krate.is_empty() {
        return fallback.to_string();
    }
    krate.strip_prefix("ndn_").unwrap_or(krate).to_string()
}

#[derive(Default)]
struct EventFields {
    message: String,
    component: Option<String>,
    extra: Vec<String>,
}

impl tracing::field::Visit for EventFields {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "component" => self.component = Some(value.to_string()),
            name => self.extra.push(format!("{name}={value}")),
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "component" => {
                self.component = Some(format!("{value:?}").trim_matches('"').to_string())
            }
            name => self.extra.push(format!("{name}={value:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_of_strips_shared_prefix() {
        assert_eq!(crate_of("ndn_control::provider", "ndn-sim"), "control");
        assert_eq!(crate_of("ndn_forwarder", "ndn-sim"), "forwarder");
    }

    #[test]
    fn test_crate_of_falls_back_for_empty_target() {
        assert_eq!(crate_of("", "ndn-sim"), "ndn-sim");
        assert_eq!(crate_of("hyper::client", "ndn-sim"), "hyper");
    }
}
