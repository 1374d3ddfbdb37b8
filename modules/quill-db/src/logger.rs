use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::duration::{format_duration, round_to_micros};
use crate::event::QueryEvent;
use crate::hook::{QueryContext, QueryHook};
use crate::style::{style_for, ERROR_STYLE};

const TAG: &str = "[sqlx]";

/// Development query logger.
///
/// Writes one line per finished statement:
///
/// ```text
/// [sqlx]  14:03:07.512   SELECT                  1.2ms  SELECT id FROM todos
/// ```
///
/// Whitespace runs in the query text, newlines included, are collapsed to a
/// single space. Failed statements get a red `type: message` suffix after the
/// query text.
/// Each line is a single write on the locked sink, so concurrent statements
/// never interleave. Write errors are dropped.
pub struct QueryLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    colors: bool,
}

impl QueryLogger {
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
            colors: console::colors_enabled_stderr(),
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Compose the trace line for `event`, finished at `at` after `elapsed`.
    /// No trailing newline.
    pub fn render(&self, at: DateTime<Local>, elapsed: Duration, event: &QueryEvent) -> String {
        let label = style_for(event.kind())
            .paint(&format!(" {:<16} ", event.operation), self.colors);
        let mut line = format!(
            "{TAG}  {}  {label}  {:>10}  {}",
            at.format("%H:%M:%S%.3f"),
            format_duration(round_to_micros(elapsed)),
            single_line(&event.query),
        );

        if let Some(err) = &event.error {
            line.push_str(" \t ");
            line.push_str(&ERROR_STYLE.paint(&format!(" {err} "), self.colors));
        }

        line
    }

    fn write_line(&self, line: &str) {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = sink.write_all(buf.as_bytes());
        let _ = sink.flush();
    }
}

fn single_line(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Default for QueryLogger {
    fn default() -> Self {
        Self::stderr()
    }
}

impl QueryHook for QueryLogger {
    fn after_query(&self, _cx: &QueryContext, event: &QueryEvent) {
        let elapsed = event.elapsed();
        let line = self.render(Local::now(), elapsed, event);
        self.write_line(&line);
    }
}
