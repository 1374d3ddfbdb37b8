//! Query logger behaviour through the public hook interface.
//!
//! No database needed: events are built by hand the way the access layer
//! builds them.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use quill_db::{QueryContext, QueryEvent, QueryHook, QueryLogger, StatementError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// In-memory sink that records every `write` call separately, so a line
/// split across several writes would show up as more than one chunk.
#[derive(Clone, Default)]
struct ChunkSink(Arc<Mutex<Vec<Vec<u8>>>>);

impl ChunkSink {
    fn chunks(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .map(|c| String::from_utf8(c.clone()).unwrap())
            .collect()
    }

    fn text(&self) -> String {
        self.chunks().concat()
    }
}

impl Write for ChunkSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn logger() -> (Arc<QueryLogger>, ChunkSink) {
    let sink = ChunkSink::default();
    (
        Arc::new(QueryLogger::new(sink.clone()).with_colors(false)),
        sink,
    )
}

fn finished(query: &str, took: Duration) -> QueryEvent {
    QueryEvent::started_at(query, Instant::now() - took)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn select_one_renders_label_duration_and_query() {
    let (logger, _) = logger();
    let event = QueryEvent::new("SELECT 1");

    let line = logger.render(Local::now(), Duration::from_micros(1200), &event);

    assert!(line.starts_with("[sqlx]"));
    assert!(line.contains(" SELECT           "));
    assert!(line.contains("1.2ms"));
    assert!(line.ends_with("SELECT 1"));
}

#[test]
fn failed_select_appends_error_after_query() {
    let (logger, _) = logger();
    let mut event = QueryEvent::new("SELECT 1");
    event.set_error(StatementError::new("pg: unique_violation", "duplicate key"));

    let line = logger.render(Local::now(), Duration::from_micros(1200), &event);

    let (head, suffix) = line.split_once('\t').expect("error suffix separated by tab");
    assert!(head.trim_end().ends_with("SELECT 1"));
    assert!(suffix.contains("pg: unique_violation: duplicate key"));
}

#[test]
fn elapsed_is_measured_from_start_time() {
    let (logger, sink) = logger();
    let event = finished("SELECT 1", Duration::from_millis(5));

    logger.after_query(&QueryContext::default(), &event);

    let text = sink.text();
    let duration = text
        .split_whitespace()
        .find(|w| w.ends_with("ms") && w.starts_with(|c: char| c.is_ascii_digit()))
        .expect("duration column");
    let millis: f64 = duration.trim_end_matches("ms").parse().unwrap();
    assert!(millis >= 5.0, "duration {duration} shorter than elapsed time");
}

#[test]
fn before_then_after_writes_one_line_total() {
    let (logger, sink) = logger();
    let event = QueryEvent::new("INSERT INTO users (id, name) VALUES ($1, $2)");

    let cx = logger.before_query(QueryContext::current(), &event);
    assert!(sink.chunks().is_empty());

    logger.after_query(&cx, &event);
    assert_eq!(sink.chunks().len(), 1);
    assert!(sink.text().ends_with("VALUES ($1, $2)\n"));
}

#[test]
fn concurrent_statements_produce_intact_lines() {
    const THREADS: usize = 16;
    const PER_THREAD: usize = 50;

    let (logger, sink) = logger();

    thread::scope(|s| {
        for t in 0..THREADS {
            let logger = logger.clone();
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    let query = format!("SELECT {t} AS thread, {i} AS seq");
                    let mut event = finished(&query, Duration::from_micros(10));
                    if i % 7 == 0 {
                        event.set_error(StatementError::new("sqlx::PoolTimedOut", "timed out"));
                    }
                    logger.after_query(&QueryContext::default(), &event);
                }
            });
        }
    });

    // One write per line, each a complete line.
    let chunks = sink.chunks();
    assert_eq!(chunks.len(), THREADS * PER_THREAD);
    for chunk in &chunks {
        assert!(chunk.starts_with("[sqlx]"), "garbled line: {chunk:?}");
        assert!(chunk.ends_with('\n'));
        assert_eq!(chunk.matches('\n').count(), 1);
    }

    let text = sink.text();
    for t in 0..THREADS {
        for i in 0..PER_THREAD {
            let needle = format!("SELECT {t} AS thread, {i} AS seq");
            assert_eq!(text.matches(&needle).count(), 1, "missing {needle}");
        }
    }
}
