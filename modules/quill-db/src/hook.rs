use tracing::Span;

use crate::event::QueryEvent;

/// Per-statement value threaded from `before_query` to `after_query`.
///
/// Carries the span that was current when the statement was issued.
#[derive(Debug, Clone)]
pub struct QueryContext {
    span: Span,
}

impl QueryContext {
    pub fn current() -> Self {
        Self {
            span: Span::current(),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self { span: Span::none() }
    }
}

/// Observer invoked around every statement the [`Database`](crate::Database)
/// executes.
///
/// Both callbacks run inline on the task executing the statement and must
/// not block. Neither can fail: a hook observes statements, it never
/// changes their outcome.
pub trait QueryHook: Send + Sync {
    /// Called before dispatch. The returned context is handed to the next
    /// hook and finally to `after_query`.
    fn before_query(&self, cx: QueryContext, _event: &QueryEvent) -> QueryContext {
        cx
    }

    /// Called after the statement finished, with `event.error` set on
    /// failure.
    fn after_query(&self, cx: &QueryContext, event: &QueryEvent);
}
