//! In-memory [`SqlExecutor`] and log capture for service and router tests.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

use catalog_db::{DbError, DbResult, QueryOutcome, Record, SqlExecutor, SqlValue};

/// One recorded `execute` call.
pub type Call = (String, Vec<SqlValue>);

/// Replays queued outcomes and records every statement it receives.
///
/// When the queue runs dry it answers with an empty row set.
#[derive(Default)]
pub struct StubExecutor {
    outcomes: Mutex<VecDeque<DbResult<QueryOutcome>>>,
    calls: Mutex<Vec<Call>>,
}

impl StubExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(StubExecutor::default())
    }

    pub fn returning(outcome: QueryOutcome) -> Arc<Self> {
        let stub = StubExecutor::default();
        stub.push(Ok(outcome));
        Arc::new(stub)
    }

    pub fn failing(error: DbError) -> Arc<Self> {
        let stub = StubExecutor::default();
        stub.push(Err(error));
        Arc::new(stub)
    }

    pub fn push(&self, outcome: DbResult<QueryOutcome>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlExecutor for StubExecutor {
    async fn execute(&self, statement: &str, params: Vec<SqlValue>) -> DbResult<QueryOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((statement.to_string(), params));

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(QueryOutcome::Rows(Vec::new())))
    }
}

/// A `products` row as the pool would decode it.
pub fn product_record(id: u64, sku: &str, name: &str, in_stock: i64) -> Record {
    Record::new()
        .with("id", id)
        .with("sku", sku)
        .with("name", name)
        .with("in_stock", in_stock)
}

// =============================================================================
// Log Capture
// =============================================================================

/// Captured `(level, target, message)` of every event.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    events: Arc<Mutex<Vec<(Level, String, String)>>>,
}

impl CapturedLogs {
    /// Installs a capturing subscriber for the current thread.
    pub fn install() -> (Self, DefaultGuard) {
        let logs = CapturedLogs::default();
        let guard = tracing::subscriber::set_default(Registry::default().with(logs.clone()));
        (logs, guard)
    }

    /// Warnings and errors emitted by this crate.
    pub fn problems(&self) -> Vec<(Level, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, target, _)| *level <= Level::WARN && target.starts_with("catalog_api"))
            .map(|(level, _, message)| (*level, message.clone()))
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = MessageVisitor(String::new());
        event.record(&mut message);

        let metadata = event.metadata();
        self.events.lock().unwrap().push((
            *metadata.level(),
            metadata.target().to_string(),
            message.0,
        ));
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
