//! Scripted in-memory `SqlClient` for tests.
//!
//! Every submitted statement is recorded. Responses are consumed in
//! submission order; once the script runs out, queries return no rows and
//! updates report zero affected rows.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::DbError;
use super::client::{Row, SqlClient, Statement};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Rows(Vec<Row>),
    Affected(u64),
    /// Fails the statement with a protocol error carrying this message.
    Fail(String),
}

#[derive(Debug, Default)]
struct MockState {
    statements: Vec<Statement>,
    responses: VecDeque<MockResponse>,
}

/// Recording client; clones share the same script and log.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<MockState>>,
}

impl MockClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the reply for the next unanswered statement.
    pub fn respond(&self, response: MockResponse) {
        self.lock().responses.push_back(response);
    }

    /// Every statement submitted so far, in arrival order.
    #[must_use]
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().statements.clone()
    }

    /// Number of statements submitted so far.
    #[must_use]
    pub fn submissions(&self) -> usize {
        self.lock().statements.len()
    }

    /// Yield until at least `count` statements have arrived, or one second
    /// has passed.
    pub async fn wait_for_statements(&self, count: usize) {
        let wait = async {
            while self.submissions() < count {
                tokio::task::yield_now().await;
            }
        };
        if tokio::time::timeout(Duration::from_secs(1), wait).await.is_err() {
            tracing::warn!(expected = count, "timed out waiting for statements");
        }
    }

    fn next(&self, statement: Statement) -> Option<MockResponse> {
        let mut state = self.lock();
        state.statements.push(statement);
        state.responses.pop_front()
    }
}

impl SqlClient for MockClient {
    async fn query(&self, statement: Statement) -> Result<Vec<Row>, DbError> {
        match self.next(statement) {
            Some(MockResponse::Rows(rows)) => Ok(rows),
            Some(MockResponse::Affected(_)) | None => Ok(Vec::new()),
            Some(MockResponse::Fail(message)) => Err(sqlx::Error::Protocol(message).into()),
        }
    }

    async fn execute(&self, statement: Statement) -> Result<u64, DbError> {
        match self.next(statement) {
            Some(MockResponse::Affected(count)) => Ok(count),
            Some(MockResponse::Rows(rows)) => Ok(u64::try_from(rows.len()).unwrap_or(u64::MAX)),
            None => Ok(0),
            Some(MockResponse::Fail(message)) => Err(sqlx::Error::Protocol(message).into()),
        }
    }
}
