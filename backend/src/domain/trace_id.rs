//! Correlation id carried by every request and echoed in error bodies.
//!
//! The [`crate::Trace`] middleware opens a scope per request; anything running
//! inside it can read the id with [`TraceId::current`]. Task-locals do not
//! follow work onto tokio's blocking pool, so password hashing goes through
//! [`TraceId::spawn_blocking`], which re-enters the caller's scope on the
//! worker thread. Without that, errors raised while hashing would lose their
//! `traceId`.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task::JoinError;
use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Random (v4) request identifier, rendered in hyphenated form.
///
/// ```
/// use accounts::domain::TraceId;
///
/// let id: TraceId = "6f1c2d3e-0000-4000-8000-000000000001".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2d3e-0000-4000-8000-000000000001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `trace_id` as the current id.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }

    /// Run `work` on the blocking pool under the caller's trace id.
    ///
    /// When no id is in scope the closure runs unscoped.
    ///
    /// ```
    /// use accounts::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id: TraceId = "00000000-0000-4000-8000-000000000000".parse().expect("uuid");
    /// let seen = TraceId::scope(id, TraceId::spawn_blocking(TraceId::current))
    ///     .await
    ///     .expect("blocking task completes");
    /// assert_eq!(seen, Some(id));
    /// # });
    /// ```
    pub async fn spawn_blocking<F, T>(work: F) -> Result<T, JoinError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let trace_id = Self::current();
        tokio::task::spawn_blocking(move || match trace_id {
            Some(id) => CURRENT.sync_scope(id, work),
            None => work(),
        })
        .await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
