//! Correlation identifier carried by each request.
//!
//! The active [`TraceId`] lives in tokio task-local storage so errors raised
//! deep inside services can record it without threading it through every
//! call. Task locals do not follow `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] to keep the identifier.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request across logs and error payloads.
///
/// # Examples
/// ```
/// use measurement_backend::TraceId;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let id: TraceId = "6f1c2d2e-3f7a-4c55-9a43-0d3f0f4b9a10".parse().expect("uuid");
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Identifier of the enclosing scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` installed as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generated_identifiers_differ() {
        assert_ne!(TraceId::generate(), TraceId::generate());
    }

    #[rstest]
    fn display_matches_hyphenated_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(TraceId::from_uuid(uuid).to_string(), uuid.to_string());
    }

    #[rstest]
    fn parse_rejects_non_uuid_text() {
        assert!("not-a-trace".parse::<TraceId>().is_err());
    }

    #[tokio::test]
    async fn nested_scope_shadows_outer_identifier() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;
        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[tokio::test]
    async fn spawned_task_loses_identifier_without_rescoping() {
        let id = TraceId::generate();
        let observed = TraceId::scope(id, async {
            tokio::spawn(async { TraceId::current() })
                .await
                .expect("join spawned task")
        })
        .await;
        assert_eq!(observed, None);
    }
}
