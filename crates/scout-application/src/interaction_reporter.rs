//! Best-effort interaction analytics reporting.

use std::sync::Arc;

use scout_core::Result;
use scout_core::gateway::SchoolGateway;
use scout_core::interaction::{InteractionEvent, InteractionKind};

use crate::retry::RetryPolicy;

/// Sends view/favorite events to the remote service under the retry
/// policy.
///
/// Reporting is deliberately fire-and-forget for UI actions: the detached
/// variant logs and swallows terminal failure so favoriting or viewing a
/// school always succeeds locally regardless of the reporting outcome.
pub struct InteractionReporter {
    gateway: Arc<dyn SchoolGateway>,
    policy: RetryPolicy,
}

impl InteractionReporter {
    /// Creates a reporter sending through `gateway` with `policy`.
    pub fn new(gateway: Arc<dyn SchoolGateway>, policy: RetryPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Builds an event stamped with the current time and reports it,
    /// retrying under the policy.
    ///
    /// # Errors
    ///
    /// Fails with `RetryExhausted` wrapping the last network error once
    /// the attempt budget runs out.
    pub async fn record(
        &self,
        user_id: &str,
        school_name: &str,
        kind: InteractionKind,
    ) -> Result<()> {
        let event = InteractionEvent::now(user_id, school_name, kind);
        self.policy
            .execute(|| {
                let gateway = Arc::clone(&self.gateway);
                let event = event.clone();
                async move { gateway.report_interaction(&event).await }
            })
            .await
    }

    /// Reports on a detached task without blocking the caller.
    ///
    /// Terminal failure is logged and swallowed; interaction analytics are
    /// non-critical and must never fail the UI action that triggered them.
    /// The returned handle may be ignored.
    pub fn record_detached(
        self: &Arc<Self>,
        user_id: String,
        school_name: String,
        kind: InteractionKind,
    ) -> tokio::task::JoinHandle<()> {
        let reporter = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = reporter.record(&user_id, &school_name, kind).await {
                tracing::warn!(
                    "Dropping {} interaction for '{}': {}",
                    kind,
                    school_name,
                    e
                );
            }
        })
    }
}
