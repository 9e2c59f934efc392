//! Push-driven dashboard refresh.
//!
//! The orchestrator turns a stream of domain events into a stream of
//! dashboard snapshots for one user. Every relevant event triggers a full
//! refetch, which makes duplicate and out-of-order delivery harmless.

use std::future::ready;
use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use log::{debug, warn};

use super::dashboard_model::DashboardSnapshot;
use super::dashboard_service::DashboardServiceTrait;
use crate::errors::Result;
use crate::events::DomainEvent;
use crate::identity::UserId;
use crate::utils::time_utils::today_utc;

/// Whether `event` should invalidate `user`'s dashboard.
fn invalidates(user: &UserId, event: &DomainEvent) -> bool {
    event.affects_goals() && event.user_id() == user
}

pub struct DashboardOrchestrator {
    dashboard: Arc<dyn DashboardServiceTrait>,
    user: UserId,
}

impl DashboardOrchestrator {
    pub fn new(dashboard: Arc<dyn DashboardServiceTrait>, user: UserId) -> Self {
        Self { dashboard, user }
    }

    pub fn refresh(&self) -> Result<DashboardSnapshot> {
        self.dashboard.snapshot(&self.user, today_utc())
    }

    /// Yields once right away, then once per relevant change.
    ///
    /// Each item means "the dashboard must be refetched"; async hosts pair it
    /// with [`refresh`](Self::refresh) on a blocking thread.
    pub fn invalidations<S>(&self, changes: S) -> impl Stream<Item = ()> + Send + 'static
    where
        S: Stream<Item = DomainEvent> + Send + 'static,
    {
        let user = self.user.clone();
        let triggers = changes
            .filter(move |event| ready(invalidates(&user, event)))
            .map(|event| {
                debug!("Dashboard invalidated by {}", event.name());
            });
        stream::once(ready(())).chain(triggers)
    }

    /// Emits a snapshot immediately, then one per relevant change.
    ///
    /// Refetches run inline on the polling task. A refetch that fails is
    /// logged and skipped; subscribers keep the last snapshot they received.
    pub fn watch<S>(self, changes: S) -> impl Stream<Item = DashboardSnapshot> + Send + 'static
    where
        S: Stream<Item = DomainEvent> + Send + 'static,
    {
        let this = Arc::new(self);
        this.invalidations(changes).filter_map(move |_| {
            let this = Arc::clone(&this);
            async move { this.refresh_or_skip() }
        })
    }

    /// Like [`refresh`](Self::refresh), logging and discarding a failure.
    pub fn refresh_or_skip(&self) -> Option<DashboardSnapshot> {
        match self.refresh() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Dashboard refresh for user {} failed: {}", self.user, e);
                None
            }
        }
    }
}
