//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// What happened to a set of goals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalChangeKind {
    Created,
    Deleted,
}

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. Subscribers
/// treat every event as "invalidate and refetch", so duplicate or
/// out-of-order delivery is harmless.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Goals were created or deleted.
    GoalsChanged {
        user_id: UserId,
        goal_ids: Vec<String>,
        change: GoalChangeKind,
    },

    /// A contribution was appended; the goal's totals changed with it.
    ContributionAdded {
        user_id: UserId,
        goal_id: String,
        contribution_id: String,
    },

    /// The user's profile was edited.
    ProfileChanged { user_id: UserId },
}

impl DomainEvent {
    /// Creates a GoalsChanged event.
    pub fn goals_changed(user_id: UserId, goal_ids: Vec<String>, change: GoalChangeKind) -> Self {
        Self::GoalsChanged {
            user_id,
            goal_ids,
            change,
        }
    }

    /// Creates a ContributionAdded event.
    pub fn contribution_added(user_id: UserId, goal_id: String, contribution_id: String) -> Self {
        Self::ContributionAdded {
            user_id,
            goal_id,
            contribution_id,
        }
    }

    /// Creates a ProfileChanged event.
    pub fn profile_changed(user_id: UserId) -> Self {
        Self::ProfileChanged { user_id }
    }

    pub fn user_id(&self) -> &UserId {
        match self {
            DomainEvent::GoalsChanged { user_id, .. }
            | DomainEvent::ContributionAdded { user_id, .. }
            | DomainEvent::ProfileChanged { user_id } => user_id,
        }
    }

    /// Stable event name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::GoalsChanged { .. } => "goals:changed",
            DomainEvent::ContributionAdded { .. } => "contributions:added",
            DomainEvent::ProfileChanged { .. } => "profile:changed",
        }
    }

    /// Whether the event changes anything shown on the goals dashboard.
    pub fn affects_goals(&self) -> bool {
        matches!(
            self,
            DomainEvent::GoalsChanged { .. } | DomainEvent::ContributionAdded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_event_serialization() {
        let event = DomainEvent::goals_changed(
            UserId::parse("u1").unwrap(),
            vec!["g1".to_string()],
            GoalChangeKind::Deleted,
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("goals_changed"));
        assert!(json.contains("\"deleted\""));

        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn profile_events_do_not_affect_goals() {
        let user = UserId::parse("u1").unwrap();
        assert!(!DomainEvent::profile_changed(user.clone()).affects_goals());
        assert!(
            DomainEvent::contribution_added(user, "g1".into(), "c1".into()).affects_goals()
        );
    }
}
