//! Confirmation gate for activity changes.
//!
//! A classified activity that differs from the committed one does not take
//! effect immediately: a confirmation session opens and the change is held
//! until the wearer confirms, rejects, or the session times out. At most
//! one session exists at any time; proposals made while one is open are
//! dropped.

use crate::core::classifier::Activity;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Display text shown before any activity has been committed, and again
/// after a rejected proposal.
pub const PLACEHOLDER_ACTIVITY: &str = "CURRENT ACTIVITY";
/// Category text paired with [`PLACEHOLDER_ACTIVITY`].
pub const PLACEHOLDER_CATEGORY: &str = "Category";

/// A pending, unconfirmed activity change.
///
/// Exists only between the proposal and its confirm/reject/timeout.
#[derive(Debug, Clone)]
pub struct ConfirmationSession {
    /// Session identifier, for log correlation.
    pub id: Uuid,
    /// The activity awaiting confirmation; its category is derived, never
    /// stored separately.
    pub candidate: Activity,
    /// When the session opened.
    pub opened_at: DateTime<Utc>,
    /// Instant after which the session expires unanswered.
    pub deadline: DateTime<Utc>,
}

/// Owns the committed activity/category pair and the at-most-one open
/// confirmation session.
#[derive(Debug, Clone)]
pub struct ConfirmationGate {
    activity: String,
    category: String,
    session: Option<ConfirmationSession>,
    timeout: Duration,
}

impl ConfirmationGate {
    /// Create a gate seeded with a committed activity/category pair.
    pub fn new(
        activity: impl Into<String>,
        category: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            activity: activity.into(),
            category: category.into(),
            session: None,
            timeout,
        }
    }

    /// The committed activity text.
    pub fn activity(&self) -> &str {
        &self.activity
    }

    /// The committed category text.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The open session, if a change is awaiting confirmation.
    pub fn session(&self) -> Option<&ConfirmationSession> {
        self.session.as_ref()
    }

    /// Whether a change is awaiting confirmation.
    pub fn is_pending(&self) -> bool {
        self.session.is_some()
    }

    /// Feed a classified activity into the gate.
    ///
    /// Opens a session if the candidate differs from the committed activity
    /// and no session is already open. Returns `true` when a session opened.
    pub fn propose(&mut self, candidate: Activity, now: DateTime<Utc>) -> bool {
        if let Some(ref open) = self.session {
            tracing::debug!(
                session = %open.id,
                candidate = candidate.label(),
                "proposal dropped: confirmation already pending"
            );
            return false;
        }
        if candidate.label() == self.activity {
            return false;
        }

        let session = ConfirmationSession {
            id: Uuid::new_v4(),
            candidate,
            opened_at: now,
            deadline: now + self.timeout,
        };
        tracing::info!(
            session = %session.id,
            candidate = candidate.label(),
            category = candidate.category().as_str(),
            "activity change proposed"
        );
        self.session = Some(session);
        true
    }

    /// Confirm the pending change, committing the candidate pair.
    ///
    /// Returns the newly committed `(activity, category)` pair, or `None`
    /// if no session is open (stray confirm events are no-ops).
    pub fn confirm(&mut self) -> Option<(String, String)> {
        let session = self.session.take()?;
        self.activity = session.candidate.label().to_string();
        self.category = session.candidate.category().as_str().to_string();
        tracing::info!(
            session = %session.id,
            activity = %self.activity,
            "activity change confirmed"
        );
        Some((self.activity.clone(), self.category.clone()))
    }

    /// Reject the pending change.
    ///
    /// The display pair reverts to the placeholder; the persisted record is
    /// the caller's concern and keeps its previously committed value.
    /// Returns `true` if a session was closed.
    pub fn reject(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::info!(session = %session.id, "activity change rejected");
                self.activity = PLACEHOLDER_ACTIVITY.to_string();
                self.category = PLACEHOLDER_CATEGORY.to_string();
                true
            }
            None => false,
        }
    }

    /// Close the session if its deadline has passed.
    ///
    /// A timeout is an implicit reject that leaves the committed pair
    /// unchanged. Returns `true` if the session expired on this call.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let expired = self
            .session
            .as_ref()
            .is_some_and(|s| now >= s.deadline);
        if expired {
            if let Some(session) = self.session.take() {
                tracing::info!(
                    session = %session.id,
                    candidate = session.candidate.label(),
                    "confirmation timed out, keeping committed activity"
                );
            }
        }
        expired
    }
}
