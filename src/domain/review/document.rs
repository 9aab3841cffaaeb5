//! Document review-state aggregate.
//!
//! Only the review bookkeeping of a document lives here; content, storage,
//! and categorization are other modules' concerns. The review fields are
//! mutated only through the completion transition and cycle reset paths,
//! never directly by API consumers.

use serde::{Deserialize, Serialize};

use super::schedule::ReviewSchedule;
use crate::domain::foundation::{DocumentId, DomainError, Timestamp, UserId};

/// How often a document re-enters review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewInterval {
    Monthly,
    Quarterly,
    Semiannually,
    Annually,
    Custom,
}

impl ReviewInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewInterval::Monthly => "monthly",
            ReviewInterval::Quarterly => "quarterly",
            ReviewInterval::Semiannually => "semiannually",
            ReviewInterval::Annually => "annually",
            ReviewInterval::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(ReviewInterval::Monthly),
            "quarterly" => Some(ReviewInterval::Quarterly),
            "semiannually" => Some(ReviewInterval::Semiannually),
            "annually" => Some(ReviewInterval::Annually),
            "custom" => Some(ReviewInterval::Custom),
            _ => None,
        }
    }
}

/// Length of the review window once a cycle opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewPeriod {
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "2weeks")]
    TwoWeeks,
    #[serde(rename = "3weeks")]
    ThreeWeeks,
    #[serde(rename = "1month")]
    OneMonth,
}

impl ReviewPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewPeriod::OneWeek => "1week",
            ReviewPeriod::TwoWeeks => "2weeks",
            ReviewPeriod::ThreeWeeks => "3weeks",
            ReviewPeriod::OneMonth => "1month",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1week" => Some(ReviewPeriod::OneWeek),
            "2weeks" => Some(ReviewPeriod::TwoWeeks),
            "3weeks" => Some(ReviewPeriod::ThreeWeeks),
            "1month" => Some(ReviewPeriod::OneMonth),
            _ => None,
        }
    }
}

/// Document aggregate, restricted to review bookkeeping.
///
/// # Invariants
///
/// - `review_assignees` is the authoritative reviewer list for the current
///   cycle; assignments referencing anyone else are orphaned.
/// - `review_completed` is true only when every authoritative assignee's
///   latest assignment is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    author: UserId,
    title: String,
    review_assignees: Vec<UserId>,
    review_completed: bool,
    review_completed_at: Option<Timestamp>,
    last_reviewed_on: Option<Timestamp>,
    next_review_due_on: Option<Timestamp>,
    opens_for_review: Option<Timestamp>,
    review_due_date: Option<Timestamp>,
    review_interval: ReviewInterval,
    review_interval_days: Option<u32>,
    review_period: Option<ReviewPeriod>,
    updated_at: Timestamp,
}

impl Document {
    /// Creates a document entering its first review configuration.
    pub fn new(
        id: DocumentId,
        author: UserId,
        title: String,
        review_assignees: Vec<UserId>,
        review_interval: ReviewInterval,
        review_interval_days: Option<u32>,
        review_period: Option<ReviewPeriod>,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }

        Ok(Self {
            id,
            author,
            title,
            review_assignees,
            review_completed: false,
            review_completed_at: None,
            last_reviewed_on: None,
            next_review_due_on: None,
            opens_for_review: None,
            review_due_date: None,
            review_interval,
            review_interval_days,
            review_period,
            updated_at: Timestamp::now(),
        })
    }

    /// Reconstitute a document from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DocumentId,
        author: UserId,
        title: String,
        review_assignees: Vec<UserId>,
        review_completed: bool,
        review_completed_at: Option<Timestamp>,
        last_reviewed_on: Option<Timestamp>,
        next_review_due_on: Option<Timestamp>,
        opens_for_review: Option<Timestamp>,
        review_due_date: Option<Timestamp>,
        review_interval: ReviewInterval,
        review_interval_days: Option<u32>,
        review_period: Option<ReviewPeriod>,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            author,
            title,
            review_assignees,
            review_completed,
            review_completed_at,
            last_reviewed_on,
            next_review_due_on,
            opens_for_review,
            review_due_date,
            review_interval,
            review_interval_days,
            review_period,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn author(&self) -> &UserId {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Authoritative reviewer list for the current cycle.
    pub fn review_assignees(&self) -> &[UserId] {
        &self.review_assignees
    }

    pub fn review_completed(&self) -> bool {
        self.review_completed
    }

    pub fn review_completed_at(&self) -> Option<&Timestamp> {
        self.review_completed_at.as_ref()
    }

    pub fn last_reviewed_on(&self) -> Option<&Timestamp> {
        self.last_reviewed_on.as_ref()
    }

    pub fn next_review_due_on(&self) -> Option<&Timestamp> {
        self.next_review_due_on.as_ref()
    }

    pub fn opens_for_review(&self) -> Option<&Timestamp> {
        self.opens_for_review.as_ref()
    }

    pub fn review_due_date(&self) -> Option<&Timestamp> {
        self.review_due_date.as_ref()
    }

    pub fn review_interval(&self) -> ReviewInterval {
        self.review_interval
    }

    pub fn review_interval_days(&self) -> Option<u32> {
        self.review_interval_days
    }

    pub fn review_period(&self) -> Option<ReviewPeriod> {
        self.review_period
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Checks membership in the current authoritative reviewer list.
    pub fn is_current_reviewer(&self, user: &UserId) -> bool {
        self.review_assignees.contains(user)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Completion transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Marks the current cycle complete and installs the next schedule.
    ///
    /// The schedule may carry null dates (unconfigured custom interval);
    /// the document then has no next-cycle dates until an administrator
    /// supplies configuration.
    pub fn complete_cycle(&mut self, schedule: &ReviewSchedule, now: Timestamp) {
        self.review_completed = true;
        self.review_completed_at = Some(now);
        self.last_reviewed_on = Some(now);
        self.review_due_date = None;
        self.opens_for_review = schedule.opens_for_review;
        self.next_review_due_on = schedule.next_due;
        self.updated_at = now;
    }

    /// Reopen guard: a previously completed cycle no longer evaluates as
    /// complete (new assignee added, or a completed assignment reverted).
    pub fn reopen_cycle(&mut self, now: Timestamp) {
        self.review_completed = false;
        self.review_completed_at = None;
        self.updated_at = now;
    }

    /// Clears completion state for a manually restarted cycle.
    pub fn reset_cycle(&mut self, now: Timestamp) {
        self.review_completed = false;
        self.review_completed_at = None;
        self.updated_at = now;
    }
}
