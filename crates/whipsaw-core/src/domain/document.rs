//! The shape shared by every stored content kind.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// A content document kept in a [`ContentStore`](crate::ports::ContentStore).
///
/// Implementors own their id and creation timestamp: both are produced by
/// [`Document::create`] and no patch can touch them.
pub trait Document: Clone + Send + Sync + 'static {
    /// Payload accepted by the create operation.
    type Draft: Validate + Send + Sync + 'static;
    /// Payload accepted by the update operation. Absent fields stay unchanged.
    type Patch: Validate + Send + Sync + 'static;

    /// Human-readable kind, used in not-found messages and logs.
    const KIND: &'static str;

    /// Build a new document with a fresh id and creation timestamp.
    fn create(draft: Self::Draft) -> Self;

    /// Apply the fields present in `patch`.
    fn apply(&mut self, patch: Self::Patch);

    fn id(&self) -> Uuid;

    /// Sort key for listings (newest first).
    fn created_at(&self) -> DateTime<Utc>;
}

/// Required-field checks performed by the content service before any write.
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}

/// Current time at the precision every store can round-trip (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A timestamp strictly later than `previous`.
pub fn advance_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = timestamp_now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Collects field problems and turns them into a single validation error.
#[derive(Debug, Default)]
pub(crate) struct Problems(Vec<String>);

impl Problems {
    /// Record `field` as missing when `value` is blank.
    pub(crate) fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.0.push(format!("{field} is required"));
        }
    }

    /// Record `field` as invalid when it is present but blank.
    pub(crate) fn reject_blank(&mut self, field: &str, value: Option<&String>) {
        if value.is_some_and(|v| v.trim().is_empty()) {
            self.0.push(format!("{field} must not be empty"));
        }
    }

    pub(crate) fn push(&mut self, problem: impl Into<String>) {
        self.0.push(problem.into());
    }

    pub(crate) fn finish(self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.0))
        }
    }
}

/// Optional URL-ish text: blank means "none".
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
