//! Query parameter parsing shared by the read services

use insight_core::value_objects::{ActorId, Period};
use insight_core::DomainError;

use crate::dto::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Parse an optional period, defaulting to a week
pub(crate) fn parse_period(raw: Option<&str>) -> Result<Period, DomainError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse(),
        None => Ok(Period::default()),
    }
}

/// Parse an optional actor id; blank means absent
pub(crate) fn parse_actor(raw: Option<&str>) -> Result<Option<ActorId>, DomainError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ActorId::parse(s).map_err(DomainError::from))
        .transpose()
}

/// Clamp a page size into `1..=MAX_PAGE_LIMIT`
pub(crate) fn page_limit(raw: Option<i64>) -> i64 {
    raw.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

/// Offsets below zero read as zero
pub(crate) fn page_offset(raw: Option<i64>) -> i64 {
    raw.unwrap_or(0).max(0)
}
