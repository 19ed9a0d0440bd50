use std::sync::Arc;

use chrono::NaiveDate;

use super::state::Status;
use crate::{datum::Datum, location::Location};

/// Called with the page the list wants to show next.
pub type PageHandler = Arc<dyn Fn(u32) + Send + Sync>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub search: Option<String>,
}

impl ListFilters {
  /// The search text, if it is not blank.
  pub fn search(&self) -> Option<&str> {
    self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
  }

  /// Whether the caller asked for any filtering. Any non-empty search counts,
  /// even one that trims to nothing.
  pub fn is_active(&self) -> bool {
    self.start_date.is_some() || self.end_date.is_some() || self.search.as_deref().is_some_and(|s| !s.is_empty())
  }
}

/// Everything the list renders from, owned and refreshed by the caller.
#[derive(Debug, Clone, Default)]
pub struct ListProps {
  pub status: Status,
  /// `None` until the fetch behind the list has resolved.
  pub rows: Option<Vec<Datum>>,
  pub filters: ListFilters,
  pub page: u32,
  pub location: Location,
}
