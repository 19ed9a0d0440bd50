//! Sources of list rows. Filtering and pagination are shared so every source
//! pages the same way.

use chrono::NaiveDate;

use crate::{components::traits::PageQuery, datum::Datum};

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSource;
pub use memory::MemorySource;

/// Filters `rows` by the query's search and date range, then cuts out the
/// requested page.
pub fn apply_query(rows: impl IntoIterator<Item = Datum>, query: &PageQuery) -> Vec<Datum> {
  rows
    .into_iter()
    .filter(|datum| matches_filters(datum, query))
    .skip(query.offset())
    .take(query.per_page as usize)
    .collect()
}

fn matches_filters(datum: &Datum, query: &PageQuery) -> bool {
  if let Some(search) = query.filters.search() {
    if !datum.matches(search) {
      return false;
    }
  }
  let (start, end) = (query.filters.start_date, query.filters.end_date);
  if start.is_none() && end.is_none() {
    return true;
  }
  match query.date_key.as_deref().and_then(|key| datum.date(key)) {
    Some(date) => in_range(date, start, end),
    // Rows without a date can't be placed in a range.
    None => query.date_key.is_none(),
  }
}

fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
  start.is_none_or(|start| date >= start) && end.is_none_or(|end| date <= end)
}
