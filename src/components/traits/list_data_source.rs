use async_trait::async_trait;

use crate::{components::list_view::ListFilters, datum::Datum, error::Error};

/// One page request for a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
  pub resource: String,
  /// 1-based.
  pub page: u32,
  pub per_page: u32,
  pub filters: ListFilters,
  /// Field the date range filters apply to, if the resource has one.
  pub date_key: Option<String>,
}

impl PageQuery {
  /// Index of the first row on this page.
  pub fn offset(&self) -> usize {
    self.page.saturating_sub(1) as usize * self.per_page as usize
  }
}

/// Fetches the rows shown by the list. Owned by the caller of the list, the
/// list itself never fetches.
#[async_trait]
pub trait ListDataSource: Send + Sync + 'static {
  async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Datum>, Error>;
}
