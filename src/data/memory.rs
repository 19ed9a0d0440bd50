use async_trait::async_trait;

use super::apply_query;
use crate::{
  components::traits::{ListDataSource, PageQuery},
  datum::Datum,
  error::Error,
};

/// Serves a fixed set of rows regardless of the requested resource.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
  rows: Vec<Datum>,
}

impl MemorySource {
  pub fn new(rows: Vec<Datum>) -> Self {
    MemorySource { rows }
  }
}

#[async_trait]
impl ListDataSource for MemorySource {
  async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Datum>, Error> {
    Ok(apply_query(self.rows.iter().cloned(), query))
  }
}
