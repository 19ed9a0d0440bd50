use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::apply_query;
use crate::{
  components::traits::{ListDataSource, PageQuery},
  datum::Datum,
  error::Error,
};

/// Reads `<dir>/<resource>.json`, a JSON array of objects, on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
  dir: PathBuf,
}

impl JsonFileSource {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    JsonFileSource { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn resource_path(&self, resource: &str) -> PathBuf {
    self.dir.join(format!("{resource}.json"))
  }
}

#[async_trait]
impl ListDataSource for JsonFileSource {
  async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Datum>, Error> {
    let path = self.resource_path(&query.resource);
    debug!("reading {} page {} from {}", query.resource, query.page, path.display());
    let contents = match tokio::fs::read_to_string(&path).await {
      Ok(contents) => contents,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(Error::MissingResource(query.resource.clone()));
      },
      Err(e) => return Err(e.into()),
    };
    let rows: Vec<Datum> = serde_json::from_str(&contents)?;
    Ok(apply_query(rows, query))
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::components::list_view::ListFilters;

  fn demo_source() -> JsonFileSource {
    JsonFileSource::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join("data"))
  }

  fn query(resource: &str, page: u32, per_page: u32) -> PageQuery {
    PageQuery {
      resource: resource.to_string(),
      page,
      per_page,
      filters: ListFilters::default(),
      date_key: None,
    }
  }

  #[tokio::test]
  async fn test_reads_demo_branches() {
    let rows = demo_source().fetch_page(&query("branches", 1, 2)).await.unwrap();

    let names: Vec<_> = rows.iter().filter_map(|d| d.text("name")).collect();
    assert_eq!(names, ["main", "develop"]);
  }

  #[tokio::test]
  async fn test_past_the_last_page_is_empty() {
    let rows = demo_source().fetch_page(&query("branches", 50, 8)).await.unwrap();

    assert!(rows.is_empty());
  }

  #[tokio::test]
  async fn test_filters_demo_reports_by_date() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 2);
    let query = PageQuery {
      filters: ListFilters { start_date: day, end_date: day, ..Default::default() },
      date_key: Some("start_time".to_string()),
      ..query("reports", 1, 8)
    };

    let rows = demo_source().fetch_page(&query).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|d| d.date("start_time") == day));
  }

  #[tokio::test]
  async fn test_missing_resource() {
    let err = demo_source().fetch_page(&query("thresholds", 1, 8)).await.unwrap_err();

    assert!(matches!(err, Error::MissingResource(resource) if resource == "thresholds"));
  }

  #[tokio::test]
  async fn test_malformed_json() {
    let dir = std::env::temp_dir().join(format!("bench-console-malformed-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("alerts.json"), "[{").await.unwrap();

    let err = JsonFileSource::new(&dir).fetch_page(&query("alerts", 1, 8)).await.unwrap_err();

    assert!(matches!(err, Error::Json(_)));
    tokio::fs::remove_dir_all(&dir).await.unwrap();
  }
}
