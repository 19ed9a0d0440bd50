use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error(transparent)]
  Config(#[from] config::ConfigError),
  #[error("no data found for {0}")]
  MissingResource(String),
  #[error("invalid date {0}, expected YYYY-MM-DD")]
  Date(String),
}
