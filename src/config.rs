use std::path::PathBuf;

use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::{
  error::Error,
  utils::{PROJECT_NAME, get_config_dir},
};

const DEFAULT_CONFIG: &str = include_str!("../.config/config.json5");
const CONFIG_FILES: [(&str, FileFormat); 5] = [
  ("config.json5", FileFormat::Json5),
  ("config.json", FileFormat::Json),
  ("config.yaml", FileFormat::Yaml),
  ("config.toml", FileFormat::Toml),
  ("config.ini", FileFormat::Ini),
];

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppConfig {
  pub per_page: u32,
  pub project: String,
  pub data_path: PathBuf,
  pub tick_rate: f64,
  pub frame_rate: f64,
}

impl AppConfig {
  /// Layers the built in defaults, then any config file in the config
  /// directory, then `BENCH_CONSOLE_*` environment variables.
  pub fn new() -> Result<Self, Error> {
    let config_dir = get_config_dir();
    let mut builder = config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Json5));
    for (file, format) in CONFIG_FILES {
      let path = config_dir.join(file);
      if path.exists() {
        debug!("loading config from {}", path.display());
      }
      builder = builder.add_source(File::from(path).format(format).required(false));
    }
    let config = builder.add_source(Environment::with_prefix(&PROJECT_NAME)).build()?;
    config.try_deserialize::<Self>()?.validate()
  }

  /// Rejects values the rest of the app can't page with.
  fn validate(self) -> Result<Self, Error> {
    if self.per_page == 0 {
      return Err(ConfigError::Message("per_page must be at least 1".to_string()).into());
    }
    Ok(self)
  }

  #[cfg(test)]
  fn from_json5(json5: &str) -> Result<Self, Error> {
    let config = config::Config::builder()
      .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Json5))
      .add_source(File::from_str(json5, FileFormat::Json5))
      .build()?;
    config.try_deserialize::<Self>()?.validate()
  }
}

impl Default for AppConfig {
  fn default() -> Self {
    AppConfig {
      per_page: 8,
      project: "demo".to_string(),
      data_path: PathBuf::from("demos/data"),
      tick_rate: 4.0,
      frame_rate: 30.0,
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_embedded_defaults_match_default() {
    assert_eq!(AppConfig::from_json5("{}").unwrap(), AppConfig::default());
  }

  #[test]
  fn test_default_file_is_json5() {
    let config: AppConfig = json5::from_str(DEFAULT_CONFIG).unwrap();

    assert_eq!(config, AppConfig::default());
  }

  #[test]
  fn test_user_values_override_defaults() {
    let config = AppConfig::from_json5(r#"{ per_page: 25, project: "bencher" }"#).unwrap();

    assert_eq!(config.per_page, 25);
    assert_eq!(config.project, "bencher");
    assert_eq!(config.frame_rate, 30.0);
  }

  #[test]
  fn test_bad_value_is_a_config_error() {
    let err = AppConfig::from_json5(r#"{ per_page: "many" }"#).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
  }

  #[test]
  fn test_zero_per_page_is_a_config_error() {
    let err = AppConfig::from_json5("{ per_page: 0 }").unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("per_page"));
  }
}
