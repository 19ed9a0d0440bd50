//! The browsable resources of a project and how each one is listed.

use std::sync::Arc;

use clap::ValueEnum;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{
  components::list_view::{AddButtonConfig, ListConfig, RowButtonConfig, RowConfig, RowKind},
  datum::Datum,
  location::Location,
};

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, ValueEnum, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Resource {
  #[default]
  Reports,
  Alerts,
  Branches,
  Testbeds,
  Benchmarks,
}

lazy_static! {
  static ref REPORTS: Arc<ListConfig> = Arc::new(
    ListConfig::new(
      Resource::Reports.to_string(),
      "Reports",
      RowConfig::new(RowKind::Report, ["start_time"], RowButtonConfig::new(row_path)),
    )
    .with_date_key("start_time"),
  );
  static ref ALERTS: Arc<ListConfig> = Arc::new(
    ListConfig::new(
      Resource::Alerts.to_string(),
      "Alerts",
      RowConfig::new(
        RowKind::Text,
        ["benchmark.name", "metric.value"],
        RowButtonConfig::new(row_path).with_effect(log_opened_alert),
      ),
    )
    .with_date_key("created"),
  );
  static ref BRANCHES: Arc<ListConfig> = Arc::new(named(Resource::Branches, "Branches", "Branch"));
  static ref TESTBEDS: Arc<ListConfig> = Arc::new(named(Resource::Testbeds, "Testbeds", "Testbed"));
  static ref BENCHMARKS: Arc<ListConfig> = Arc::new(named(Resource::Benchmarks, "Benchmarks", "Benchmark"));
}

impl Resource {
  pub fn list_config(self) -> Arc<ListConfig> {
    match self {
      Resource::Reports => REPORTS.clone(),
      Resource::Alerts => ALERTS.clone(),
      Resource::Branches => BRANCHES.clone(),
      Resource::Testbeds => TESTBEDS.clone(),
      Resource::Benchmarks => BENCHMARKS.clone(),
    }
  }

  /// Where this resource's list lives within `project`.
  pub fn location(self, project: &str) -> Location {
    Location::new(format!("/console/projects/{project}/{self}"))
  }

  /// The resource listed at `location`, if it is a list location.
  pub fn from_location(location: &Location) -> Option<Resource> {
    let last = location.pathname().rsplit('/').next()?;
    Resource::iter().find(|resource| resource.to_string() == last)
  }
}

/// Resources identified by name, each with an add page.
fn named(resource: Resource, name: &str, singular: &str) -> ListConfig {
  ListConfig::new(resource.to_string(), name, RowConfig::new(RowKind::Text, ["name"], RowButtonConfig::new(row_path)))
    .with_add(AddButtonConfig::new(
      format!("No {} yet.", name.to_lowercase()),
      format!("Add a {singular}"),
      |pathname| format!("{pathname}/add"),
    ))
    .with_date_key("created")
}

fn row_path(pathname: &str, datum: &Datum) -> String {
  match datum.text("uuid").or_else(|| datum.text("slug")) {
    Some(id) => format!("{pathname}/{id}"),
    None => pathname.to_string(),
  }
}

fn log_opened_alert(datum: &Datum) {
  tracing::info!(
    "opened alert {} ({})",
    datum.text("uuid").unwrap_or_default(),
    datum.alert_status().map(|s| s.to_string()).unwrap_or_default()
  );
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  fn datum(value: serde_json::Value) -> Datum {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn test_row_path_prefers_uuid() {
    let config = Resource::Branches.list_config();
    let path = &config.row.button.path;

    assert_eq!(path("/p/branches", &datum(json!({ "uuid": "b-1", "slug": "main" }))), "/p/branches/b-1");
    assert_eq!(path("/p/branches", &datum(json!({ "slug": "main" }))), "/p/branches/main");
    assert_eq!(path("/p/branches", &datum(json!({}))), "/p/branches");
  }

  #[test]
  fn test_add_buttons() {
    assert!(Resource::Reports.list_config().add.is_none());
    assert!(Resource::Alerts.list_config().add.is_none());

    let config = Resource::Testbeds.list_config();
    let add = config.add.as_ref().unwrap();
    assert_eq!(add.text, "Add a Testbed");
    assert_eq!((add.path)("/console/projects/demo/testbeds"), "/console/projects/demo/testbeds/add");
  }

  #[test]
  fn test_row_configs() {
    let reports = Resource::Reports.list_config();
    assert_eq!(reports.row.kind, RowKind::Report);
    assert_eq!(reports.date_key.as_deref(), Some("start_time"));

    let alerts = Resource::Alerts.list_config();
    assert_eq!(alerts.row.keys, ["benchmark.name", "metric.value"]);
    assert!(alerts.row.button.effect.is_some());

    assert_eq!(Resource::Benchmarks.list_config().row.keys, ["name"]);
  }

  #[test]
  fn test_location_round_trip() {
    for resource in Resource::iter() {
      let location = resource.location("demo");

      assert_eq!(Resource::from_location(&location), Some(resource));
    }
    assert_eq!(Resource::from_location(&Location::parse("/console/projects/demo/branches/b-1")), None);
  }

  #[test]
  fn test_configs_are_shared() {
    assert!(Arc::ptr_eq(&Resource::Alerts.list_config(), &Resource::Alerts.list_config()));
  }
}
