use std::{fmt, sync::Arc};

use strum::{Display, EnumString};

use crate::datum::Datum;

/// Builds the path of the "add" page from the current pathname.
pub type AddPathFn = Arc<dyn Fn(&str) -> String + Send + Sync>;
/// Builds a row's destination from the current pathname and the row.
pub type RowPathFn = Arc<dyn Fn(&str, &Datum) -> String + Send + Sync>;
/// Side effect run when a row is activated.
pub type RowEffectFn = Arc<dyn Fn(&Datum) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icons {
  pub bell: &'static str,
  pub bell_slash: &'static str,
  pub branch: &'static str,
  pub testbed: &'static str,
  pub date: &'static str,
  pub add: &'static str,
  pub skeleton: &'static str,
}

pub const DEFAULT_ICONS: Icons = Icons {
  bell: "🔔",
  bell_slash: "🔕",
  branch: "⎇",
  testbed: "🖥",
  date: "🕒",
  add: "✚",
  skeleton: "░",
};

impl Default for Icons {
  fn default() -> Self {
    DEFAULT_ICONS
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RowKind {
  #[default]
  Text,
  DateTime,
  Report,
}

#[derive(Clone)]
pub struct RowButtonConfig {
  pub path: RowPathFn,
  pub effect: Option<RowEffectFn>,
}

impl RowButtonConfig {
  pub fn new(path: impl Fn(&str, &Datum) -> String + Send + Sync + 'static) -> Self {
    RowButtonConfig { path: Arc::new(path), effect: None }
  }

  pub fn with_effect(mut self, effect: impl Fn(&Datum) + Send + Sync + 'static) -> Self {
    self.effect = Some(Arc::new(effect));
    self
  }
}

impl fmt::Debug for RowButtonConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RowButtonConfig").field("effect", &self.effect.is_some()).finish_non_exhaustive()
  }
}

#[derive(Debug, Clone)]
pub struct RowConfig {
  pub kind: RowKind,
  /// Dotted paths of the fields shown for each row.
  pub keys: Vec<String>,
  pub button: RowButtonConfig,
}

impl RowConfig {
  pub fn new<K: Into<String>>(kind: RowKind, keys: impl IntoIterator<Item = K>, button: RowButtonConfig) -> Self {
    RowConfig { kind, keys: keys.into_iter().map(Into::into).collect(), button }
  }
}

#[derive(Clone)]
pub struct AddButtonConfig {
  pub prefix: String,
  pub path: AddPathFn,
  pub text: String,
}

impl AddButtonConfig {
  pub fn new(
    prefix: impl Into<String>,
    text: impl Into<String>,
    path: impl Fn(&str) -> String + Send + Sync + 'static,
  ) -> Self {
    AddButtonConfig { prefix: prefix.into(), path: Arc::new(path), text: text.into() }
  }
}

impl fmt::Debug for AddButtonConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AddButtonConfig").field("prefix", &self.prefix).field("text", &self.text).finish_non_exhaustive()
  }
}

/// Describes how one resource is listed. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct ListConfig {
  /// Key the data source uses to find this resource's rows.
  pub resource: String,
  pub name: String,
  pub add: Option<AddButtonConfig>,
  pub row: RowConfig,
  /// Timestamp field that date range filters apply to.
  pub date_key: Option<String>,
  pub icons: Icons,
}

impl ListConfig {
  pub fn new(resource: impl Into<String>, name: impl Into<String>, row: RowConfig) -> Self {
    ListConfig { resource: resource.into(), name: name.into(), add: None, row, date_key: None, icons: DEFAULT_ICONS }
  }

  pub fn with_add(mut self, add: AddButtonConfig) -> Self {
    self.add = Some(add);
    self
  }

  pub fn with_date_key(mut self, key: impl Into<String>) -> Self {
    self.date_key = Some(key.into());
    self
  }

  pub fn with_icons(mut self, icons: Icons) -> Self {
    self.icons = icons;
    self
  }
}
