//! Chooses what the list shows. Everything here is a pure function of the
//! list's configuration and the caller's props.

use super::{
  config::{ListConfig, RowConfig, RowKind},
  props::ListProps,
  report_row::ReportRowFields,
  state::{ListState, Status},
};
use crate::{
  datum::{AlertStatus, Datum, fmt_date_time, fmt_values},
  location::{Location, with_back},
};

/// Placeholder rows shown while loading.
pub const SKELETON_ROWS: usize = 5;
pub const ROW_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
  Loading,
  Add(AddView),
  NotFound { name: String },
  Rows(Vec<RowView>),
  End { name: String },
  Error,
  Unknown(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddView {
  pub prefix: String,
  pub href: String,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
  pub href: String,
  pub label: RowLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLabel {
  Alert(String),
  Muted(String),
  Report(ReportRowFields),
  Text(String),
}

pub fn select_view(config: &ListConfig, props: &ListProps) -> ListView {
  let state = match props.status {
    Status::Known(state) => state,
    Status::Unknown(code) => return ListView::Unknown(code),
  };
  match state {
    ListState::Loading => ListView::Loading,
    ListState::Empty => match &config.add {
      Some(add) if !props.filters.is_active() => ListView::Add(AddView {
        prefix: add.prefix.clone(),
        href: with_back(&(add.path)(props.location.pathname()), &props.location),
        text: add.text.clone(),
      }),
      _ => ListView::NotFound { name: config.name.clone() },
    },
    ListState::Ok => ListView::Rows(
      props.rows.iter().flatten().map(|datum| row_view(&config.row, datum, &props.location)).collect(),
    ),
    ListState::End => ListView::End { name: config.name.clone() },
    ListState::Error => ListView::Error,
  }
}

fn row_view(row: &RowConfig, datum: &Datum, location: &Location) -> RowView {
  RowView { href: row_href(row, datum, location), label: row_label(row, datum) }
}

pub fn row_href(row: &RowConfig, datum: &Datum, location: &Location) -> String {
  with_back(&(row.button.path)(location.pathname(), datum), location)
}

/// First match wins: alert status is checked before the row kind.
pub fn row_label(row: &RowConfig, datum: &Datum) -> RowLabel {
  match datum.alert_status() {
    Some(AlertStatus::Active) => RowLabel::Alert(row_text(row, datum)),
    Some(AlertStatus::Dismissed | AlertStatus::Silenced) => RowLabel::Muted(row_text(row, datum)),
    None if row.kind == RowKind::Report => RowLabel::Report(ReportRowFields::from_datum(datum)),
    None => RowLabel::Text(row_text(row, datum)),
  }
}

pub fn row_text(row: &RowConfig, datum: &Datum) -> String {
  match (row.kind, row.keys.as_slice()) {
    (RowKind::DateTime, [key]) => fmt_date_time(&datum.text(key).unwrap_or_default()),
    _ => fmt_values(datum, &row.keys, ROW_SEPARATOR),
  }
}
