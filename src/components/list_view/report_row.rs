use ratatui::{
  style::{Modifier, Style},
  text::{Line, Span},
};

use super::config::Icons;
use crate::datum::{Datum, fmt_date_time};

/// The fields a report row shows instead of its configured keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRowFields {
  pub branch: Option<String>,
  pub testbed: Option<String>,
  pub start_time: Option<String>,
}

impl ReportRowFields {
  pub fn from_datum(datum: &Datum) -> Self {
    ReportRowFields {
      branch: datum.text("branch.name"),
      testbed: datum.text("testbed.name"),
      start_time: datum.text("start_time").map(|t| fmt_date_time(&t)),
    }
  }

  pub fn render(&self, icons: &Icons) -> Line<'static> {
    let fields = [(icons.branch, &self.branch), (icons.testbed, &self.testbed), (icons.date, &self.start_time)];
    let mut spans = Vec::new();
    for (icon, value) in fields {
      let Some(value) = value else { continue };
      if !spans.is_empty() {
        spans.push(Span::raw("  "));
      }
      spans.push(Span::styled(format!("{icon} "), Style::default().add_modifier(Modifier::DIM)));
      spans.push(Span::raw(value.clone()));
    }
    Line::from(spans)
  }
}
