use ratatui::{
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::ListItem,
};

use super::{
  config::Icons,
  view::{RowLabel, RowView},
};

#[derive(Debug, Clone)]
pub struct RowItem<'a> {
  pub row: &'a RowView,
  pub icons: &'a Icons,
}

impl<'a> RowItem<'a> {
  pub fn new(row: &'a RowView, icons: &'a Icons) -> Self {
    RowItem { row, icons }
  }

  pub fn render(&self) -> ListItem<'static> {
    let line = match &self.row.label {
      RowLabel::Alert(text) => Line::from(vec![
        Span::styled(format!("{} ", self.icons.bell), Style::default().fg(Color::LightYellow)),
        Span::raw(text.clone()),
      ]),
      RowLabel::Muted(text) => Line::from(vec![
        Span::styled(format!("{} ", self.icons.bell_slash), Style::default().add_modifier(Modifier::DIM)),
        Span::raw(text.clone()),
      ]),
      RowLabel::Report(fields) => fields.render(self.icons),
      RowLabel::Text(text) => Line::from(text.clone()),
    };
    ListItem::new(line)
  }
}
