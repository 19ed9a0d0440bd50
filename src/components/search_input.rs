use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::Rect,
  prelude::Color,
  style::Style,
  widgets::{Block, Borders},
};
use tui_textarea::{CursorMove, Input, TextArea};

use crate::{action::Action, tui::Frame};

/// Single line input for the list's search filter.
#[derive(Debug)]
pub struct SearchInput {
  text_input: TextArea<'static>,
}

impl Default for SearchInput {
  fn default() -> Self {
    let mut text_input = TextArea::default();
    text_input.set_style(Style::default().fg(Color::White));
    text_input.set_block(Block::default().borders(Borders::ALL).title("Search"));
    SearchInput { text_input }
  }
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts editing from `current`, the search already applied to the list.
  pub fn reset(&mut self, current: Option<&str>) {
    self.clear();
    if let Some(current) = current {
      self.text_input.insert_str(current);
    }
  }

  pub fn get_text(&self) -> Option<String> {
    let input = String::from(self.text_input.lines().first()?.trim());
    if input.is_empty() {
      return None;
    }
    Some(input)
  }

  fn clear(&mut self) {
    self.text_input.move_cursor(CursorMove::Head);
    self.text_input.delete_line_by_end();
  }

  /// Returns the submitted search on enter, or ends input on escape.
  pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<Action> {
    match key_event {
      KeyEvent { code: KeyCode::Esc, .. } => {
        self.clear();
        Some(Action::EndInputMode)
      },
      KeyEvent { code: KeyCode::Enter, .. } => {
        let text = self.get_text();
        self.clear();
        match text {
          Some(text) => Some(Action::InputSubmitted(text)),
          None => Some(Action::ClearSearch),
        }
      },
      _ => {
        self.text_input.input(Input::from(key_event));
        None
      },
    }
  }

  pub fn render(&mut self, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(&self.text_input, area);
  }
}
