use ratatui::{
  layout::Rect,
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

#[derive(Debug, Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  /// Renders the footer with the provided instructions.
  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, instructions: &[&str]) {
    if instructions.is_empty() {
      return;
    }

    let text = instructions.join(" | ");
    let paragraph =
      Paragraph::new(text).block(Block::default().borders(Borders::ALL)).style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}
