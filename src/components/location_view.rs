use crossterm::event::KeyCode;
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  style::{Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;

use super::shared::InstructionFooter;
use crate::{
  action::Action,
  components::{AsyncComponent, Component},
  location::Location,
  tui::Frame,
};

/// Shown after navigating away from the list, until the user goes back.
#[derive(Default)]
pub struct LocationView {
  location: Location,
  instruction_footer: InstructionFooter,
}

impl LocationView {
  pub fn set_location(&mut self, location: Location) {
    self.location = location;
  }
}

impl Component for LocationView {
  fn register_action_handler(&mut self, _tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(1), Constraint::Length(3)])
      .split(area);

    let mut lines = vec![Line::from(self.location.pathname().to_string())];
    if let Some(back) = self.location.back() {
      lines.push(Line::default());
      lines.push(Line::styled(format!("Return to {back}"), Style::default().add_modifier(Modifier::DIM)));
    }
    let paragraph =
      Paragraph::new(lines).block(Block::default().title("Location").borders(Borders::ALL)).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[0]);

    let instructions: &[&str] = if self.location.back().is_some() { &["q: Quit", "esc: Back"] } else { &["q: Quit"] };
    self.instruction_footer.render(frame, chunks[1], instructions);
    Ok(())
  }
}

#[async_trait::async_trait]
impl AsyncComponent for LocationView {
  async fn handle_events(&mut self, event: Option<crate::tui::Event>) -> color_eyre::Result<Option<Action>> {
    match event {
      Some(crate::tui::Event::Key(key)) => match key.code {
        KeyCode::Esc | KeyCode::Backspace => Ok(Some(Action::Back)),
        _ => Ok(None),
      },
      _ => Ok(None),
    }
  }

  async fn update(&mut self, _action: Action) -> color_eyre::Result<Option<Action>> {
    Ok(None)
  }
}
