use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState as SelectionState, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error};

use super::{
  config::{ListConfig, RowEffectFn},
  props::{ListProps, PageHandler},
  row_item::RowItem,
  view::{ListView, SKELETON_ROWS, select_view},
};
use crate::{
  action::Action,
  components::{AsyncComponent, Component, shared::InstructionFooter},
  datum::Datum,
  location::LOGOUT_PATH,
  tui::Frame,
};

const SKELETON_WIDTH: usize = 32;

/// Renders a configured resource list. All inputs are owned by the caller and
/// handed over with [`ListComponent::refresh`]; the only state kept here is
/// the row cursor.
pub struct ListComponent {
  config: Arc<ListConfig>,
  props: ListProps,
  view: ListView,
  on_page: PageHandler,
  selection: SelectionState,
  instruction_footer: InstructionFooter,
  action_tx: Option<UnboundedSender<Action>>,
}

impl ListComponent {
  pub fn new(config: Arc<ListConfig>, on_page: PageHandler) -> Self {
    let props = ListProps::default();
    let view = select_view(&config, &props);
    ListComponent {
      config,
      props,
      view,
      on_page,
      selection: SelectionState::default(),
      instruction_footer: InstructionFooter::default(),
      action_tx: None,
    }
  }

  pub fn config(&self) -> &ListConfig {
    &self.config
  }

  pub fn view(&self) -> &ListView {
    &self.view
  }

  pub fn selected(&self) -> Option<usize> {
    self.selection.selected()
  }

  /// Replaces the caller-owned inputs and recomputes what is shown.
  pub fn refresh(&mut self, props: ListProps) {
    let rows_replaced = self.props.rows != props.rows;
    self.view = select_view(&self.config, &props);
    self.props = props;
    let count = self.row_count();
    match self.selection.selected() {
      _ if count == 0 => self.selection.select(None),
      Some(index) if !rows_replaced && index < count => {},
      _ => self.selection.select(Some(0)),
    }
    self.send_action(Action::Render);
  }

  fn send_action(&self, action: Action) {
    if let Some(tx) = &self.action_tx {
      if let Err(e) = tx.send(action) {
        error!("Failed to send action: {}", e);
      }
    }
  }

  fn row_count(&self) -> usize {
    match &self.view {
      ListView::Rows(rows) => rows.len(),
      _ => 0,
    }
  }

  pub fn select_next(&mut self) {
    let count = self.row_count();
    if count == 0 {
      return;
    }
    let next = match self.selection.selected() {
      Some(index) if index + 1 < count => index + 1,
      _ => 0,
    };
    self.selection.select(Some(next));
  }

  pub fn select_previous(&mut self) {
    let count = self.row_count();
    if count == 0 {
      return;
    }
    let previous = match self.selection.selected() {
      Some(0) | None => count - 1,
      Some(index) => index - 1,
    };
    self.selection.select(Some(previous));
  }

  /// Activates whatever control the current view offers. Navigation is
  /// returned as an action; going back a page is handed to the page handler
  /// and navigates nowhere.
  pub fn activate(&mut self) -> Option<Action> {
    match &self.view {
      ListView::Rows(rows) => {
        let index = self.selection.selected()?;
        let row = rows.get(index)?;
        let datum = self.props.rows.as_ref()?.get(index)?;
        if let Some(effect) = &self.config.row.button.effect {
          run_effect(effect.clone(), datum.clone());
        }
        debug!(href = %row.href, "row activated");
        Some(Action::Navigate(row.href.clone()))
      },
      ListView::Add(add) => Some(Action::Navigate(add.href.clone())),
      ListView::End { .. } => {
        (self.on_page)(self.props.page.saturating_sub(1));
        None
      },
      ListView::Error => Some(Action::Navigate(LOGOUT_PATH.to_string())),
      ListView::Loading | ListView::NotFound { .. } | ListView::Unknown(_) => None,
    }
  }

  fn instructions(&self) -> Vec<&'static str> {
    let mut instructions = vec!["q: Quit", "/: Search"];
    if self.props.filters.search().is_some() {
      instructions.push("c: Clear search");
    }
    match &self.view {
      ListView::Rows(_) => {
        instructions.push("↑/↓: Select");
        instructions.push("enter: Open");
        instructions.push("n: Next page");
      },
      ListView::Add(_) => instructions.push("enter: Add"),
      ListView::End { .. } => instructions.push("enter: Go back"),
      ListView::Error => instructions.push("enter: Log out"),
      ListView::Loading | ListView::NotFound { .. } | ListView::Unknown(_) => {},
    }
    if self.props.page > 1 {
      instructions.push("p: Previous page");
    }
    instructions
  }

  fn title(&self) -> String {
    match self.props.filters.search() {
      Some(search) => format!("{} - page {} - \"{}\"", self.config.name, self.props.page, search),
      None => format!("{} - page {}", self.config.name, self.props.page),
    }
  }

  fn render_body(&mut self, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default().title(self.title()).borders(Borders::ALL);
    let icons = self.config.icons;
    match &self.view {
      ListView::Loading => {
        let skeleton = icons.skeleton.repeat(SKELETON_WIDTH);
        let items: Vec<ListItem> = (0..SKELETON_ROWS)
          .map(|_| ListItem::new(Span::styled(skeleton.clone(), Style::default().add_modifier(Modifier::DIM))))
          .collect();
        f.render_widget(List::new(items).block(block), area);
      },
      ListView::Add(add) => {
        let lines = vec![
          Line::from(add.prefix.clone()),
          Line::default(),
          button(format!("{} {}", icons.add, add.text)),
        ];
        f.render_widget(centered(lines).block(block), area);
      },
      ListView::NotFound { name } => {
        f.render_widget(centered(vec![Line::from(format!("🐰 No {name} found"))]).block(block), area);
      },
      ListView::Rows(rows) => {
        let items: Vec<ListItem> = rows.iter().map(|row| RowItem::new(row, &icons).render()).collect();
        let list = List::new(items)
          .block(block)
          .style(Style::default().fg(Color::White))
          .highlight_style(Style::default().add_modifier(Modifier::BOLD))
          .highlight_symbol("→ ");
        f.render_stateful_widget(list, area, &mut self.selection);
      },
      ListView::End { name } => {
        f.render_widget(centered(vec![button(format!("That's all the {name}. Go back."))]).block(block), area);
      },
      ListView::Error => {
        let lines = vec![Line::from("Failed to fetch data..."), Line::default(), button("Log out".to_string())];
        f.render_widget(centered(lines).block(block), area);
      },
      ListView::Unknown(code) => {
        debug!(code, "unknown list state");
        let paragraph = Paragraph::new("ERROR: Unknown list state").style(Style::default().fg(Color::Red)).block(block);
        f.render_widget(paragraph, area);
      },
    }
  }
}

/// Effects run on the blocking pool when a runtime is available, so a slow
/// effect never holds up the navigation that follows it.
fn run_effect(effect: RowEffectFn, datum: Datum) {
  match tokio::runtime::Handle::try_current() {
    Ok(handle) => {
      handle.spawn_blocking(move || effect(&datum));
    },
    Err(_) => effect(&datum),
  }
}

fn button(text: String) -> Line<'static> {
  Line::from(Span::styled(
    format!("[ {text} ]"),
    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
  ))
}

fn centered(lines: Vec<Line<'static>>) -> Paragraph<'static> {
  Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true })
}

impl Component for ListComponent {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    self.action_tx = Some(tx);
    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(1), Constraint::Length(3)])
      .split(area);

    self.render_body(frame, chunks[0]);
    let instructions = self.instructions();
    self.instruction_footer.render(frame, chunks[1], &instructions);
    Ok(())
  }
}

#[async_trait::async_trait]
impl AsyncComponent for ListComponent {
  async fn handle_events(&mut self, event: Option<crate::tui::Event>) -> color_eyre::Result<Option<Action>> {
    let Some(crate::tui::Event::Key(key)) = event else {
      return Ok(None);
    };
    let action = match key {
      KeyEvent { code: KeyCode::Down, modifiers: KeyModifiers::NONE, .. } => Some(Action::SelectNext),
      KeyEvent { code: KeyCode::Up, modifiers: KeyModifiers::NONE, .. } => Some(Action::SelectPrevious),
      KeyEvent { code: KeyCode::Enter, .. } => Some(Action::Activate),
      _ => None,
    };
    Ok(action)
  }

  async fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    match action {
      Action::SelectNext => {
        self.select_next();
        Ok(Some(Action::Render))
      },
      Action::SelectPrevious => {
        self.select_previous();
        Ok(Some(Action::Render))
      },
      Action::Activate => Ok(self.activate()),
      _ => Ok(None),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use pretty_assertions::assert_eq;
  use ratatui::{Terminal, backend::TestBackend};
  use serde_json::json;

  use super::*;
  use crate::{
    components::list_view::{
      config::{AddButtonConfig, RowButtonConfig, RowConfig, RowKind},
      props::ListFilters,
      state::{ListState, Status},
    },
    datum::Datum,
    location::Location,
    tui::Event,
  };

  fn datum(uuid: &str, name: &str) -> Datum {
    serde_json::from_value(json!({ "uuid": uuid, "name": name })).unwrap()
  }

  fn config(effects: Arc<Mutex<Vec<String>>>) -> Arc<ListConfig> {
    let button = RowButtonConfig::new(|path, d| format!("{path}/{}", d.text("uuid").unwrap_or_default()))
      .with_effect(move |d| effects.lock().unwrap().push(d.text("uuid").unwrap_or_default()));
    Arc::new(
      ListConfig::new("branches", "Branches", RowConfig::new(RowKind::Text, ["name"], button))
        .with_add(AddButtonConfig::new("Nothing here", "Add a Branch", |path| format!("{path}/add"))),
    )
  }

  fn props(state: impl Into<Status>, page: u32) -> ListProps {
    ListProps {
      status: state.into(),
      rows: Some(vec![datum("b1", "main"), datum("b2", "develop")]),
      filters: ListFilters::default(),
      page,
      location: Location::new("/console/projects/demo/branches").with_query("page", page.to_string()),
    }
  }

  fn component() -> (ListComponent, Arc<Mutex<Vec<String>>>, Arc<Mutex<Vec<u32>>>) {
    let effects = Arc::new(Mutex::new(Vec::new()));
    let pages = Arc::new(Mutex::new(Vec::new()));
    let pages_clone = pages.clone();
    let list = ListComponent::new(config(effects.clone()), Arc::new(move |page: u32| pages_clone.lock().unwrap().push(page)));
    (list, effects, pages)
  }

  fn render(list: &mut ListComponent) -> String {
    let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
    terminal
      .draw(|f| {
        let area = f.area();
        list.draw(f, area).unwrap();
      })
      .unwrap();
    terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
  }

  #[test]
  fn test_end_goes_back_one_page_without_navigating() {
    let (mut list, _, pages) = component();
    list.refresh(props(ListState::End, 3));

    let action = list.activate();

    assert_eq!(action, None);
    assert_eq!(*pages.lock().unwrap(), vec![2]);
  }

  #[test]
  fn test_row_activation_runs_effect_then_navigates() {
    let (mut list, effects, pages) = component();
    list.refresh(props(ListState::Ok, 1));
    list.select_next();

    let action = list.activate();

    assert_eq!(
      action,
      Some(Action::Navigate(
        "/console/projects/demo/branches/b2?back=%2Fconsole%2Fprojects%2Fdemo%2Fbranches%3Fpage%3D1".to_string()
      ))
    );
    assert_eq!(*effects.lock().unwrap(), vec!["b2".to_string()]);
    assert!(pages.lock().unwrap().is_empty());
  }

  #[test]
  fn test_add_activation_navigates_to_add_page() {
    let (mut list, _, _) = component();
    list.refresh(props(ListState::Empty, 1));

    assert_eq!(
      list.activate(),
      Some(Action::Navigate(
        "/console/projects/demo/branches/add?back=%2Fconsole%2Fprojects%2Fdemo%2Fbranches%3Fpage%3D1".to_string()
      ))
    );
  }

  #[test]
  fn test_error_activation_logs_out() {
    let (mut list, _, _) = component();
    list.refresh(props(ListState::Error, 1));

    assert_eq!(list.activate(), Some(Action::Navigate(LOGOUT_PATH.to_string())));
  }

  #[test]
  fn test_loading_and_unknown_have_nothing_to_activate() {
    let (mut list, effects, pages) = component();

    list.refresh(props(ListState::Loading, 1));
    assert_eq!(list.activate(), None);
    list.refresh(props(42u8, 1));
    assert_eq!(list.activate(), None);

    assert!(effects.lock().unwrap().is_empty());
    assert!(pages.lock().unwrap().is_empty());
  }

  #[test]
  fn test_selection_wraps_and_clamps() {
    let (mut list, _, _) = component();
    list.refresh(props(ListState::Ok, 1));
    assert_eq!(list.selected(), Some(0));

    list.select_previous();
    assert_eq!(list.selected(), Some(1));
    list.select_next();
    assert_eq!(list.selected(), Some(0));

    list.select_previous();
    list.refresh(ListProps { rows: Some(vec![datum("b1", "main")]), ..props(ListState::Ok, 1) });
    assert_eq!(list.selected(), Some(0));

    list.refresh(props(ListState::Loading, 1));
    assert_eq!(list.selected(), None);
  }

  #[test]
  fn test_new_rows_reset_selection() {
    let (mut list, _, _) = component();
    list.refresh(props(ListState::Ok, 1));
    list.select_next();
    assert_eq!(list.selected(), Some(1));
    let page_two = || ListProps {
      rows: Some(vec![datum("b3", "release"), datum("b4", "hotfix")]),
      ..props(ListState::Ok, 2)
    };

    list.refresh(page_two());
    assert_eq!(list.selected(), Some(0));

    list.select_next();
    list.refresh(page_two());
    assert_eq!(list.selected(), Some(1));
  }

  #[tokio::test]
  async fn test_blocking_effect_does_not_hold_navigation() {
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
    let release_rx = Mutex::new(release_rx);
    let opened = Arc::new(Mutex::new(Vec::new()));
    let opened_clone = opened.clone();
    let button = RowButtonConfig::new(|path, d| format!("{path}/{}", d.text("uuid").unwrap_or_default()))
      .with_effect(move |d| {
        release_rx.lock().unwrap().recv().unwrap();
        opened_clone.lock().unwrap().push(d.text("uuid").unwrap_or_default());
      });
    let config = Arc::new(ListConfig::new("branches", "Branches", RowConfig::new(RowKind::Text, ["name"], button)));
    let mut list = ListComponent::new(config, Arc::new(|_page: u32| {}));
    list.refresh(props(ListState::Ok, 1));

    let action = list.activate();

    assert!(matches!(action, Some(Action::Navigate(href)) if href.starts_with("/console/projects/demo/branches/b1")));
    assert!(opened.lock().unwrap().is_empty());

    release_tx.send(()).unwrap();
    for _ in 0..100 {
      if !opened.lock().unwrap().is_empty() {
        break;
      }
      tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(*opened.lock().unwrap(), vec!["b1".to_string()]);
  }

  #[test]
  fn test_draw_rows() {
    let (mut list, _, _) = component();
    list.refresh(props(ListState::Ok, 1));

    let screen = render(&mut list);

    assert!(screen.contains("Branches - page 1"));
    assert!(screen.contains("main"));
    assert!(screen.contains("develop"));
    assert!(screen.contains("enter: Open"));
  }

  #[test]
  fn test_draw_loading_shows_no_data() {
    let (mut list, _, _) = component();
    list.refresh(props(ListState::Loading, 1));

    let screen = render(&mut list);

    assert!(screen.contains("░░░░"));
    assert!(!screen.contains("main"));
  }

  #[test]
  fn test_draw_not_found_when_filtered() {
    let (mut list, _, _) = component();
    let filters = ListFilters { search: Some("zzz".to_string()), ..Default::default() };
    list.refresh(ListProps { filters, ..props(ListState::Empty, 1) });

    let screen = render(&mut list);

    assert!(screen.contains("No Branches found"));
    assert!(!screen.contains("Add a Branch"));
  }

  #[test]
  fn test_draw_end_and_error() {
    let (mut list, _, _) = component();

    list.refresh(props(ListState::End, 2));
    assert!(render(&mut list).contains("That's all the Branches. Go back."));

    list.refresh(props(ListState::Error, 1));
    let screen = render(&mut list);
    assert!(screen.contains("Failed to fetch data..."));
    assert!(screen.contains("Log out"));
  }

  #[test]
  fn test_draw_unknown_state() {
    let (mut list, _, _) = component();
    list.refresh(props(7u8, 1));

    assert!(render(&mut list).contains("ERROR: Unknown list state"));
  }

  #[tokio::test]
  async fn test_handle_key_events() {
    let (mut list, _, _) = component();

    let down = list.handle_events(Some(Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)))).await.unwrap();
    let up = list.handle_events(Some(Event::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)))).await.unwrap();
    let enter = list.handle_events(Some(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))).await.unwrap();
    let other = list.handle_events(Some(Event::Tick)).await.unwrap();

    assert_eq!(down, Some(Action::SelectNext));
    assert_eq!(up, Some(Action::SelectPrevious));
    assert_eq!(enter, Some(Action::Activate));
    assert_eq!(other, None);
  }

  #[tokio::test]
  async fn test_update_activate_goes_back_once() {
    let (mut list, _, pages) = component();
    list.refresh(props(ListState::End, 5));

    let action = list.update(Action::Activate).await.unwrap();

    assert_eq!(action, None);
    assert_eq!(*pages.lock().unwrap(), vec![4]);
  }

  #[test]
  fn test_refresh_requests_render() {
    let (mut list, _, _) = component();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    list.register_action_handler(tx).unwrap();

    list.refresh(props(ListState::Ok, 1));

    assert_eq!(rx.try_recv().unwrap(), Action::Render);
  }
}
