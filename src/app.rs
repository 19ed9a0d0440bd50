use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::{Constraint, Direction, Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::{
  action::Action,
  cli::{Cli, parse_date},
  components::{
    AsyncComponent, Component, ListComponent, LocationView, SearchInput,
    list_view::{ListConfig, ListFilters, ListProps, ListState, PageHandler, Status},
    traits::{ListDataSource, PageQuery},
  },
  config::AppConfig,
  data::JsonFileSource,
  datum::Datum,
  location::{LOGOUT_PATH, Location},
  mode::Mode,
  resources::Resource,
  tui::{self, Frame, Tui},
};

const PAGE_PARAM: &str = "page";
const SEARCH_PARAM: &str = "search";
const START_DATE_PARAM: &str = "start_date";
const END_DATE_PARAM: &str = "end_date";

/// Status of a page once its fetch has resolved.
pub fn status_for(page: u32, rows: &[Datum]) -> ListState {
  match rows.is_empty() {
    false => ListState::Ok,
    true if page <= 1 => ListState::Empty,
    true => ListState::End,
  }
}

/// A list whose page handler asks the app for the page through `tx`.
fn list_component(config: Arc<ListConfig>, tx: &UnboundedSender<Action>) -> Result<ListComponent> {
  let page_tx = tx.clone();
  let on_page: PageHandler = Arc::new(move |page: u32| {
    if let Err(e) = page_tx.send(Action::SetPage(page)) {
      error!("Failed to send action: {}", e);
    }
  });
  let mut list = ListComponent::new(config, on_page);
  list.register_action_handler(tx.clone())?;
  Ok(list)
}

/// Owns everything the list shows: the page, the filters, the fetched rows
/// and their status. Fetches run on their own tasks and report back through
/// the action channel.
pub struct App {
  pub config: AppConfig,
  pub resource: Resource,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  list_config: Arc<ListConfig>,
  source: Arc<dyn ListDataSource>,
  list: ListComponent,
  search_input: SearchInput,
  location_view: LocationView,
  page: u32,
  filters: ListFilters,
  rows: Option<Vec<Datum>>,
  status: Status,
  location: Location,
  fetch_id: u64,
  action_tx: UnboundedSender<Action>,
  action_rx: UnboundedReceiver<Action>,
}

impl App {
  pub fn new(cli: &Cli, config: AppConfig) -> Result<Self> {
    let source = Arc::new(JsonFileSource::new(config.data_path.clone()));
    let filters =
      ListFilters { start_date: cli.start_date, end_date: cli.end_date, search: cli.search.clone() };
    Self::with_source(config, cli.resource, source, cli.page, filters)
  }

  pub fn with_source(
    config: AppConfig,
    resource: Resource,
    source: Arc<dyn ListDataSource>,
    page: u32,
    filters: ListFilters,
  ) -> Result<Self> {
    let config = AppConfig { per_page: config.per_page.max(1), ..config };
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let list_config = resource.list_config();

    let list = list_component(list_config.clone(), &action_tx)?;

    let mut app = Self {
      location: resource.location(&config.project),
      config,
      resource,
      should_quit: false,
      should_suspend: false,
      mode: Mode::Default,
      list_config,
      source,
      list,
      search_input: SearchInput::new(),
      location_view: LocationView::default(),
      page: page.max(1),
      filters,
      rows: None,
      status: Status::default(),
      fetch_id: 0,
      action_tx,
      action_rx,
    };
    app.location = app.list_location();
    Ok(app)
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn filters(&self) -> &ListFilters {
    &self.filters
  }

  pub fn status(&self) -> Status {
    self.status
  }

  pub fn location(&self) -> &Location {
    &self.location
  }

  /// The list's own location, carrying the page and filters so that a
  /// detail location can come back to exactly this list.
  pub fn list_location(&self) -> Location {
    let mut location = self.resource.location(&self.config.project).with_query(PAGE_PARAM, self.page.to_string());
    if let Some(search) = self.filters.search() {
      location = location.with_query(SEARCH_PARAM, search);
    }
    if let Some(start) = self.filters.start_date {
      location = location.with_query(START_DATE_PARAM, start.format("%Y-%m-%d").to_string());
    }
    if let Some(end) = self.filters.end_date {
      location = location.with_query(END_DATE_PARAM, end.format("%Y-%m-%d").to_string());
    }
    location
  }

  fn push_props(&mut self) {
    self.list.refresh(ListProps {
      status: self.status,
      rows: self.rows.clone(),
      filters: self.filters.clone(),
      page: self.page,
      location: self.location.clone(),
    });
  }

  /// Drops the current rows and starts fetching the current page. Results of
  /// earlier fetches still in flight are ignored when they arrive.
  fn fetch(&mut self) {
    self.fetch_id += 1;
    let id = self.fetch_id;
    self.location = self.list_location();
    self.status = ListState::Loading.into();
    self.rows = None;
    self.push_props();

    let query = PageQuery {
      resource: self.list_config.resource.clone(),
      page: self.page,
      per_page: self.config.per_page,
      filters: self.filters.clone(),
      date_key: self.list_config.date_key.clone(),
    };
    let source = self.source.clone();
    let tx = self.action_tx.clone();
    tokio::spawn(async move {
      let action = match source.fetch_page(&query).await {
        Ok(rows) => Action::RowsLoaded(id, rows),
        Err(e) => Action::FetchFailed(id, e.to_string()),
      };
      if let Err(e) = tx.send(action) {
        error!("Failed to send action: {}", e);
      }
    });
  }

  fn set_page(&mut self, page: u32) {
    self.page = page.max(1);
    self.fetch();
  }

  fn page_is_full(&self) -> bool {
    self.rows.as_ref().is_some_and(|rows| rows.len() >= self.config.per_page as usize)
  }

  /// Returns to the location in the current location's `back` parameter,
  /// restoring the list page and filters it carries.
  fn go_back(&mut self) -> Result<()> {
    let Some(back) = self.location.back() else {
      return Ok(());
    };
    if let Some(resource) = Resource::from_location(&back) {
      self.switch_resource(resource)?;
    }
    self.page = back.query(PAGE_PARAM).and_then(|page| page.parse().ok()).unwrap_or(1);
    self.filters = ListFilters {
      start_date: back.query(START_DATE_PARAM).and_then(|date| parse_date(date).ok()),
      end_date: back.query(END_DATE_PARAM).and_then(|date| parse_date(date).ok()),
      search: back.query(SEARCH_PARAM).map(str::to_string),
    };
    self.mode = Mode::Default;
    self.fetch();
    Ok(())
  }

  fn switch_resource(&mut self, resource: Resource) -> Result<()> {
    if resource == self.resource {
      return Ok(());
    }
    info!("switching to {resource}");
    self.resource = resource;
    self.list_config = resource.list_config();
    self.list = list_component(self.list_config.clone(), &self.action_tx)?;
    Ok(())
  }

  fn navigate(&mut self, href: &str) -> Option<Action> {
    let location = Location::parse(href);
    if location.pathname() == LOGOUT_PATH {
      info!("logging out");
      return Some(Action::Quit);
    }
    info!("navigating to {location}");
    self.location_view.set_location(location.clone());
    self.location = location;
    self.mode = Mode::Location;
    Some(Action::Render)
  }

  pub async fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    if self.mode == Mode::Input {
      return Ok(self.search_input.handle_key_event(key));
    }
    match key {
      KeyEvent { code: KeyCode::Char('q'), .. } => return Ok(Some(Action::Quit)),
      KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } => {
        return Ok(Some(Action::Quit));
      },
      KeyEvent { code: KeyCode::Char('z'), modifiers: KeyModifiers::CONTROL, .. } => {
        return Ok(Some(Action::Suspend));
      },
      _ => {},
    }
    match self.mode {
      Mode::Location => self.location_view.handle_events(Some(tui::Event::Key(key))).await,
      _ => match key.code {
        KeyCode::Char('/') => Ok(Some(Action::StartInputMode)),
        KeyCode::Char('c') => Ok(Some(Action::ClearSearch)),
        KeyCode::Char('n') | KeyCode::Right => Ok(Some(Action::NextPage)),
        KeyCode::Char('p') | KeyCode::Left => Ok(Some(Action::PreviousPage)),
        KeyCode::Char('r') => Ok(Some(Action::Refresh)),
        _ => self.list.handle_events(Some(tui::Event::Key(key))).await,
      },
    }
  }

  /// Applies an action to the app and, when it is meant for it, the list.
  pub async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      Action::Quit => self.should_quit = true,
      Action::Suspend => self.should_suspend = true,
      Action::Resume => self.should_suspend = false,
      Action::Error(ref msg) => error!("{msg}"),
      Action::Refresh => self.fetch(),
      Action::StartInputMode => {
        self.mode = Mode::Input;
        self.search_input.reset(self.filters.search());
        return Ok(Some(Action::Render));
      },
      Action::EndInputMode => {
        self.mode = Mode::Default;
        return Ok(Some(Action::Render));
      },
      Action::InputSubmitted(ref search) => {
        self.mode = Mode::Default;
        self.filters.search = Some(search.clone());
        self.set_page(1);
      },
      Action::ClearSearch => {
        self.mode = Mode::Default;
        if self.filters.search.take().is_some() {
          self.set_page(1);
        } else {
          return Ok(Some(Action::Render));
        }
      },
      Action::NextPage => {
        if self.page_is_full() {
          self.set_page(self.page + 1);
        }
      },
      Action::PreviousPage => {
        if self.page > 1 {
          self.set_page(self.page - 1);
        }
      },
      Action::SetPage(page) => self.set_page(page),
      Action::RowsLoaded(id, rows) => {
        if id != self.fetch_id {
          return Ok(None);
        }
        self.status = status_for(self.page, &rows).into();
        self.rows = Some(rows);
        self.push_props();
      },
      Action::FetchFailed(id, ref msg) => {
        if id != self.fetch_id {
          return Ok(None);
        }
        error!("Failed to fetch {} page {}: {msg}", self.resource, self.page);
        self.status = ListState::Error.into();
        self.rows = None;
        self.push_props();
      },
      Action::Navigate(ref href) => return Ok(self.navigate(href)),
      Action::Back => {
        self.go_back()?;
        return Ok(Some(Action::Render));
      },
      Action::SelectNext | Action::SelectPrevious | Action::Activate if self.mode == Mode::Default => {
        return self.list.update(action).await;
      },
      _ => {},
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    match self.mode {
      Mode::Location => self.location_view.draw(f, area),
      Mode::Input => {
        let chunks = Layout::default()
          .direction(Direction::Vertical)
          .constraints([Constraint::Length(3), Constraint::Min(1)])
          .split(area);
        self.search_input.render(f, chunks[0]);
        self.list.draw(f, chunks[1])
      },
      Mode::Default => self.list.draw(f, area),
    }
  }

  fn render(&mut self, tui: &mut Tui) -> Result<()> {
    tui.draw(|f| {
      let area = f.area();
      if let Err(e) = self.draw(f, area) {
        if let Err(e) = self.action_tx.send(Action::Error(format!("Failed to draw: {:?}", e))) {
          error!("Failed to send action: {}", e);
        }
      }
    })?;
    Ok(())
  }

  pub async fn run(&mut self) -> Result<()> {
    let mut tui = Tui::new()?.tick_rate(self.config.tick_rate).frame_rate(self.config.frame_rate);
    tui.enter()?;

    self.fetch();

    loop {
      if let Some(e) = tui.next().await {
        let action = match e {
          tui::Event::Quit => Some(Action::Quit),
          tui::Event::Tick => Some(Action::Tick),
          tui::Event::Render => Some(Action::Render),
          tui::Event::Resize(x, y) => Some(Action::Resize(x, y)),
          tui::Event::Key(key) => self.handle_key(key).await?,
          _ => None,
        };
        if let Some(action) = action {
          self.action_tx.send(action)?;
        }
      }

      while let Ok(action) = self.action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          log::debug!("{action:?}");
        }
        match action {
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.render(&mut tui)?;
          },
          Action::Render => self.render(&mut tui)?,
          _ => {},
        }
        if let Some(action) = self.update(action).await? {
          self.action_tx.send(action)?
        };
      }
      if self.should_suspend {
        tui.suspend()?;
        self.action_tx.send(Action::Resume)?;
        tui = Tui::new()?.tick_rate(self.config.tick_rate).frame_rate(self.config.frame_rate);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }
}
