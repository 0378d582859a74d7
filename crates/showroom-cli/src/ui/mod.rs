//! TUI rendering. Orchestrates the screen panes and modal overlays.

mod admin;
mod car_detail;
mod form;
mod home;
mod inventory;
mod showrooms;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use showroom_core::vehicle::Vehicle;

use crate::app::{App, Modal, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<P>(f: &mut Frame, app: &App<P>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(modal) = &app.modal {
    draw_modal(f, area, modal);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

const TABS: [(Screen, &str, char); 4] = [
  (Screen::Home, "Home", 'H'),
  (Screen::Inventory, "Inventory", 'I'),
  (Screen::Showrooms, "Showrooms", 'S'),
  (Screen::Admin, "Admin", 'A'),
];

fn draw_header<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let mut spans = vec![Span::styled(
    " showroom ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (screen, title, key) in TABS {
    let active = match (app.screen, screen) {
      (Screen::CarDetail(_), Screen::Inventory) => true,
      (current, tab) => current == tab,
    };
    let style = if active {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(format!(" [{key}] {title} "), style));
  }

  let who = match app.session.current() {
    Some(session) => format!("{} ({}) ", session.username, session.role),
    None => "[L] sign in ".to_owned(),
  };
  let right = Span::styled(who, Style::default().fg(Color::Gray));

  // Left-right header: pad the middle.
  let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.content.chars().count());
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  match app.screen {
    Screen::Home => home::draw(f, area, app),
    Screen::Inventory => inventory::draw(f, area, app),
    Screen::CarDetail(_) => car_detail::draw(f, area, app),
    Screen::Showrooms => showrooms::draw(f, area, app),
    Screen::Admin => admin::draw(f, area, app),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let (mode_label, hints) = match (&app.modal, app.screen) {
    (Some(Modal::ConfirmDelete(_)), _) => ("CONFIRM", "y delete  n/Esc cancel"),
    (Some(Modal::Login(_)), _) => (
      "SIGN IN",
      "Tab/↑↓ field  ←→ role  F2 login/signup  Enter submit  Esc cancel",
    ),
    (Some(_), _) => ("FORM", "Tab/↑↓ field  Enter submit  Esc cancel"),
    (None, _) if app.filter_focus.is_some() => {
      ("FILTER", "Type to filter  Tab next input  Esc/Enter done")
    }
    (None, Screen::Home) => ("HOME", "↑↓/jk navigate  Enter detail  q quit"),
    (None, Screen::Inventory) => (
      "BROWSE",
      "/ search  Tab bounds  s sort  t make/type  c clear  Enter detail",
    ),
    (None, Screen::CarDetail(_)) => ("DETAIL", "i inquire  Esc back  q quit"),
    (None, Screen::Showrooms) => ("SHOWROOMS", "↑↓/jk navigate  q quit"),
    (None, Screen::Admin) => {
      ("ADMIN", "1-3/Tab section  n new  e edit  d delete  L sign out")
    }
  };

  let status = if app.loading() {
    "Loading...".to_owned()
  } else if app.status_msg.is_empty() {
    hints.to_owned()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Modals ───────────────────────────────────────────────────────────────────

fn draw_modal(f: &mut Frame, area: Rect, modal: &Modal) {
  match modal {
    Modal::ConfirmDelete(target) => {
      let popup = centered_rect(40, 20, area);
      f.render_widget(Clear, popup);
      form::draw_confirm(f, popup, *target);
    }
    Modal::Login(state) => {
      let popup = centered_rect(50, 50, area);
      f.render_widget(Clear, popup);
      form::draw(f, popup, state.form.mode.label(), state);
    }
    Modal::Inquiry(state) => {
      let popup = centered_rect(70, 70, area);
      f.render_widget(Clear, popup);
      let title = state.form.subject.as_deref().unwrap_or("Contact us");
      form::draw(f, popup, title, state);
    }
    Modal::CarEditor { id, form: state } => {
      let popup = centered_rect(70, 90, area);
      f.render_widget(Clear, popup);
      let title = if id.is_some() { "Edit car" } else { "New car" };
      form::draw(f, popup, title, state);
    }
    Modal::ShowroomEditor { id, form: state } => {
      let popup = centered_rect(70, 70, area);
      f.render_widget(Clear, popup);
      let title = if id.is_some() { "Edit showroom" } else { "New showroom" };
      form::draw(f, popup, title, state);
    }
  }
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
  let popup_layout = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - percent_y) / 2),
      Constraint::Percentage(percent_y),
      Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - percent_x) / 2),
      Constraint::Percentage(percent_x),
      Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

// ─── Shared widgets ───────────────────────────────────────────────────────────

/// Bordered pane in the common style.
fn pane(title: impl Into<String>) -> Block<'static> {
  Block::default()
    .title(format!(" {} ", title.into()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

fn highlight() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

fn dim() -> Style { Style::default().fg(Color::DarkGray) }

/// One-line summary of a vehicle: title, price, mileage.
fn vehicle_line(v: &Vehicle) -> Line<'static> {
  Line::from(vec![
    Span::raw(format!("{:<32}", v.title())),
    Span::styled(
      format!("{:>12}", v.display_price()),
      Style::default().fg(Color::Green),
    ),
    Span::styled(format!("  {}", v.display_mileage()), dim()),
  ])
}

/// Scrollable list with the cursor highlighted.
fn draw_list(
  f: &mut Frame,
  area: Rect,
  block: Block<'_>,
  items: Vec<ListItem<'_>>,
  cursor: Option<usize>,
) {
  let mut state = ListState::default();
  state.select(if items.is_empty() { None } else { cursor });
  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(highlight())
      .highlight_symbol(""),
    area,
    &mut state,
  );
}

/// Dimmed one-liner inside a bordered pane.
fn draw_message(f: &mut Frame, area: Rect, block: Block<'_>, text: &str) {
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(text.to_owned()).style(dim()), inner);
}
