//! Showroom directory: list on the left, details and stock on the right.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{ListItem, Paragraph, Wrap},
};
use showroom_core::{display::or_placeholder, showroom::showroom_counts};

use super::{dim, draw_list, draw_message, pane, vehicle_line};
use crate::app::App;

pub fn draw<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
    .split(area);

  let block = pane(format!("Showrooms ({})", app.showrooms.len()));
  if app.showrooms.is_empty() {
    let text = if app.loading() { "Loading..." } else { "No showrooms yet." };
    draw_message(f, cols[0], block, text);
    draw_message(f, cols[1], pane("Showroom"), "");
    return;
  }

  let counts = showroom_counts(&app.vehicles);
  let items = app
    .showrooms
    .iter()
    .map(|s| {
      let n = counts.get(&s.id).copied().unwrap_or(0);
      ListItem::new(Line::from(vec![
        Span::raw(s.name.clone()),
        Span::styled(format!("  {n} cars"), dim()),
      ]))
    })
    .collect();
  draw_list(f, cols[0], block, items, Some(app.cursor));

  draw_selected(f, cols[1], app);
}

fn draw_selected<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let Some(showroom) = app.selected_showroom() else {
    return draw_message(f, area, pane("Showroom"), "Select a showroom.");
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(8), Constraint::Min(0)])
    .split(area);

  let field = |label: &str, value: &str| {
    Line::from(vec![
      Span::styled(
        format!("{label:<10}"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      ),
      Span::raw(value.to_owned()),
    ])
  };
  let lines = vec![
    field("Address", &showroom.address),
    field("Phone", &showroom.phone),
    field("Email", &showroom.email),
    field("Hours", or_placeholder(showroom.hours.as_deref())),
    Line::from(""),
    Line::styled(
      showroom.description.clone().unwrap_or_default(),
      dim(),
    ),
  ];
  let block = pane(&showroom.name);
  let inner = block.inner(rows[0]);
  f.render_widget(block, rows[0]);
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

  let stock = app.showroom_vehicles();
  let block = pane("Available here");
  if stock.is_empty() {
    return draw_message(f, rows[1], block, "No cars at this showroom.");
  }
  let items = stock
    .iter()
    .map(|v| ListItem::new(vehicle_line(v)))
    .collect();
  draw_list(f, rows[1], block, items, None);
}
