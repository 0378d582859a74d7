//! Home screen: welcome text over the newest vehicles.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{ListItem, Paragraph},
};

use super::{dim, draw_list, draw_message, pane, vehicle_line};
use crate::app::App;

pub fn draw<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(4), Constraint::Min(0)])
    .split(area);

  let welcome = vec![
    Line::styled(
      "Find your next car",
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ),
    Line::styled(
      "Browse the inventory, visit a showroom, or ask us about any car.",
      dim(),
    ),
  ];
  let block = pane("Welcome");
  let inner = block.inner(rows[0]);
  f.render_widget(block, rows[0]);
  f.render_widget(Paragraph::new(welcome), inner);

  let featured = app.featured();
  let block = pane("Featured");
  if featured.is_empty() {
    let text = if app.loading() { "Loading..." } else { "No cars listed yet." };
    draw_message(f, rows[1], block, text);
    return;
  }

  let items = featured
    .iter()
    .map(|v| ListItem::new(vehicle_line(v)))
    .collect();
  draw_list(f, rows[1], block, items, Some(app.cursor));
}
