//! Inventory screen: filter bar over the filtered, sorted vehicle list.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Style},
  text::{Line, Span},
  widgets::{ListItem, Paragraph},
};

use super::{dim, draw_list, draw_message, pane, vehicle_line};
use crate::app::{App, FilterField};

pub fn draw<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(4), Constraint::Min(0)])
    .split(area);

  draw_filters(f, rows[0], app);

  let view = app.inventory();
  let block = pane(view.summary());
  if view.vehicles.is_empty() {
    let text = if app.loading() {
      "Loading..."
    } else {
      "No cars match your filters."
    };
    draw_message(f, rows[1], block, text);
    return;
  }

  let items = view
    .vehicles
    .iter()
    .map(|v| ListItem::new(vehicle_line(v)))
    .collect();
  let cursor = app.filter_focus.is_none().then_some(app.cursor);
  draw_list(f, rows[1], block, items, cursor);
}

fn draw_filters<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let input = |field: FilterField| {
    let focused = app.filter_focus == Some(field);
    let value = field.value(&app.inputs);
    let style = if focused {
      Style::default().fg(Color::Yellow)
    } else {
      Style::default()
    };
    vec![
      Span::styled(format!("{}: ", field.label()), dim()),
      Span::styled(
        format!("{value}{}", if focused { "_" } else { "" }),
        style,
      ),
      Span::raw("  "),
    ]
  };

  let search = Line::from(input(FilterField::Search));
  let mut second: Vec<Span> = FilterField::ALL[1..]
    .iter()
    .flat_map(|field| input(*field))
    .collect();
  second.extend([
    Span::styled("Show: ", dim()),
    Span::raw(app.inputs.restriction.label()),
    Span::styled("   Sort: ", dim()),
    Span::raw(app.inputs.sort.label()),
  ]);

  let block = pane("Filters");
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(vec![search, Line::from(second)]), inner);
}
