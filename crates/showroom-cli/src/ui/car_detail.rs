//! Vehicle detail screen.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};
use showroom_core::display::or_placeholder;

use super::{dim, draw_message, pane};
use crate::app::{App, Detail};

pub fn draw<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let vehicle = match &app.detail {
    Detail::Loading => return draw_message(f, area, pane("Car"), "Loading..."),
    Detail::NotFound => {
      return draw_message(f, area, pane("Car"), "Car not found");
    }
    Detail::Failed => {
      return draw_message(f, area, pane("Car"), "Failed to load car details");
    }
    Detail::Found(vehicle) => vehicle,
  };

  let block = pane(vehicle.title());
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = vec![
    Line::styled(
      vehicle.display_price(),
      Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ),
    Line::from(""),
  ];
  for (label, value) in vehicle.spec_rows() {
    lines.push(Line::from(vec![
      Span::styled(
        format!("{label:<14}"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      ),
      Span::raw(value),
    ]));
  }

  lines.push(Line::from(""));
  lines.push(Line::from(
    vehicle
      .description
      .clone()
      .unwrap_or_else(|| "No description available.".to_owned()),
  ));
  lines.push(Line::from(""));
  lines.push(Line::from(vec![
    Span::styled("Photo  ", dim()),
    Span::raw(or_placeholder(vehicle.image_url.as_deref()).to_owned()),
  ]));
  lines.push(Line::from(""));
  lines.push(Line::styled("[i] Ask about this car", dim()));

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
