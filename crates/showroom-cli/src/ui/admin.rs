//! Admin area: section tabs over the cars, showrooms or inquiries list.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{ListItem, Paragraph},
};
use showroom_core::display::preview;

use super::{dim, draw_list, draw_message, pane, vehicle_line};
use crate::app::{AdminTab, App};

/// Inquiry messages are cut to this many characters in the list.
const MESSAGE_PREVIEW: usize = 50;

pub fn draw<P>(f: &mut Frame, area: Rect, app: &App<P>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(area);

  let tabs: Vec<Span> = AdminTab::ALL
    .iter()
    .enumerate()
    .map(|(i, tab)| {
      let style = if *tab == app.admin_tab {
        Style::default()
          .fg(Color::Black)
          .bg(Color::Cyan)
          .add_modifier(Modifier::BOLD)
      } else {
        dim()
      };
      Span::styled(format!(" {} {} ", i + 1, tab.title()), style)
    })
    .collect();
  f.render_widget(Paragraph::new(Line::from(tabs)), rows[0]);

  let items: Vec<ListItem> = match app.admin_tab {
    AdminTab::Cars => app
      .vehicles
      .iter()
      .map(|v| {
        let mut line = vehicle_line(v);
        line.spans.insert(0, Span::styled(format!("#{:<5}", v.id), dim()));
        ListItem::new(line)
      })
      .collect(),
    AdminTab::Showrooms => app
      .showrooms
      .iter()
      .map(|s| {
        ListItem::new(Line::from(vec![
          Span::styled(format!("#{:<5}", s.id), dim()),
          Span::raw(format!("{:<28}", s.name)),
          Span::styled(s.address.clone(), dim()),
        ]))
      })
      .collect(),
    AdminTab::Inquiries => app
      .inquiries
      .iter()
      .map(|q| {
        ListItem::new(vec![
          Line::from(vec![
            Span::styled(
              q.created_at.format("%Y-%m-%d %H:%M  ").to_string(),
              dim(),
            ),
            Span::styled(
              format!("{} <{}>", q.name, q.email),
              Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", q.phone), dim()),
          ]),
          Line::from(vec![
            Span::styled("  Re: ", dim()),
            Span::raw(q.subject.clone().unwrap_or_else(|| q.vehicle_label())),
          ]),
          Line::from(vec![
            Span::raw("  "),
            Span::raw(preview(&q.message, MESSAGE_PREVIEW)),
          ]),
        ])
      })
      .collect(),
  };

  let block = pane(format!("{} ({})", app.admin_tab.title(), items.len()));
  if items.is_empty() {
    let text = if app.loading() { "Loading..." } else { "Nothing here yet." };
    return draw_message(f, rows[1], block, text);
  }
  draw_list(f, rows[1], block, items, Some(app.cursor));
}
