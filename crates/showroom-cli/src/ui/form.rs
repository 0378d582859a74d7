//! Form modals and the delete confirmation.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};
use showroom_core::validate::Form;

use super::{dim, pane};
use crate::{app::Target, form::FormState};

/// Render `state` as a label/value list with each field's error beneath it.
pub fn draw<F: Form>(f: &mut Frame, area: Rect, title: &str, state: &FormState<F>) {
  let block = pane(title).border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();
  for (i, field) in state.form.fields().iter().enumerate() {
    let focused = i == state.focus;
    let raw = state.form.value(field.name);
    let shown = if field.name == "password" {
      "*".repeat(raw.chars().count())
    } else {
      raw.to_owned()
    };
    let cursor = if focused { "_" } else { "" };

    let label_style = if focused {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Cyan)
    };
    lines.push(Line::from(vec![
      Span::styled(format!("{:<16}", field.label), label_style),
      Span::raw(format!("{shown}{cursor}")),
    ]));

    if let Some(error) = state.validation.error(field.name) {
      lines.push(Line::from(Span::styled(
        format!("{:<16}{error}", ""),
        Style::default().fg(Color::Red),
      )));
    }
  }

  lines.push(Line::from(""));
  if state.submitting() {
    lines.push(Line::from(Span::styled("Submitting...", dim())));
  } else if let Some(error) = &state.error {
    lines.push(Line::from(Span::styled(
      error.clone(),
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn draw_confirm(f: &mut Frame, area: Rect, target: Target) {
  let block = pane("Confirm").border_style(Style::default().fg(Color::Red));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines = vec![
    Line::from(format!(
      "Are you sure you want to delete this {}?",
      target.noun()
    )),
    Line::from(""),
    Line::from(vec![
      Span::styled(
        "[y]",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
      ),
      Span::raw(" Delete  "),
      Span::styled(
        "[n]",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
      ),
      Span::raw(" Cancel"),
    ]),
  ];
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
