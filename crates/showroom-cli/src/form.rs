//! Editing state for a modal form.

use showroom_core::{
  generation::Ticket,
  validate::{Field, Form, Validation},
};

/// A form plus cursor, last validation result and submission state.
#[derive(Debug, Clone)]
pub struct FormState<F> {
  pub form:       F,
  /// Index into `form.fields()`.
  pub focus:      usize,
  /// Shown under each field. Empty until the first submit attempt.
  pub validation: Validation,
  /// Provider-level failure shown under the whole form.
  pub error:      Option<String>,
  /// Write request this form is waiting on.
  pub in_flight:  Option<Ticket>,
}

impl<F: Form> FormState<F> {
  pub fn new(form: F) -> Self {
    Self {
      form,
      focus: 0,
      validation: Validation::default(),
      error: None,
      in_flight: None,
    }
  }

  pub fn focused(&self) -> Option<Field> {
    self.form.fields().get(self.focus).copied()
  }

  pub fn next_field(&mut self) {
    let len = self.form.fields().len();
    if len > 0 {
      self.focus = (self.focus + 1) % len;
    }
  }

  pub fn prev_field(&mut self) {
    let len = self.form.fields().len();
    if len > 0 {
      self.focus = (self.focus + len - 1) % len;
    }
  }

  /// Keep focus in range after the field set changed.
  pub fn clamp_focus(&mut self) {
    let len = self.form.fields().len();
    self.focus = self.focus.min(len.saturating_sub(1));
  }

  pub fn input(&mut self, c: char) {
    if let Some(field) = self.focused()
      && let Some(value) = self.form.value_mut(field.name)
    {
      value.push(c);
      self.revalidate();
    }
  }

  pub fn backspace(&mut self) {
    if let Some(field) = self.focused()
      && let Some(value) = self.form.value_mut(field.name)
    {
      value.pop();
      self.revalidate();
    }
  }

  /// Once errors are showing, keep them in step with what is typed.
  fn revalidate(&mut self) {
    if !self.validation.is_valid() {
      self.validation = self.form.validate();
    }
  }

  /// Record a failed submission attempt.
  pub fn reject(&mut self, validation: Validation) {
    self.validation = validation;
    self.in_flight = None;
  }

  pub fn start_submit(&mut self, ticket: Ticket) {
    self.validation = Validation::default();
    self.error = None;
    self.in_flight = Some(ticket);
  }

  pub fn submitting(&self) -> bool { self.in_flight.is_some() }

  /// Whether the reply to the write `ticket` belongs to this form.
  pub fn awaits(&self, ticket: Ticket) -> bool { self.in_flight == Some(ticket) }

  pub fn fail(&mut self, message: impl Into<String>) {
    self.error = Some(message.into());
    self.in_flight = None;
  }
}

#[cfg(test)]
mod tests {
  use showroom_core::validate::ShowroomForm;

  use super::*;

  #[test]
  fn typing_goes_to_focused_field() {
    let mut state = FormState::new(ShowroomForm::default());
    state.input('A');
    state.next_field();
    state.input('1');
    state.input('2');
    state.backspace();
    assert_eq!(state.form.name, "A");
    assert_eq!(state.form.address, "1");
  }

  #[test]
  fn focus_wraps() {
    let mut state = FormState::new(ShowroomForm::default());
    state.prev_field();
    assert_eq!(state.focused().map(|f| f.name), Some("description"));
    state.next_field();
    assert_eq!(state.focused().map(|f| f.name), Some("name"));
  }

  #[test]
  fn errors_track_edits_after_failed_submit() {
    let mut state = FormState::new(ShowroomForm::default());
    state.reject(state.form.validate());
    assert_eq!(state.validation.error("name"), Some("Name is required"));
    state.input('A');
    assert_eq!(
      state.validation.error("name"),
      Some("Name must be at least 2 characters")
    );
    state.input('B');
    assert_eq!(state.validation.error("name"), None);
  }
}
