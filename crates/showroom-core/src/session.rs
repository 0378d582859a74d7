//! Sign-in state for one UI session.
//!
//! The provider issues no token. On a successful login or signup the client
//! builds its own [`Session`] from the username and role it submitted, so the
//! role is client-asserted and nothing re-verifies it per request. Role checks
//! in this module gate navigation only; they are not an authorisation
//! boundary.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

// ─── Role ────────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  #[default]
  Buyer,
  Admin,
}

impl Role {
  pub fn parse(text: &str) -> Result<Self> {
    Self::from_str(text.trim()).map_err(|_| Error::UnknownValue {
      kind:  "role",
      value: text.to_owned(),
    })
  }

  /// The other role; used by role pickers.
  pub fn toggled(self) -> Self {
    match self {
      Self::Buyer => Self::Admin,
      Self::Admin => Self::Buyer,
    }
  }
}

// ─── Credentials ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
  #[default]
  Login,
  Signup,
}

impl AuthMode {
  pub fn label(self) -> &'static str {
    match self {
      Self::Login => "Login",
      Self::Signup => "Sign up",
    }
  }
}

/// A validated login or signup submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub mode:     AuthMode,
  pub role:     Role,
  pub username: String,
  pub password: String,
  /// Only present for buyer signups.
  pub email:    Option<String>,
}

impl Credentials {
  /// The session the client fabricates once the provider accepts these
  /// credentials.
  pub fn session(&self) -> Session {
    Session {
      username: self.username.clone(),
      role:     self.role,
    }
  }
}

/// The provider's answer to a login or signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
  Accepted,
  /// Carries the message to show under the form.
  Rejected(String),
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub username: String,
  pub role:     Role,
}

/// Result of asking whether the current session may enter a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  Granted,
  /// Nobody is signed in; show the login form.
  SignInRequired,
  /// Signed in with the wrong role; send the user home.
  Forbidden,
}

/// Explicit holder for the signed-in session, owned by the UI and passed to
/// whatever needs it. Starts anonymous; [`SessionContext::sign_out`] clears it.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
  current: Option<Session>,
}

impl SessionContext {
  pub fn anonymous() -> Self { Self::default() }

  /// Replaces any existing session.
  pub fn sign_in(&mut self, session: Session) { self.current = Some(session); }

  pub fn sign_out(&mut self) -> Option<Session> { self.current.take() }

  pub fn current(&self) -> Option<&Session> { self.current.as_ref() }

  pub fn is_signed_in(&self) -> bool { self.current.is_some() }

  pub fn is_admin(&self) -> bool {
    self.current.as_ref().is_some_and(|s| s.role == Role::Admin)
  }

  /// Gate for a screen that needs `required`, or any signed-in user when
  /// `required` is `None`.
  pub fn access(&self, required: Option<Role>) -> Access {
    match (&self.current, required) {
      (None, _) => Access::SignInRequired,
      (Some(_), None) => Access::Granted,
      (Some(s), Some(role)) if s.role == role => Access::Granted,
      (Some(_), Some(_)) => Access::Forbidden,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn admin() -> Session {
    Session {
      username: "root".into(),
      role:     Role::Admin,
    }
  }

  #[test]
  fn starts_anonymous() {
    let ctx = SessionContext::anonymous();
    assert!(!ctx.is_signed_in());
    assert_eq!(ctx.access(None), Access::SignInRequired);
  }

  #[test]
  fn admin_gate() {
    let mut ctx = SessionContext::anonymous();
    assert_eq!(ctx.access(Some(Role::Admin)), Access::SignInRequired);

    ctx.sign_in(Session {
      username: "pat".into(),
      role:     Role::Buyer,
    });
    assert_eq!(ctx.access(Some(Role::Admin)), Access::Forbidden);
    assert_eq!(ctx.access(None), Access::Granted);

    ctx.sign_in(admin());
    assert_eq!(ctx.access(Some(Role::Admin)), Access::Granted);
    assert!(ctx.is_admin());
  }

  #[test]
  fn sign_out_clears_session() {
    let mut ctx = SessionContext::anonymous();
    ctx.sign_in(admin());
    assert_eq!(ctx.sign_out(), Some(admin()));
    assert!(ctx.current().is_none());
    assert_eq!(ctx.sign_out(), None);
  }

  #[test]
  fn role_parsing() {
    assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
    assert_eq!(Role::parse(" buyer ").unwrap(), Role::Buyer);
    assert!(matches!(
      Role::parse("owner"),
      Err(Error::UnknownValue { kind: "role", .. })
    ));
    assert_eq!(Role::default(), Role::Buyer);
    assert_eq!(Role::Admin.to_string(), "admin");
  }

  #[test]
  fn credentials_become_client_side_session() {
    let creds = Credentials {
      mode:     AuthMode::Login,
      role:     Role::Admin,
      username: "root".into(),
      password: "hunter2".into(),
      email:    None,
    };
    assert_eq!(creds.session(), admin());
  }
}
