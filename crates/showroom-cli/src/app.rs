//! Application state machine and event dispatcher.
//!
//! Key handling never blocks on the network. Provider calls run on spawned
//! tasks and report back as [`Loaded`] messages that the event loop feeds to
//! [`App::apply`]. Screen loads carry a [`Ticket`]; a response whose ticket
//! went stale because the user navigated away is dropped.

use std::{future::Future, sync::Arc};

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use showroom_core::{
  Error as CoreError,
  generation::{Generation, Ticket},
  inquiry::Inquiry,
  provider::DealershipProvider,
  query::{InventoryQuery, InventoryView, QueryInputs, Restriction, restriction_options},
  session::{Access, AuthMode, AuthOutcome, Credentials, Role, SessionContext},
  showroom::{Showroom, vehicles_in_showroom},
  validate::{CarForm, CredentialForm, Form, InquiryForm, ShowroomForm},
  vehicle::{RecordId, Vehicle},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::form::FormState;

/// Number of vehicles on the home screen.
pub const FEATURED: usize = 4;

// ─── Screens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  Home,
  Inventory,
  CarDetail(RecordId),
  Showrooms,
  Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
  #[default]
  Cars,
  Showrooms,
  Inquiries,
}

impl AdminTab {
  pub const ALL: [AdminTab; 3] = [Self::Cars, Self::Showrooms, Self::Inquiries];

  pub fn title(self) -> &'static str {
    match self {
      Self::Cars => "Cars",
      Self::Showrooms => "Showrooms",
      Self::Inquiries => "Inquiries",
    }
  }
}

/// Inventory filter inputs that take typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
  Search,
  MinYear,
  MaxYear,
  MinPrice,
  MaxPrice,
}

impl FilterField {
  pub const ALL: [FilterField; 5] = [
    Self::Search,
    Self::MinYear,
    Self::MaxYear,
    Self::MinPrice,
    Self::MaxPrice,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::Search => "Search",
      Self::MinYear => "Min year",
      Self::MaxYear => "Max year",
      Self::MinPrice => "Min price",
      Self::MaxPrice => "Max price",
    }
  }

  pub fn value(self, inputs: &QueryInputs) -> &str {
    match self {
      Self::Search => &inputs.search,
      Self::MinYear => &inputs.min_year,
      Self::MaxYear => &inputs.max_year,
      Self::MinPrice => &inputs.min_price,
      Self::MaxPrice => &inputs.max_price,
    }
  }

  fn value_mut(self, inputs: &mut QueryInputs) -> &mut String {
    match self {
      Self::Search => &mut inputs.search,
      Self::MinYear => &mut inputs.min_year,
      Self::MaxYear => &mut inputs.max_year,
      Self::MinPrice => &mut inputs.min_price,
      Self::MaxPrice => &mut inputs.max_price,
    }
  }
}

/// State of the detail screen's record.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
  Loading,
  Found(Vehicle),
  NotFound,
  Failed,
}

/// What a delete confirmation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
  Vehicle(RecordId),
  Showroom(RecordId),
  Inquiry(RecordId),
}

impl Target {
  pub fn noun(self) -> &'static str {
    match self {
      Self::Vehicle(_) => "car",
      Self::Showroom(_) => "showroom",
      Self::Inquiry(_) => "inquiry",
    }
  }
}

/// Overlay that captures all keys while open.
#[derive(Debug, Clone)]
pub enum Modal {
  Login(FormState<CredentialForm>),
  Inquiry(FormState<InquiryForm>),
  CarEditor {
    id:   Option<RecordId>,
    form: FormState<CarForm>,
  },
  ShowroomEditor {
    id:   Option<RecordId>,
    form: FormState<ShowroomForm>,
  },
  ConfirmDelete(Target),
}

impl Modal {
  /// Whether this modal is the form that sent the write `ticket`.
  fn awaits(&self, ticket: Ticket) -> bool {
    match self {
      Self::Login(form) => form.awaits(ticket),
      Self::Inquiry(form) => form.awaits(ticket),
      Self::CarEditor { form, .. } => form.awaits(ticket),
      Self::ShowroomEditor { form, .. } => form.awaits(ticket),
      Self::ConfirmDelete(_) => false,
    }
  }
}

// ─── Messages ─────────────────────────────────────────────────────────────────

/// Results of spawned provider calls. Errors arrive as the cause's text; the
/// user only ever sees a generic message.
///
/// Screen loads carry a screen [`Ticket`]. Form submissions carry the write
/// ticket stored on the form that sent them.
#[derive(Debug)]
pub enum Loaded {
  Vehicles(Ticket, Result<Vec<Vehicle>, String>),
  Vehicle(Ticket, Result<Option<Vehicle>, String>),
  Showrooms(Ticket, Result<Vec<Showroom>, String>),
  Inquiries(Ticket, Result<Vec<Inquiry>, String>),
  Auth {
    ticket:      Ticket,
    credentials: Credentials,
    outcome:     Result<AuthOutcome, String>,
  },
  InquirySent(Ticket, Result<Inquiry, String>),
  VehicleSaved(Ticket, Result<Vehicle, String>),
  ShowroomSaved(Ticket, Result<Showroom, String>),
  Deleted(Target, Result<(), String>),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<P> {
  pub screen:       Screen,
  pub modal:        Option<Modal>,
  pub session:      SessionContext,
  generation:       Generation,
  /// Tickets for form submissions. Never advanced by navigation.
  writes:           Generation,
  /// Screen to enter once the pending sign-in succeeds.
  pending:          Option<Screen>,

  pub vehicles:     Vec<Vehicle>,
  pub showrooms:    Vec<Showroom>,
  pub inquiries:    Vec<Inquiry>,
  pub detail:       Detail,
  /// Screen loads still in flight for the current generation.
  outstanding:      usize,

  pub inputs:       QueryInputs,
  /// Filter input being typed into; `None` when the list has focus.
  pub filter_focus: Option<FilterField>,
  /// Cursor in the current screen's list.
  pub cursor:       usize,
  pub admin_tab:    AdminTab,

  /// One-line status message shown in the status bar.
  pub status_msg:   String,
  pub should_quit:  bool,

  provider:         Arc<P>,
  tx:               UnboundedSender<Loaded>,
}

impl<P> App<P>
where
  P: DealershipProvider + 'static,
{
  /// Create an [`App`] on the home screen plus the receiver the event loop
  /// drains into [`App::apply`].
  pub fn new(provider: P) -> (Self, UnboundedReceiver<Loaded>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Self {
      screen: Screen::Home,
      modal: None,
      session: SessionContext::anonymous(),
      generation: Generation::new(),
      writes: Generation::new(),
      pending: None,
      vehicles: Vec::new(),
      showrooms: Vec::new(),
      inquiries: Vec::new(),
      detail: Detail::Loading,
      outstanding: 0,
      inputs: QueryInputs::default(),
      filter_focus: None,
      cursor: 0,
      admin_tab: AdminTab::default(),
      status_msg: String::new(),
      should_quit: false,
      provider: Arc::new(provider),
      tx,
    };
    (app, rx)
  }

  /// Kick off the initial load for the home screen.
  pub fn start(&mut self) { self.navigate(Screen::Home); }
}

// Read-only views over loaded data.
impl<P> App<P> {
  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn query(&self) -> InventoryQuery { InventoryQuery::from_inputs(&self.inputs) }

  /// Whether any load for the current screen has yet to report back.
  pub fn loading(&self) -> bool { self.outstanding > 0 }

  /// The inventory list as filtered and sorted right now.
  pub fn inventory(&self) -> InventoryView<'_> {
    InventoryView::new(&self.vehicles, &self.query())
  }

  pub fn featured(&self) -> Vec<&Vehicle> {
    showroom_core::query::featured(&self.vehicles, FEATURED)
  }

  pub fn selected_showroom(&self) -> Option<&Showroom> {
    self.showrooms.get(self.cursor)
  }

  pub fn showroom_vehicles(&self) -> Vec<&Vehicle> {
    self
      .selected_showroom()
      .map(|s| vehicles_in_showroom(&self.vehicles, s.id))
      .unwrap_or_default()
  }

  fn list_len(&self) -> usize {
    match self.screen {
      Screen::Home => self.featured().len(),
      Screen::Inventory => self.inventory().shown(),
      Screen::CarDetail(_) => 0,
      Screen::Showrooms => self.showrooms.len(),
      Screen::Admin => match self.admin_tab {
        AdminTab::Cars => self.vehicles.len(),
        AdminTab::Showrooms => self.showrooms.len(),
        AdminTab::Inquiries => self.inquiries.len(),
      },
    }
  }

  fn cursor_vehicle_id(&self) -> Option<RecordId> {
    match self.screen {
      Screen::Home => self.featured().get(self.cursor).map(|v| v.id),
      Screen::Inventory => self.inventory().vehicles.get(self.cursor).map(|v| v.id),
      Screen::Admin if self.admin_tab == AdminTab::Cars => {
        self.vehicles.get(self.cursor).map(|v| v.id)
      }
      _ => None,
    }
  }
}

impl<P> App<P>
where
  P: DealershipProvider + 'static,
{
  // ── Navigation ────────────────────────────────────────────────────────────

  /// Enter `screen`, invalidating every load still in flight for the screen
  /// being left.
  pub fn navigate(&mut self, screen: Screen) {
    if screen == Screen::Admin {
      match self.session.access(Some(Role::Admin)) {
        Access::Granted => {}
        Access::SignInRequired => {
          self.pending = Some(Screen::Admin);
          self.open_login();
          return;
        }
        Access::Forbidden => {
          self.status_msg = "The admin area is for admin accounts".into();
          return;
        }
      }
    }

    let ticket = self.generation.advance();
    self.screen = screen;
    self.cursor = 0;
    self.filter_focus = None;
    self.outstanding = 0;

    match screen {
      Screen::Home | Screen::Inventory => self.load_vehicles(ticket),
      Screen::CarDetail(id) => {
        self.detail = Detail::Loading;
        self.load_vehicle(ticket, id);
      }
      Screen::Showrooms => {
        self.load_showrooms(ticket);
        self.load_vehicles(ticket);
      }
      Screen::Admin => self.reload_admin(ticket),
    }
  }

  fn reload_admin(&mut self, ticket: Ticket) {
    self.load_vehicles(ticket);
    self.load_showrooms(ticket);
    self.load_inquiries(ticket);
  }

  fn open_login(&mut self) {
    self.modal = Some(Modal::Login(FormState::new(CredentialForm::new(
      AuthMode::Login,
    ))));
  }

  fn sign_out(&mut self) {
    if let Some(session) = self.session.sign_out() {
      info!(username = %session.username, "signed out");
      self.status_msg = "Signed out".into();
    }
    if self.screen == Screen::Admin {
      self.navigate(Screen::Home);
    }
  }

  // ── Spawning ──────────────────────────────────────────────────────────────

  /// Run `call` against the provider on a new task and send its result,
  /// wrapped by `wrap`, back to the event loop.
  fn dispatch<T, F, Fut>(
    &self,
    call: F,
    wrap: impl FnOnce(Result<T, String>) -> Loaded + Send + 'static,
  ) where
    T: Send + 'static,
    F: FnOnce(Arc<P>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, P::Error>> + Send + 'static,
  {
    let provider = Arc::clone(&self.provider);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = call(provider).await.map_err(|e| e.to_string());
      // The receiver only goes away on shutdown.
      let _ = tx.send(wrap(result));
    });
  }

  fn load_vehicles(&mut self, ticket: Ticket) {
    self.outstanding += 1;
    self.dispatch(
      |p| async move { p.list_vehicles().await },
      move |r| Loaded::Vehicles(ticket, r),
    );
  }

  fn load_vehicle(&mut self, ticket: Ticket, id: RecordId) {
    self.outstanding += 1;
    self.dispatch(
      move |p| async move { p.get_vehicle(id).await },
      move |r| Loaded::Vehicle(ticket, r),
    );
  }

  fn load_showrooms(&mut self, ticket: Ticket) {
    self.outstanding += 1;
    self.dispatch(
      |p| async move { p.list_showrooms().await },
      move |r| Loaded::Showrooms(ticket, r),
    );
  }

  fn load_inquiries(&mut self, ticket: Ticket) {
    self.outstanding += 1;
    self.dispatch(
      |p| async move { p.list_inquiries().await },
      move |r| Loaded::Inquiries(ticket, r),
    );
  }

  // ── Responses ─────────────────────────────────────────────────────────────

  /// Drop a load for a screen the user has left; otherwise count it done.
  fn is_stale(&mut self, ticket: Ticket, what: &str) -> bool {
    let stale = !self.generation.is_current(ticket);
    if stale {
      debug!(what, "dropping stale response");
    } else {
      self.outstanding = self.outstanding.saturating_sub(1);
    }
    stale
  }

  /// Close the open modal if it is the form that sent the write `ticket`.
  fn close_modal_for(&mut self, ticket: Ticket) {
    if self.modal.as_ref().is_some_and(|m| m.awaits(ticket)) {
      self.modal = None;
    }
  }

  fn failed(&mut self, message: &str, cause: &str) {
    warn!(error = %cause, "{message}");
    self.status_msg = message.to_string();
  }

  /// Fold one finished provider call into the state.
  pub fn apply(&mut self, loaded: Loaded) {
    match loaded {
      Loaded::Vehicles(ticket, result) => {
        if self.is_stale(ticket, "vehicles") {
          return;
        }
        match result {
          Ok(vehicles) => {
            self.vehicles = vehicles;
            self.clamp_cursor();
          }
          Err(cause) => self.failed("Failed to load cars", &cause),
        }
      }

      Loaded::Vehicle(ticket, result) => {
        if self.is_stale(ticket, "vehicle") {
          return;
        }
        self.detail = match result {
          Ok(Some(vehicle)) => Detail::Found(vehicle),
          Ok(None) => Detail::NotFound,
          Err(cause) => {
            self.failed("Failed to load car details", &cause);
            Detail::Failed
          }
        };
      }

      Loaded::Showrooms(ticket, result) => {
        if self.is_stale(ticket, "showrooms") {
          return;
        }
        match result {
          Ok(showrooms) => {
            self.showrooms = showrooms;
            self.clamp_cursor();
          }
          Err(cause) => self.failed("Failed to load showrooms", &cause),
        }
      }

      Loaded::Inquiries(ticket, result) => {
        if self.is_stale(ticket, "inquiries") {
          return;
        }
        match result {
          Ok(inquiries) => {
            self.inquiries = inquiries;
            self.clamp_cursor();
          }
          Err(cause) => self.failed("Failed to load inquiries", &cause),
        }
      }

      Loaded::Auth {
        ticket,
        credentials,
        outcome,
      } => self.finish_auth(ticket, credentials, outcome),

      Loaded::InquirySent(ticket, result) => match result {
        Ok(inquiry) => {
          info!(id = inquiry.id, "inquiry sent");
          self.close_modal_for(ticket);
          self.status_msg =
            "Your message has been sent successfully! We will contact you soon."
              .into();
        }
        Err(cause) => match &mut self.modal {
          Some(Modal::Inquiry(form)) if form.awaits(ticket) => {
            warn!(error = %cause, "failed to send inquiry");
            form.fail("Failed to send message. Please try again.");
          }
          _ => self.failed("Failed to send message. Please try again.", &cause),
        },
      },

      Loaded::VehicleSaved(ticket, result) => match result {
        Ok(vehicle) => {
          info!(id = vehicle.id, "car saved");
          self.close_modal_for(ticket);
          self.after_write("Car saved");
        }
        Err(cause) => match &mut self.modal {
          Some(Modal::CarEditor { form, .. }) if form.awaits(ticket) => {
            warn!(error = %cause, "failed to save car");
            form.fail("Failed to save car");
          }
          _ => self.failed("Failed to save car", &cause),
        },
      },

      Loaded::ShowroomSaved(ticket, result) => match result {
        Ok(showroom) => {
          info!(id = showroom.id, "showroom saved");
          self.close_modal_for(ticket);
          self.after_write("Showroom saved");
        }
        Err(cause) => match &mut self.modal {
          Some(Modal::ShowroomEditor { form, .. }) if form.awaits(ticket) => {
            warn!(error = %cause, "failed to save showroom");
            form.fail("Failed to save showroom");
          }
          _ => self.failed("Failed to save showroom", &cause),
        },
      },

      Loaded::Deleted(target, result) => match result {
        Ok(()) => {
          info!(?target, "deleted");
          self.after_write(match target {
            Target::Vehicle(_) => "Car deleted",
            Target::Showroom(_) => "Showroom deleted",
            Target::Inquiry(_) => "Inquiry deleted",
          });
        }
        Err(cause) => {
          self.failed(&format!("Failed to delete {}", target.noun()), &cause);
        }
      },
    }
  }

  fn finish_auth(
    &mut self,
    ticket: Ticket,
    credentials: Credentials,
    outcome: Result<AuthOutcome, String>,
  ) {
    let fallback = match credentials.mode {
      AuthMode::Login => "Login failed",
      AuthMode::Signup => "Signup failed",
    };
    let form = match &mut self.modal {
      Some(Modal::Login(form)) if form.awaits(ticket) => form,
      _ => {
        debug!("auth response for a login form that is no longer open");
        return;
      }
    };

    match outcome {
      Ok(AuthOutcome::Accepted) => {
        let session = credentials.session();
        info!(username = %session.username, role = %session.role, "signed in");
        self.session.sign_in(session);
        self.modal = None;
        self.status_msg = format!("Welcome, {}", credentials.username);
        if let Some(screen) = self.pending.take() {
          self.navigate(screen);
        }
      }
      Ok(AuthOutcome::Rejected(message)) => {
        info!(username = %credentials.username, "sign-in rejected");
        form.fail(message);
      }
      Err(cause) => {
        warn!(error = %cause, "{fallback}");
        form.fail(fallback);
      }
    }
  }

  /// Report a finished write and refresh the current admin data.
  fn after_write(&mut self, message: &str) {
    self.status_msg = message.to_string();
    if self.screen == Screen::Admin {
      let ticket = self.generation.ticket();
      self.reload_admin(ticket);
    }
  }

  fn clamp_cursor(&mut self) {
    self.cursor = self.cursor.min(self.list_len().saturating_sub(1));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event.
  pub fn handle_key(&mut self, key: KeyEvent) {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      self.should_quit = true;
      return;
    }

    if self.modal.is_some() {
      self.handle_modal_key(key);
      return;
    }

    if let Some(field) = self.filter_focus {
      self.handle_filter_key(field, key);
      return;
    }

    if self.handle_common_key(key) {
      return;
    }

    match self.screen {
      Screen::Home | Screen::Inventory | Screen::Showrooms => {
        self.handle_list_key(key)
      }
      Screen::CarDetail(id) => self.handle_detail_key(id, key),
      Screen::Admin => self.handle_admin_key(key),
    }
  }

  /// Navigation keys shared by every screen. Returns `true` when consumed.
  fn handle_common_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => self.should_quit = true,
      KeyCode::Char('H') => self.navigate(Screen::Home),
      KeyCode::Char('I') => self.navigate(Screen::Inventory),
      KeyCode::Char('S') => self.navigate(Screen::Showrooms),
      KeyCode::Char('A') => self.navigate(Screen::Admin),
      KeyCode::Char('L') => {
        if self.session.is_signed_in() {
          self.sign_out();
        } else {
          self.pending = None;
          self.open_login();
        }
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.list_len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }
      _ => return false,
    }
    true
  }

  fn handle_list_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Enter => {
        if let Some(id) = self.cursor_vehicle_id() {
          self.navigate(Screen::CarDetail(id));
        }
      }
      _ if self.screen != Screen::Inventory => {}
      KeyCode::Char('/') => self.filter_focus = Some(FilterField::Search),
      KeyCode::Tab => self.filter_focus = Some(FilterField::MinYear),
      KeyCode::Char('s') => {
        self.inputs.sort = self.inputs.sort.next();
        self.cursor = 0;
      }
      KeyCode::Char('t') => self.cycle_restriction(),
      KeyCode::Char('c') => {
        self.inputs = QueryInputs::default();
        self.cursor = 0;
      }
      _ => {}
    }
  }

  fn cycle_restriction(&mut self) {
    let options = restriction_options(&self.vehicles);
    let at = options
      .iter()
      .position(|r| *r == self.inputs.restriction)
      .unwrap_or(0);
    self.inputs.restriction = options
      .get((at + 1) % options.len().max(1))
      .cloned()
      .unwrap_or(Restriction::All);
    self.cursor = 0;
  }

  fn handle_filter_key(&mut self, field: FilterField, key: KeyEvent) {
    let order = FilterField::ALL;
    let at = order.iter().position(|f| *f == field).unwrap_or(0);
    match key.code {
      KeyCode::Esc | KeyCode::Enter => self.filter_focus = None,
      KeyCode::Tab => {
        self.filter_focus = order.get(at + 1).copied();
      }
      KeyCode::BackTab => {
        self.filter_focus = at.checked_sub(1).and_then(|i| order.get(i)).copied();
      }
      KeyCode::Backspace => {
        field.value_mut(&mut self.inputs).pop();
        self.cursor = 0;
      }
      KeyCode::Char(c) => {
        field.value_mut(&mut self.inputs).push(c);
        self.cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_detail_key(&mut self, id: RecordId, key: KeyEvent) {
    match key.code {
      KeyCode::Esc | KeyCode::Backspace => self.navigate(Screen::Inventory),
      KeyCode::Char('i') => {
        if let Detail::Found(vehicle) = &self.detail
          && vehicle.id == id
        {
          self.modal = Some(Modal::Inquiry(FormState::new(
            InquiryForm::for_vehicle(vehicle),
          )));
        }
      }
      _ => {}
    }
  }

  fn handle_admin_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('1') => self.switch_tab(AdminTab::Cars),
      KeyCode::Char('2') => self.switch_tab(AdminTab::Showrooms),
      KeyCode::Char('3') => self.switch_tab(AdminTab::Inquiries),
      KeyCode::Tab => {
        let at = AdminTab::ALL
          .iter()
          .position(|t| *t == self.admin_tab)
          .unwrap_or(0);
        self.switch_tab(AdminTab::ALL[(at + 1) % AdminTab::ALL.len()]);
      }
      KeyCode::Char('n') => self.open_editor(None),
      KeyCode::Char('e') => {
        let id = match self.admin_tab {
          AdminTab::Cars => self.vehicles.get(self.cursor).map(|v| v.id),
          AdminTab::Showrooms => self.showrooms.get(self.cursor).map(|s| s.id),
          AdminTab::Inquiries => None,
        };
        if id.is_some() {
          self.open_editor(id);
        }
      }
      KeyCode::Char('d') => {
        let target = match self.admin_tab {
          AdminTab::Cars => {
            self.vehicles.get(self.cursor).map(|v| Target::Vehicle(v.id))
          }
          AdminTab::Showrooms => {
            self.showrooms.get(self.cursor).map(|s| Target::Showroom(s.id))
          }
          AdminTab::Inquiries => {
            self.inquiries.get(self.cursor).map(|i| Target::Inquiry(i.id))
          }
        };
        self.modal = target.map(Modal::ConfirmDelete);
      }
      KeyCode::Enter if self.admin_tab == AdminTab::Cars => {
        if let Some(id) = self.cursor_vehicle_id() {
          self.navigate(Screen::CarDetail(id));
        }
      }
      _ => {}
    }
  }

  fn switch_tab(&mut self, tab: AdminTab) {
    self.admin_tab = tab;
    self.cursor = 0;
  }

  /// Open the create (`id == None`) or edit form for the current tab.
  fn open_editor(&mut self, id: Option<RecordId>) {
    self.modal = match self.admin_tab {
      AdminTab::Cars => {
        let form = id
          .and_then(|id| self.vehicles.iter().find(|v| v.id == id))
          .map(CarForm::from_vehicle)
          .unwrap_or_default();
        Some(Modal::CarEditor {
          id,
          form: FormState::new(form),
        })
      }
      AdminTab::Showrooms => {
        let form = id
          .and_then(|id| self.showrooms.iter().find(|s| s.id == id))
          .map(ShowroomForm::from_showroom)
          .unwrap_or_default();
        Some(Modal::ShowroomEditor {
          id,
          form: FormState::new(form),
        })
      }
      AdminTab::Inquiries => None,
    };
  }

  // ── Modals ────────────────────────────────────────────────────────────────

  fn handle_modal_key(&mut self, key: KeyEvent) {
    let Some(modal) = &mut self.modal else {
      return;
    };

    if key.code == KeyCode::Esc {
      self.modal = None;
      self.pending = None;
      return;
    }

    match modal {
      Modal::ConfirmDelete(target) => {
        let target = *target;
        match key.code {
          KeyCode::Char('y') | KeyCode::Char('Y') => {
            self.modal = None;
            self.delete(target);
          }
          KeyCode::Char('n') | KeyCode::Char('N') => self.modal = None,
          _ => {}
        }
      }
      Modal::Login(form) => {
        let on_role = form.focused().is_some_and(|f| f.name == "role");
        match key.code {
          KeyCode::F(2) => {
            let mode = match form.form.mode {
              AuthMode::Login => AuthMode::Signup,
              AuthMode::Signup => AuthMode::Login,
            };
            form.form.switch_mode(mode);
            *form = FormState::new(form.form.clone());
          }
          KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if on_role => {
            form.form.toggle_role();
            form.clamp_focus();
          }
          KeyCode::Char(_) if on_role => {}
          KeyCode::Enter => self.submit_login(),
          _ => edit_form(form, key),
        }
      }
      Modal::Inquiry(form) => match key.code {
        KeyCode::Enter => self.submit_inquiry(),
        _ => edit_form(form, key),
      },
      Modal::CarEditor { form, .. } => match key.code {
        KeyCode::Enter => self.submit_car(),
        _ => edit_form(form, key),
      },
      Modal::ShowroomEditor { form, .. } => match key.code {
        KeyCode::Enter => self.submit_showroom(),
        _ => edit_form(form, key),
      },
    }
  }

  fn submit_login(&mut self) {
    let Some(Modal::Login(form)) = &mut self.modal else {
      return;
    };
    if form.submitting() {
      return;
    }
    let credentials = match form.form.to_credentials() {
      Ok(credentials) => credentials,
      Err(err) => return reject(form, err),
    };
    let ticket = self.writes.advance();
    form.start_submit(ticket);

    let sent = credentials.clone();
    self.dispatch(
      move |p| async move {
        match sent.mode {
          AuthMode::Login => p.login(sent).await,
          AuthMode::Signup => p.signup(sent).await,
        }
      },
      move |outcome| Loaded::Auth {
        ticket,
        credentials,
        outcome,
      },
    );
  }

  fn submit_inquiry(&mut self) {
    let Some(Modal::Inquiry(form)) = &mut self.modal else {
      return;
    };
    if form.submitting() {
      return;
    }
    let inquiry = match form.form.to_new_inquiry(Utc::now()) {
      Ok(inquiry) => inquiry,
      Err(err) => return reject(form, err),
    };
    let ticket = self.writes.advance();
    form.start_submit(ticket);
    self.dispatch(
      move |p| async move { p.create_inquiry(inquiry).await },
      move |r| Loaded::InquirySent(ticket, r),
    );
  }

  fn submit_car(&mut self) {
    let Some(Modal::CarEditor { id, form }) = &mut self.modal else {
      return;
    };
    if form.submitting() {
      return;
    }
    let input = match form.form.to_new_vehicle() {
      Ok(input) => input,
      Err(err) => return reject(form, err),
    };
    let ticket = self.writes.advance();
    form.start_submit(ticket);
    let id = *id;
    self.dispatch(
      move |p| async move {
        match id {
          Some(id) => p.update_vehicle(id, input).await,
          None => p.create_vehicle(input).await,
        }
      },
      move |r| Loaded::VehicleSaved(ticket, r),
    );
  }

  fn submit_showroom(&mut self) {
    let Some(Modal::ShowroomEditor { id, form }) = &mut self.modal else {
      return;
    };
    if form.submitting() {
      return;
    }
    let input = match form.form.to_new_showroom() {
      Ok(input) => input,
      Err(err) => return reject(form, err),
    };
    let ticket = self.writes.advance();
    form.start_submit(ticket);
    let id = *id;
    self.dispatch(
      move |p| async move {
        match id {
          Some(id) => p.update_showroom(id, input).await,
          None => p.create_showroom(input).await,
        }
      },
      move |r| Loaded::ShowroomSaved(ticket, r),
    );
  }

  fn delete(&mut self, target: Target) {
    self.dispatch(
      move |p| async move {
        match target {
          Target::Vehicle(id) => p.delete_vehicle(id).await,
          Target::Showroom(id) => p.delete_showroom(id).await,
          Target::Inquiry(id) => p.delete_inquiry(id).await,
        }
      },
      move |r| Loaded::Deleted(target, r),
    );
  }
}

/// Field navigation and typing shared by every form modal.
fn edit_form<F: Form>(form: &mut FormState<F>, key: KeyEvent) {
  match key.code {
    KeyCode::Tab | KeyCode::Down => form.next_field(),
    KeyCode::BackTab | KeyCode::Up => form.prev_field(),
    KeyCode::Backspace => form.backspace(),
    KeyCode::Char(c) => form.input(c),
    _ => {}
  }
}

/// Show why a form could not be converted into its payload.
fn reject<F: Form>(form: &mut FormState<F>, err: CoreError) {
  match err {
    CoreError::Invalid { validation, .. } => form.reject(validation),
    other => form.fail(other.to_string()),
  }
}

#[cfg(test)]
mod tests;
