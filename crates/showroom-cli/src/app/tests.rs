use std::{fmt, sync::Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use showroom_core::{
  inquiry::{Inquiry, NewInquiry},
  provider::DealershipProvider,
  session::{AuthOutcome, Credentials, Role},
  showroom::{NewShowroom, Showroom},
  vehicle::{NewVehicle, RecordId, Vehicle},
};
use tokio::sync::mpsc::UnboundedReceiver;

use super::*;

// ─── Stub provider ───────────────────────────────────────────────────────────

#[derive(Debug)]
struct StubError;

impl fmt::Display for StubError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("connection refused")
  }
}

impl std::error::Error for StubError {}

/// In-memory provider. Records every write it receives.
#[derive(Default)]
struct StubProvider {
  vehicles:      Vec<Vehicle>,
  showrooms:     Vec<Showroom>,
  fail_reads:    bool,
  reject_logins: bool,
  writes:        Mutex<Vec<String>>,
}

impl StubProvider {
  fn record(&self, what: String) {
    self.writes.lock().unwrap().push(what);
  }

  fn read<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, StubError> {
    if self.fail_reads {
      Err(StubError)
    } else {
      Ok(items.to_vec())
    }
  }
}

impl DealershipProvider for StubProvider {
  type Error = StubError;

  async fn list_vehicles(&self) -> Result<Vec<Vehicle>, StubError> {
    self.read(&self.vehicles)
  }

  async fn get_vehicle(&self, id: RecordId) -> Result<Option<Vehicle>, StubError> {
    Ok(self.vehicles.iter().find(|v| v.id == id).cloned())
  }

  async fn create_vehicle(&self, input: NewVehicle) -> Result<Vehicle, StubError> {
    self.record(format!("create car {}", input.make));
    Ok(input.into_vehicle(100))
  }

  async fn update_vehicle(
    &self,
    id: RecordId,
    input: NewVehicle,
  ) -> Result<Vehicle, StubError> {
    self.record(format!("update car {id}"));
    Ok(input.into_vehicle(id))
  }

  async fn delete_vehicle(&self, id: RecordId) -> Result<(), StubError> {
    self.record(format!("delete car {id}"));
    Ok(())
  }

  async fn list_showrooms(&self) -> Result<Vec<Showroom>, StubError> {
    self.read(&self.showrooms)
  }

  async fn get_showroom(&self, id: RecordId) -> Result<Option<Showroom>, StubError> {
    Ok(self.showrooms.iter().find(|s| s.id == id).cloned())
  }

  async fn create_showroom(&self, input: NewShowroom) -> Result<Showroom, StubError> {
    self.record(format!("create showroom {}", input.name));
    Ok(input.into_showroom(100))
  }

  async fn update_showroom(
    &self,
    id: RecordId,
    input: NewShowroom,
  ) -> Result<Showroom, StubError> {
    self.record(format!("update showroom {id}"));
    Ok(input.into_showroom(id))
  }

  async fn delete_showroom(&self, id: RecordId) -> Result<(), StubError> {
    self.record(format!("delete showroom {id}"));
    Ok(())
  }

  async fn list_inquiries(&self) -> Result<Vec<Inquiry>, StubError> {
    self.read(&[])
  }

  async fn get_inquiry(&self, _id: RecordId) -> Result<Option<Inquiry>, StubError> {
    Ok(None)
  }

  async fn create_inquiry(&self, input: NewInquiry) -> Result<Inquiry, StubError> {
    self.record(format!("inquiry about {:?}", input.car_id));
    Ok(Inquiry {
      id:         1,
      name:       input.name,
      email:      input.email,
      phone:      input.phone,
      message:    input.message,
      car_id:     input.car_id,
      subject:    input.subject,
      created_at: input.created_at,
      car:        None,
    })
  }

  async fn delete_inquiry(&self, id: RecordId) -> Result<(), StubError> {
    self.record(format!("delete inquiry {id}"));
    Ok(())
  }

  async fn login(&self, credentials: Credentials) -> Result<AuthOutcome, StubError> {
    self.record(format!("login {} as {}", credentials.username, credentials.role));
    if self.reject_logins {
      Ok(AuthOutcome::Rejected("Invalid credentials".into()))
    } else {
      Ok(AuthOutcome::Accepted)
    }
  }

  async fn signup(&self, credentials: Credentials) -> Result<AuthOutcome, StubError> {
    self.record(format!("signup {}", credentials.username));
    Ok(AuthOutcome::Accepted)
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn car(id: RecordId, make: &str, year: i32, price: f64) -> Vehicle {
  Vehicle {
    id,
    make: make.into(),
    model: "Model".into(),
    year,
    price,
    mileage: None,
    color: None,
    engine: None,
    transmission: None,
    fuel_type: None,
    body_type: None,
    description: None,
    image_url: None,
    showroom_id: Some(1),
  }
}

fn stock() -> StubProvider {
  StubProvider {
    vehicles: vec![
      car(1, "Honda", 2019, 18000.0),
      car(2, "Ford", 2022, 32000.0),
      car(3, "Honda", 2021, 24000.0),
      car(4, "Tesla", 2023, 45000.0),
      car(5, "Kia", 2015, 9000.0),
    ],
    showrooms: vec![Showroom {
      id:          1,
      name:        "Downtown Motors".into(),
      address:     "12 Main Street".into(),
      phone:       "555 123 4567".into(),
      email:       "sales@downtown.example".into(),
      hours:       None,
      description: None,
    }],
    ..Default::default()
  }
}

fn press(app: &mut App<StubProvider>, code: KeyCode) {
  app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App<StubProvider>, text: &str) {
  for c in text.chars() {
    press(app, KeyCode::Char(c));
  }
}

/// Apply the next `n` provider results.
async fn pump(
  app: &mut App<StubProvider>,
  rx: &mut UnboundedReceiver<Loaded>,
  n: usize,
) {
  for _ in 0..n {
    let loaded = rx.recv().await.unwrap();
    app.apply(loaded);
  }
}

fn writes(app: &App<StubProvider>) -> Vec<String> {
  app.provider.writes.lock().unwrap().clone()
}

/// Sign in through the login modal as `username` with `role`.
async fn sign_in(
  app: &mut App<StubProvider>,
  rx: &mut UnboundedReceiver<Loaded>,
  username: &str,
  role: Role,
) {
  press(app, KeyCode::Char('L'));
  if role == Role::Admin {
    press(app, KeyCode::Right);
  }
  press(app, KeyCode::Down);
  type_text(app, username);
  press(app, KeyCode::Down);
  type_text(app, "secret");
  press(app, KeyCode::Enter);
  pump(app, rx, 1).await;
}

// ─── Inventory ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn home_shows_newest_vehicles() {
  let (mut app, mut rx) = App::new(stock());
  app.start();
  pump(&mut app, &mut rx, 1).await;

  let ids: Vec<_> = app.featured().iter().map(|v| v.id).collect();
  assert_eq!(ids, vec![4, 2, 3, 1]);
  assert!(!app.loading());
}

#[tokio::test]
async fn showrooms_keep_loading_until_every_list_arrives() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::Showrooms);
  assert!(app.loading());

  pump(&mut app, &mut rx, 1).await;
  assert!(app.loading());
  pump(&mut app, &mut rx, 1).await;
  assert!(!app.loading());
  assert_eq!(app.showrooms.len(), 1);
  assert_eq!(app.vehicles.len(), 5);
}

#[tokio::test]
async fn search_and_sort_from_keys() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::Inventory);
  pump(&mut app, &mut rx, 1).await;

  press(&mut app, KeyCode::Char('/'));
  type_text(&mut app, "honda");
  press(&mut app, KeyCode::Esc);
  assert_eq!(app.filter_focus, None);
  let ids: Vec<_> = app.inventory().vehicles.iter().map(|v| v.id).collect();
  assert_eq!(ids, vec![3, 1]);
  assert_eq!(app.inventory().summary(), "Showing 2 of 5 vehicles");

  // year-desc -> year-asc
  press(&mut app, KeyCode::Char('s'));
  let ids: Vec<_> = app.inventory().vehicles.iter().map(|v| v.id).collect();
  assert_eq!(ids, vec![1, 3]);

  press(&mut app, KeyCode::Char('c'));
  assert_eq!(app.inventory().shown(), 5);
}

#[tokio::test]
async fn half_typed_bounds_do_not_filter() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::Inventory);
  pump(&mut app, &mut rx, 1).await;

  press(&mut app, KeyCode::Tab);
  type_text(&mut app, "20x");
  assert_eq!(app.filter_focus, Some(FilterField::MinYear));
  assert_eq!(app.inventory().shown(), 5);

  press(&mut app, KeyCode::Backspace);
  press(&mut app, KeyCode::Char('2'));
  press(&mut app, KeyCode::Char('0'));
  assert_eq!(app.inputs.min_year, "2020");
  let ids: Vec<_> = app.inventory().vehicles.iter().map(|v| v.id).collect();
  assert_eq!(ids, vec![4, 2, 3]);
}

#[tokio::test]
async fn restriction_cycles_through_makes() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::Inventory);
  pump(&mut app, &mut rx, 1).await;

  press(&mut app, KeyCode::Char('t'));
  assert_eq!(app.inputs.restriction, Restriction::Make("Honda".into()));
  assert_eq!(app.inventory().shown(), 2);
}

#[tokio::test]
async fn failed_load_shows_generic_message() {
  let (mut app, mut rx) = App::new(StubProvider {
    fail_reads: true,
    ..stock()
  });
  app.navigate(Screen::Inventory);
  pump(&mut app, &mut rx, 1).await;

  assert_eq!(app.status_msg, "Failed to load cars");
  assert!(app.vehicles.is_empty());
}

// ─── Detail ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn opens_detail_from_list() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::Inventory);
  pump(&mut app, &mut rx, 1).await;

  press(&mut app, KeyCode::Down);
  press(&mut app, KeyCode::Enter);
  assert_eq!(app.screen, Screen::CarDetail(2));
  pump(&mut app, &mut rx, 1).await;
  assert!(matches!(&app.detail, Detail::Found(v) if v.id == 2));
}

#[tokio::test]
async fn unknown_vehicle_is_not_found() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::CarDetail(99));
  pump(&mut app, &mut rx, 1).await;
  assert_eq!(app.detail, Detail::NotFound);
}

#[tokio::test]
async fn response_for_abandoned_screen_is_dropped() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::CarDetail(2));
  // Leave before the detail arrives.
  press(&mut app, KeyCode::Esc);
  assert_eq!(app.screen, Screen::Inventory);

  pump(&mut app, &mut rx, 2).await;
  assert_eq!(app.detail, Detail::Loading);
  assert_eq!(app.vehicles.len(), 5);
}

// ─── Inquiry ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn invalid_inquiry_is_not_sent() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::CarDetail(1));
  pump(&mut app, &mut rx, 1).await;

  press(&mut app, KeyCode::Char('i'));
  press(&mut app, KeyCode::Enter);

  let Some(Modal::Inquiry(form)) = &app.modal else {
    panic!("inquiry form should stay open");
  };
  assert_eq!(form.validation.error("name"), Some("Name is required"));
  assert!(!form.submitting());
  assert!(writes(&app).is_empty());
}

#[tokio::test]
async fn valid_inquiry_is_sent() {
  let (mut app, mut rx) = App::new(stock());
  app.navigate(Screen::CarDetail(1));
  pump(&mut app, &mut rx, 1).await;

  press(&mut app, KeyCode::Char('i'));
  type_text(&mut app, "Dana Scully");
  press(&mut app, KeyCode::Tab);
  type_text(&mut app, "dana@example.com");
  press(&mut app, KeyCode::Tab);
  type_text(&mut app, "555 123 4567");
  press(&mut app, KeyCode::Enter);
  pump(&mut app, &mut rx, 1).await;

  assert!(app.modal.is_none());
  assert!(app.status_msg.starts_with("Your message has been sent"));
  assert_eq!(writes(&app), vec!["inquiry about Some(1)"]);
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_area_asks_for_sign_in_then_enters() {
  let (mut app, mut rx) = App::new(stock());
  press(&mut app, KeyCode::Char('A'));
  assert_eq!(app.screen, Screen::Home);
  assert!(matches!(app.modal, Some(Modal::Login(_))));

  press(&mut app, KeyCode::Right);
  press(&mut app, KeyCode::Down);
  type_text(&mut app, "root");
  press(&mut app, KeyCode::Down);
  type_text(&mut app, "secret");
  press(&mut app, KeyCode::Enter);
  pump(&mut app, &mut rx, 1).await;

  assert!(app.session.is_admin());
  assert_eq!(app.screen, Screen::Admin);
  pump(&mut app, &mut rx, 3).await;
  assert_eq!(app.vehicles.len(), 5);
  assert_eq!(writes(&app), vec!["login root as admin"]);
}

#[tokio::test]
async fn buyer_is_kept_out_of_admin() {
  let (mut app, mut rx) = App::new(stock());
  sign_in(&mut app, &mut rx, "pat", Role::Buyer).await;
  assert!(app.session.is_signed_in());

  press(&mut app, KeyCode::Char('A'));
  assert_eq!(app.screen, Screen::Home);
  assert_eq!(app.status_msg, "The admin area is for admin accounts");
}

#[tokio::test]
async fn rejected_login_keeps_form_open() {
  let (mut app, mut rx) = App::new(StubProvider {
    reject_logins: true,
    ..stock()
  });
  sign_in(&mut app, &mut rx, "pat", Role::Buyer).await;

  assert!(!app.session.is_signed_in());
  let Some(Modal::Login(form)) = &app.modal else {
    panic!("login form should stay open");
  };
  assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
}

#[tokio::test]
async fn signing_out_leaves_admin() {
  let (mut app, mut rx) = App::new(stock());
  sign_in(&mut app, &mut rx, "root", Role::Admin).await;
  app.navigate(Screen::Admin);
  pump(&mut app, &mut rx, 3).await;

  press(&mut app, KeyCode::Char('L'));
  assert!(!app.session.is_signed_in());
  assert_eq!(app.screen, Screen::Home);
}

// ─── Admin ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_asks_for_confirmation() {
  let (mut app, mut rx) = App::new(stock());
  sign_in(&mut app, &mut rx, "root", Role::Admin).await;
  app.navigate(Screen::Admin);
  pump(&mut app, &mut rx, 3).await;

  press(&mut app, KeyCode::Char('d'));
  assert!(matches!(
    app.modal,
    Some(Modal::ConfirmDelete(Target::Vehicle(1)))
  ));
  press(&mut app, KeyCode::Char('y'));
  pump(&mut app, &mut rx, 1).await;

  assert_eq!(app.status_msg, "Car deleted");
  assert_eq!(writes(&app), vec!["login root as admin", "delete car 1"]);
}

#[tokio::test]
async fn editing_showroom_sends_update() {
  let (mut app, mut rx) = App::new(stock());
  sign_in(&mut app, &mut rx, "root", Role::Admin).await;
  app.navigate(Screen::Admin);
  pump(&mut app, &mut rx, 3).await;

  press(&mut app, KeyCode::Char('2'));
  press(&mut app, KeyCode::Char('e'));
  let Some(Modal::ShowroomEditor { id, form }) = &app.modal else {
    panic!("showroom editor should open");
  };
  assert_eq!(*id, Some(1));
  assert_eq!(form.form.name, "Downtown Motors");

  press(&mut app, KeyCode::Enter);
  pump(&mut app, &mut rx, 1).await;
  assert!(app.modal.is_none());
  assert_eq!(app.status_msg, "Showroom saved");
  assert_eq!(writes(&app).last().map(String::as_str), Some("update showroom 1"));
}

#[tokio::test]
async fn new_car_form_validates_before_sending() {
  let (mut app, mut rx) = App::new(stock());
  sign_in(&mut app, &mut rx, "root", Role::Admin).await;
  app.navigate(Screen::Admin);
  pump(&mut app, &mut rx, 3).await;

  press(&mut app, KeyCode::Char('n'));
  press(&mut app, KeyCode::Enter);
  let Some(Modal::CarEditor { form, .. }) = &app.modal else {
    panic!("car editor should stay open");
  };
  assert_eq!(form.validation.error("make"), Some("Make is required"));
  assert_eq!(writes(&app), vec!["login root as admin"]);
}

#[tokio::test]
async fn late_save_does_not_close_another_editor() {
  let (mut app, mut rx) = App::new(stock());
  sign_in(&mut app, &mut rx, "root", Role::Admin).await;
  app.navigate(Screen::Admin);
  pump(&mut app, &mut rx, 3).await;

  press(&mut app, KeyCode::Char('2'));
  press(&mut app, KeyCode::Char('e'));
  press(&mut app, KeyCode::Enter);
  press(&mut app, KeyCode::Esc);
  press(&mut app, KeyCode::Char('1'));
  press(&mut app, KeyCode::Char('n'));
  type_text(&mut app, "Toyota");

  pump(&mut app, &mut rx, 1).await;
  assert_eq!(app.status_msg, "Showroom saved");
  let Some(Modal::CarEditor { id: None, form }) = &app.modal else {
    panic!("car editor should still be open");
  };
  assert_eq!(form.form.make, "Toyota");
}

#[tokio::test]
async fn late_save_does_not_close_a_reopened_editor() {
  let (mut app, mut rx) = App::new(stock());
  sign_in(&mut app, &mut rx, "root", Role::Admin).await;
  app.navigate(Screen::Admin);
  pump(&mut app, &mut rx, 3).await;

  press(&mut app, KeyCode::Char('2'));
  press(&mut app, KeyCode::Char('e'));
  press(&mut app, KeyCode::Enter);
  press(&mut app, KeyCode::Esc);
  press(&mut app, KeyCode::Char('e'));

  pump(&mut app, &mut rx, 1).await;
  let Some(Modal::ShowroomEditor { form, .. }) = &app.modal else {
    panic!("reopened showroom editor should still be open");
  };
  assert!(!form.submitting());
}
