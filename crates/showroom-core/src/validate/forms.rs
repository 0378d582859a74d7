//! The four form contracts: car, showroom, contact inquiry and credentials.

use chrono::{DateTime, Utc};

use super::{Check, Field, FieldRules, Form, parse_number, present};
use crate::{
  Result,
  inquiry::{NewInquiry, default_message, subject_for},
  session::{AuthMode, Credentials, Role},
  showroom::{NewShowroom, Showroom},
  vehicle::{NewVehicle, RecordId, Vehicle},
};

const PHONE_FORMAT: &str = "Invalid phone number format";
const PHONE_DIGITS: usize = 10;
/// Largest id that survives the round trip through `f64` exactly.
const MAX_RECORD_ID: f64 = 9_007_199_254_740_991.0;

// ─── Car ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarForm {
  pub make:         String,
  pub model:        String,
  pub year:         String,
  pub price:        String,
  pub mileage:      String,
  pub showroom_id:  String,
  pub color:        String,
  pub engine:       String,
  pub transmission: String,
  pub fuel_type:    String,
  pub body_type:    String,
  pub image_url:    String,
  pub description:  String,
}

const CAR_FIELDS: &[Field] = &[
  Field::new("make", "Make"),
  Field::new("model", "Model"),
  Field::new("year", "Year"),
  Field::new("price", "Price"),
  Field::new("mileage", "Mileage"),
  Field::new("showroom_id", "Showroom"),
  Field::new("body_type", "Type"),
  Field::new("color", "Color"),
  Field::new("engine", "Engine"),
  Field::new("transmission", "Transmission"),
  Field::new("fuel_type", "Fuel type"),
  Field::new("image_url", "Image URL"),
  Field::new("description", "Description"),
];

impl CarForm {
  /// Prefill an edit form from an existing record.
  pub fn from_vehicle(v: &Vehicle) -> Self {
    let text = |o: &Option<String>| o.clone().unwrap_or_default();
    Self {
      make:         v.make.clone(),
      model:        v.model.clone(),
      year:         v.year.to_string(),
      price:        v.price.to_string(),
      mileage:      v.mileage.map(|m| m.to_string()).unwrap_or_default(),
      showroom_id:  v.showroom_id.map(|id| id.to_string()).unwrap_or_default(),
      color:        text(&v.color),
      engine:       text(&v.engine),
      transmission: text(&v.transmission),
      fuel_type:    text(&v.fuel_type),
      body_type:    text(&v.body_type),
      image_url:    text(&v.image_url),
      description:  text(&v.description),
    }
  }

  pub fn to_new_vehicle(&self) -> Result<NewVehicle> {
    self.to_new_vehicle_for_year(super::current_year())
  }

  pub fn to_new_vehicle_for_year(&self, current_year: i32) -> Result<NewVehicle> {
    self
      .validate_for_year(current_year)
      .into_result(Self::ENTITY)?;

    // Every numeric field below passed its chain, so these parses succeed
    // and fall within range.
    Ok(NewVehicle {
      make:         self.make.trim().to_owned(),
      model:        self.model.trim().to_owned(),
      year:         parse_number(&self.year).unwrap_or_default() as i32,
      price:        parse_number(&self.price).unwrap_or_default(),
      mileage:      parse_number(&self.mileage).map(|m| m as u32),
      color:        present(&self.color),
      engine:       present(&self.engine),
      transmission: present(&self.transmission),
      fuel_type:    present(&self.fuel_type),
      body_type:    present(&self.body_type),
      description:  present(&self.description),
      image_url:    present(&self.image_url),
      showroom_id:  parse_number(&self.showroom_id).unwrap_or_default() as i64,
    })
  }
}

impl Form for CarForm {
  const ENTITY: &'static str = "car";

  fn fields(&self) -> &'static [Field] { CAR_FIELDS }

  fn rules(&self, current_year: i32) -> Vec<FieldRules> {
    let latest = current_year + 1;
    vec![
      FieldRules::required("make", "Make is required")
        .min_chars(2, "Make must be at least 2 characters")
        .max_chars(30, "Make must be less than 30 characters"),
      FieldRules::required("model", "Model is required")
        .min_chars(1, "Model must be at least 1 character")
        .max_chars(50, "Model must be less than 50 characters"),
      FieldRules::required("year", "Year is required")
        .number("Year must be a number")
        .integer("Year must be a whole number")
        .at_least(1900.0, "Year must be 1900 or later")
        .at_most(
          f64::from(latest),
          format!("Year cannot be later than {latest}"),
        ),
      FieldRules::required("price", "Price is required")
        .number("Price must be a number")
        .positive("Price must be a positive number")
        .at_least(1.0, "Price must be at least $1")
        .at_most(10_000_000.0, "Price cannot exceed $10,000,000"),
      FieldRules::optional("mileage")
        .number("Mileage must be a number")
        .integer("Mileage must be a whole number")
        .at_least(0.0, "Mileage cannot be negative")
        .at_most(999_999.0, "Mileage cannot exceed 999,999"),
      FieldRules::required("showroom_id", "Showroom is required")
        .number("Please select a showroom")
        .integer("Please select a showroom")
        .positive("Please select a showroom")
        .at_most(MAX_RECORD_ID, "Please select a showroom"),
      FieldRules::optional("image_url").url("Must be a valid URL"),
      FieldRules::optional("description")
        .max_chars(1000, "Description must be less than 1000 characters"),
      FieldRules::optional("color")
        .max_chars(20, "Color must be less than 20 characters"),
      FieldRules::optional("engine")
        .max_chars(50, "Engine must be less than 50 characters"),
      FieldRules::optional("transmission")
        .max_chars(30, "Transmission must be less than 30 characters"),
      FieldRules::optional("fuel_type")
        .max_chars(20, "Fuel type must be less than 20 characters"),
    ]
  }

  fn value(&self, field: &str) -> &str {
    match field {
      "make" => &self.make,
      "model" => &self.model,
      "year" => &self.year,
      "price" => &self.price,
      "mileage" => &self.mileage,
      "showroom_id" => &self.showroom_id,
      "color" => &self.color,
      "engine" => &self.engine,
      "transmission" => &self.transmission,
      "fuel_type" => &self.fuel_type,
      "body_type" => &self.body_type,
      "image_url" => &self.image_url,
      "description" => &self.description,
      _ => "",
    }
  }

  fn value_mut(&mut self, field: &str) -> Option<&mut String> {
    Some(match field {
      "make" => &mut self.make,
      "model" => &mut self.model,
      "year" => &mut self.year,
      "price" => &mut self.price,
      "mileage" => &mut self.mileage,
      "showroom_id" => &mut self.showroom_id,
      "color" => &mut self.color,
      "engine" => &mut self.engine,
      "transmission" => &mut self.transmission,
      "fuel_type" => &mut self.fuel_type,
      "body_type" => &mut self.body_type,
      "image_url" => &mut self.image_url,
      "description" => &mut self.description,
      _ => return None,
    })
  }
}

// ─── Showroom ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowroomForm {
  pub name:        String,
  pub address:     String,
  pub phone:       String,
  pub email:       String,
  pub hours:       String,
  pub description: String,
}

const SHOWROOM_FIELDS: &[Field] = &[
  Field::new("name", "Name"),
  Field::new("address", "Address"),
  Field::new("phone", "Phone"),
  Field::new("email", "Email"),
  Field::new("hours", "Hours"),
  Field::new("description", "Description"),
];

impl ShowroomForm {
  pub fn from_showroom(s: &Showroom) -> Self {
    Self {
      name:        s.name.clone(),
      address:     s.address.clone(),
      phone:       s.phone.clone(),
      email:       s.email.clone(),
      hours:       s.hours.clone().unwrap_or_default(),
      description: s.description.clone().unwrap_or_default(),
    }
  }

  pub fn to_new_showroom(&self) -> Result<NewShowroom> {
    self.validate().into_result(Self::ENTITY)?;
    Ok(NewShowroom {
      name:        self.name.trim().to_owned(),
      address:     self.address.trim().to_owned(),
      phone:       self.phone.trim().to_owned(),
      email:       self.email.trim().to_owned(),
      hours:       present(&self.hours),
      description: present(&self.description),
    })
  }
}

impl Form for ShowroomForm {
  const ENTITY: &'static str = "showroom";

  fn fields(&self) -> &'static [Field] { SHOWROOM_FIELDS }

  fn rules(&self, _current_year: i32) -> Vec<FieldRules> {
    vec![
      FieldRules::required("name", "Name is required")
        .min_chars(2, "Name must be at least 2 characters")
        .max_chars(100, "Name must be less than 100 characters"),
      FieldRules::required("address", "Address is required")
        .min_chars(10, "Address must be at least 10 characters")
        .max_chars(200, "Address must be less than 200 characters"),
      FieldRules::required("phone", "Phone number is required")
        .phone(PHONE_FORMAT, PHONE_DIGITS),
      FieldRules::required("email", "Email is required")
        .email("Invalid email format"),
      FieldRules::optional("hours")
        .max_chars(100, "Hours must be less than 100 characters"),
      FieldRules::optional("description")
        .max_chars(500, "Description must be less than 500 characters"),
    ]
  }

  fn value(&self, field: &str) -> &str {
    match field {
      "name" => &self.name,
      "address" => &self.address,
      "phone" => &self.phone,
      "email" => &self.email,
      "hours" => &self.hours,
      "description" => &self.description,
      _ => "",
    }
  }

  fn value_mut(&mut self, field: &str) -> Option<&mut String> {
    Some(match field {
      "name" => &mut self.name,
      "address" => &mut self.address,
      "phone" => &mut self.phone,
      "email" => &mut self.email,
      "hours" => &mut self.hours,
      "description" => &mut self.description,
      _ => return None,
    })
  }
}

// ─── Inquiry ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryForm {
  pub name:    String,
  pub email:   String,
  pub phone:   String,
  pub message: String,
  /// Vehicle the inquiry is about; not editable.
  pub car_id:  Option<RecordId>,
  pub subject: Option<String>,
}

const INQUIRY_FIELDS: &[Field] = &[
  Field::new("name", "Full name"),
  Field::new("email", "Email address"),
  Field::new("phone", "Phone number"),
  Field::new("message", "Message"),
];

impl InquiryForm {
  /// A form about `vehicle` with the default message filled in.
  pub fn for_vehicle(vehicle: &Vehicle) -> Self {
    Self {
      message: default_message(vehicle),
      car_id: Some(vehicle.id),
      subject: Some(subject_for(vehicle)),
      ..Self::default()
    }
  }

  /// Payload stamped with `created_at`.
  pub fn to_new_inquiry(&self, created_at: DateTime<Utc>) -> Result<NewInquiry> {
    self.validate().into_result(Self::ENTITY)?;
    Ok(NewInquiry {
      name: self.name.trim().to_owned(),
      email: self.email.trim().to_owned(),
      phone: self.phone.trim().to_owned(),
      message: self.message.trim().to_owned(),
      car_id: self.car_id,
      subject: self.subject.clone(),
      created_at,
    })
  }
}

impl Form for InquiryForm {
  const ENTITY: &'static str = "inquiry";

  fn fields(&self) -> &'static [Field] { INQUIRY_FIELDS }

  fn rules(&self, _current_year: i32) -> Vec<FieldRules> {
    vec![
      FieldRules::required("name", "Name is required")
        .min_chars(2, "Name must be at least 2 characters")
        .max_chars(50, "Name must be less than 50 characters"),
      FieldRules::required("email", "Email is required")
        .email("Invalid email format"),
      FieldRules::required("phone", "Phone number is required")
        .phone(PHONE_FORMAT, PHONE_DIGITS),
      FieldRules::required("message", "Message is required")
        .min_chars(10, "Message must be at least 10 characters")
        .max_chars(500, "Message must be less than 500 characters"),
    ]
  }

  fn value(&self, field: &str) -> &str {
    match field {
      "name" => &self.name,
      "email" => &self.email,
      "phone" => &self.phone,
      "message" => &self.message,
      _ => "",
    }
  }

  fn value_mut(&mut self, field: &str) -> Option<&mut String> {
    Some(match field {
      "name" => &mut self.name,
      "email" => &mut self.email,
      "phone" => &mut self.phone,
      "message" => &mut self.message,
      _ => return None,
    })
  }
}

// ─── Credentials ─────────────────────────────────────────────────────────────

/// Login or signup form. `role` is free text so an unknown value surfaces
/// as a field error rather than being silently coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialForm {
  pub mode:     AuthMode,
  pub role:     String,
  pub username: String,
  pub password: String,
  pub email:    String,
}

impl Default for CredentialForm {
  fn default() -> Self { Self::new(AuthMode::Login) }
}

const LOGIN_FIELDS: &[Field] = &[
  Field::new("role", "Role"),
  Field::new("username", "Username"),
  Field::new("password", "Password"),
];

const BUYER_SIGNUP_FIELDS: &[Field] = &[
  Field::new("role", "Role"),
  Field::new("username", "Username"),
  Field::new("password", "Password"),
  Field::new("email", "Email"),
];

impl CredentialForm {
  pub fn new(mode: AuthMode) -> Self {
    Self {
      mode,
      role: Role::default().to_string(),
      username: String::new(),
      password: String::new(),
      email: String::new(),
    }
  }

  /// Switch between login and signup, clearing everything typed so far.
  pub fn switch_mode(&mut self, mode: AuthMode) { *self = Self::new(mode); }

  /// Cycle the role text between the known roles.
  pub fn toggle_role(&mut self) {
    let next = Role::parse(&self.role).unwrap_or_default().toggled();
    self.role = next.to_string();
  }

  fn wants_email(&self) -> bool {
    self.mode == AuthMode::Signup
      && Role::parse(&self.role).is_ok_and(|r| r == Role::Buyer)
  }

  pub fn to_credentials(&self) -> Result<Credentials> {
    self.validate().into_result(Self::ENTITY)?;
    let role = Role::parse(&self.role)?;
    Ok(Credentials {
      mode: self.mode,
      role,
      username: self.username.trim().to_owned(),
      password: self.password.clone(),
      email: self
        .wants_email()
        .then(|| self.email.trim().to_owned()),
    })
  }
}

impl Form for CredentialForm {
  const ENTITY: &'static str = "credentials";

  fn fields(&self) -> &'static [Field] {
    if self.wants_email() {
      BUYER_SIGNUP_FIELDS
    } else {
      LOGIN_FIELDS
    }
  }

  fn rules(&self, _current_year: i32) -> Vec<FieldRules> {
    let mut rules = vec![
      FieldRules::required("role", "Role is required").rule(
        Check::OneOf(&["buyer", "admin"]),
        "Role must be buyer or admin",
      ),
      FieldRules::required("username", "Username is required"),
      FieldRules::required("password", "Password is required"),
    ];
    if self.wants_email() {
      rules.push(
        FieldRules::required("email", "Email is required")
          .email("Invalid email format"),
      );
    }
    rules
  }

  fn value(&self, field: &str) -> &str {
    match field {
      "role" => &self.role,
      "username" => &self.username,
      "password" => &self.password,
      "email" => &self.email,
      _ => "",
    }
  }

  fn value_mut(&mut self, field: &str) -> Option<&mut String> {
    Some(match field {
      "role" => &mut self.role,
      "username" => &mut self.username,
      "password" => &mut self.password,
      "email" => &mut self.email,
      _ => return None,
    })
  }
}
