//! Async HTTP client for the dealership JSON API.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use showroom_core::{
  inquiry::{Inquiry, NewInquiry},
  provider::DealershipProvider,
  session::{AuthOutcome, Credentials, Role},
  showroom::{NewShowroom, Showroom},
  vehicle::{NewVehicle, RecordId, Vehicle},
};
use tracing::debug;
use url::Url;

use crate::{ClientConfig, Error, Result};

/// Body of a failed auth response. Anything else in the body is ignored.
#[derive(Deserialize)]
struct AuthFailure {
  error: Option<String>,
}

/// Async HTTP client for the dealership REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpProvider {
  client:            Client,
  base_url:          String,
  admin_showroom_id: RecordId,
}

impl HttpProvider {
  pub fn new(config: &ClientConfig) -> Result<Self> {
    // A malformed base URL fails here, not on the first request.
    let base = Url::parse(&config.base_url)?;
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      base_url: base.as_str().trim_end_matches('/').to_string(),
      admin_showroom_id: config.admin_showroom_id,
    })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

  async fn send(
    &self,
    method: Method,
    path: &str,
    body: Option<&(impl Serialize + Sync)>,
  ) -> Result<Response> {
    let url = self.url(path);
    debug!(%method, %url, "provider request");
    let mut req = self.client.request(method, url);
    if let Some(body) = body {
      req = req.json(body);
    }
    Ok(req.send().await?)
  }

  /// Turn a non-success response into [`Error::Status`].
  async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Status { status, body })
  }

  async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let text = Self::check(resp).await?.text().await?;
    Ok(serde_json::from_str(&text)?)
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self.send(Method::GET, path, None::<&()>).await?;
    Self::decode(resp).await
  }

  /// `GET` that maps 404 to `None`.
  async fn get_optional<T: DeserializeOwned>(
    &self,
    path: &str,
  ) -> Result<Option<T>> {
    let resp = self.send(Method::GET, path, None::<&()>).await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    Self::decode(resp).await.map(Some)
  }

  async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
  where
    B: Serialize + Sync,
    T: DeserializeOwned,
  {
    let resp = self.send(method, path, Some(body)).await?;
    Self::decode(resp).await
  }

  async fn delete(&self, path: &str) -> Result<()> {
    let resp = self.send(Method::DELETE, path, None::<&()>).await?;
    Self::check(resp).await?;
    Ok(())
  }

  /// POST credentials. A non-success status is a rejection, not an error.
  async fn authenticate(
    &self,
    path: &str,
    body: serde_json::Value,
    fallback: &str,
  ) -> Result<AuthOutcome> {
    let resp = self.send(Method::POST, path, Some(&body)).await?;
    if resp.status().is_success() {
      return Ok(AuthOutcome::Accepted);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<AuthFailure>(&text)
      .ok()
      .and_then(|f| f.error)
      .filter(|m| !m.is_empty())
      .unwrap_or_else(|| fallback.to_string());
    debug!(%status, %path, "authentication rejected");
    Ok(AuthOutcome::Rejected(message))
  }
}

impl DealershipProvider for HttpProvider {
  type Error = Error;

  // ── Vehicles ──────────────────────────────────────────────────────────────

  async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
    self.get_json("/cars").await
  }

  async fn get_vehicle(&self, id: RecordId) -> Result<Option<Vehicle>> {
    self.get_optional(&format!("/cars/{id}")).await
  }

  async fn create_vehicle(&self, input: NewVehicle) -> Result<Vehicle> {
    self.send_json(Method::POST, "/cars", &input).await
  }

  async fn update_vehicle(
    &self,
    id: RecordId,
    input: NewVehicle,
  ) -> Result<Vehicle> {
    self.send_json(Method::PUT, &format!("/cars/{id}"), &input).await
  }

  async fn delete_vehicle(&self, id: RecordId) -> Result<()> {
    self.delete(&format!("/cars/{id}")).await
  }

  // ── Showrooms ─────────────────────────────────────────────────────────────

  async fn list_showrooms(&self) -> Result<Vec<Showroom>> {
    self.get_json("/showrooms").await
  }

  async fn get_showroom(&self, id: RecordId) -> Result<Option<Showroom>> {
    self.get_optional(&format!("/showrooms/{id}")).await
  }

  async fn create_showroom(&self, input: NewShowroom) -> Result<Showroom> {
    self.send_json(Method::POST, "/showrooms", &input).await
  }

  async fn update_showroom(
    &self,
    id: RecordId,
    input: NewShowroom,
  ) -> Result<Showroom> {
    self
      .send_json(Method::PUT, &format!("/showrooms/{id}"), &input)
      .await
  }

  async fn delete_showroom(&self, id: RecordId) -> Result<()> {
    self.delete(&format!("/showrooms/{id}")).await
  }

  // ── Inquiries ─────────────────────────────────────────────────────────────

  async fn list_inquiries(&self) -> Result<Vec<Inquiry>> {
    self.get_json("/contacts").await
  }

  async fn get_inquiry(&self, id: RecordId) -> Result<Option<Inquiry>> {
    self.get_optional(&format!("/contacts/{id}")).await
  }

  async fn create_inquiry(&self, input: NewInquiry) -> Result<Inquiry> {
    self.send_json(Method::POST, "/contacts", &input).await
  }

  async fn delete_inquiry(&self, id: RecordId) -> Result<()> {
    self.delete(&format!("/contacts/{id}")).await
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  async fn login(&self, credentials: Credentials) -> Result<AuthOutcome> {
    let body = json!({
      "username": credentials.username,
      "password": credentials.password,
    });
    self
      .authenticate(&format!("/{}/login", credentials.role), body, "Login failed")
      .await
  }

  async fn signup(&self, credentials: Credentials) -> Result<AuthOutcome> {
    let body = match credentials.role {
      Role::Buyer => json!({
        "username": credentials.username,
        "password": credentials.password,
        "email": credentials.email.unwrap_or_default(),
      }),
      Role::Admin => json!({
        "username": credentials.username,
        "password": credentials.password,
        "showroom_id": self.admin_showroom_id,
      }),
    };
    self
      .authenticate(
        &format!("/{}/signup", credentials.role),
        body,
        "Signup failed",
      )
      .await
  }
}
