//! Layered configuration: optional TOML file, then `SHOWROOM_*` environment
//! variables, then command-line flags.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use showroom_client::ClientConfig;

#[derive(Parser, Debug)]
#[command(
  name = "showroom",
  version,
  about = "Terminal client for the car dealership inventory"
)]
pub struct Cli {
  /// Path to a TOML config file (base_url, timeout_secs, admin_showroom_id).
  /// Missing files are ignored.
  #[arg(short, long, value_name = "FILE", default_value = "showroom.toml")]
  pub config: PathBuf,

  /// Base URL of the dealership API. Overrides the file and environment.
  #[arg(long)]
  pub url: Option<String>,

  /// Where to write logs. The terminal belongs to the UI.
  #[arg(long, value_name = "FILE", default_value = "showroom.log")]
  pub log_file: PathBuf,
}

impl Cli {
  /// Resolve the client settings from every layer.
  pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
    let defaults = ClientConfig::default();
    let settings = config::Config::builder()
      .set_default("base_url", defaults.base_url)?
      .set_default("timeout_secs", defaults.timeout_secs)?
      .set_default("admin_showroom_id", defaults.admin_showroom_id)?
      .add_source(config::File::from(self.config.clone()).required(false))
      .add_source(config::Environment::with_prefix("SHOWROOM").try_parsing(true))
      .set_override_option("base_url", self.url.clone())?
      .build()
      .with_context(|| {
        format!("failed to read config from {}", self.config.display())
      })?;

    settings
      .try_deserialize()
      .context("failed to deserialise client config")
  }
}
