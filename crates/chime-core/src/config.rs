use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  warn
};

use crate::error::ChimeError;

pub const DEFAULT_POLL_INTERVAL_MS: u32 =
  5 * 60 * 1000;
pub const DEFAULT_ALERT_DISMISS_MS: u32 =
  3_000;

/// Endpoints and timings for the task page. Every field has a default
/// so an empty or partial TOML document is valid.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct ClientConfig {
  pub check_notifications_url: String,
  pub toggle_url_prefix:       String,
  pub edit_url_prefix:         String,
  pub create_url:              String,
  pub poll_interval_ms:        u32,
  pub alert_dismiss_ms:        u32,
  pub list_mode_height:        String,
  pub speech_lang:             String,
  pub push_event:              String
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      check_notifications_url: "/check_notifications".to_string(),
      toggle_url_prefix:       "/tasks/notify_toggle/".to_string(),
      edit_url_prefix:         "/tasks/edit/".to_string(),
      create_url:              "/tasks".to_string(),
      poll_interval_ms:        DEFAULT_POLL_INTERVAL_MS,
      alert_dismiss_ms:        DEFAULT_ALERT_DISMISS_MS,
      list_mode_height:        "120px".to_string(),
      speech_lang:             "en-US".to_string(),
      push_event:              "task_notification".to_string()
    }
  }
}

impl ClientConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> Result<Self, ChimeError> {
    let mut cfg: Self =
      toml::from_str(raw)?;
    if cfg.poll_interval_ms == 0 {
      return Err(ChimeError::Config(
        "poll_interval_ms must be \
         positive"
          .to_string()
      ));
    }
    cfg.toggle_url_prefix =
      with_trailing_slash(
        &cfg.toggle_url_prefix
      );
    cfg.edit_url_prefix =
      with_trailing_slash(
        &cfg.edit_url_prefix
      );
    Ok(cfg)
  }

  /// Parses embedded overrides, falling back to defaults when absent or
  /// invalid.
  pub fn load_or_default(
    raw: Option<&str>
  ) -> Self {
    let Some(raw) = raw
      .map(str::trim)
      .filter(|raw| !raw.is_empty())
    else {
      debug!(
        "no embedded client config; \
         using defaults"
      );
      return Self::default();
    };

    match Self::from_toml_str(raw) {
      | Ok(cfg) => cfg,
      | Err(error) => {
        warn!(
          %error,
          "ignoring embedded client \
           config"
        );
        Self::default()
      }
    }
  }

  /// Where the task form posts: the create route for a new task, the
  /// task's edit route otherwise.
  #[must_use]
  pub fn form_target(
    &self,
    task_id: Option<&str>
  ) -> String {
    match task_id
      .map(str::trim)
      .filter(|id| !id.is_empty())
    {
      | Some(id) => self.edit_url(id),
      | None => self.create_url.clone()
    }
  }

  #[must_use]
  pub fn toggle_url(
    &self,
    task_id: &str
  ) -> String {
    format!(
      "{}{task_id}",
      self.toggle_url_prefix
    )
  }

  #[must_use]
  pub fn edit_url(
    &self,
    task_id: &str
  ) -> String {
    format!(
      "{}{task_id}",
      self.edit_url_prefix
    )
  }
}

fn with_trailing_slash(
  raw: &str
) -> String {
  if raw.ends_with('/') {
    raw.to_string()
  } else {
    format!("{raw}/")
  }
}
