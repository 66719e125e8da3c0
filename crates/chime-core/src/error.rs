use thiserror::Error;

/// Failures the page glue can hit. None of them are fatal; callers log
/// and fall back to doing nothing.
#[derive(Debug, Error)]
pub enum ChimeError {
  #[error("request to {url} failed: {reason}")]
  Transport {
    url:    String,
    reason: String
  },
  #[error("request to {url} returned HTTP {status}")]
  Status {
    url:    String,
    status: u16
  },
  #[error("failed to decode response: {0}")]
  Decode(String),
  #[error("invalid client config: {0}")]
  Config(String),
  #[error("speech synthesis unavailable: {0}")]
  Speech(String)
}

impl From<serde_json::Error> for ChimeError {
  fn from(err: serde_json::Error) -> Self {
    Self::Decode(err.to_string())
  }
}

impl From<toml::de::Error> for ChimeError {
  fn from(err: toml::de::Error) -> Self {
    Self::Config(err.to_string())
  }
}
