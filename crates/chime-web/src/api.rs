use chime_core::{
  ChimeError,
  DueNotification,
  ToggleResponse
};
use gloo::net::http::{
  Request,
  Response
};
use serde::de::DeserializeOwned;

/// One attempt, no retry. Non-2xx statuses are errors.
async fn decode<R>(
  url: &str,
  sent: Result<
    Response,
    gloo::net::Error
  >
) -> Result<R, ChimeError>
where
  R: DeserializeOwned
{
  let response =
    sent.map_err(|e| {
      ChimeError::Transport {
        url:    url.to_string(),
        reason: e.to_string()
      }
    })?;

  if !response.ok() {
    return Err(ChimeError::Status {
      url:    url.to_string(),
      status: response.status()
    });
  }

  let body =
    response.text().await.map_err(
      |e| ChimeError::Transport {
        url:    url.to_string(),
        reason: e.to_string()
      }
    )?;
  Ok(serde_json::from_str(&body)?)
}

pub async fn fetch_due_notifications(
  url: &str
) -> Result<Vec<DueNotification>, ChimeError>
{
  let sent = Request::get(url)
    .header("Accept", "application/json")
    .send()
    .await;
  decode(url, sent).await
}

pub async fn post_notify_toggle(
  url: &str
) -> Result<ToggleResponse, ChimeError> {
  let sent = Request::post(url)
    .header("Accept", "application/json")
    .send()
    .await;
  decode(url, sent).await
}
