use chime_core::{
  ClientConfig,
  DeliverySource,
  SessionHandle
};
use gloo::timers::callback::Interval;

use crate::api;

/// Fetches due tasks on every tick and queues them as poll candidates.
/// Dropping the returned interval stops polling.
pub fn start(
  cfg: &ClientConfig,
  handle: SessionHandle
) -> Interval {
  let url =
    cfg.check_notifications_url.clone();
  tracing::info!(
    interval_ms = cfg.poll_interval_ms,
    %url,
    "starting due notification poll"
  );

  Interval::new(
    cfg.poll_interval_ms,
    move || {
      let url = url.clone();
      let handle = handle.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::fetch_due_notifications(
            &url
          )
          .await
          {
            | Ok(due) => {
              let queued = handle.submit_all(
                DeliverySource::Poll,
                due
              );
              tracing::debug!(
                queued,
                "poll returned due tasks"
              );
            }
            | Err(error) => {
              tracing::warn!(
                %error,
                "due notification poll failed"
              );
            }
          }
        }
      );
    }
  )
}
