use chime_core::{
  DeliverySource,
  DueNotification,
  SessionHandle
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

#[wasm_bindgen]
extern "C" {
  /// Socket.IO client socket provided by the page.
  type PushSocket;

  #[wasm_bindgen(catch, js_name = io)]
  fn connect_io() -> Result<PushSocket, JsValue>;

  #[wasm_bindgen(method)]
  fn on(
    this: &PushSocket,
    event: &str,
    callback: &Closure<dyn FnMut(JsValue)>
  );
}

/// Keeps the socket and its event handler alive for the page.
pub struct PushSubscription {
  _socket:  PushSocket,
  _handler: Closure<dyn FnMut(JsValue)>
}

/// Feeds `event` payloads into the delivery queue. `None` when the
/// page has no Socket.IO client.
pub fn subscribe(
  event: &str,
  handle: SessionHandle
) -> Option<PushSubscription> {
  let socket = match connect_io() {
    | Ok(socket) => socket,
    | Err(error) => {
      tracing::warn!(
        error = ?error,
        "push channel unavailable; \
         relying on polling"
      );
      return None;
    }
  };

  let handler =
    Closure::<dyn FnMut(JsValue)>::new(
      move |payload: JsValue| {
        match serde_wasm_bindgen::from_value::<
          DueNotification,
        >(payload)
        {
          | Ok(notification) => {
            tracing::debug!(
              task_id = %notification.id,
              "push notification received"
            );
            handle.submit(
              DeliverySource::Push,
              notification
            );
          }
          | Err(error) => {
            tracing::warn!(
              %error,
              "ignoring malformed push \
               payload"
            );
          }
        }
      }
    );

  socket.on(event, &handler);
  tracing::info!(
    event,
    "subscribed to push channel"
  );

  Some(PushSubscription {
    _socket:  socket,
    _handler: handler
  })
}
