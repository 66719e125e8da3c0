use chime_core::{
  ChimeError,
  Notifier
};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
  Default,
  Granted,
  Denied,
  Unsupported
}

pub fn browser_permission()
-> NotificationPermission {
  let Some(window) = web_sys::window()
  else {
    return NotificationPermission::Unsupported;
  };

  let has_notification =
    js_sys::Reflect::has(
      window.as_ref(),
      &JsValue::from_str("Notification")
    )
    .ok()
    .unwrap_or(false);

  if !has_notification {
    return NotificationPermission::Unsupported;
  }

  match web_sys::Notification::permission()
  {
    | web_sys::NotificationPermission::Default => {
      NotificationPermission::Default
    }
    | web_sys::NotificationPermission::Granted => {
      NotificationPermission::Granted
    }
    | web_sys::NotificationPermission::Denied => {
      NotificationPermission::Denied
    }
    | _ => {
      NotificationPermission::Unsupported
    }
  }
}

/// Asks once at page load unless already granted. The answer is read
/// back on every delivery, so nothing is stored.
pub fn request_permission_once() {
  let current = browser_permission();
  if matches!(
    current,
    NotificationPermission::Granted
      | NotificationPermission::Unsupported
  ) {
    tracing::debug!(
      permission = ?current,
      "notification permission already \
       settled; not prompting"
    );
    return;
  }

  match web_sys::Notification::request_permission()
  {
    | Ok(promise) => {
      wasm_bindgen_futures::spawn_local(
        async move {
          match wasm_bindgen_futures::JsFuture::from(
            promise
          )
          .await
          {
            | Ok(_) => {
              tracing::info!(
                permission =
                  ?browser_permission(),
                "notification permission \
                 prompt answered"
              );
            }
            | Err(error) => {
              tracing::error!(
                error = ?error,
                "notification permission \
                 prompt rejected"
              );
            }
          }
        }
      );
    }
    | Err(error) => {
      tracing::error!(
        error = ?error,
        "notification permission prompt \
         could not start"
      );
    }
  }
}

/// Desktop notifications plus speech synthesis.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
  fn show_desktop(
    &self,
    title: &str,
    body: &str
  ) -> bool {
    if browser_permission()
      != NotificationPermission::Granted
    {
      tracing::debug!(
        "desktop reminder suppressed; \
         permission missing"
      );
      return false;
    }

    let options =
      web_sys::NotificationOptions::new();
    options.set_body(body);

    match web_sys::Notification::new_with_options(
      title, &options
    ) {
      | Ok(_) => true,
      | Err(error) => {
        tracing::error!(
          error = ?error,
          title,
          "browser refused desktop \
           reminder"
        );
        false
      }
    }
  }

  fn speak(
    &self,
    text: &str
  ) -> Result<(), ChimeError> {
    let synth = web_sys::window()
      .ok_or_else(|| {
        ChimeError::Speech(
          "no window".to_string()
        )
      })?
      .speech_synthesis()
      .map_err(|error| {
        ChimeError::Speech(format!(
          "{error:?}"
        ))
      })?;
    let utterance =
      web_sys::SpeechSynthesisUtterance::new_with_text(
        text
      )
      .map_err(|error| {
        ChimeError::Speech(format!(
          "{error:?}"
        ))
      })?;
    synth.speak(&utterance);
    Ok(())
  }
}
