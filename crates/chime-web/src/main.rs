mod action_bar;
mod alerts;
mod api;
mod auth_forms;
mod dom;
mod form;
mod list_mode;
mod notifier;
mod page;
mod poll;
mod push;
mod speech;
mod task_list;

use auth_forms::AuthForm;
use chime_core::ClientConfig;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::Element;

const CONFIG_ELEMENT_ID: &str =
  "chime-config";

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting Chime frontend"
  );

  let config = load_config();
  alerts::schedule_dismiss(
    config.alert_dismiss_ms
  );

  for form in
    [AuthForm::Login, AuthForm::Register]
  {
    if let Some(listener) =
      auth_forms::bind_submit_hook(form)
    {
      listener.forget();
    }
  }

  page::mount(config);
}

/// Called by the page after it re-renders part of the task list.
#[wasm_bindgen(js_name = chimeRebind)]
pub fn rebind_task_page() {
  page::rebind();
}

fn load_config() -> ClientConfig {
  let raw = dom::by_id::<Element>(
    CONFIG_ELEMENT_ID
  )
  .and_then(|element| {
    element.text_content()
  });
  ClientConfig::load_or_default(
    raw.as_deref()
  )
}
