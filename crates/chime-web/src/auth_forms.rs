use gloo::events::EventListener;
use web_sys::HtmlFormElement;

use crate::dom;

/// Which account form a page carries.
#[derive(Debug, Clone, Copy)]
pub enum AuthForm {
  Login,
  Register
}

impl AuthForm {
  fn element_id(self) -> &'static str {
    match self {
      | Self::Login => "loginForm",
      | Self::Register => "registerForm"
    }
  }

  fn label(self) -> &'static str {
    match self {
      | Self::Login => "login",
      | Self::Register => "register"
    }
  }
}

/// Logs submissions and lets the browser post the form; the server
/// validates.
pub fn bind_submit_hook(
  form: AuthForm
) -> Option<EventListener> {
  let element = dom::by_id::<
    HtmlFormElement,
  >(form.element_id())?;

  tracing::info!(
    page = form.label(),
    "account page script loaded"
  );

  Some(EventListener::new(
    &element,
    "submit",
    move |_event| {
      tracing::info!(
        form = form.label(),
        "form submitted"
      );
    }
  ))
}
