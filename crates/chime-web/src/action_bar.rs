use chime_core::action_bar::{
  ActionBarContainer,
  ActionButton,
  ensure_action_bar,
  print_document
};
use gloo::events::EventListener;
use js_sys::{
  Array,
  Function,
  Promise,
  Reflect
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element,
  HtmlDocument
};

use crate::dom::{
  self,
  TextField
};
use crate::form::TaskForm;

struct DomActionBar<'a> {
  container: &'a Element,
  document:  Document,
  action:    TextField
}

impl ActionBarContainer for DomActionBar<'_> {
  fn child_count(&self) -> u32 {
    self.container.child_element_count()
  }

  fn append_button(
    &mut self,
    button: ActionButton
  ) {
    let element = match self
      .document
      .create_element("button")
    {
      | Ok(element) => element,
      | Err(error) => {
        tracing::warn!(
          error = ?error,
          "failed to create action button"
        );
        return;
      }
    };

    for (name, value) in [
      ("type", "button"),
      ("title", button.label())
    ] {
      if let Err(error) =
        element.set_attribute(name, value)
      {
        tracing::warn!(
          error = ?error,
          attribute = name,
          "failed to set action button \
           attribute"
        );
      }
    }
    element.set_class_name(
      button.class_name()
    );
    element
      .set_inner_html(button.icon_html());

    let action = self.action.clone();
    // The buttons live as long as the page; the container guard keeps
    // them from being created twice.
    EventListener::new(
      &element,
      "click",
      move |_event| {
        let text = action.value();
        match button {
          | ActionButton::Print => {
            print_text(&text);
          }
          | ActionButton::Copy => {
            copy_text(&text);
          }
        }
      }
    )
    .forget();

    if let Err(error) =
      self.container.append_child(&element)
    {
      tracing::warn!(
        error = ?error,
        "failed to attach action button"
      );
    }
  }
}

/// Adds the print and copy buttons once per container.
pub fn ensure(form: &TaskForm) {
  let (Some(container), Some(action)) =
    (&form.action_bar, &form.action)
  else {
    return;
  };
  let Some(document) = dom::document()
  else {
    return;
  };

  ensure_action_bar(&mut DomActionBar {
    container,
    document,
    action: action.clone()
  });
}

fn print_text(text: &str) {
  let result = web_sys::window()
    .ok_or_else(|| {
      JsValue::from_str("no window")
    })
    .and_then(|window| {
      window.open_with_url_and_target(
        "", "_blank"
      )
    })
    .and_then(|opened| {
      opened.ok_or_else(|| {
        JsValue::from_str(
          "print window blocked"
        )
      })
    })
    .and_then(|print_window| {
      let document = print_window
        .document()
        .ok_or_else(|| {
          JsValue::from_str(
            "print window has no document"
          )
        })?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| {
          JsValue::from_str(
            "print window document is not \
             HTML"
          )
        })?;
      document.write(&Array::of1(
        &JsValue::from_str(
          &print_document(text)
        )
      ))?;
      document.close()?;
      print_window.print()
    });

  if let Err(error) = result {
    tracing::warn!(
      error = ?error,
      "print failed"
    );
  }
}

fn copy_text(text: &str) {
  let write = web_sys::window()
    .ok_or_else(|| {
      JsValue::from_str("no window")
    })
    .and_then(|window| {
      Reflect::get(
        &window.navigator(),
        &JsValue::from_str("clipboard")
      )
    })
    .and_then(|clipboard| {
      let write_text = Reflect::get(
        &clipboard,
        &JsValue::from_str("writeText")
      )?
      .dyn_into::<Function>()?;
      write_text.call1(
        &clipboard,
        &JsValue::from_str(text)
      )
    })
    .and_then(|value| {
      value.dyn_into::<Promise>()
    });

  match write {
    | Ok(promise) => {
      wasm_bindgen_futures::spawn_local(
        async move {
          if let Err(error) =
            wasm_bindgen_futures::JsFuture::from(
              promise
            )
            .await
          {
            tracing::warn!(
              error = ?error,
              "clipboard write rejected"
            );
          }
        }
      );
    }
    | Err(error) => {
      tracing::warn!(
        error = ?error,
        "clipboard unavailable"
      );
    }
  }
}
