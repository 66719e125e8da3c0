/// The two affordances attached next to the action field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
  Print,
  Copy
}

impl ActionButton {
  pub const ALL: [Self; 2] =
    [Self::Print, Self::Copy];

  #[must_use]
  pub fn class_name(
    self
  ) -> &'static str {
    match self {
      | Self::Print => {
        "btn btn-sm btn-outline-success me-1"
      }
      | Self::Copy => {
        "btn btn-sm btn-outline-success"
      }
    }
  }

  #[must_use]
  pub fn icon_html(
    self
  ) -> &'static str {
    match self {
      | Self::Print => {
        r#"<i class="bi bi-printer"></i>"#
      }
      | Self::Copy => {
        r#"<i class="bi bi-whatsapp"></i>"#
      }
    }
  }

  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | Self::Print => "Print",
      | Self::Copy => "Copy for WhatsApp"
    }
  }
}

/// Container the buttons are appended to.
pub trait ActionBarContainer {
  fn child_count(&self) -> u32;
  fn append_button(
    &mut self,
    button: ActionButton
  );
}

/// Appends the print and copy buttons unless the container already
/// has children. Returns whether anything was added.
pub fn ensure_action_bar<C>(
  container: &mut C
) -> bool
where
  C: ActionBarContainer + ?Sized
{
  if container.child_count() > 0 {
    return false;
  }

  for button in ActionButton::ALL {
    container.append_button(button);
  }
  tracing::debug!(
    "attached action bar buttons"
  );
  true
}

/// Standalone document written into the print window.
#[must_use]
pub fn print_document(
  text: &str
) -> String {
  format!(
    "<pre style=\"white-space: pre-wrap; font-family: sans-serif;\">{}</pre>",
    escape_html(text)
  )
}

fn escape_html(text: &str) -> String {
  let mut out =
    String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      | '&' => out.push_str("&amp;"),
      | '<' => out.push_str("&lt;"),
      | '>' => out.push_str("&gt;"),
      | '"' => out.push_str("&quot;"),
      | '\'' => out.push_str("&#39;"),
      | _ => out.push(ch)
    }
  }
  out
}
