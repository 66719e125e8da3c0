use crate::config::ClientConfig;
use crate::task::{
  ATTR_ACTION,
  ATTR_ID,
  ATTR_TIME,
  ATTR_TITLE
};

pub const EDIT_SUBMIT_LABEL: &str =
  "Save Task";
pub const EDIT_HEADING: &str =
  "✏️ Edit Task";

/// Field values the task form takes when an edit affordance is
/// activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
  pub form_action:  String,
  pub submit_label: &'static str,
  pub heading:      &'static str,
  pub task_id:      String,
  pub title:        String,
  pub time:         String,
  pub action:       String
}

impl EditForm {
  /// Reads the edit affordance's data attributes. Missing attributes
  /// become empty strings; a missing id yields `None` and the click is
  /// ignored.
  pub fn from_attributes<F>(
    cfg: &ClientConfig,
    attr: F
  ) -> Option<Self>
  where
    F: Fn(&str) -> Option<String>
  {
    let task_id = attr(ATTR_ID)
      .map(|id| id.trim().to_string())
      .filter(|id| !id.is_empty())?;

    Some(Self {
      form_action: cfg
        .form_target(Some(&task_id)),
      submit_label: EDIT_SUBMIT_LABEL,
      heading: EDIT_HEADING,
      title: attr(ATTR_TITLE)
        .unwrap_or_default(),
      time: attr(ATTR_TIME)
        .unwrap_or_default(),
      action: attr(ATTR_ACTION)
        .unwrap_or_default(),
      task_id
    })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::EditForm;
  use crate::config::ClientConfig;

  #[test]
  fn empty_time_attribute_stays_empty() {
    let attrs: HashMap<&str, &str> = [
      ("data-id", "9"),
      ("data-title", "Dentist"),
      ("data-time", ""),
      ("data-action", "Bring card")
    ]
    .into_iter()
    .collect();

    let form = EditForm::from_attributes(
      &ClientConfig::default(),
      |name| {
        attrs
          .get(name)
          .map(|v| (*v).to_string())
      },
    )
    .expect("form for task 9");

    assert_eq!(
      form.form_action,
      "/tasks/edit/9"
    );
    assert_eq!(form.task_id, "9");
    assert_eq!(form.time, "");
    assert_eq!(
      form.submit_label,
      "Save Task"
    );
  }

  #[test]
  fn absent_attributes_become_empty_strings() {
    let form = EditForm::from_attributes(
      &ClientConfig::default(),
      |name| {
        (name == "data-id")
          .then(|| "4".to_string())
      },
    )
    .expect("form for task 4");

    assert_eq!(form.title, "");
    assert_eq!(form.time, "");
    assert_eq!(form.action, "");
  }

  #[test]
  fn missing_id_is_ignored() {
    assert!(
      EditForm::from_attributes(
        &ClientConfig::default(),
        |_| None
      )
      .is_none()
    );
  }
}
