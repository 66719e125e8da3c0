use chime_core::edit::EditForm;
use web_sys::{
  Element,
  HtmlFormElement
};

use crate::dom::{
  self,
  TextField
};

/// Handles to the task form. Any of them may be missing on a given
/// page; every use is guarded.
#[derive(Clone, Default)]
pub struct TaskForm {
  pub form:       Option<HtmlFormElement>,
  pub heading:    Option<Element>,
  pub submit:     Option<Element>,
  pub task_id:    Option<TextField>,
  pub title:      Option<TextField>,
  pub time:       Option<TextField>,
  pub action:     Option<TextField>,
  pub action_bar: Option<Element>
}

impl TaskForm {
  pub fn locate() -> Self {
    Self {
      form:       dom::by_id("taskForm"),
      heading:    dom::by_id("formTitle"),
      submit:     dom::by_id(
        "taskSubmitBtn"
      ),
      task_id:    TextField::by_id("taskId"),
      title:      TextField::by_id(
        "taskTitle"
      ),
      time:       TextField::by_id("taskTime"),
      action:     TextField::by_id(
        "taskAction"
      ),
      action_bar: dom::by_id(
        "actionButtons"
      )
    }
  }

  pub fn title_value(&self) -> String {
    self
      .title
      .as_ref()
      .map(TextField::value)
      .unwrap_or_default()
  }

  /// Switches the form to edit mode for one task.
  pub fn apply_edit(
    &self,
    edit: &EditForm
  ) {
    if let Some(form) = &self.form {
      form.set_action(&edit.form_action);
    }
    if let Some(submit) = &self.submit {
      submit.set_text_content(Some(
        edit.submit_label
      ));
    }
    if let Some(heading) = &self.heading {
      heading.set_text_content(Some(
        edit.heading
      ));
    }

    for (field, value) in [
      (&self.task_id, &edit.task_id),
      (&self.title, &edit.title),
      (&self.time, &edit.time),
      (&self.action, &edit.action)
    ] {
      if let Some(field) = field {
        field.set_value(value);
      }
    }

    tracing::info!(
      task_id = %edit.task_id,
      "task form switched to edit mode"
    );
  }

  /// Speech on the time mic: only a recognized time replaces the
  /// field.
  pub fn fill_time_from_speech(
    &self,
    transcript: &str
  ) {
    let Some(time) = &self.time else {
      return;
    };
    if let Some(parsed) =
      chime_core::time_phrase::spoken_time_to_hhmm(
        transcript
      )
    {
      time.set_value(&parsed);
    }
  }

  /// Speech on the action mic: append the transcript and, when the
  /// time field is still empty, take a time from it.
  pub fn append_action_from_speech(
    &self,
    transcript: &str
  ) {
    if let Some(action) = &self.action {
      let current = action.value();
      if current.is_empty() {
        action.set_value(transcript);
      } else {
        action.set_value(&format!(
          "{current}, {transcript}"
        ));
      }
    }

    let time_is_empty = self
      .time
      .as_ref()
      .is_some_and(|time| {
        time.value().is_empty()
      });
    if time_is_empty {
      self.fill_time_from_speech(
        transcript
      );
    }
  }
}
