use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

pub const ATTR_ID: &str = "data-id";
pub const ATTR_TITLE: &str =
  "data-title";
pub const ATTR_TIME: &str = "data-time";
pub const ATTR_ACTION: &str =
  "data-action";
pub const ATTR_TYPE: &str = "data-type";
pub const ATTR_NOTIFY_ENABLED: &str =
  "data-notify-enabled";

const DEFAULT_NOTIFICATION_TITLE: &str =
  "Reminder";
const DEFAULT_NOTIFICATION_BODY: &str =
  "You have a task!";

/// Category tag on a task list item, used by list mode.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ListCategory {
  Task,
  Grocery
}

impl ListCategory {
  #[must_use]
  pub fn as_attr(self) -> &'static str {
    match self {
      | Self::Task => "task",
      | Self::Grocery => "grocery"
    }
  }

  #[must_use]
  pub fn from_attr(
    raw: &str
  ) -> Option<Self> {
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "task" => Some(Self::Task),
      | "grocery" => Some(Self::Grocery),
      | _ => None
    }
  }
}

/// Client-side mirror of a rendered task list item.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Task {
  pub id:             String,
  #[serde(default)]
  pub title:          String,
  #[serde(default)]
  pub time:           String,
  #[serde(default)]
  pub action:         String,
  #[serde(default)]
  pub notify_enabled: bool,
  #[serde(default)]
  pub category:       Option<ListCategory>
}

impl Task {
  /// Builds a task from element attributes. Returns `None` when the
  /// element carries no usable id.
  pub fn from_attributes<F>(
    attr: F
  ) -> Option<Self>
  where
    F: Fn(&str) -> Option<String>
  {
    let id = attr(ATTR_ID)
      .map(|id| id.trim().to_string())
      .filter(|id| !id.is_empty())?;

    Some(Self {
      id,
      title: attr(ATTR_TITLE)
        .unwrap_or_default(),
      time: attr(ATTR_TIME)
        .unwrap_or_default(),
      action: attr(ATTR_ACTION)
        .unwrap_or_default(),
      notify_enabled: attr(
        ATTR_NOTIFY_ENABLED
      )
      .as_deref()
      .is_some_and(parse_flag),
      category: attr(ATTR_TYPE)
        .as_deref()
        .and_then(
          ListCategory::from_attr
        )
    })
  }
}

/// Accepts the spellings templates commonly render for booleans.
#[must_use]
pub fn parse_flag(raw: &str) -> bool {
  matches!(
    raw
      .trim()
      .to_ascii_lowercase()
      .as_str(),
    "true" | "1" | "yes" | "on"
  )
}

/// A due reminder, as delivered by the push channel or the poll
/// endpoint.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct DueNotification {
  #[serde(
    default,
    deserialize_with = "string_or_number"
  )]
  pub id:    String,
  #[serde(
    default = "default_notification_title"
  )]
  pub title: String,
  #[serde(
    default = "default_notification_body"
  )]
  pub body:  String
}

impl DueNotification {
  pub fn new(
    id: impl Into<String>,
    title: impl Into<String>,
    body: impl Into<String>
  ) -> Self {
    Self {
      id:    id.into(),
      title: title.into(),
      body:  body.into()
    }
  }
}

fn default_notification_title() -> String
{
  DEFAULT_NOTIFICATION_TITLE.to_string()
}

fn default_notification_body() -> String {
  DEFAULT_NOTIFICATION_BODY.to_string()
}

/// Body of `POST /tasks/notify_toggle/{id}`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct ToggleResponse {
  #[serde(default)]
  pub success:        bool,
  #[serde(default)]
  pub notify_enabled: bool
}

fn string_or_number<'de, D>(
  deserializer: D
) -> Result<String, D::Error>
where
  D: Deserializer<'de>
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Text(String),
    Number(i64),
    Float(f64),
    Missing(())
  }

  Ok(
    match RawId::deserialize(
      deserializer
    )? {
      | RawId::Text(text) => text,
      | RawId::Number(number) => {
        number.to_string()
      }
      | RawId::Float(number) => {
        format!("{number}")
      }
      | RawId::Missing(()) => {
        String::new()
      }
    }
  )
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::{
    DueNotification,
    ListCategory,
    Task,
    ToggleResponse
  };

  #[test]
  fn due_notification_accepts_numeric_ids_and_defaults() {
    let parsed: Vec<DueNotification> =
      serde_json::from_str(
        r#"[{"id": 12, "title": "Water", "body": "Plants"},
            {"title": "Standup"},
            {"id": null}]"#,
      )
      .expect("decode due list");

    assert_eq!(
      parsed[0],
      DueNotification::new(
        "12", "Water", "Plants"
      )
    );
    assert_eq!(parsed[1].id, "");
    assert_eq!(
      parsed[1].body,
      "You have a task!"
    );
    assert_eq!(
      parsed[2].title,
      "Reminder"
    );
  }

  #[test]
  fn task_from_attributes_fills_missing_fields() {
    let attrs: HashMap<&str, &str> = [
      ("data-id", "3"),
      ("data-title", "Groceries"),
      ("data-type", "Grocery"),
      ("data-notify-enabled", "True")
    ]
    .into_iter()
    .collect();

    let task = Task::from_attributes(
      |name| {
        attrs
          .get(name)
          .map(|v| (*v).to_string())
      }
    )
    .expect("task with id");

    assert_eq!(task.id, "3");
    assert_eq!(task.time, "");
    assert_eq!(task.action, "");
    assert!(task.notify_enabled);
    assert_eq!(
      task.category,
      Some(ListCategory::Grocery)
    );
  }

  #[test]
  fn task_without_id_is_skipped() {
    assert!(
      Task::from_attributes(|_| None)
        .is_none()
    );
    assert!(
      Task::from_attributes(|_| {
        Some("  ".to_string())
      })
      .is_none()
    );
  }

  #[test]
  fn toggle_response_tolerates_missing_fields() {
    let parsed: ToggleResponse =
      serde_json::from_str("{}")
        .expect("decode");
    assert!(!parsed.success);
    assert!(!parsed.notify_enabled);
  }
}
