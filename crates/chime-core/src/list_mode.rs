use crate::task::ListCategory;

pub const TASK_LIST_PHRASE: &str =
  "prepare task list";
pub const GROCERY_LIST_PHRASE: &str =
  "prepare grocery list";
pub const AUTO_HEIGHT: &str = "auto";

/// Recognizes the two list-mode titles. Matching is exact apart from
/// letter case.
#[must_use]
pub fn list_mode_for_title(
  title: &str
) -> Option<ListCategory> {
  let lowered = title.to_lowercase();
  match lowered.as_str() {
    | TASK_LIST_PHRASE => {
      Some(ListCategory::Task)
    }
    | GROCERY_LIST_PHRASE => {
      Some(ListCategory::Grocery)
    }
    | _ => None
  }
}

/// One rendered list item, reduced to what list mode reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
  pub category: Option<ListCategory>,
  pub text:     String
}

impl ListItem {
  pub fn new(
    category: Option<ListCategory>,
    text: impl Into<String>
  ) -> Self {
    Self {
      category,
      text: text.into()
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListModeOutcome {
  /// The action field becomes the joined item text at a fixed height.
  Aggregated {
    category: ListCategory,
    action:   String,
    height:   String
  },
  /// The action field keeps its text and goes back to auto height.
  FreeText
}

impl ListModeOutcome {
  #[must_use]
  pub fn height(&self) -> &str {
    match self {
      | Self::Aggregated {
        height, ..
      } => height,
      | Self::FreeText => AUTO_HEIGHT
    }
  }
}

pub fn evaluate_list_mode(
  title: &str,
  items: &[ListItem],
  fixed_height: &str
) -> ListModeOutcome {
  let Some(category) =
    list_mode_for_title(title)
  else {
    return ListModeOutcome::FreeText;
  };

  let action = items
    .iter()
    .filter(|item| {
      item.category == Some(category)
    })
    .map(|item| item.text.as_str())
    .collect::<Vec<_>>()
    .join(", ");

  tracing::debug!(
    category = category.as_attr(),
    action_len = action.len(),
    "list mode aggregated items"
  );

  ListModeOutcome::Aggregated {
    category,
    action,
    height: fixed_height.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::{
    ListItem,
    ListModeOutcome,
    evaluate_list_mode,
    list_mode_for_title
  };
  use crate::task::ListCategory;

  fn sample_items() -> Vec<ListItem> {
    vec![
      ListItem::new(
        Some(ListCategory::Task),
        "Buy milk"
      ),
      ListItem::new(
        Some(ListCategory::Grocery),
        "Eggs"
      ),
      ListItem::new(None, "Untagged"),
      ListItem::new(
        Some(ListCategory::Task),
        "Call Bob"
      ),
    ]
  }

  #[test]
  fn task_list_title_joins_task_items() {
    let outcome = evaluate_list_mode(
      "Prepare Task List",
      &sample_items(),
      "120px"
    );
    assert_eq!(
      outcome,
      ListModeOutcome::Aggregated {
        category: ListCategory::Task,
        action:   "Buy milk, Call Bob"
          .to_string(),
        height:   "120px".to_string()
      }
    );
  }

  #[test]
  fn grocery_title_joins_grocery_items() {
    let outcome = evaluate_list_mode(
      "PREPARE GROCERY LIST",
      &sample_items(),
      "120px"
    );
    assert!(matches!(
      outcome,
      ListModeOutcome::Aggregated {
        ref action, ..
      } if action == "Eggs"
    ));
  }

  #[test]
  fn other_titles_stay_free_text() {
    let outcome = evaluate_list_mode(
      "Shopping",
      &sample_items(),
      "120px"
    );
    assert_eq!(
      outcome,
      ListModeOutcome::FreeText
    );
    assert_eq!(outcome.height(), "auto");
    assert_eq!(
      list_mode_for_title(
        " prepare task list"
      ),
      None
    );
  }

  #[test]
  fn empty_category_yields_empty_action() {
    let outcome = evaluate_list_mode(
      "prepare grocery list",
      &[],
      "120px"
    );
    assert_eq!(outcome.height(), "120px");
    assert!(matches!(
      outcome,
      ListModeOutcome::Aggregated {
        ref action, ..
      } if action.is_empty()
    ));
  }
}
