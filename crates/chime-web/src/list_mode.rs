use chime_core::ClientConfig;
use chime_core::list_mode::{
  AUTO_HEIGHT,
  ListItem,
  ListModeOutcome,
  evaluate_list_mode
};
use chime_core::task::{
  ATTR_TYPE,
  ListCategory
};

use crate::action_bar;
use crate::dom;
use crate::form::TaskForm;

const LIST_ITEM_SELECTOR: &str =
  "#taskList li";
const ITEM_TEXT_SELECTOR: &str =
  ".task-action-text";

/// Re-evaluates list mode from the current title and rendered items,
/// then makes sure the action bar exists.
pub fn check_list_mode(
  form: &TaskForm,
  cfg: &ClientConfig
) {
  let Some(action) = &form.action else {
    return;
  };

  match evaluate_list_mode(
    &form.title_value(),
    &rendered_list_items(),
    &cfg.list_mode_height
  ) {
    | ListModeOutcome::Aggregated {
      action: text,
      height,
      ..
    } => {
      action.set_style("height", &height);
      action.set_value(&text);
    }
    | ListModeOutcome::FreeText => {
      action.set_style(
        "height",
        AUTO_HEIGHT
      );
    }
  }

  action_bar::ensure(form);
}

fn rendered_list_items() -> Vec<ListItem> {
  dom::query_all(LIST_ITEM_SELECTOR)
    .iter()
    .filter_map(|item| {
      let text = item
        .query_selector(
          ITEM_TEXT_SELECTOR
        )
        .ok()
        .flatten()?;
      let category =
        dom::attr(item, ATTR_TYPE)
          .as_deref()
          .and_then(
            ListCategory::from_attr
          );
      Some(ListItem::new(
        category,
        dom::text_of(&text)
      ))
    })
    .collect()
}
