use std::rc::Rc;

use chime_core::edit::EditForm;
use chime_core::task::{
  ATTR_ID,
  ATTR_NOTIFY_ENABLED,
  Task
};
use chime_core::toggle::{
  NotifyState,
  PendingToggle,
  ToggleOutcome
};
use web_sys::{
  Element,
  Event
};

use crate::api;
use crate::dom;
use crate::list_mode::check_list_mode;
use crate::page::PageContext;

pub const TASK_LIST_ID: &str = "taskList";
const ITEM_SELECTOR: &str = "li";
const EDIT_SELECTOR: &str = ".edit-task";
const TOGGLE_SELECTOR: &str =
  ".toggle-notif";

/// Reads every rendered task and normalizes its toggle glyph so the
/// glyph and the seeded flag agree.
pub fn rendered_tasks() -> Vec<Task> {
  let Some(list) =
    dom::by_id::<Element>(TASK_LIST_ID)
  else {
    return Vec::new();
  };

  dom::query_all_within(
    &list,
    ITEM_SELECTOR
  )
  .iter()
  .filter_map(|item| {
    let toggle = first_within(
      item,
      TOGGLE_SELECTOR
    );
    let mut task =
      Task::from_attributes(|name| {
        attr_with_edit_fallback(
          item, name
        )
      })?;

    if dom::attr(
      item,
      ATTR_NOTIFY_ENABLED
    )
    .is_none()
      && let Some(toggle) = &toggle
    {
      task.notify_enabled =
        NotifyState::from_glyph(
          &dom::text_of(toggle)
        )
        .is_enabled();
    }
    if let Some(toggle) = &toggle {
      toggle.set_text_content(Some(
        NotifyState::from_enabled(
          task.notify_enabled
        )
        .glyph()
      ));
    }
    Some(task)
  })
  .collect()
}

/// Delegated click handler for the task list. Routes edit and toggle
/// affordances; anything else is ignored.
pub fn on_list_click(
  event: &Event,
  ctx: &Rc<PageContext>
) {
  if let Some(edit) =
    dom::closest_from_target(
      event.target(),
      EDIT_SELECTOR
    )
  {
    populate_edit(&edit, ctx);
    return;
  }

  if let Some(toggle) =
    dom::closest_from_target(
      event.target(),
      TOGGLE_SELECTOR
    )
  {
    toggle_notifications(toggle, ctx);
  }
}

fn populate_edit(
  edit: &Element,
  ctx: &PageContext
) {
  let Some(form) =
    EditForm::from_attributes(
      &ctx.config,
      |name| dom::attr(edit, name)
    )
  else {
    tracing::warn!(
      "edit button without task id"
    );
    return;
  };

  ctx.form.apply_edit(&form);
  check_list_mode(
    &ctx.form,
    &ctx.config
  );
}

fn toggle_notifications(
  toggle: Element,
  ctx: &Rc<PageContext>
) {
  let Some(item) = toggle
    .closest(ITEM_SELECTOR)
    .ok()
    .flatten()
  else {
    return;
  };
  let Some(task_id) =
    attr_with_edit_fallback(
      &item, ATTR_ID
    )
    .filter(|id| !id.trim().is_empty())
  else {
    tracing::warn!(
      "toggle outside a task item"
    );
    return;
  };

  let pending = PendingToggle::begin(
    task_id,
    NotifyState::from_glyph(
      &dom::text_of(&toggle)
    )
  );
  show_state(
    &toggle,
    pending.optimistic()
  );
  ctx.session.set_enabled(
    pending.task_id(),
    pending.optimistic().is_enabled()
  );

  let url = ctx
    .config
    .toggle_url(pending.task_id());
  let ctx = Rc::clone(ctx);
  wasm_bindgen_futures::spawn_local(
    async move {
      let result =
        api::post_notify_toggle(&url)
          .await;
      let task_id =
        pending.task_id().to_string();
      let outcome = pending.settle(result);
      let state = outcome.state();

      show_state(&toggle, state);
      ctx
        .session
        .set_enabled(task_id, state.is_enabled());
      if let ToggleOutcome::Confirmed(
        confirmed
      ) = outcome
        && let Err(error) =
          item.set_attribute(
            ATTR_NOTIFY_ENABLED,
            confirmed.as_attr()
          )
      {
        tracing::warn!(
          error = ?error,
          "failed to persist toggle state \
           on task item"
        );
      }
    }
  );
}

fn show_state(
  toggle: &Element,
  state: NotifyState
) {
  toggle
    .set_text_content(Some(state.glyph()));
}

fn first_within(
  root: &Element,
  selector: &str
) -> Option<Element> {
  root
    .query_selector(selector)
    .ok()
    .flatten()
}

/// Item attribute, falling back to the edit button's data attribute
/// for templates that only annotate the button.
fn attr_with_edit_fallback(
  item: &Element,
  name: &str
) -> Option<String> {
  dom::attr(item, name).or_else(|| {
    first_within(item, EDIT_SELECTOR)
      .and_then(|edit| {
        dom::attr(&edit, name)
      })
  })
}
