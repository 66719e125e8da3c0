use std::cell::RefCell;
use std::collections::HashMap;

use chime_core::list_mode::{
  ListItem,
  ListModeOutcome,
  evaluate_list_mode
};
use chime_core::toggle::{
  NotifyState,
  PendingToggle
};
use chime_core::{
  ChimeError,
  ClientConfig,
  DeliverySource,
  DueNotification,
  NotificationSession,
  Notifier,
  Task,
  ToggleResponse,
  session_channel
};
use futures::executor::block_on;

#[derive(Default)]
struct CountingNotifier {
  shown: RefCell<Vec<String>>
}

impl Notifier for CountingNotifier {
  fn show_desktop(
    &self,
    title: &str,
    _body: &str
  ) -> bool {
    self
      .shown
      .borrow_mut()
      .push(title.to_string());
    true
  }

  fn speak(
    &self,
    _text: &str
  ) -> Result<(), ChimeError> {
    Err(ChimeError::Speech(
      "not in tests".to_string()
    ))
  }
}

fn rendered_tasks() -> Vec<Task> {
  let rows = [
    [
      ("data-id", "1"),
      ("data-title", "Buy milk"),
      ("data-type", "task"),
      ("data-notify-enabled", "false")
    ],
    [
      ("data-id", "2"),
      ("data-title", "Call Bob"),
      ("data-type", "task"),
      ("data-notify-enabled", "true")
    ]
  ];

  rows
    .iter()
    .filter_map(|row| {
      let attrs: HashMap<&str, &str> =
        row.iter().copied().collect();
      Task::from_attributes(|name| {
        attrs
          .get(name)
          .map(|v| (*v).to_string())
      })
    })
    .collect()
}

#[test]
fn toggled_task_receives_the_next_poll() {
  let tasks = rendered_tasks();
  let notifier =
    CountingNotifier::default();
  let (handle, consumer) =
    session_channel(
      NotificationSession::from_tasks(
        &tasks
      )
    );

  let milk = DueNotification::new(
    "1", "Buy milk", "Corner shop"
  );
  handle.submit(
    DeliverySource::Poll,
    milk.clone()
  );

  let pending = PendingToggle::begin(
    "1",
    NotifyState::from_enabled(
      tasks[0].notify_enabled
    )
  );
  handle.set_enabled(
    pending.task_id(),
    pending.optimistic().is_enabled()
  );
  let outcome = pending.settle(Ok(
    ToggleResponse {
      success:        true,
      notify_enabled: true
    }
  ));
  handle.set_enabled(
    "1",
    outcome.state().is_enabled()
  );

  handle.submit(
    DeliverySource::Push,
    milk.clone()
  );
  handle.submit(
    DeliverySource::Poll,
    milk
  );
  drop(handle);

  let session =
    block_on(consumer.run(&notifier));

  assert_eq!(
    notifier.shown.borrow().as_slice(),
    ["Buy milk".to_string()]
  );
  assert_eq!(
    session.delivered_count(),
    1
  );
}

#[test]
fn failed_toggle_restores_map_entry() {
  let tasks = rendered_tasks();
  let notifier =
    CountingNotifier::default();
  let (handle, consumer) =
    session_channel(
      NotificationSession::from_tasks(
        &tasks
      )
    );

  let pending = PendingToggle::begin(
    "2",
    NotifyState::Enabled
  );
  handle.set_enabled(
    "2",
    pending.optimistic().is_enabled()
  );
  let outcome =
    pending.settle(Err(
      ChimeError::Status {
        url:    ClientConfig::default()
          .toggle_url("2"),
        status: 500
      }
    ));
  handle.set_enabled(
    "2",
    outcome.state().is_enabled()
  );
  drop(handle);

  let session =
    block_on(consumer.run(&notifier));
  assert!(session.is_enabled("2"));
  assert_eq!(
    outcome.state().glyph(),
    "🔔"
  );
}

#[test]
fn list_mode_reads_rendered_items() {
  let items: Vec<ListItem> =
    rendered_tasks()
      .into_iter()
      .map(|task| {
        ListItem::new(
          task.category,
          task.title
        )
      })
      .collect();

  let outcome = evaluate_list_mode(
    "Prepare Task List",
    &items,
    &ClientConfig::default()
      .list_mode_height
  );
  assert_eq!(outcome.height(), "120px");
  assert!(matches!(
    outcome,
    ListModeOutcome::Aggregated {
      ref action,
      ..
    } if action == "Buy milk, Call Bob"
  ));
}
