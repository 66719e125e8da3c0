use std::collections::{
  BTreeMap,
  BTreeSet
};
use std::fmt;

use tracing::{
  debug,
  info,
  warn
};

use crate::error::ChimeError;
use crate::task::{
  DueNotification,
  Task
};

/// Dedup token for one notification instance: `id|title|body`.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub struct NotificationKey(String);

impl NotificationKey {
  #[must_use]
  pub fn for_notification(
    notification: &DueNotification
  ) -> Self {
    Self(format!(
      "{}|{}|{}",
      notification.id,
      notification.title,
      notification.body
    ))
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for NotificationKey {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Where a candidate notification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliverySource {
  Push,
  Poll
}

impl DeliverySource {
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Push => "push",
      | Self::Poll => "poll"
    }
  }
}

/// Desktop and voice output. The browser implementation lives in the
/// frontend; tests use a recording fake.
pub trait Notifier {
  /// Shows a desktop notification. Returns `false` when permission is
  /// missing or the browser refused.
  fn show_desktop(
    &self,
    title: &str,
    body: &str
  ) -> bool;

  fn speak(
    &self,
    text: &str
  ) -> Result<(), ChimeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
  Delivered {
    desktop: bool,
    spoken:  bool
  },
  /// Key already delivered this session.
  Duplicate,
  /// Task muted or unknown. The key is not recorded.
  Muted
}

/// Page-lifetime notification state: which keys were delivered and
/// which tasks have notifications enabled.
#[derive(Debug, Clone, Default)]
pub struct NotificationSession {
  delivered: BTreeSet<NotificationKey>,
  enabled:   BTreeMap<String, bool>
}

impl NotificationSession {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn seeded<I, S>(
    entries: I
  ) -> Self
  where
    I: IntoIterator<Item = (S, bool)>,
    S: Into<String>
  {
    Self {
      delivered: BTreeSet::new(),
      enabled:   entries
        .into_iter()
        .map(|(id, on)| (id.into(), on))
        .collect()
    }
  }

  #[must_use]
  pub fn from_tasks(
    tasks: &[Task]
  ) -> Self {
    Self::seeded(tasks.iter().map(
      |task| {
        (
          task.id.clone(),
          task.notify_enabled
        )
      }
    ))
  }

  /// Returns the previous flag, if the task was known.
  pub fn set_enabled(
    &mut self,
    task_id: impl Into<String>,
    enabled: bool
  ) -> Option<bool> {
    self
      .enabled
      .insert(task_id.into(), enabled)
  }

  /// Unknown ids count as disabled.
  #[must_use]
  pub fn is_enabled(
    &self,
    task_id: &str
  ) -> bool {
    self
      .enabled
      .get(task_id)
      .copied()
      .unwrap_or(false)
  }

  #[must_use]
  pub fn is_delivered(
    &self,
    key: &NotificationKey
  ) -> bool {
    self.delivered.contains(key)
  }

  #[must_use]
  pub fn delivered_count(&self) -> usize {
    self.delivered.len()
  }

  pub fn reconcile<N>(
    &mut self,
    source: DeliverySource,
    notification: &DueNotification,
    notifier: &N
  ) -> Delivery
  where
    N: Notifier + ?Sized
  {
    let key =
      NotificationKey::for_notification(
        notification
      );

    if self.delivered.contains(&key) {
      debug!(
        source = source.as_str(),
        %key,
        "dropping duplicate notification"
      );
      return Delivery::Duplicate;
    }

    if !self.is_enabled(&notification.id)
    {
      debug!(
        source = source.as_str(),
        task_id = %notification.id,
        "notifications disabled for task"
      );
      return Delivery::Muted;
    }

    let desktop = notifier.show_desktop(
      &notification.title,
      &notification.body
    );
    let spoken = match notifier
      .speak(&notification.body)
    {
      | Ok(()) => true,
      | Err(error) => {
        warn!(
          %error,
          "voice delivery skipped"
        );
        false
      }
    };

    info!(
      source = source.as_str(),
      task_id = %notification.id,
      desktop,
      spoken,
      "delivered notification"
    );
    self.delivered.insert(key);

    Delivery::Delivered {
      desktop,
      spoken
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use std::cell::RefCell;

  use super::{
    Delivery,
    DeliverySource,
    NotificationKey,
    NotificationSession,
    Notifier
  };
  use crate::error::ChimeError;
  use crate::task::DueNotification;

  #[derive(Default)]
  pub(crate) struct RecordingNotifier {
    pub(crate) desktop_granted: bool,
    pub(crate) voice_broken:    bool,
    pub(crate) shown:
      RefCell<Vec<(String, String)>>,
    pub(crate) spoken:
      RefCell<Vec<String>>
  }

  impl RecordingNotifier {
    pub(crate) fn granted() -> Self {
      Self {
        desktop_granted: true,
        ..Self::default()
      }
    }
  }

  impl Notifier for RecordingNotifier {
    fn show_desktop(
      &self,
      title: &str,
      body: &str
    ) -> bool {
      if !self.desktop_granted {
        return false;
      }
      self.shown.borrow_mut().push((
        title.to_string(),
        body.to_string()
      ));
      true
    }

    fn speak(
      &self,
      text: &str
    ) -> Result<(), ChimeError> {
      if self.voice_broken {
        return Err(ChimeError::Speech(
          "no engine".to_string()
        ));
      }
      self
        .spoken
        .borrow_mut()
        .push(text.to_string());
      Ok(())
    }
  }

  fn water() -> DueNotification {
    DueNotification::new(
      "1",
      "Water plants",
      "Balcony first"
    )
  }

  #[test]
  fn key_joins_fields_with_pipes() {
    assert_eq!(
      NotificationKey::for_notification(
        &water()
      )
      .as_str(),
      "1|Water plants|Balcony first"
    );
  }

  #[test]
  fn push_then_poll_delivers_once() {
    let notifier =
      RecordingNotifier::granted();
    let mut session =
      NotificationSession::seeded([(
        "1", true
      )]);

    let first = session.reconcile(
      DeliverySource::Push,
      &water(),
      &notifier
    );
    let second = session.reconcile(
      DeliverySource::Poll,
      &water(),
      &notifier
    );

    assert_eq!(
      first,
      Delivery::Delivered {
        desktop: true,
        spoken:  true
      }
    );
    assert_eq!(
      second,
      Delivery::Duplicate
    );
    assert_eq!(
      notifier.shown.borrow().len(),
      1
    );
    assert_eq!(
      notifier.spoken.borrow().as_slice(),
      ["Balcony first".to_string()]
    );
  }

  #[test]
  fn muted_task_is_not_recorded_and_can_deliver_later() {
    let notifier =
      RecordingNotifier::granted();
    let mut session =
      NotificationSession::seeded([(
        "1", false
      )]);

    assert_eq!(
      session.reconcile(
        DeliverySource::Push,
        &water(),
        &notifier
      ),
      Delivery::Muted
    );
    assert!(!session.is_delivered(
      &NotificationKey::for_notification(
        &water()
      )
    ));
    assert!(
      notifier.shown.borrow().is_empty()
    );

    session.set_enabled("1", true);
    assert!(matches!(
      session.reconcile(
        DeliverySource::Poll,
        &water(),
        &notifier
      ),
      Delivery::Delivered { .. }
    ));
    assert_eq!(
      notifier.shown.borrow().len(),
      1
    );
  }

  #[test]
  fn unknown_task_defaults_to_muted() {
    let notifier =
      RecordingNotifier::granted();
    let mut session =
      NotificationSession::new();
    assert_eq!(
      session.reconcile(
        DeliverySource::Poll,
        &water(),
        &notifier
      ),
      Delivery::Muted
    );
    assert_eq!(
      session.delivered_count(),
      0
    );
  }

  #[test]
  fn denied_permission_still_speaks() {
    let notifier =
      RecordingNotifier::default();
    let mut session =
      NotificationSession::seeded([(
        "1", true
      )]);

    assert_eq!(
      session.reconcile(
        DeliverySource::Push,
        &water(),
        &notifier
      ),
      Delivery::Delivered {
        desktop: false,
        spoken:  true
      }
    );
    assert_eq!(
      session.delivered_count(),
      1
    );
  }

  #[test]
  fn voice_failure_is_swallowed() {
    let notifier = RecordingNotifier {
      desktop_granted: true,
      voice_broken: true,
      ..RecordingNotifier::default()
    };
    let mut session =
      NotificationSession::seeded([(
        "1", true
      )]);

    assert_eq!(
      session.reconcile(
        DeliverySource::Push,
        &water(),
        &notifier
      ),
      Delivery::Delivered {
        desktop: true,
        spoken:  false
      }
    );
  }

  #[test]
  fn changed_body_is_a_new_key() {
    let notifier =
      RecordingNotifier::granted();
    let mut session =
      NotificationSession::seeded([(
        "1", true
      )]);

    session.reconcile(
      DeliverySource::Push,
      &water(),
      &notifier
    );
    let edited = DueNotification {
      body: "Kitchen first".to_string(),
      ..water()
    };
    assert!(matches!(
      session.reconcile(
        DeliverySource::Poll,
        &edited,
        &notifier
      ),
      Delivery::Delivered { .. }
    ));
    assert_eq!(
      session.delivered_count(),
      2
    );
  }
}
