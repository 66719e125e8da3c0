//! Single-consumer command queue in front of [`NotificationSession`].
//!
//! The push channel, the poll timer and the toggle controller each hold
//! a cloned [`SessionHandle`]; only the [`SessionConsumer`] touches the
//! delivered set and the enabled map.

use futures::StreamExt;
use futures::channel::mpsc::{
  UnboundedReceiver,
  UnboundedSender,
  unbounded
};
use tracing::{
  debug,
  warn
};

use crate::notify::{
  Delivery,
  DeliverySource,
  NotificationSession,
  Notifier
};
use crate::task::DueNotification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
  Candidate {
    source:       DeliverySource,
    notification: DueNotification
  },
  SetEnabled {
    task_id: String,
    enabled: bool
  }
}

#[derive(Debug, Clone)]
pub struct SessionHandle {
  tx: UnboundedSender<SessionCommand>
}

impl SessionHandle {
  /// Queues a candidate. Returns `false` once the consumer is gone.
  pub fn submit(
    &self,
    source: DeliverySource,
    notification: DueNotification
  ) -> bool {
    self.send(
      SessionCommand::Candidate {
        source,
        notification
      }
    )
  }

  pub fn submit_all<I>(
    &self,
    source: DeliverySource,
    notifications: I
  ) -> usize
  where
    I: IntoIterator<
      Item = DueNotification
    >
  {
    notifications
      .into_iter()
      .filter(|notification| {
        self.submit(
          source,
          notification.clone()
        )
      })
      .count()
  }

  pub fn set_enabled(
    &self,
    task_id: impl Into<String>,
    enabled: bool
  ) -> bool {
    self.send(
      SessionCommand::SetEnabled {
        task_id: task_id.into(),
        enabled
      }
    )
  }

  fn send(
    &self,
    command: SessionCommand
  ) -> bool {
    match self.tx.unbounded_send(command)
    {
      | Ok(()) => true,
      | Err(error) => {
        warn!(
          %error,
          "notification consumer is \
           gone; dropping command"
        );
        false
      }
    }
  }
}

#[derive(Debug)]
pub struct SessionConsumer {
  rx:      UnboundedReceiver<
    SessionCommand,
  >,
  session: NotificationSession
}

impl SessionConsumer {
  #[must_use]
  pub fn session(
    &self
  ) -> &NotificationSession {
    &self.session
  }

  /// Applies one command. Returns the delivery decision for
  /// candidates.
  pub fn apply<N>(
    &mut self,
    command: SessionCommand,
    notifier: &N
  ) -> Option<Delivery>
  where
    N: Notifier + ?Sized
  {
    match command {
      | SessionCommand::Candidate {
        source,
        notification
      } => Some(self.session.reconcile(
        source,
        &notification,
        notifier
      )),
      | SessionCommand::SetEnabled {
        task_id,
        enabled
      } => {
        debug!(
          %task_id,
          enabled,
          "updating task notification flag"
        );
        self
          .session
          .set_enabled(task_id, enabled);
        None
      }
    }
  }

  /// Drains commands until every handle is dropped, then hands the
  /// session back.
  pub async fn run<N>(
    mut self,
    notifier: &N
  ) -> NotificationSession
  where
    N: Notifier + ?Sized
  {
    while let Some(command) =
      self.rx.next().await
    {
      self.apply(command, notifier);
    }
    debug!(
      delivered =
        self.session.delivered_count(),
      "notification consumer stopped"
    );
    self.session
  }
}

pub fn session_channel(
  session: NotificationSession
) -> (SessionHandle, SessionConsumer) {
  let (tx, rx) = unbounded();
  (
    SessionHandle { tx },
    SessionConsumer { rx, session }
  )
}
