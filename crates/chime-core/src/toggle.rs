use tracing::{
  debug,
  warn
};

use crate::error::ChimeError;
use crate::task::ToggleResponse;

pub const GLYPH_ENABLED: &str = "🔔";
pub const GLYPH_DISABLED: &str = "🔕";

/// Notification state of one task as shown by its toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyState {
  Enabled,
  Disabled
}

impl NotifyState {
  #[must_use]
  pub fn from_enabled(
    enabled: bool
  ) -> Self {
    if enabled {
      Self::Enabled
    } else {
      Self::Disabled
    }
  }

  /// Anything other than the bell counts as muted.
  #[must_use]
  pub fn from_glyph(
    glyph: &str
  ) -> Self {
    Self::from_enabled(
      glyph.trim() == GLYPH_ENABLED
    )
  }

  #[must_use]
  pub fn is_enabled(self) -> bool {
    matches!(self, Self::Enabled)
  }

  #[must_use]
  pub fn glyph(self) -> &'static str {
    match self {
      | Self::Enabled => GLYPH_ENABLED,
      | Self::Disabled => GLYPH_DISABLED
    }
  }

  /// Value written to `data-notify-enabled`.
  #[must_use]
  pub fn as_attr(self) -> &'static str {
    match self {
      | Self::Enabled => "true",
      | Self::Disabled => "false"
    }
  }

  #[must_use]
  pub fn flipped(self) -> Self {
    match self {
      | Self::Enabled => Self::Disabled,
      | Self::Disabled => Self::Enabled
    }
  }
}

/// A click whose server acknowledgment has not arrived yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
  task_id:    String,
  previous:   NotifyState,
  optimistic: NotifyState
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
  /// Server accepted; this is the state it reported.
  Confirmed(NotifyState),
  /// Server refused or was unreachable; back to the pre-click state.
  Reverted(NotifyState)
}

impl ToggleOutcome {
  #[must_use]
  pub fn state(self) -> NotifyState {
    match self {
      | Self::Confirmed(state)
      | Self::Reverted(state) => state
    }
  }
}

impl PendingToggle {
  /// Starts a toggle from the currently displayed state. The caller
  /// shows [`PendingToggle::optimistic`] right away.
  pub fn begin(
    task_id: impl Into<String>,
    current: NotifyState
  ) -> Self {
    Self {
      task_id:    task_id.into(),
      previous:   current,
      optimistic: current.flipped()
    }
  }

  #[must_use]
  pub fn task_id(&self) -> &str {
    &self.task_id
  }

  #[must_use]
  pub fn previous(&self) -> NotifyState {
    self.previous
  }

  #[must_use]
  pub fn optimistic(
    &self
  ) -> NotifyState {
    self.optimistic
  }

  /// Transport errors and `success: false` are handled alike.
  pub fn settle(
    self,
    result: Result<
      ToggleResponse,
      ChimeError
    >
  ) -> ToggleOutcome {
    match result {
      | Ok(response)
        if response.success =>
      {
        let state =
          NotifyState::from_enabled(
            response.notify_enabled
          );
        debug!(
          task_id = %self.task_id,
          enabled = state.is_enabled(),
          "toggle confirmed"
        );
        ToggleOutcome::Confirmed(state)
      }
      | Ok(_) => {
        warn!(
          task_id = %self.task_id,
          "server rejected toggle; \
           reverting"
        );
        ToggleOutcome::Reverted(
          self.previous
        )
      }
      | Err(error) => {
        warn!(
          task_id = %self.task_id,
          %error,
          "toggle request failed; \
           reverting"
        );
        ToggleOutcome::Reverted(
          self.previous
        )
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    NotifyState,
    PendingToggle,
    ToggleOutcome
  };
  use crate::error::ChimeError;
  use crate::task::ToggleResponse;

  #[test]
  fn begin_flips_displayed_state() {
    let pending = PendingToggle::begin(
      "5",
      NotifyState::from_glyph("🔔")
    );
    assert_eq!(
      pending.optimistic().glyph(),
      "🔕"
    );
    assert_eq!(
      pending.previous(),
      NotifyState::Enabled
    );
  }

  #[test]
  fn rejected_response_reverts() {
    let pending = PendingToggle::begin(
      "5",
      NotifyState::Disabled
    );
    let outcome = pending.settle(Ok(
      ToggleResponse {
        success:        false,
        notify_enabled: true
      }
    ));
    assert_eq!(
      outcome,
      ToggleOutcome::Reverted(
        NotifyState::Disabled
      )
    );
    assert_eq!(
      outcome.state().glyph(),
      "🔕"
    );
  }

  #[test]
  fn transport_error_reverts() {
    let pending = PendingToggle::begin(
      "5",
      NotifyState::Enabled
    );
    let outcome =
      pending.settle(Err(
        ChimeError::Transport {
          url:    "/tasks/notify_toggle/5"
            .to_string(),
          reason: "offline".to_string()
        }
      ));
    assert_eq!(
      outcome,
      ToggleOutcome::Reverted(
        NotifyState::Enabled
      )
    );
  }

  #[test]
  fn server_flag_wins_on_success() {
    let pending = PendingToggle::begin(
      "5",
      NotifyState::Disabled
    );
    let outcome = pending.settle(Ok(
      ToggleResponse {
        success:        true,
        notify_enabled: false
      }
    ));
    assert_eq!(
      outcome,
      ToggleOutcome::Confirmed(
        NotifyState::Disabled
      )
    );
  }
}
