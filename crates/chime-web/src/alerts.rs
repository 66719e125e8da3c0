use gloo::timers::callback::Timeout;

use crate::dom;

/// Fades every flash alert after `delay_ms`.
pub fn schedule_dismiss(delay_ms: u32) {
  let alerts = dom::query_all(".alert");
  if alerts.is_empty() {
    return;
  }

  tracing::debug!(
    count = alerts.len(),
    delay_ms,
    "scheduling alert dismissal"
  );

  for alert in alerts {
    Timeout::new(delay_ms, move || {
      let classes = alert.class_list();
      if let Err(error) = classes
        .remove_1("show")
        .and_then(|()| {
          classes.add_1("hide")
        })
      {
        tracing::warn!(
          error = ?error,
          "failed to hide alert"
        );
      }
    })
    .forget();
  }
}
