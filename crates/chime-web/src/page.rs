use std::cell::RefCell;
use std::rc::Rc;

use chime_core::{
  ClientConfig,
  NotificationSession,
  SessionHandle,
  session_channel
};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use web_sys::Element;

use crate::dom;
use crate::form::TaskForm;
use crate::list_mode::check_list_mode;
use crate::notifier::{
  self,
  BrowserNotifier
};
use crate::poll;
use crate::push::{
  self,
  PushSubscription
};
use crate::speech::SpeechInput;
use crate::task_list::{
  self,
  TASK_LIST_ID
};

/// What every task page handler needs.
pub struct PageContext {
  pub config:  ClientConfig,
  pub form:    TaskForm,
  pub session: SessionHandle,
  pub speech:  Option<Rc<SpeechInput>>
}

struct TaskPage {
  ctx:       Rc<PageContext>,
  listeners: Vec<EventListener>,
  _poll:     Interval,
  _push:     Option<PushSubscription>
}

thread_local! {
  static TASK_PAGE: RefCell<Option<TaskPage>> =
    const { RefCell::new(None) };
}

/// Wires the task page. Pages without the task form or list are left
/// alone.
pub fn mount(config: ClientConfig) {
  let form = TaskForm::locate();
  let has_list =
    dom::by_id::<Element>(TASK_LIST_ID)
      .is_some();
  if form.form.is_none() && !has_list {
    tracing::debug!(
      "no task page elements; skipping \
       task page wiring"
    );
    return;
  }

  if let Some(action) = &form.action {
    action.set_style(
      "white-space",
      "pre-wrap"
    );
  }
  if let Some(task_form) = &form.form
    && task_form
      .get_attribute("action")
      .is_none_or(|action| {
        action.trim().is_empty()
      })
  {
    task_form.set_action(
      &config.form_target(None)
    );
  }

  let tasks = task_list::rendered_tasks();
  tracing::info!(
    tasks = tasks.len(),
    "mounting task page"
  );
  let (session, consumer) =
    session_channel(
      NotificationSession::from_tasks(
        &tasks
      )
    );
  wasm_bindgen_futures::spawn_local(
    async move {
      let desktop = BrowserNotifier;
      consumer.run(&desktop).await;
    }
  );
  notifier::request_permission_once();

  let speech =
    SpeechInput::new(&config.speech_lang)
      .map(Rc::new);
  let ctx = Rc::new(PageContext {
    config,
    form,
    session,
    speech
  });

  let listeners = bind(&ctx);
  check_list_mode(
    &ctx.form,
    &ctx.config
  );
  let poll = poll::start(
    &ctx.config,
    ctx.session.clone()
  );
  let push = push::subscribe(
    &ctx.config.push_event,
    ctx.session.clone()
  );

  TASK_PAGE.with(|slot| {
    slot.replace(Some(TaskPage {
      ctx,
      listeners,
      _poll: poll,
      _push: push
    }));
  });
}

/// Re-attaches handlers after part of the page was re-rendered. Old
/// listeners are dropped, which detaches them; the notification
/// session survives.
pub fn rebind() {
  TASK_PAGE.with(|slot| {
    let mut slot = slot.borrow_mut();
    let Some(page) = slot.as_mut() else {
      tracing::warn!(
        "rebind requested before the \
         task page was mounted"
      );
      return;
    };

    let ctx = Rc::new(PageContext {
      config:  page.ctx.config.clone(),
      form:    TaskForm::locate(),
      session: page.ctx.session.clone(),
      speech:  page.ctx.speech.clone()
    });
    for task in task_list::rendered_tasks()
    {
      ctx.session.set_enabled(
        task.id,
        task.notify_enabled
      );
    }

    page.listeners = bind(&ctx);
    check_list_mode(
      &ctx.form,
      &ctx.config
    );
    page.ctx = ctx;
    tracing::info!(
      listeners = page.listeners.len(),
      "task page handlers rebound"
    );
  });
}

fn bind(
  ctx: &Rc<PageContext>
) -> Vec<EventListener> {
  let mut listeners = Vec::new();

  if let Some(title) = &ctx.form.title {
    let ctx = Rc::clone(ctx);
    listeners.push(EventListener::new(
      title.html(),
      "input",
      move |_event| {
        check_list_mode(
          &ctx.form,
          &ctx.config
        );
      }
    ));
  }

  listeners.extend(bind_mic(
    ctx,
    "micTitleBtn",
    |ctx, transcript| {
      if let Some(title) = &ctx.form.title {
        title.set_value(&transcript);
      }
      check_list_mode(
        &ctx.form,
        &ctx.config
      );
    }
  ));
  listeners.extend(bind_mic(
    ctx,
    "micTimeBtn",
    |ctx, transcript| {
      ctx
        .form
        .fill_time_from_speech(&transcript);
    }
  ));
  listeners.extend(bind_mic(
    ctx,
    "micActionBtn",
    |ctx, transcript| {
      ctx
        .form
        .append_action_from_speech(
          &transcript
        );
    }
  ));

  if let Some(list) =
    dom::by_id::<Element>(TASK_LIST_ID)
  {
    let ctx = Rc::clone(ctx);
    listeners.push(EventListener::new(
      &list,
      "click",
      move |event| {
        task_list::on_list_click(
          event, &ctx
        );
      }
    ));
  }

  listeners
}

fn bind_mic(
  ctx: &Rc<PageContext>,
  button_id: &str,
  on_transcript: fn(&PageContext, String)
) -> Option<EventListener> {
  let button =
    dom::by_id::<Element>(button_id)?;
  let speech = ctx.speech.clone()?;
  let ctx = Rc::clone(ctx);

  Some(EventListener::new(
    &button,
    "click",
    move |_event| {
      let ctx = Rc::clone(&ctx);
      speech.capture(move |transcript| {
        on_transcript(&ctx, transcript);
      });
    }
  ))
}

