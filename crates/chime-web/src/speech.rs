use std::cell::RefCell;

use js_sys::{
  Array,
  Function,
  Reflect
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

const RECOGNITION_CONSTRUCTORS: [&str; 2] = [
  "SpeechRecognition",
  "webkitSpeechRecognition"
];

/// Browser speech-to-text, one utterance per [`SpeechInput::capture`].
pub struct SpeechInput {
  recognition: JsValue,
  on_result:
    RefCell<Option<Closure<dyn FnMut(JsValue)>>>
}

impl SpeechInput {
  /// `None` when the browser has no recognition engine.
  pub fn new(lang: &str) -> Option<Self> {
    let window = web_sys::window()?;
    let ctor = RECOGNITION_CONSTRUCTORS
      .iter()
      .find_map(|name| {
        Reflect::get(
          &window,
          &JsValue::from_str(name)
        )
        .ok()
        .and_then(|value| {
          value.dyn_into::<Function>().ok()
        })
      });
    let Some(ctor) = ctor else {
      tracing::warn!(
        "speech recognition unsupported \
         in this browser"
      );
      return None;
    };

    let recognition =
      match Reflect::construct(
        &ctor,
        &Array::new()
      ) {
        | Ok(recognition) => recognition,
        | Err(error) => {
          tracing::error!(
            error = ?error,
            "failed to create speech \
             recognizer"
          );
          return None;
        }
      };

    for (key, value) in [
      ("lang", JsValue::from_str(lang)),
      (
        "interimResults",
        JsValue::FALSE
      )
    ] {
      if let Err(error) = Reflect::set(
        &recognition,
        &JsValue::from_str(key),
        &value
      ) {
        tracing::warn!(
          error = ?error,
          key,
          "failed to configure speech \
           recognizer"
        );
      }
    }

    Some(Self {
      recognition,
      on_result: RefCell::new(None)
    })
  }

  /// Aborts any capture in progress and listens for one utterance.
  /// `on_transcript` runs at most once, only for a non-empty result.
  pub fn capture<F>(
    &self,
    on_transcript: F
  ) where
    F: FnOnce(String) + 'static
  {
    self.call("abort");

    let mut pending = Some(on_transcript);
    let closure =
      Closure::<dyn FnMut(JsValue)>::new(
        move |event: JsValue| {
          let Some(transcript) =
            first_transcript(&event)
          else {
            tracing::debug!(
              "speech result without \
               transcript"
            );
            return;
          };
          tracing::info!(
            %transcript,
            "speech captured"
          );
          if let Some(handler) =
            pending.take()
          {
            handler(transcript);
          }
        }
      );

    if let Err(error) = Reflect::set(
      &self.recognition,
      &JsValue::from_str("onresult"),
      closure.as_ref()
    ) {
      tracing::error!(
        error = ?error,
        "failed to attach speech handler"
      );
      return;
    }
    self
      .on_result
      .replace(Some(closure));

    self.call("start");
  }

  fn call(&self, method: &str) {
    let result = Reflect::get(
      &self.recognition,
      &JsValue::from_str(method)
    )
    .and_then(|value| {
      value.dyn_into::<Function>()
    })
    .and_then(|function| {
      function.call0(&self.recognition)
    });

    if let Err(error) = result {
      tracing::warn!(
        error = ?error,
        method,
        "speech recognizer call failed"
      );
    }
  }
}

fn first_transcript(
  event: &JsValue
) -> Option<String> {
  let results = Reflect::get(
    event,
    &JsValue::from_str("results")
  )
  .ok()?;
  let first =
    Reflect::get_u32(&results, 0).ok()?;
  let alternative =
    Reflect::get_u32(&first, 0).ok()?;
  Reflect::get(
    &alternative,
    &JsValue::from_str("transcript")
  )
  .ok()?
  .as_string()
  .map(|text| text.trim().to_string())
  .filter(|text| !text.is_empty())
}
