use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  HtmlElement,
  HtmlInputElement,
  HtmlTextAreaElement
};

pub fn document() -> Option<Document> {
  web_sys::window()
    .and_then(|window| window.document())
}

/// Looks up an element by id and casts it. Missing or mistyped
/// elements yield `None`.
pub fn by_id<T>(id: &str) -> Option<T>
where
  T: JsCast
{
  document()
    .and_then(|document| {
      document.get_element_by_id(id)
    })
    .and_then(|element| {
      element.dyn_into::<T>().ok()
    })
}

pub fn query_all(
  selector: &str
) -> Vec<Element> {
  let Some(document) = document() else {
    return Vec::new();
  };
  collect_elements(
    document
      .query_selector_all(selector)
      .ok()
  )
}

pub fn query_all_within(
  root: &Element,
  selector: &str
) -> Vec<Element> {
  collect_elements(
    root
      .query_selector_all(selector)
      .ok()
  )
}

fn collect_elements(
  list: Option<web_sys::NodeList>
) -> Vec<Element> {
  let Some(list) = list else {
    return Vec::new();
  };
  (0..list.length())
    .filter_map(|index| list.item(index))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

/// Closest ancestor (or self) of an event target matching `selector`.
pub fn closest_from_target(
  target: Option<web_sys::EventTarget>,
  selector: &str
) -> Option<Element> {
  target?
    .dyn_into::<Element>()
    .ok()?
    .closest(selector)
    .ok()
    .flatten()
}

pub fn attr(
  element: &Element,
  name: &str
) -> Option<String> {
  element.get_attribute(name)
}

pub fn text_of(
  element: &Element
) -> String {
  element
    .text_content()
    .unwrap_or_default()
}

/// A text control that may be rendered as `<input>` or `<textarea>`.
#[derive(Clone)]
pub enum TextField {
  Input(HtmlInputElement),
  Area(HtmlTextAreaElement)
}

impl TextField {
  pub fn by_id(id: &str) -> Option<Self> {
    let element =
      by_id::<Element>(id)?;
    if let Some(input) =
      element.dyn_ref::<HtmlInputElement>()
    {
      return Some(Self::Input(
        input.clone()
      ));
    }
    element
      .dyn_into::<HtmlTextAreaElement>()
      .ok()
      .map(Self::Area)
  }

  pub fn value(&self) -> String {
    match self {
      | Self::Input(input) => input.value(),
      | Self::Area(area) => area.value()
    }
  }

  pub fn set_value(&self, value: &str) {
    match self {
      | Self::Input(input) => {
        input.set_value(value);
      }
      | Self::Area(area) => {
        area.set_value(value);
      }
    }
  }

  pub fn html(&self) -> &HtmlElement {
    match self {
      | Self::Input(input) => {
        input.as_ref()
      }
      | Self::Area(area) => area.as_ref()
    }
  }

  pub fn set_style(
    &self,
    property: &str,
    value: &str
  ) {
    if let Err(error) = self
      .html()
      .style()
      .set_property(property, value)
    {
      tracing::warn!(
        error = ?error,
        property,
        "failed to set field style"
      );
    }
  }
}
