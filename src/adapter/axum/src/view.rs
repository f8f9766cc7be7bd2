/* src/adapter/axum/src/view.rs */

use std::collections::HashMap;

use inertia_server::{InertiaError, script_safe_json};
use regex::Regex;
use serde_json::{Map, Value};

/// Renders the full-document representation. `data` is the response's
/// view data plus the serialized page object under `"page"`.
pub trait ViewRenderer: Send + Sync {
  fn render(&self, view: &str, data: &Map<String, Value>) -> Result<String, InertiaError>;
}

/// Template store for hosts without a template engine.
///
/// `<!--view:key-->` comments are substituted from the data bag (values
/// HTML-escaped), and the page object is injected as
/// `<script id="page" type="application/json">` before `</body>` so the
/// client can hydrate.
pub struct StaticViews {
  templates: HashMap<String, String>,
  slot: Regex,
}

impl StaticViews {
  pub fn new() -> Self {
    Self {
      templates: HashMap::new(),
      slot: Regex::new(r"<!--view:([A-Za-z0-9_.-]+)-->").expect("valid slot pattern"),
    }
  }

  pub fn register(mut self, view: impl Into<String>, template: impl Into<String>) -> Self {
    self.templates.insert(view.into(), template.into());
    self
  }
}

impl Default for StaticViews {
  fn default() -> Self {
    Self::new()
  }
}

impl ViewRenderer for StaticViews {
  fn render(&self, view: &str, data: &Map<String, Value>) -> Result<String, InertiaError> {
    let template = self
      .templates
      .get(view)
      .ok_or_else(|| InertiaError::view(format!("no template registered for view '{view}'")))?;

    let mut html = self
      .slot
      .replace_all(template, |caps: &regex::Captures<'_>| match data.get(&caps[1]) {
        Some(Value::String(s)) => escape_html(s),
        Some(other) => escape_html(&other.to_string()),
        None => String::new(),
      })
      .into_owned();

    if let Some(page) = data.get("page") {
      let json = script_safe_json(&page.to_string());
      let script = format!(r#"<script id="page" type="application/json">{json}</script>"#);
      if let Some(pos) = html.rfind("</body>") {
        html.insert_str(pos, &script);
      } else {
        html.push_str(&script);
      }
    }
    Ok(html)
  }
}

fn escape_html(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for ch in input.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}
