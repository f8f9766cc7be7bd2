/* src/core/src/page.rs */

use serde::Serialize;

use crate::errors::InertiaError;

/// The wire payload: which component to render, its resolved props, the
/// request url, and the asset version the payload was built against.
///
/// `version` and `inline` serialize as `null` when unset; clients rely on
/// the keys being present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
  pub component: String,
  pub props: serde_json::Map<String, serde_json::Value>,
  pub url: String,
  pub version: Option<String>,
  pub inline: Option<InlinePage>,
}

/// Embedded rendering target. Shares the outer page's resolved props —
/// there is no second resolution pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlinePage {
  pub component: String,
  pub props: serde_json::Map<String, serde_json::Value>,
  pub url: String,
}

impl Page {
  /// Serialize for embedding into a document data bag.
  pub fn into_value(self) -> Result<serde_json::Value, InertiaError> {
    serde_json::to_value(self).map_err(Into::into)
  }
}
