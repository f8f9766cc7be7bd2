/* src/core/src/request.rs */

/// Marks a client speaking the JSON page protocol; echoed as `true` on
/// protocol responses.
pub const X_INERTIA: &str = "x-inertia";

/// Names the component the client currently has rendered. Partial reload
/// logic applies only when it equals the response component exactly.
pub const X_INERTIA_PARTIAL_COMPONENT: &str = "x-inertia-partial-component";

/// Comma-separated prop names a partial reload asks for. Empty or absent
/// disables partial mode.
pub const X_INERTIA_PARTIAL_DATA: &str = "x-inertia-partial-data";

/// Marks a request that already targets an inline fragment, suppressing
/// the base-page upgrade.
pub const X_INERTIA_INLINE: &str = "x-inertia-inline";

/// Negotiation context derived from one request's protocol headers.
/// Framework adapters build this; the core never sees HTTP types.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
  /// Full request path + query, echoed into the page payload untouched.
  pub uri: String,
  /// `X-Inertia` present: the client wants the JSON page object.
  pub protocol: bool,
  /// `X-Inertia-Inline` present: the base-page upgrade is suppressed.
  pub inline: bool,
  pub partial_component: Option<String>,
  pub partial_data: Vec<String>,
}

impl PageRequest {
  pub fn new(uri: impl Into<String>) -> Self {
    Self { uri: uri.into(), ..Self::default() }
  }

  /// Derive the context from a header lookup. Adapters pass lowercase
  /// header access; a header counts as set only with a non-empty value.
  pub fn from_headers<'a>(
    uri: impl Into<String>,
    header: impl Fn(&str) -> Option<&'a str>,
  ) -> Self {
    let request = Self {
      uri: uri.into(),
      protocol: header(X_INERTIA).is_some_and(|v| !v.is_empty()),
      inline: header(X_INERTIA_INLINE).is_some_and(|v| !v.is_empty()),
      partial_component: header(X_INERTIA_PARTIAL_COMPONENT).map(str::to_string),
      partial_data: header(X_INERTIA_PARTIAL_DATA).map(parse_partial_data).unwrap_or_default(),
    };
    tracing::debug!(
      uri = %request.uri,
      protocol = request.protocol,
      inline = request.inline,
      partial = ?request.partial_component,
      "negotiation context derived"
    );
    request
  }
}

/// Split the partial field list, dropping empty segments. No trimming or
/// normalization: names must match prop keys exactly.
fn parse_partial_data(raw: &str) -> Vec<String> {
  raw.split(',').filter(|s| !s.is_empty()).map(str::to_string).collect()
}
