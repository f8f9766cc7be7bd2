/* src/adapter/axum/src/extract.rs */

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use inertia_server::PageRequest;

/// Extractor newtype around the core negotiation context.
/// A newtype because the orphan rule prevents implementing
/// `FromRequestParts` for the core type directly.
#[derive(Debug, Clone)]
pub struct InertiaRequest(pub PageRequest);

impl InertiaRequest {
  pub fn into_inner(self) -> PageRequest {
    self.0
  }
}

impl<S> FromRequestParts<S> for InertiaRequest
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let uri = parts
      .uri
      .path_and_query()
      .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());
    let headers = &parts.headers;
    Ok(Self(PageRequest::from_headers(uri, |name| {
      headers.get(name).and_then(|v| v.to_str().ok())
    })))
  }
}
