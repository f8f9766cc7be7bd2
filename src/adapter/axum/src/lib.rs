/* src/adapter/axum/src/lib.rs */

mod error;
mod extract;
mod view;

use std::sync::Arc;

use axum::http::{HeaderValue, header};
use axum::response::{Html, IntoResponse};
use inertia_server::{
  DirectInvoker, Invoker, PageRequest, Props, Rendered, Response, X_INERTIA,
};

pub use error::AxumError;
pub use extract::InertiaRequest;
pub use view::{StaticViews, ViewRenderer};

/// Re-export the protocol core for convenience
pub use inertia_server;

/// Shared per-application configuration: asset version, root view,
/// document renderer, and the invoker used for prop computations.
/// Cheap to clone; hand it to handlers as axum state.
#[derive(Clone)]
pub struct Inertia {
  root_view: String,
  version: Option<String>,
  views: Arc<dyn ViewRenderer>,
  invoker: Arc<dyn Invoker>,
}

impl Inertia {
  pub fn new(views: impl ViewRenderer + 'static) -> Self {
    Self {
      root_view: "app".to_string(),
      version: None,
      views: Arc::new(views),
      invoker: Arc::new(DirectInvoker),
    }
  }

  /// Root template for document responses. Defaults to `"app"`.
  pub fn root_view(mut self, view: impl Into<String>) -> Self {
    self.root_view = view.into();
    self
  }

  /// Asset version stamped onto every payload.
  pub fn version(mut self, version: impl Into<String>) -> Self {
    self.version = Some(version.into());
    self
  }

  /// Replace the computation invoker (default: plain invocation).
  pub fn invoker(mut self, invoker: impl Invoker + 'static) -> Self {
    self.invoker = Arc::new(invoker);
    self
  }

  /// Start a response seeded with this application's root view and
  /// version.
  pub fn response(&self, component: impl Into<String>, props: Props) -> Response {
    let response = Response::new(component, props).root_view(self.root_view.clone());
    match &self.version {
      Some(v) => response.version(v.clone()),
      None => response,
    }
  }

  /// Finalize `response` against `request` and convert the outcome to an
  /// HTTP response: the page object as JSON with the protocol headers, or
  /// the rendered document.
  pub async fn respond(
    &self,
    request: &PageRequest,
    response: Response,
  ) -> Result<axum::response::Response, AxumError> {
    match response.render(request, self.invoker.as_ref()).await? {
      Rendered::Json(page) => {
        let mut http = axum::Json(page).into_response();
        let headers = http.headers_mut();
        headers.insert(header::VARY, HeaderValue::from_static("Accept"));
        headers.insert(X_INERTIA, HeaderValue::from_static("true"));
        Ok(http)
      }
      Rendered::Document { root_view, data } => {
        let html = self.views.render(&root_view, &data)?;
        Ok(Html(html).into_response())
      }
    }
  }
}
