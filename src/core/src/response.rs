/* src/core/src/response.rs */

use futures_core::future::BoxFuture;
use serde_json::{Map, Value};

use crate::errors::InertiaError;
use crate::page::{InlinePage, Page};
use crate::props::{Envelope, PropValue, Props, Respondable};
use crate::request::{PageRequest, X_INERTIA};
use crate::resolve::{Invoker, resolve_props};

type BaseFn = Box<dyn FnOnce() -> Response + Send>;

/// Builder for one page response. Created per request, mutated while the
/// handler runs, consumed exactly once by [`Response::render`] — taking
/// `self` by value makes mutation after finalization a compile error.
pub struct Response {
  component: String,
  props: Props,
  root_view: String,
  version: Option<String>,
  view_data: Map<String, Value>,
  base: Option<BaseFn>,
  inline: Option<String>,
}

/// Finalized representation: the JSON page object, or a delegation to
/// document rendering with the page embedded in the data bag under
/// `"page"`.
pub enum Rendered {
  Json(Page),
  Document { root_view: String, data: Map<String, Value> },
}

impl Response {
  /// Panics when `component` is empty: the component is the partial
  /// reload match key, and an empty one is a caller bug.
  pub fn new(component: impl Into<String>, props: Props) -> Self {
    let component = component.into();
    assert!(!component.is_empty(), "page component must be a non-empty identifier");
    Self {
      component,
      props,
      root_view: "app".to_string(),
      version: None,
      view_data: Map::new(),
      base: None,
      inline: None,
    }
  }

  pub fn component(&self) -> &str {
    &self.component
  }

  /// Template identifier for full-document rendering. Defaults to `"app"`.
  pub fn root_view(mut self, view: impl Into<String>) -> Self {
    self.root_view = view.into();
    self
  }

  /// Opaque asset version echoed into the payload.
  pub fn version(mut self, version: impl Into<String>) -> Self {
    self.version = Some(version.into());
    self
  }

  /// Register the factory producing the top-level page that wraps this
  /// one when the request does not target an inline fragment. The factory
  /// output must not register a base of its own.
  pub fn base(mut self, factory: impl FnOnce() -> Response + Send + 'static) -> Self {
    self.base = Some(Box::new(factory));
    self
  }

  /// Mark this response as embedding `component` inline: the finalized
  /// page carries a populated `inline` record.
  pub fn inline(mut self, component: impl Into<String>) -> Self {
    self.inline = Some(component.into());
    self
  }

  /// Set one prop. An existing key is replaced in place, a new key
  /// appended.
  pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
    self.props.insert(key, value);
    self
  }

  /// Shallow-merge a prop mapping; incoming keys win.
  pub fn merge(mut self, props: Props) -> Self {
    self.props.merge(props);
    self
  }

  /// Set one view-data entry. View data reaches document rendering only;
  /// it never appears in the JSON payload.
  pub fn with_view_data(mut self, key: impl Into<String>, value: Value) -> Self {
    self.view_data.insert(key.into(), value);
    self
  }

  /// Shallow-merge view data; incoming keys win.
  pub fn merge_view_data(mut self, data: Map<String, Value>) -> Self {
    for (key, value) in data {
      self.view_data.insert(key, value);
    }
    self
  }

  /// Negotiate the representation for `request` and produce it.
  ///
  /// Prop computations run at most once, strictly in traversal order;
  /// their failures propagate unchanged.
  pub async fn render(
    mut self,
    request: &PageRequest,
    invoker: &dyn Invoker,
  ) -> Result<Rendered, InertiaError> {
    // Upgrade a component-only response to its base page unless the
    // request already targets the inline fragment. One level only.
    if !request.inline {
      if let Some(factory) = self.base.take() {
        let component = self.component;
        tracing::debug!(component = %component, "upgrading to base page");
        self = factory();
        assert!(
          self.base.is_none(),
          "base factory must produce a response without its own base"
        );
        self = self.inline(component);
      }
    }

    let root_view = std::mem::take(&mut self.root_view);
    let view_data = std::mem::take(&mut self.view_data);
    let protocol = request.protocol;

    let page = self.into_page(request, invoker).await?;

    if protocol {
      tracing::debug!(component = %page.component, props = page.props.len(), "page object response");
      return Ok(Rendered::Json(page));
    }

    tracing::debug!(component = %page.component, view = %root_view, "document response");
    let mut data = view_data;
    data.entry("page").or_insert(page.into_value()?);
    Ok(Rendered::Document { root_view, data })
  }

  /// Effective prop subset, recursive resolution, page assembly. Shared
  /// by top-level rendering and by embedding as a nested prop.
  async fn into_page(
    self,
    request: &PageRequest,
    invoker: &dyn Invoker,
  ) -> Result<Page, InertiaError> {
    let Response { component, props, version, inline, .. } = self;

    let props = effective_props(props, &component, request);
    let resolved = resolve_props(props, request, invoker).await?;

    let inline = inline.map(|c| InlinePage {
      component: c,
      props: resolved.clone(),
      url: request.uri.clone(),
    });
    Ok(Page { component, props: resolved, url: request.uri.clone(), version, inline })
  }
}

/// The prop subset this request gets.
///
/// Partial mode applies only when the request names this exact component
/// and asks for at least one field; unknown names drop out silently (the
/// field list is a best-effort filter). Outside partial mode, deferred
/// props are omitted entirely — they are opt-in by name.
fn effective_props(mut props: Props, component: &str, request: &PageRequest) -> Props {
  let partial = !request.partial_data.is_empty()
    && request.partial_component.as_deref() == Some(component);

  if partial {
    props.retain(|key, _| request.partial_data.iter().any(|name| name == key));
    tracing::debug!(component = %component, kept = props.len(), "partial reload subset");
  } else {
    props.retain(|_, value| !value.is_lazy());
  }
  props
}

impl Respondable for Response {
  fn respond<'a>(
    self: Box<Self>,
    request: &'a PageRequest,
    invoker: &'a dyn Invoker,
  ) -> BoxFuture<'a, Result<Envelope, InertiaError>> {
    Box::pin(async move {
      // Fragments embed into an outer page: no base upgrade and no
      // document branch, just the protocol envelope around the page.
      let page = (*self).into_page(request, invoker).await?;
      Ok(Envelope {
        status: 200,
        headers: vec![
          (X_INERTIA.to_string(), "true".to_string()),
          ("vary".to_string(), "Accept".to_string()),
        ],
        body: page.into_value()?,
      })
    })
  }
}
