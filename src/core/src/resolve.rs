/* src/core/src/resolve.rs */

use futures_core::future::BoxFuture;

use crate::errors::InertiaError;
use crate::props::{PropFn, PropValue, Props};
use crate::request::PageRequest;

/// Dispatches zero-argument prop computations. Hosts that resolve
/// dependencies through a container wrap the call; the core never reaches
/// into ambient state.
pub trait Invoker: Send + Sync {
  fn invoke(&self, computation: PropFn) -> BoxFuture<'static, Result<PropValue, InertiaError>>;
}

/// Plain invocation with no dependency resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectInvoker;

impl Invoker for DirectInvoker {
  fn invoke(&self, computation: PropFn) -> BoxFuture<'static, Result<PropValue, InertiaError>> {
    computation()
  }
}

/// Reduce one prop value to concrete JSON, depth-first.
///
/// Computations re-enter the loop until a concrete leaf remains: a lazy
/// prop may return another computation, a container of further
/// computations, or an embedded renderable. Members resolve strictly in
/// traversal order, one at a time. Failures propagate unchanged.
pub fn resolve_value<'a>(
  value: PropValue,
  request: &'a PageRequest,
  invoker: &'a dyn Invoker,
) -> BoxFuture<'a, Result<serde_json::Value, InertiaError>> {
  Box::pin(async move {
    let mut current = value;
    loop {
      current = match current {
        PropValue::Value(v) => return Ok(v),
        PropValue::Array(items) => {
          let mut out = Vec::with_capacity(items.len());
          for item in items {
            out.push(resolve_value(item, request, invoker).await?);
          }
          return Ok(serde_json::Value::Array(out));
        }
        PropValue::Object(props) => {
          return Ok(serde_json::Value::Object(resolve_props(props, request, invoker).await?));
        }
        PropValue::Lazy(f) | PropValue::Eval(f) => invoker.invoke(f).await?,
        PropValue::Nested(r) => {
          // Only the data payload of the fragment survives; the envelope
          // metadata belongs to the embedded response, not this page.
          let envelope = r.respond(request, invoker).await?;
          PropValue::Value(envelope.body)
        }
        PropValue::Serializable(s) => PropValue::Value(s.to_value()?),
      };
    }
  })
}

/// Resolve every entry of a prop mapping in insertion order.
pub async fn resolve_props(
  props: Props,
  request: &PageRequest,
  invoker: &dyn Invoker,
) -> Result<serde_json::Map<String, serde_json::Value>, InertiaError> {
  let mut out = serde_json::Map::new();
  for (key, value) in props {
    out.insert(key, resolve_value(value, request, invoker).await?);
  }
  Ok(out)
}
