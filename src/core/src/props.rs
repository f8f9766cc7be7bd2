/* src/core/src/props.rs */

use std::fmt;
use std::future::Future;

use futures_core::future::BoxFuture;
use serde::Serialize;

use crate::errors::InertiaError;
use crate::request::PageRequest;
use crate::resolve::Invoker;

/// Boxed zero-argument prop computation. `FnOnce` enforces the
/// at-most-once evaluation the protocol promises.
pub type PropFn = Box<dyn FnOnce() -> BoxFuture<'static, Result<PropValue, InertiaError>> + Send>;

/// Response-shaped output of an embedded renderable. Only `body` survives
/// resolution; status and headers are discarded by the outer page.
pub struct Envelope {
  pub status: u16,
  pub headers: Vec<(String, String)>,
  pub body: serde_json::Value,
}

/// A value that produces a page fragment scoped to the current request.
pub trait Respondable: Send {
  fn respond<'a>(
    self: Box<Self>,
    request: &'a PageRequest,
    invoker: &'a dyn Invoker,
  ) -> BoxFuture<'a, Result<Envelope, InertiaError>>;
}

/// Object-safe late serialization, blanket-implemented for any
/// `Serialize` value. Conversion must be side-effect free.
pub trait SerializeProp: Send {
  fn to_value(self: Box<Self>) -> Result<serde_json::Value, InertiaError>;
}

impl<T: Serialize + Send> SerializeProp for T {
  fn to_value(self: Box<Self>) -> Result<serde_json::Value, InertiaError> {
    serde_json::to_value(*self).map_err(Into::into)
  }
}

/// One prop value in unresolved form. Rendering reduces every variant to
/// `Value` before anything reaches the wire.
pub enum PropValue {
  /// Concrete JSON, nothing left to do.
  Value(serde_json::Value),
  /// Container whose members may still need resolution.
  Array(Vec<PropValue>),
  /// Ordered container whose members may still need resolution.
  Object(Props),
  /// Deferred computation: excluded from full loads, evaluated only when
  /// a partial reload names it (or a kept container embeds it).
  Lazy(PropFn),
  /// Zero-argument computation: included in full loads, evaluated at
  /// render time.
  Eval(PropFn),
  /// Embedded renderable unit; resolution keeps only its data payload.
  Nested(Box<dyn Respondable>),
  /// Late serde conversion of an arbitrary value.
  Serializable(Box<dyn SerializeProp>),
}

impl PropValue {
  /// Deferred prop from an async computation.
  pub fn lazy<F, Fut, T>(f: F) -> Self
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Into<PropValue>,
  {
    Self::Lazy(Box::new(move || Box::pin(async move { Ok(f().await.into()) })))
  }

  /// Deferred prop from a fallible async computation.
  pub fn try_lazy<F, Fut, T>(f: F) -> Self
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, InertiaError>> + Send + 'static,
    T: Into<PropValue>,
  {
    Self::Lazy(Box::new(move || Box::pin(async move { f().await.map(Into::into) })))
  }

  /// Always-included prop computed at render time.
  pub fn eval<F, Fut, T>(f: F) -> Self
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Into<PropValue>,
  {
    Self::Eval(Box::new(move || Box::pin(async move { Ok(f().await.into()) })))
  }

  /// Always-included prop from a fallible async computation.
  pub fn try_eval<F, Fut, T>(f: F) -> Self
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, InertiaError>> + Send + 'static,
    T: Into<PropValue>,
  {
    Self::Eval(Box::new(move || Box::pin(async move { f().await.map(Into::into) })))
  }

  /// Embed another renderable unit as a prop.
  pub fn nested(value: impl Respondable + 'static) -> Self {
    Self::Nested(Box::new(value))
  }

  /// Defer serde conversion of `value` to resolution time.
  pub fn from_serialize(value: impl Serialize + Send + 'static) -> Self {
    Self::Serializable(Box::new(value))
  }

  pub fn is_lazy(&self) -> bool {
    matches!(self, Self::Lazy(_))
  }
}

impl fmt::Debug for PropValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
      Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
      Self::Object(props) => f.debug_tuple("Object").field(props).finish(),
      Self::Lazy(_) => f.write_str("Lazy(..)"),
      Self::Eval(_) => f.write_str("Eval(..)"),
      Self::Nested(_) => f.write_str("Nested(..)"),
      Self::Serializable(_) => f.write_str("Serializable(..)"),
    }
  }
}

impl From<serde_json::Value> for PropValue {
  fn from(value: serde_json::Value) -> Self {
    Self::Value(value)
  }
}

impl From<Props> for PropValue {
  fn from(props: Props) -> Self {
    Self::Object(props)
  }
}

impl From<Vec<PropValue>> for PropValue {
  fn from(items: Vec<PropValue>) -> Self {
    Self::Array(items)
  }
}

impl From<&str> for PropValue {
  fn from(value: &str) -> Self {
    Self::Value(serde_json::Value::String(value.to_string()))
  }
}

impl From<String> for PropValue {
  fn from(value: String) -> Self {
    Self::Value(serde_json::Value::String(value))
  }
}

impl From<bool> for PropValue {
  fn from(value: bool) -> Self {
    Self::Value(value.into())
  }
}

impl From<i64> for PropValue {
  fn from(value: i64) -> Self {
    Self::Value(value.into())
  }
}

impl From<u64> for PropValue {
  fn from(value: u64) -> Self {
    Self::Value(value.into())
  }
}

impl From<f64> for PropValue {
  fn from(value: f64) -> Self {
    Self::Value(value.into())
  }
}

/// Insertion-ordered prop mapping. Order carries no protocol meaning but
/// is preserved end to end so payloads stay deterministic.
#[derive(Debug, Default)]
pub struct Props {
  entries: Vec<(String, PropValue)>,
}

impl Props {
  pub fn new() -> Self {
    Self::default()
  }

  /// Eagerly convert any `Serialize` structure into a prop mapping.
  /// Fails when the structure does not serialize to an object.
  pub fn from_serialize(value: impl Serialize) -> Result<Self, InertiaError> {
    match serde_json::to_value(value)? {
      serde_json::Value::Object(map) => {
        Ok(map.into_iter().map(|(k, v)| (k, PropValue::Value(v))).collect())
      }
      other => Err(InertiaError::validation(format!(
        "props must serialize to an object, got {other}"
      ))),
    }
  }

  /// Set one entry. An existing key is replaced in place; a new key is
  /// appended.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
    let key = key.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(k, _)| *k == key) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((key, value)),
    }
  }

  /// Shallow merge: incoming keys win, pre-existing key order is
  /// preserved, new keys are appended in their own order.
  pub fn merge(&mut self, other: Props) {
    for (key, value) in other {
      self.insert(key, value);
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.iter().any(|(k, _)| k == key)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(k, _)| k.as_str())
  }

  /// Keep only entries passing the filter, preserving order.
  pub(crate) fn retain(&mut self, mut f: impl FnMut(&str, &PropValue) -> bool) {
    self.entries.retain(|(k, v)| f(k, v));
  }
}

impl IntoIterator for Props {
  type Item = (String, PropValue);
  type IntoIter = std::vec::IntoIter<(String, PropValue)>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.into_iter()
  }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut props = Self::new();
    for (key, value) in iter {
      props.insert(key, value);
    }
    props
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn insert_replaces_in_place_and_appends() {
    let mut props = Props::new();
    props.insert("a", json!(1));
    props.insert("b", json!(2));
    props.insert("a", json!(3));
    props.insert("c", json!(4));
    assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
  }

  #[test]
  fn merge_incoming_wins_order_preserved() {
    let mut props = Props::from_iter([("a", json!(1)), ("b", json!(2))]);
    props.merge(Props::from_iter([("b", json!(20)), ("z", json!(26))]));
    assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b", "z"]);
    let entries: Vec<_> = props.into_iter().collect();
    assert!(matches!(&entries[1].1, PropValue::Value(v) if *v == json!(20)));
  }

  #[test]
  fn from_serialize_object() {
    #[derive(Serialize)]
    struct ViewModel {
      name: String,
      count: u32,
    }
    let props = Props::from_serialize(ViewModel { name: "x".into(), count: 3 })
      .expect("object serializes");
    assert_eq!(props.keys().collect::<Vec<_>>(), vec!["name", "count"]);
  }

  #[test]
  fn from_serialize_rejects_non_object() {
    let err = Props::from_serialize(vec![1, 2, 3]).expect_err("arrays are not prop mappings");
    assert_eq!(err.code(), "VALIDATION_ERROR");
  }

  #[test]
  fn lazy_is_lazy_eval_is_not() {
    assert!(PropValue::lazy(|| async { json!(1) }).is_lazy());
    assert!(!PropValue::eval(|| async { json!(1) }).is_lazy());
    assert!(!PropValue::from(json!(null)).is_lazy());
  }

  #[test]
  fn debug_hides_computations() {
    let rendered = format!("{:?}", PropValue::lazy(|| async { json!(1) }));
    assert_eq!(rendered, "Lazy(..)");
  }
}
