/* src/core/src/errors.rs */

use std::fmt;

/// Error surfaced by the render pipeline. Prop computations may fail with
/// any code they choose; the adapter maps `status` onto the HTTP response.
#[derive(Debug)]
pub struct InertiaError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" => 400,
    "UNAUTHORIZED" => 401,
    "FORBIDDEN" => 403,
    "NOT_FOUND" => 404,
    "SERIALIZATION_ERROR" | "VIEW_ERROR" | "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

impl InertiaError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn unauthorized(msg: impl Into<String>) -> Self {
    Self::with_code("UNAUTHORIZED", msg)
  }

  pub fn forbidden(msg: impl Into<String>) -> Self {
    Self::with_code("FORBIDDEN", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn serialization(msg: impl Into<String>) -> Self {
    Self::with_code("SERIALIZATION_ERROR", msg)
  }

  pub fn view(msg: impl Into<String>) -> Self {
    Self::with_code("VIEW_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

impl fmt::Display for InertiaError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for InertiaError {}

impl From<serde_json::Error> for InertiaError {
  fn from(err: serde_json::Error) -> Self {
    Self::serialization(err.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_status_known_codes() {
    assert_eq!(default_status("VALIDATION_ERROR"), 400);
    assert_eq!(default_status("UNAUTHORIZED"), 401);
    assert_eq!(default_status("FORBIDDEN"), 403);
    assert_eq!(default_status("NOT_FOUND"), 404);
    assert_eq!(default_status("SERIALIZATION_ERROR"), 500);
    assert_eq!(default_status("VIEW_ERROR"), 500);
    assert_eq!(default_status("INTERNAL_ERROR"), 500);
  }

  #[test]
  fn default_status_unknown_code() {
    assert_eq!(default_status("CUSTOM_ERROR"), 500);
  }

  #[test]
  fn new_explicit_status() {
    let err = InertiaError::new("TEAPOT", "short and stout", 418);
    assert_eq!(err.code(), "TEAPOT");
    assert_eq!(err.message(), "short and stout");
    assert_eq!(err.status(), 418);
  }

  #[test]
  fn convenience_constructors() {
    assert_eq!(InertiaError::validation("x").status(), 400);
    assert_eq!(InertiaError::unauthorized("x").status(), 401);
    assert_eq!(InertiaError::forbidden("x").status(), 403);
    assert_eq!(InertiaError::not_found("x").status(), 404);
    assert_eq!(InertiaError::internal("x").status(), 500);
    assert_eq!(InertiaError::serialization("x").status(), 500);
    assert_eq!(InertiaError::view("x").status(), 500);
  }

  #[test]
  fn display_format() {
    let err = InertiaError::not_found("missing");
    assert_eq!(err.to_string(), "NOT_FOUND: missing");
  }

  #[test]
  fn from_serde_error() {
    let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = InertiaError::from(bad);
    assert_eq!(err.code(), "SERIALIZATION_ERROR");
    assert_eq!(err.status(), 500);
  }
}
