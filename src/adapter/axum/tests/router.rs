/* src/adapter/axum/tests/router.rs */

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use http_body_util::BodyExt;
use inertia_server::{InertiaError, PropValue, Props};
use inertia_server_axum::{AxumError, Inertia, InertiaRequest, StaticViews};
use serde_json::json;
use tower::ServiceExt;

const APP_TEMPLATE: &str = "<html><head><title><!--view:title--></title></head>\
<body><div id=\"app\"></div></body></html>";

fn inertia() -> Inertia {
  Inertia::new(StaticViews::new().register("app", APP_TEMPLATE)).version("v1")
}

async fn users(
  State(inertia): State<Inertia>,
  InertiaRequest(request): InertiaRequest,
) -> Result<axum::response::Response, AxumError> {
  let response = inertia
    .response("Users/Index", Props::from_iter([("list", json!([1, 2]))]))
    .with("stats", PropValue::lazy(|| async { json!({"total": 2}) }))
    .with_view_data("title", json!("Users"));
  inertia.respond(&request, response).await
}

async fn broken(
  State(inertia): State<Inertia>,
  InertiaRequest(request): InertiaRequest,
) -> Result<axum::response::Response, AxumError> {
  let response = inertia.response(
    "Broken",
    Props::from_iter([(
      "row",
      PropValue::try_eval(|| async { Err::<PropValue, _>(InertiaError::not_found("row gone")) }),
    )]),
  );
  inertia.respond(&request, response).await
}

fn router() -> Router {
  Router::new().route("/users", get(users)).route("/broken", get(broken)).with_state(inertia())
}

async fn send(request: Request<Body>) -> axum::response::Response {
  router().oneshot(request).await.expect("router responds")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
  let bytes = response.into_body().collect().await.expect("body collects").to_bytes();
  serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn protocol_request_gets_the_page_object() {
  let response = send(
    Request::builder()
      .uri("/users?page=2")
      .header("x-inertia", "true")
      .body(Body::empty())
      .expect("request builds"),
  )
  .await;

  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(response.headers().get("x-inertia").and_then(|v| v.to_str().ok()), Some("true"));
  assert_eq!(response.headers().get(header::VARY).and_then(|v| v.to_str().ok()), Some("Accept"));

  let page = json_body(response).await;
  assert_eq!(page["component"], json!("Users/Index"));
  // the lazy stats prop stays out of a full load
  assert_eq!(page["props"], json!({"list": [1, 2]}));
  assert_eq!(page["url"], json!("/users?page=2"));
  assert_eq!(page["version"], json!("v1"));
  assert_eq!(page["inline"], json!(null));
}

#[tokio::test]
async fn partial_reload_resolves_the_requested_lazy_prop() {
  let response = send(
    Request::builder()
      .uri("/users")
      .header("x-inertia", "true")
      .header("x-inertia-partial-component", "Users/Index")
      .header("x-inertia-partial-data", "stats")
      .body(Body::empty())
      .expect("request builds"),
  )
  .await;

  let page = json_body(response).await;
  assert_eq!(page["props"], json!({"stats": {"total": 2}}));
}

#[tokio::test]
async fn mismatched_partial_component_gets_the_full_set() {
  let response = send(
    Request::builder()
      .uri("/users")
      .header("x-inertia", "true")
      .header("x-inertia-partial-component", "Other/Page")
      .header("x-inertia-partial-data", "stats")
      .body(Body::empty())
      .expect("request builds"),
  )
  .await;

  let page = json_body(response).await;
  assert_eq!(page["props"], json!({"list": [1, 2]}));
}

#[tokio::test]
async fn document_request_renders_the_root_template() {
  let response =
    send(Request::builder().uri("/users").body(Body::empty()).expect("request builds")).await;

  assert_eq!(response.status(), StatusCode::OK);
  let content_type = response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok());
  assert_eq!(content_type, Some("text/html; charset=utf-8"));

  let bytes = response.into_body().collect().await.expect("body collects").to_bytes();
  let html = String::from_utf8(bytes.to_vec()).expect("utf8 body");
  assert!(html.contains("<title>Users</title>"));
  assert!(html.contains("<script id=\"page\" type=\"application/json\">"));
  assert!(html.contains(r#""component":"Users/Index""#));
  assert!(html.contains(r#""url":"/users""#));
}

#[tokio::test]
async fn failing_prop_surfaces_its_own_status() {
  let response = send(
    Request::builder()
      .uri("/broken")
      .header("x-inertia", "true")
      .body(Body::empty())
      .expect("request builds"),
  )
  .await;

  assert_eq!(response.status(), StatusCode::NOT_FOUND);
  let body = json_body(response).await;
  assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}
