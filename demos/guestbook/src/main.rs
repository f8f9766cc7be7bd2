/* demos/guestbook/src/main.rs */

use std::env;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use inertia_server::{PropValue, Props};
use inertia_server_axum::{AxumError, Inertia, InertiaRequest, StaticViews};
use serde_json::json;
use tracing::info;

const APP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <title><!--view:title--></title>
  </head>
  <body>
    <div id="app"></div>
  </body>
</html>
"#;

struct Entry {
  author: &'static str,
  message: &'static str,
}

const ENTRIES: &[Entry] = &[
  Entry { author: "Alice", message: "First!" },
  Entry { author: "Bob", message: "Hello from axum" },
  Entry { author: "Charlie", message: "Nice guestbook" },
];

fn entries_json() -> serde_json::Value {
  json!(
    ENTRIES
      .iter()
      .map(|e| json!({"author": e.author, "message": e.message}))
      .collect::<Vec<_>>()
  )
}

async fn index(
  State(inertia): State<Inertia>,
  InertiaRequest(request): InertiaRequest,
) -> Result<axum::response::Response, AxumError> {
  let response = inertia
    .response("Guestbook/Index", Props::from_iter([("entries", entries_json())]))
    .with(
      "stats",
      // Stand-in for a heavier aggregate query; clients fetch it with a
      // partial reload for "stats".
      PropValue::lazy(|| async { json!({"total": ENTRIES.len(), "authors": 3}) }),
    )
    .with_view_data("title", json!("Guestbook"));
  inertia.respond(&request, response).await
}

async fn sign(
  State(inertia): State<Inertia>,
  InertiaRequest(request): InertiaRequest,
) -> Result<axum::response::Response, AxumError> {
  // Component-only page: non-inline requests get wrapped by the index.
  let base = inertia.clone();
  let response = inertia
    .response("Guestbook/Sign", Props::from_iter([("max_length", json!(280))]))
    .base(move || base.response("Guestbook/Index", Props::from_iter([("entries", entries_json())])))
    .with_view_data("title", json!("Sign the guestbook"));
  inertia.respond(&request, response).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let inertia = Inertia::new(StaticViews::new().register("app", APP_TEMPLATE))
    .version(env!("CARGO_PKG_VERSION"));

  let router = Router::new().route("/", get(index)).route("/sign", get(sign)).with_state(inertia);

  let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
  let addr = format!("0.0.0.0:{port}");
  let listener = tokio::net::TcpListener::bind(&addr).await?;
  info!("guestbook demo running on http://localhost:{}", listener.local_addr()?.port());
  axum::serve(listener, router).await?;
  Ok(())
}
