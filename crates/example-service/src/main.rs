//! example-service - demo service behind the introspection middleware
//!
//! Serves a `/whoami` endpoint that reports the trusted identity headers
//! the middleware stamped onto the request.
//!
//! Usage:
//!   example-service [OPTIONS]
//!
//! Options:
//!   --port <port>                 Port to listen on (default 8080)
//!   --introspection-url <url>     Base URL of the introspection service
//!                                 (default http://localhost:8081)
//!   --timeout-ms <ms>             Introspection request timeout (default 200)
//!   --mock                        Also run a built-in mock introspection
//!                                 service on --mock-port
//!   --mock-port <port>            Port for the mock service (default 8081)
//!
//! With `--mock`, `?token=demo` resolves to a canned identity and any other
//! token is reported as not found.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use authgate_client::IntrospectionClient;
use authgate_core::{Identity, RemoteError};
use authgate_http::{authenticate_middleware, caller_id, client_id, is_public, Authenticator};
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Args {
    port: u16,
    introspection_url: String,
    timeout_ms: u64,
    mock: bool,
    mock_port: u16,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut port = 8080u16;
    let mut introspection_url = String::from("http://localhost:8081");
    let mut timeout_ms = 200u64;
    let mut mock = false;
    let mut mock_port = 8081u16;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse()?;
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --port");
                }
            }
            "--introspection-url" | "-u" => {
                if i + 1 < args.len() {
                    introspection_url = args[i + 1].clone();
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --introspection-url");
                }
            }
            "--timeout-ms" => {
                if i + 1 < args.len() {
                    timeout_ms = args[i + 1].parse()?;
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --timeout-ms");
                }
            }
            "--mock" => {
                mock = true;
                i += 1;
            }
            "--mock-port" => {
                if i + 1 < args.len() {
                    mock_port = args[i + 1].parse()?;
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --mock-port");
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(Args {
        port,
        introspection_url,
        timeout_ms,
        mock,
        mock_port,
    })
}

fn print_help() {
    eprintln!(
        r#"example-service - demo service behind the introspection middleware

Usage: example-service [OPTIONS]

Options:
  -p, --port <port>               Port to listen on (default 8080)
  -u, --introspection-url <url>   Introspection base URL (default http://localhost:8081)
      --timeout-ms <ms>           Introspection request timeout (default 200)
      --mock                      Run a built-in mock introspection service
      --mock-port <port>          Port for the mock service (default 8081)
  -h, --help                      Print this help message

Examples:
  # Self-contained demo: service plus mock introspection
  example-service --mock
  curl 'http://localhost:8080/whoami?token=demo'

  # Against a real introspection service
  example-service -u http://oauth.internal:8081
"#
    );
}

/// Reports the identity the middleware resolved for this request
async fn whoami(headers: HeaderMap) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "public": is_public(&headers),
        "caller_id": caller_id(&headers),
        "client_id": client_id(&headers),
    }))
}

/// Mock introspection endpoint: `demo` resolves, everything else is unknown
async fn mock_token_endpoint(Path(token_id): Path<String>) -> Response {
    if token_id == "demo" {
        return Json(Identity {
            id: "demo".to_string(),
            user_id: 123,
            client_id: 12,
        })
        .into_response();
    }

    (
        StatusCode::NOT_FOUND,
        Json(RemoteError {
            message: "token not found".to_string(),
            status: 404,
            error: "not_found".to_string(),
            causes: vec![],
        }),
    )
        .into_response()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "example_service=info,authgate_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;

    if args.mock {
        let router = Router::new().route("/oauth/token/{token_id}", get(mock_token_endpoint));
        let addr = SocketAddr::from(([127, 0, 0, 1], args.mock_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "mock introspection service listening");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
    }

    let resolver = IntrospectionClient::with_config(
        &args.introspection_url,
        Duration::from_millis(args.timeout_ms),
        Duration::from_millis(args.timeout_ms),
    )?;
    let authenticator = Authenticator::new(Arc::new(resolver));

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/whoami", get(whoami))
        .layer(middleware::from_fn_with_state(
            authenticator,
            authenticate_middleware,
        ))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, introspection = %args.introspection_url, "example-service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
