use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, get_service};
use axum::{Json, Router};
use room_token::{Credentials, IdentityGenerator};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;

use crate::ServerConfig;

/// Shared, read-only (apart from the identity generator) state for every request.
pub struct WebState {
	pub credentials: Credentials,
	pub identities: IdentityGenerator,
	pub room: String,
}

pub struct Web {
	app: Router,
	bind: SocketAddr,
}

impl Web {
	pub fn new(state: WebState, config: &ServerConfig) -> Self {
		let app = router(Arc::new(state), &config.index());

		Self {
			app,
			bind: config.bind(),
		}
	}

	pub async fn run(self) -> anyhow::Result<()> {
		let listen = tokio::net::TcpListener::bind(self.bind)
			.await
			.with_context(|| format!("failed to bind {}", self.bind))?;
		let addr = listen.local_addr()?;

		tracing::info!(%addr, "listening");

		#[cfg(unix)]
		// Notify systemd that we're ready, now that the port is open.
		let _ = sd_notify::notify(true, &[sd_notify::NotifyState::Ready]);

		axum::serve(listen, self.app)
			.await
			.with_context(|| format!("failed to serve on {addr}"))?;

		Ok(())
	}
}

/// Build the routes, serving `index` at `/`.
pub fn router(state: Arc<WebState>, index: &Path) -> Router {
	async fn handle_404() -> impl IntoResponse {
		(StatusCode::NOT_FOUND, "Not found")
	}

	Router::new()
		.route("/token", get(serve_token).post(serve_token))
		.route("/", get_service(ServeFile::new(index)))
		.fallback_service(handle_404.into_service())
		.layer(cors())
		.with_state(state)
}

fn cors() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
	pub token: String,
}

async fn serve_token(State(state): State<Arc<WebState>>) -> Result<Json<TokenResponse>, TokenError> {
	let identity = state.identities.generate();
	let token = state.credentials.issue(&identity, &state.room)?;

	tracing::debug!(%identity, room = %state.room, "issued token");

	Ok(Json(TokenResponse { token }))
}

/// A token couldn't be signed; the cause is logged but never returned to the client.
#[derive(Debug)]
pub struct TokenError(pub room_token::Error);

impl From<room_token::Error> for TokenError {
	fn from(err: room_token::Error) -> Self {
		Self(err)
	}
}

impl IntoResponse for TokenError {
	fn into_response(self) -> Response {
		tracing::error!(err = %self.0, "token generation failed");

		let body = Json(serde_json::json!({ "error": "Token generation failed" }));
		(StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
	}
}
