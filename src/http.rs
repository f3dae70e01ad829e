//! HTTP surface exposing the provider endpoints.
//!
//! Five routes: a static landing page, the protected resource, and the three OAuth 1.0a
//! provider endpoints. Domain errors are converted to client-facing statuses here; nothing in
//! the handshake path can crash the process.

// std
use std::net::SocketAddr;
// crates.io
use axum::{
	Router,
	extract::{RawQuery, State},
	http::{
		HeaderMap, StatusCode,
		header::{AUTHORIZATION, CONTENT_TYPE, LOCATION, WWW_AUTHENTICATE},
	},
	middleware,
	response::{Html, IntoResponse, Response},
	routing::{get, post},
};
use tokio::net::TcpListener;
// self
use crate::{
	_prelude::*,
	credential::TempToken,
	error::MalformedRequestError,
	handshake::Handshake,
	obs::{self, HandshakeOutcome, HandshakeStage},
};

/// Identity assigned to every authenticated session, regardless of handshake state.
///
/// A fixed value is the point of the mock: the profile-resolution hook of a real provider is
/// simulated by always answering with the same user.
pub const AUTHENTICATED_IDENTITY: &str = "Authenticated User";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Builds the provider router with the response-logging hook attached.
pub fn router(handshake: Handshake) -> Router {
	Router::new()
		.route("/", get(index))
		.route("/authenticated", get(authenticated))
		.route("/request-token", post(request_token))
		.route("/authorize", get(authorize))
		.route("/access-token", post(access_token))
		.layer(middleware::from_fn(obs::log_responses))
		.with_state(handshake)
}

/// Binds `addr` and serves the provider until the process stops.
pub async fn serve(addr: SocketAddr, handshake: Handshake) -> std::io::Result<()> {
	let listener = TcpListener::bind(addr).await?;

	tracing::info!(%addr, "mock provider listening");

	axum::serve(listener, router(handshake)).await
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		(self.status(), self.to_string()).into_response()
	}
}

async fn index() -> Html<&'static str> {
	Html(include_str!("../static/index.html"))
}

async fn authenticated(headers: HeaderMap) -> Response {
	if headers.contains_key(AUTHORIZATION) {
		format!("👋 {AUTHENTICATED_IDENTITY}").into_response()
	} else {
		(StatusCode::UNAUTHORIZED, [(WWW_AUTHENTICATE, "OAuth")], "Missing authentication.")
			.into_response()
	}
}

async fn request_token(State(handshake): State<Handshake>, headers: HeaderMap) -> Response {
	obs::record_handshake_outcome(HandshakeStage::TemporaryCredential, HandshakeOutcome::Attempt);

	let authorization = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());

	match handshake.issue_temporary_credential(authorization) {
		Ok(token) => {
			obs::record_handshake_outcome(
				HandshakeStage::TemporaryCredential,
				HandshakeOutcome::Success,
			);

			form_response(format!("oauth_token={token}"))
		},
		Err(error) => {
			obs::record_handshake_outcome(
				HandshakeStage::TemporaryCredential,
				HandshakeOutcome::Failure,
			);

			error.into_response()
		},
	}
}

async fn authorize(State(handshake): State<Handshake>, RawQuery(query): RawQuery) -> Response {
	obs::record_handshake_outcome(HandshakeStage::Authorization, HandshakeOutcome::Attempt);

	// Raw pairs rather than a map: the redirect must replay parameters in arrival order.
	let params: Vec<(String, String)> =
		url::form_urlencoded::parse(query.as_deref().unwrap_or_default().as_bytes())
			.map(|(key, value)| (key.into_owned(), value.into_owned()))
			.collect();
	let token = params
		.iter()
		.find(|(key, _)| key == "oauth_token")
		.map(|(_, value)| TempToken::from(value.as_str()));
	let Some(token) = token else {
		obs::record_handshake_outcome(HandshakeStage::Authorization, HandshakeOutcome::Failure);

		return Error::from(MalformedRequestError::MissingOauthToken).into_response();
	};

	match handshake.authorize(&token, &params).await {
		Ok(target) => {
			obs::record_handshake_outcome(HandshakeStage::Authorization, HandshakeOutcome::Success);

			(StatusCode::FOUND, [(LOCATION, target.to_string())]).into_response()
		},
		Err(error) => {
			obs::record_handshake_outcome(HandshakeStage::Authorization, HandshakeOutcome::Failure);

			error.into_response()
		},
	}
}

async fn access_token(State(handshake): State<Handshake>) -> Response {
	obs::record_handshake_outcome(HandshakeStage::AccessToken, HandshakeOutcome::Attempt);

	let credential = handshake.exchange_access_token();

	obs::record_handshake_outcome(HandshakeStage::AccessToken, HandshakeOutcome::Success);

	form_response(credential.to_form_body())
}

fn form_response(body: String) -> Response {
	([(CONTENT_TYPE, FORM_URLENCODED)], body).into_response()
}
