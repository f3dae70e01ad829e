//! Observability hooks: the pre-response logging middleware and optional handshake metrics.
//!
//! # Feature Flags
//!
//! - Enable `metrics` to increment the `oauth1_mock_handshake_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.

// crates.io
use axum::{
	body::{Body, to_bytes},
	extract::Request,
	middleware::Next,
	response::Response,
};
// self
use crate::_prelude::*;

/// Handshake stages observed by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandshakeStage {
	/// Temporary-credential issuance (`POST /request-token`).
	TemporaryCredential,
	/// User authorization and redirect (`GET /authorize`).
	Authorization,
	/// Access-token exchange (`POST /access-token`).
	AccessToken,
}
impl HandshakeStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HandshakeStage::TemporaryCredential => "temporary_credential",
			HandshakeStage::Authorization => "authorization",
			HandshakeStage::AccessToken => "access_token",
		}
	}
}
impl Display for HandshakeStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandshakeOutcome {
	/// Entry to a handshake handler.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure surfaced back to the client.
	Failure,
}
impl HandshakeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HandshakeOutcome::Attempt => "attempt",
			HandshakeOutcome::Success => "success",
			HandshakeOutcome::Failure => "failure",
		}
	}
}
impl Display for HandshakeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records a handshake outcome via the global metrics recorder (when enabled).
pub fn record_handshake_outcome(stage: HandshakeStage, outcome: HandshakeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_mock_handshake_total",
			"stage" => stage.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}

/// Pre-response hook logging method, path, query (as a JSON object), and status for every
/// response.
///
/// Responses with a 4xx/5xx status additionally have their body buffered and echoed into the
/// event, then handed back to the client unchanged.
pub async fn log_responses(request: Request, next: Next) -> Response {
	let method = request.method().clone();
	let path = request.uri().path().to_owned();
	let query = query_object(request.uri().query());
	let response = next.run(request).await;
	let status = response.status();

	if status.is_client_error() || status.is_server_error() {
		let (parts, body) = response.into_parts();

		match to_bytes(body, usize::MAX).await {
			Ok(bytes) => {
				tracing::warn!(
					%method,
					%path,
					query = %query,
					status = status.as_u16(),
					body = %String::from_utf8_lossy(&bytes),
					"request failed"
				);

				Response::from_parts(parts, Body::from(bytes))
			},
			Err(error) => {
				tracing::warn!(
					%method,
					%path,
					query = %query,
					status = status.as_u16(),
					%error,
					"request failed; response body could not be buffered"
				);

				Response::from_parts(parts, Body::empty())
			},
		}
	} else {
		tracing::info!(
			%method,
			%path,
			query = %query,
			status = status.as_u16(),
			"request completed"
		);

		response
	}
}

fn query_object(query: Option<&str>) -> serde_json::Value {
	let pairs = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes());

	serde_json::Value::Object(
		pairs
			.map(|(key, value)| (key.into_owned(), serde_json::Value::String(value.into_owned())))
			.collect(),
	)
}
