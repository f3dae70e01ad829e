//! Provider-level error types shared across the handshake sequencer and HTTP surface.

// crates.io
use axum::http::StatusCode;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical provider error surfaced to HTTP clients.
///
/// The upstream mock crashed on both of these paths; here they are explicit values that the
/// handler boundary converts into client-facing status codes, so no malformed request can take
/// the process down.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
	/// The incoming request could not be parsed into a handshake operation.
	#[error(transparent)]
	MalformedRequest(#[from] MalformedRequestError),
	/// Authorization was requested for a token the registry never issued (or already redeemed).
	#[error("Unknown temporary token `{token}`.")]
	UnknownToken {
		/// The unrecognized `oauth_token` query value.
		token: String,
	},
}
impl Error {
	/// Maps the error onto the HTTP status emitted at the handler boundary.
	pub const fn status(&self) -> StatusCode {
		match self {
			Error::MalformedRequest(_) => StatusCode::BAD_REQUEST,
			Error::UnknownToken { .. } => StatusCode::NOT_FOUND,
		}
	}
}

/// Request-parsing failures that surface as `400 Bad Request`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum MalformedRequestError {
	/// The temporary-credential request carried no `Authorization` header.
	#[error("Authorization header is missing.")]
	MissingAuthorization,
	/// The `Authorization` header carries no `oauth_callback="<url>"` parameter.
	#[error("Authorization header does not contain an oauth_callback parameter.")]
	MissingCallback,
	/// The callback value is not valid percent-encoded UTF-8.
	#[error("Callback could not be percent-decoded.")]
	UndecodableCallback,
	/// The decoded callback is not a parseable URL.
	#[error("Callback is not a valid URL.")]
	InvalidCallbackUrl(#[from] url::ParseError),
	/// The authorization request carries no `oauth_token` query parameter.
	#[error("Query string does not contain an oauth_token parameter.")]
	MissingOauthToken,
}
