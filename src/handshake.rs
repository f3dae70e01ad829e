//! Provider-side sequencing for the three-legged OAuth 1.0a handshake.
//!
//! The sequencer owns a [`TokenRegistry`] handle and drives the three steps: temporary
//! credentials, user authorization (redirect), and access-token exchange. Only the first two
//! touch registry state; the exchange is intentionally stateless because the mock never
//! validates verifiers or temporary tokens.

// std
use std::sync::LazyLock;
// crates.io
use rand::Rng;
use regex::Regex;
use tokio::time;
// self
use crate::{
	_prelude::*,
	credential::{AccessCredential, TempToken, Verifier},
	error::MalformedRequestError,
	registry::TokenRegistry,
};

static CALLBACK: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"oauth_callback="([^"]*)""#).expect("Callback pattern should compile.")
});

/// Uniform artificial-delay window applied before authorization redirects.
///
/// The delay simulates user-interaction latency so callers can exercise timeout handling and
/// loading-state UI. Sampling is half-open: `min` is inclusive, `max` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayRange {
	min: Duration,
	max: Duration,
}
impl DelayRange {
	/// Builds a window from `min` (inclusive) to `max` (exclusive).
	pub const fn new(min: Duration, max: Duration) -> Self {
		Self { min, max }
	}

	/// Samples a uniformly distributed duration from the window.
	pub fn sample(&self) -> Duration {
		if self.max <= self.min {
			return self.min;
		}

		rand::rng().random_range(self.min..self.max)
	}
}
impl Default for DelayRange {
	fn default() -> Self {
		Self::new(Duration::from_millis(300), Duration::from_millis(900))
	}
}

/// Coordinates the provider-side handshake against a single token registry.
#[derive(Clone, Debug)]
pub struct Handshake {
	registry: TokenRegistry,
	delay: DelayRange,
}
impl Handshake {
	/// Creates a sequencer over the provided registry with the default delay window.
	pub fn new(registry: TokenRegistry) -> Self {
		Self { registry, delay: DelayRange::default() }
	}

	/// Replaces the artificial-delay window.
	pub fn with_delay(mut self, delay: DelayRange) -> Self {
		self.delay = delay;

		self
	}

	/// Returns the registry handle backing this sequencer.
	pub fn registry(&self) -> &TokenRegistry {
		&self.registry
	}

	/// Issues a temporary credential for the callback carried in `authorization`.
	///
	/// The header must contain an `oauth_callback="<url>"` parameter per the OAuth 1.0a
	/// signed-request convention. A missing header, a missing parameter, or an undecodable
	/// callback all surface as [`MalformedRequestError`] instead of tearing the handler down.
	pub fn issue_temporary_credential(&self, authorization: Option<&str>) -> Result<TempToken> {
		let header = authorization.ok_or(MalformedRequestError::MissingAuthorization)?;
		let callback = extract_callback(header)?;

		Ok(self.registry.issue(callback))
	}

	/// Redeems `token` and produces the redirect target for the authorization step.
	///
	/// Every original query parameter (including `oauth_token`, in arrival order) is appended
	/// to the stored callback, followed by a freshly generated `oauth_verifier`. The call then
	/// suspends for a duration sampled from the delay window; the suspension is a tokio timer,
	/// so concurrent requests keep flowing while this one waits.
	pub async fn authorize(&self, token: &TempToken, params: &[(String, String)]) -> Result<Url> {
		let record = self
			.registry
			.redeem(token)
			.ok_or_else(|| Error::UnknownToken { token: token.to_string() })?;
		let verifier = Verifier::generate();
		let mut target = record.callback;

		{
			let mut pairs = target.query_pairs_mut();

			for (key, value) in params {
				pairs.append_pair(key, value);
			}

			pairs.append_pair("oauth_verifier", verifier.as_ref());
		}

		time::sleep(self.delay.sample()).await;

		Ok(target)
	}

	/// Generates a fresh access token + secret pair.
	///
	/// Nothing about the request is validated against prior state; the mock hands out a new
	/// pair on every call.
	pub fn exchange_access_token(&self) -> AccessCredential {
		AccessCredential::generate()
	}
}

/// Pulls the percent-decoded callback URL out of an `Authorization` header value.
fn extract_callback(header: &str) -> Result<Url> {
	let raw = CALLBACK
		.captures(header)
		.and_then(|captures| captures.get(1))
		.ok_or(MalformedRequestError::MissingCallback)?
		.as_str();
	let decoded =
		urlencoding::decode(raw).map_err(|_| MalformedRequestError::UndecodableCallback)?;
	let callback = Url::parse(&decoded).map_err(MalformedRequestError::InvalidCallbackUrl)?;

	Ok(callback)
}
