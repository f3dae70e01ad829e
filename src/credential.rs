//! Opaque credential values exchanged during the mock handshake.
//!
//! Every value is a freshly generated UUID v4 wrapped in a newtype; nothing here is ever
//! validated against prior state, because the provider only simulates authentication.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_token {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			/// Generates a fresh globally-unique opaque value.
			pub fn generate() -> Self {
				Self(Uuid::new_v4().to_string())
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self(value)
			}
		}
		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self(value.to_owned())
			}
		}
		impl FromStr for $name {
			type Err = std::convert::Infallible;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Ok(Self(s.to_owned()))
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

def_token! {
	TempToken,
	"Temporary credential identifying an in-progress authorization attempt.",
	"Temp"
}
def_token! {
	Verifier,
	"Value proving the user completed authorization, appended to the redirect target.",
	"Verifier"
}
def_token! {
	AccessToken,
	"Access token handed out by the exchange endpoint.",
	"Access"
}

/// Redacted access secret wrapper keeping the generated material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSecret(String);
impl AccessSecret {
	/// Generates a fresh opaque secret.
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessSecret").field(&"<redacted>").finish()
	}
}
impl Display for AccessSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Access token + secret pair returned by the exchange endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCredential {
	/// Opaque access token.
	pub token: AccessToken,
	/// Paired secret; redacted by its formatters.
	pub secret: AccessSecret,
}
impl AccessCredential {
	/// Generates a credential pair with two distinct identifiers.
	pub fn generate() -> Self {
		Self { token: AccessToken::generate(), secret: AccessSecret::generate() }
	}

	/// Renders the pair as the `application/x-www-form-urlencoded` response body.
	pub fn to_form_body(&self) -> String {
		format!("oauth_token={}&oauth_secret={}", self.token, self.secret.expose())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn generated_tokens_are_unique() {
		let first = TempToken::generate();
		let second = TempToken::generate();

		assert_ne!(first, second);
		assert!(!first.is_empty());
	}

	#[test]
	fn token_formatters_expose_the_value() {
		let token = TempToken::from("token-123");

		assert_eq!(format!("{token}"), "token-123");
		assert_eq!(format!("{token:?}"), "Temp(token-123)");
	}

	#[test]
	fn secret_formatters_redact() {
		let secret = AccessSecret::generate();

		assert_eq!(format!("{secret:?}"), "AccessSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn access_credentials_render_as_form_pairs() {
		let credential = AccessCredential::generate();
		let body = credential.to_form_body();

		assert_eq!(
			body,
			format!("oauth_token={}&oauth_secret={}", credential.token, credential.secret.expose())
		);
		assert_ne!(credential.token.as_ref(), credential.secret.expose());
	}

	#[test]
	fn serde_round_trip_is_transparent() {
		let token = TempToken::from("token-42");
		let payload = serde_json::to_string(&token).expect("Token should serialize to JSON.");

		assert_eq!(payload, "\"token-42\"");

		let round_trip: TempToken =
			serde_json::from_str(&payload).expect("Serialized token should deserialize.");

		assert_eq!(round_trip, token);
	}
}
