//! Thread-safe in-memory registry mapping temporary tokens to their callback records.

// self
use crate::{_prelude::*, credential::TempToken};

type RegistryMap = Arc<RwLock<HashMap<TempToken, CredentialRecord>>>;

/// State recorded for an issued temporary token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialRecord {
	/// Percent-decoded URL the provider redirects to after authorization.
	pub callback: Url,
}

/// Cloneable handle over the process-wide temporary-credential mapping.
///
/// The registry is created empty and injected wherever it is needed, so every test run owns
/// isolated state. Handlers on a multi-threaded runtime touch it concurrently; all access goes
/// through the lock.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry(RegistryMap);
impl TokenRegistry {
	/// Issues a fresh temporary token bound to `callback` and records the mapping.
	pub fn issue(&self, callback: Url) -> TempToken {
		let token = TempToken::generate();

		self.0.write().insert(token.clone(), CredentialRecord { callback });

		token
	}

	/// Removes and returns the record for `token`.
	///
	/// A temporary token is looked up exactly once, at authorization time; removing the record
	/// on redemption keeps the mapping from growing without bound.
	pub fn redeem(&self, token: &TempToken) -> Option<CredentialRecord> {
		self.0.write().remove(token)
	}

	/// Number of outstanding temporary credentials.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when no temporary credentials are outstanding.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
