use std::time::SystemTime;

use crate::{ApiKey, Claims, Result};

/// The account and API key used to issue tokens.
///
/// Nothing here is validated: empty values produce a well-formed token that the platform will reject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// The account SID, used as the token subject.
	pub account_sid: String,

	pub api_key: ApiKey,
}

impl Credentials {
	pub fn new(account_sid: impl Into<String>, api_key: ApiKey) -> Self {
		Self {
			account_sid: account_sid.into(),
			api_key,
		}
	}

	/// Issue a token allowing `identity` to join `room` for the next six hours.
	pub fn issue(&self, identity: &str, room: &str) -> Result<String> {
		self.issue_at(identity, room, SystemTime::now())
	}

	/// Issue a token as if it were created at `issued`.
	pub fn issue_at(&self, identity: &str, room: &str, issued: SystemTime) -> Result<String> {
		let claims = Claims::new(self, identity, room, issued);
		self.api_key.encode(&claims)
	}
}

/// Issue a token from raw credential strings.
pub fn issue_token(
	account_sid: &str,
	api_key_sid: &str,
	api_key_secret: &str,
	identity: &str,
	room: &str,
) -> Result<String> {
	Credentials::new(account_sid, ApiKey::new(api_key_sid, api_key_secret)).issue(identity, room)
}
