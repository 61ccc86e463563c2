use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::{Credentials, Grants};

/// The claims signed into every access token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
	/// A unique token ID: the API key SID followed by the issue time in nanoseconds.
	#[serde(rename = "jti")]
	pub id: String,

	/// The API key SID used to sign the token.
	#[serde(rename = "iss")]
	pub issuer: String,

	/// The account SID that owns the API key.
	#[serde(rename = "sub")]
	pub subject: String,

	/// The expiration time, in seconds since the Unix epoch.
	#[serde(rename = "exp")]
	pub expires: u64,

	pub grants: Grants,
}

impl Claims {
	/// How long a token remains valid after it was issued.
	pub const TTL: Duration = Duration::from_secs(6 * 60 * 60);

	/// Build the claims for a token issued at the given time.
	pub fn new(credentials: &Credentials, identity: impl Into<String>, room: impl Into<String>, issued: SystemTime) -> Self {
		// A clock before the epoch is clamped rather than treated as an error.
		let since_epoch = issued.duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();

		Self {
			id: format!("{}-{}", credentials.api_key.sid, since_epoch.as_nanos()),
			issuer: credentials.api_key.sid.clone(),
			subject: credentials.account_sid.clone(),
			expires: (since_epoch + Self::TTL).as_secs(),
			grants: Grants::new(identity, room),
		}
	}

	/// The time the token was issued, to the second.
	pub fn issued_at(&self) -> SystemTime {
		self.expires_at().checked_sub(Self::TTL).unwrap_or(SystemTime::UNIX_EPOCH)
	}

	/// The time the token stops being accepted.
	pub fn expires_at(&self) -> SystemTime {
		SystemTime::UNIX_EPOCH + Duration::from_secs(self.expires)
	}

	pub fn identity(&self) -> &str {
		&self.grants.identity
	}

	pub fn room(&self) -> &str {
		&self.grants.video.room
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::ApiKey;

	fn credentials() -> Credentials {
		Credentials::new("AC1", ApiKey::new("SK1", "secret"))
	}

	#[test]
	fn example() {
		let issued = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
		let claims = Claims::new(&credentials(), "user-0042", "group-video-room", issued);

		assert_eq!(claims.issuer, "SK1");
		assert_eq!(claims.subject, "AC1");
		assert_eq!(claims.identity(), "user-0042");
		assert_eq!(claims.room(), "group-video-room");
		assert_eq!(claims.id, "SK1-1700000000000000000");
	}

	#[test]
	fn expires_after_six_hours() {
		let issued = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
		let claims = Claims::new(&credentials(), "user-0001", "room", issued);

		assert_eq!(claims.expires, 1_700_000_000 + 21600);
		assert_eq!(claims.issued_at(), issued);
		assert_eq!(claims.expires_at().duration_since(issued).unwrap(), Claims::TTL);
	}

	#[test]
	fn unique_id_per_nanosecond() {
		let issued = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
		let a = Claims::new(&credentials(), "user-0001", "room", issued);
		let b = Claims::new(&credentials(), "user-0001", "room", issued + Duration::from_nanos(1));

		assert_ne!(a.id, b.id);
		assert_eq!(a.expires, b.expires);
	}

	#[test]
	fn serialize() {
		let issued = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
		let claims = Claims::new(&credentials(), "user-0042", "group-video-room", issued);
		let json = serde_json::to_value(&claims).unwrap();

		assert_eq!(
			json,
			serde_json::json!({
				"jti": "SK1-10000000000",
				"iss": "SK1",
				"sub": "AC1",
				"exp": 21610,
				"grants": {
					"identity": "user-0042",
					"video": {
						"room": "group-video-room",
						"room_type": "group",
					},
				},
			})
		);
	}
}
