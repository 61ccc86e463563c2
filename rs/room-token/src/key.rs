use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{Claims, Error, Result};

/// The content type the platform expects in the token header: federated participant access, version 1.
pub const CONTENT_TYPE: &str = "twilio-fpa;v=1";

/// An API key used to sign tokens with HMAC-SHA256.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
	/// The public identifier of the key, used as the token issuer.
	pub sid: String,

	/// The shared secret, used as the HMAC key material.
	pub secret: String,
}

impl ApiKey {
	pub fn new(sid: impl Into<String>, secret: impl Into<String>) -> Self {
		Self {
			sid: sid.into(),
			secret: secret.into(),
		}
	}

	/// Sign the claims, returning a compact `header.claims.signature` token.
	pub fn encode(&self, claims: &Claims) -> Result<String> {
		let mut header = Header::new(Algorithm::HS256);
		header.cty = Some(CONTENT_TYPE.to_string());

		let key = EncodingKey::from_secret(self.secret.as_bytes());
		jsonwebtoken::encode(&header, claims, &key).map_err(Error::Encode)
	}

	/// Verify the signature, content type, and expiration of a token, returning its claims.
	pub fn decode(&self, token: &str) -> Result<Claims> {
		let key = DecodingKey::from_secret(self.secret.as_bytes());
		let validation = Validation::new(Algorithm::HS256);

		let data = jsonwebtoken::decode::<Claims>(token, &key, &validation).map_err(Error::Decode)?;
		if data.header.cty.as_deref() != Some(CONTENT_TYPE) {
			return Err(Error::ContentType(data.header.cty));
		}

		Ok(data.claims)
	}
}

impl std::fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ApiKey")
			.field("sid", &self.sid)
			.field("secret", &"<redacted>")
			.finish()
	}
}
