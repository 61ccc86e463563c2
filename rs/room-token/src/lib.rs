//! Signed access tokens for joining a video room.
//!
//! Builds the claims expected by Twilio Video (an identity plus a room grant),
//! and signs them with the API key secret using HMAC-SHA256.
//! Tokens are stateless: nothing is recorded on issue, so they can't be revoked and simply expire.
//!
//! See [`Credentials::issue`] to create a token and [`ApiKey::decode`] to verify one.

mod claims;
mod credentials;
mod error;
mod grant;
mod identity;
mod key;

pub use claims::*;
pub use credentials::*;
pub use error::*;
pub use grant::*;
pub use identity::*;
pub use key::*;
