//! HTTP server issuing access tokens for a video room.
//!
//! Routes:
//! - `GET /`: the bootstrap page, see [`ServerConfig::index`]
//! - `GET|POST /token`: a freshly signed token for a random identity, see [`room_token::Credentials::issue`]

mod config;
mod log;
mod web;

pub use config::*;
pub use log::*;
pub use web::*;

use room_token::IdentityGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let config = Config::load()?;

	// Fail fast rather than hand out tokens the platform will reject.
	let credentials = config.twilio.init()?;

	let web = Web::new(
		WebState {
			credentials,
			identities: IdentityGenerator::random(),
			room: config.server.room(),
		},
		&config.server,
	);

	web.run().await
}
