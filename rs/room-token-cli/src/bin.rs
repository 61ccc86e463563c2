use std::io::Read;

use anyhow::Context;
use clap::{Parser, Subcommand};
use room_token::{ApiKey, Credentials, IdentityGenerator};

#[derive(Debug, Parser)]
#[command(name = "room-token", version, about)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Issue a token and print it to stdout.
	Issue {
		/// The account SID that owns the API key.
		#[arg(long, env = "TWILIO_ACCOUNT_SID")]
		account_sid: String,

		/// The SID of the API key used to sign the token.
		#[arg(long, env = "TWILIO_API_KEY_SID")]
		api_key_sid: String,

		/// The secret of the API key used to sign the token.
		#[arg(long, env = "TWILIO_API_KEY_SECRET", hide_env_values = true)]
		api_key_secret: String,

		/// The participant identity; a random `user-NNNN` if omitted.
		#[arg(long)]
		identity: Option<String>,

		/// The room the token grants access to.
		#[arg(long, default_value = "group-video-room")]
		room: String,
	},

	/// Verify a token read from stdin and print its claims as JSON.
	Verify {
		/// The secret of the API key that signed the token.
		#[arg(long, env = "TWILIO_API_KEY_SECRET", hide_env_values = true)]
		api_key_secret: String,

		/// Also require the token to be issued by this API key.
		#[arg(long, env = "TWILIO_API_KEY_SID")]
		api_key_sid: Option<String>,
	},
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Issue {
			account_sid,
			api_key_sid,
			api_key_secret,
			identity,
			room,
		} => {
			let identity = identity.unwrap_or_else(|| IdentityGenerator::random().generate());
			let credentials = Credentials::new(account_sid, ApiKey::new(api_key_sid, api_key_secret));

			let token = credentials.issue(&identity, &room).context("failed to issue token")?;
			println!("{token}");
		}
		Commands::Verify {
			api_key_secret,
			api_key_sid,
		} => {
			let mut token = String::new();
			std::io::stdin()
				.read_to_string(&mut token)
				.context("failed to read token from stdin")?;

			let key = ApiKey::new(api_key_sid.clone().unwrap_or_default(), api_key_secret);
			let claims = key.decode(token.trim()).context("invalid token")?;

			if let Some(sid) = api_key_sid {
				anyhow::ensure!(claims.issuer == sid, "token issued by {}, expected {}", claims.issuer, sid);
			}

			println!("{}", serde_json::to_string_pretty(&claims)?);
		}
	}

	Ok(())
}
