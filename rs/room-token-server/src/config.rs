use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use room_token::{ApiKey, Credentials};
use serde::Deserialize;

use crate::Log;

#[derive(Parser, Clone, Debug, Default, Deserialize)]
#[command(version, about)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
	/// Load the configuration from a TOML file; arguments override its values.
	#[arg(long = "config", env = "ROOM_TOKEN_CONFIG")]
	#[serde(skip)]
	pub file: Option<PathBuf>,

	#[command(flatten)]
	pub log: Log,

	#[command(flatten)]
	pub server: ServerConfig,

	#[command(flatten)]
	pub twilio: TwilioConfig,
}

impl Config {
	/// Parse the environment, arguments, and optional config file, then initialize logging.
	pub fn load() -> anyhow::Result<Self> {
		// A missing .env is fine, a malformed one is not.
		if let Err(err) = dotenvy::dotenv() {
			if !err.not_found() {
				return Err(err).context("failed to load .env");
			}
		}

		let config = match Self::parse_from_args(std::env::args_os()) {
			Ok(config) => config,
			// Let clap print help, version, and usage errors itself.
			Err(err) => match err.downcast::<clap::Error>() {
				Ok(err) => err.exit(),
				Err(err) => return Err(err),
			},
		};
		config.log.init()?;

		let index = config.server.index();
		tracing::info!(bind = %config.server.bind(), index = %index.display(), room = %config.server.room(), "loaded config");

		Ok(config)
	}

	pub fn parse_from_args<I, T>(args: I) -> anyhow::Result<Self>
	where
		I: IntoIterator<Item = T>,
		T: Into<std::ffi::OsString> + Clone,
	{
		let args: Vec<std::ffi::OsString> = args.into_iter().map(Into::into).collect();
		let config = Self::try_parse_from(&args)?;

		let Some(file) = config.file.clone() else {
			return Ok(config);
		};

		let contents = std::fs::read_to_string(&file).with_context(|| format!("failed to read {}", file.display()))?;

		// Arguments take precedence over the file.
		let mut config = Self::from_toml(&contents).with_context(|| format!("invalid config {}", file.display()))?;
		config.try_update_from(&args)?;

		Ok(config)
	}

	pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
		Ok(toml::from_str(contents)?)
	}
}

#[derive(clap::Args, Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
	/// Listen for HTTP requests on the given address [default: [::]:8080]
	#[arg(long = "server-bind", env = "ROOM_TOKEN_BIND")]
	pub bind: Option<SocketAddr>,

	/// The page served at `/` [default: index.html]
	#[arg(long = "server-index", env = "ROOM_TOKEN_INDEX")]
	pub index: Option<PathBuf>,

	/// The room every token grants access to [default: group-video-room]
	#[arg(long = "server-room", env = "ROOM_TOKEN_ROOM")]
	pub room: Option<String>,
}

impl ServerConfig {
	pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(std::net::IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED), 8080);
	pub const DEFAULT_INDEX: &str = "index.html";
	pub const DEFAULT_ROOM: &str = "group-video-room";

	pub fn bind(&self) -> SocketAddr {
		self.bind.unwrap_or(Self::DEFAULT_BIND)
	}

	pub fn index(&self) -> PathBuf {
		self.index.clone().unwrap_or_else(|| Self::DEFAULT_INDEX.into())
	}

	pub fn room(&self) -> String {
		self.room.clone().unwrap_or_else(|| Self::DEFAULT_ROOM.to_string())
	}
}

#[derive(clap::Args, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TwilioConfig {
	/// The account SID that owns the API key.
	#[arg(long = "twilio-account-sid", env = "TWILIO_ACCOUNT_SID")]
	pub account_sid: Option<String>,

	/// The SID of the API key used to sign tokens.
	#[arg(long = "twilio-api-key-sid", env = "TWILIO_API_KEY_SID")]
	pub api_key_sid: Option<String>,

	/// The secret of the API key used to sign tokens.
	#[arg(long = "twilio-api-key-secret", env = "TWILIO_API_KEY_SECRET", hide_env_values = true)]
	pub api_key_secret: Option<String>,
}

impl TwilioConfig {
	/// Validate that every credential is present and non-empty.
	pub fn init(&self) -> anyhow::Result<Credentials> {
		let account_sid = Self::required(&self.account_sid, "TWILIO_ACCOUNT_SID")?;
		let api_key_sid = Self::required(&self.api_key_sid, "TWILIO_API_KEY_SID")?;
		let api_key_secret = Self::required(&self.api_key_secret, "TWILIO_API_KEY_SECRET")?;

		Ok(Credentials::new(account_sid, ApiKey::new(api_key_sid, api_key_secret)))
	}

	fn required<'a>(value: &'a Option<String>, name: &str) -> anyhow::Result<&'a str> {
		match value.as_deref() {
			Some(value) if !value.trim().is_empty() => Ok(value),
			Some(_) => anyhow::bail!("{name} is empty"),
			None => anyhow::bail!("missing {name}"),
		}
	}
}

impl std::fmt::Debug for TwilioConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TwilioConfig")
			.field("account_sid", &self.account_sid)
			.field("api_key_sid", &self.api_key_sid)
			.field("api_key_secret", &self.api_key_secret.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::io::Write;

	fn twilio(account_sid: Option<&str>, api_key_sid: Option<&str>, api_key_secret: Option<&str>) -> TwilioConfig {
		TwilioConfig {
			account_sid: account_sid.map(Into::into),
			api_key_sid: api_key_sid.map(Into::into),
			api_key_secret: api_key_secret.map(Into::into),
		}
	}

	#[test]
	fn credentials() {
		let credentials = twilio(Some("AC1"), Some("SK1"), Some("secret")).init().unwrap();

		assert_eq!(credentials.account_sid, "AC1");
		assert_eq!(credentials.api_key.sid, "SK1");
		assert_eq!(credentials.api_key.secret, "secret");
	}

	#[test]
	fn missing_credentials() {
		let err = twilio(Some("AC1"), None, Some("secret")).init().unwrap_err();
		assert!(err.to_string().contains("TWILIO_API_KEY_SID"));
	}

	#[test]
	fn empty_credentials() {
		let err = twilio(Some("AC1"), Some("SK1"), Some("  ")).init().unwrap_err();
		assert_eq!(err.to_string(), "TWILIO_API_KEY_SECRET is empty");
	}

	#[test]
	fn redacted() {
		let debug = format!("{:?}", twilio(Some("AC1"), Some("SK1"), Some("hunter2")));
		assert!(debug.contains("AC1"));
		assert!(!debug.contains("hunter2"));
	}

	#[test]
	fn defaults() {
		let server = ServerConfig::default();

		assert_eq!(server.bind(), "[::]:8080".parse().unwrap());
		assert_eq!(server.index(), PathBuf::from("index.html"));
		assert_eq!(server.room(), "group-video-room");
	}

	#[test]
	fn args() {
		let config = Config::parse_from_args([
			"room-token-server",
			"--server-bind",
			"127.0.0.1:3000",
			"--server-room",
			"standup",
			"--twilio-account-sid",
			"AC1",
		])
		.unwrap();

		assert_eq!(config.server.bind(), "127.0.0.1:3000".parse().unwrap());
		assert_eq!(config.server.room(), "standup");
		assert_eq!(config.twilio.account_sid.as_deref(), Some("AC1"));
	}

	#[test]
	fn from_toml() {
		let config = Config::from_toml(
			r#"
			[log]
			level = "warn"

			[server]
			bind = "0.0.0.0:9000"
			index = "public/index.html"

			[twilio]
			account_sid = "AC1"
			api_key_sid = "SK1"
			api_key_secret = "secret"
			"#,
		)
		.unwrap();

		assert_eq!(config.log.level(), tracing::Level::WARN);
		assert_eq!(config.server.bind(), "0.0.0.0:9000".parse().unwrap());
		assert_eq!(config.server.index(), PathBuf::from("public/index.html"));
		assert_eq!(config.server.room(), "group-video-room");
		assert_eq!(config.twilio.init().unwrap().api_key.sid, "SK1");
	}

	#[test]
	fn unknown_field() {
		assert!(Config::from_toml("[server]\nport = 80").is_err());
	}

	#[test]
	fn file_with_override() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[server]\nroom = \"from-file\"\nindex = \"page.html\"").unwrap();

		let path = file.path().to_str().unwrap().to_string();
		let config =
			Config::parse_from_args(["room-token-server", "--config", path.as_str(), "--server-room", "from-args"])
				.unwrap();

		assert_eq!(config.server.room(), "from-args");
		assert_eq!(config.server.index(), PathBuf::from("page.html"));
	}
}
