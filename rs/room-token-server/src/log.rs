use clap::Args;
use serde::Deserialize;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[serde_with::serde_as]
#[derive(Args, Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Log {
	/// The default log level, overridden per-target by RUST_LOG [default: info]
	#[arg(long = "log-level", env = "ROOM_TOKEN_LOG_LEVEL")]
	#[serde_as(as = "Option<serde_with::DisplayFromStr>")]
	pub level: Option<Level>,
}

impl Log {
	pub fn level(&self) -> Level {
		self.level.unwrap_or(Level::INFO)
	}

	pub fn init(&self) -> anyhow::Result<()> {
		let filter = EnvFilter::builder()
			.with_default_directive(LevelFilter::from_level(self.level()).into())
			.from_env_lossy()
			.add_directive("h2=warn".parse()?)
			.add_directive("hyper=info".parse()?)
			.add_directive("tower_http=info".parse()?);

		tracing_subscriber::fmt()
			.with_writer(std::io::stderr)
			.with_env_filter(filter)
			.init();

		Ok(())
	}
}
