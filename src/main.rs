//! Binary entry point for the mock provider.

// std
use std::net::SocketAddr;
// crates.io
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
// self
use oauth1_mock::{handshake::Handshake, http, registry::TokenRegistry};

// Fixed listening port; no environment-variable override.
const PORT: u16 = 8080;

fn initialize_tracing() {
	let default_directives = "oauth1_mock=info,axum=warn";
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
	let layer = fmt::layer().with_target(true).with_level(true);

	tracing_subscriber::registry().with(env_filter).with(layer).init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	initialize_tracing();

	let registry = TokenRegistry::default();
	let handshake = Handshake::new(registry);
	let addr = SocketAddr::from(([0, 0, 0, 0], PORT));

	http::serve(addr, handshake).await?;

	Ok(())
}
