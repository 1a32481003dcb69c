//! relays the active alerts of one prometheus alertmanager into another
//!
//! Features:
//! - pulls `/api/{version}/alerts` from the source every poll interval and
//!   posts the same alerts to the destination
//! - alertmanager api v1 and v2 payloads
//! - optional basic auth, configured separately for source and destination
//! - `/health` liveness check and `/metrics` prometheus endpoint

use anyhow::{Context, Result};
use settings::Settings;

use crate::{metrics::RelayMetrics, relay::Relay};

mod alert;
mod health_endpoint;
mod log;
mod metrics;
mod relay;
mod settings;

/// exit the complete program if one thread panics
fn setup_panic_handler() {
	let default_panic = std::panic::take_hook();
	std::panic::set_hook(Box::new(move |info| {
		default_panic(info);
		std::process::exit(1);
	}));
}

/// the entry point of the program
#[tokio::main]
pub async fn main() -> Result<()> {
	setup_panic_handler();

	// tracing isn't set up before the log level is known
	let settings = Settings::load().context("failed to load configuration from environment")?;

	log::setup_logging(&settings.log).context("could not setup logging")?;

	tracing::info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
	settings.log_summary();

	let metrics = RelayMetrics::new().context("failed to register prometheus meters")?;

	let relay =
		Relay::new(settings.relay, metrics.clone()).context("failed to construct relay")?;

	tokio::spawn(health_endpoint::run_health_endpoint(settings.health_endpoint, metrics));

	relay.run().await;

	Ok(())
}
