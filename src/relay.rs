//! pulls the active alerts from the source alertmanager and pushes them into
//! the destination alertmanager, once every poll interval
use anyhow::{Context, Result};
use reqwest::{
	header::{AUTHORIZATION, CONTENT_TYPE},
	redirect::Policy,
	RequestBuilder, StatusCode,
};
use tokio::time::Instant;

use crate::{
	alert::AlertBatch,
	metrics::RelayMetrics,
	settings::{ApiVersion, Endpoint, RelaySettings},
};

/// response bodies of rejected pushes are cut off after this many characters
const BODY_EXCERPT_LEN: usize = 512;

/// successful end of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
	/// the source had no alerts, nothing was pushed
	Idle,
	/// number of alerts accepted by the destination
	Forwarded(usize),
}

/// reasons a cycle fails. None of them are fatal, the next cycle runs as
/// scheduled.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
	#[error("request to {url} failed: {source}")]
	Transport {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("can't decode {version} alerts from {url} (status {status}): {source}")]
	Decode {
		url: String,
		version: ApiVersion,
		status: StatusCode,
		#[source]
		source: serde_json::Error,
	},

	#[error("destination {url} returned {status}: {body}")]
	DestinationRejected { url: String, status: StatusCode, body: String },
}

impl RelayError {
	/// short name used as metric label
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Transport { .. } => "transport_error",
			Self::Decode { .. } => "decode_error",
			Self::DestinationRejected { .. } => "destination_rejected",
		}
	}
}

pub struct Relay {
	client: reqwest::Client,
	settings: RelaySettings,
	metrics: RelayMetrics,
}

impl Relay {
	pub fn new(settings: RelaySettings, metrics: RelayMetrics) -> Result<Self> {
		// a redirected push would be replayed as GET and look successful
		let client = reqwest::Client::builder()
			.timeout(settings.request_timeout)
			.redirect(Policy::none())
			.build()
			.context("failed to build reqwest client")?;

		Ok(Self { client, settings, metrics })
	}

	/// runs a cycle every poll interval, forever. Cycles never overlap and a
	/// failed cycle doesn't change the schedule.
	pub async fn run(self) {
		loop {
			self.tick().await;
			tokio::time::sleep(self.settings.poll_interval).await;
		}
	}

	/// one cycle with logging and metrics
	async fn tick(&self) {
		let started = Instant::now();
		let result = self.cycle().await;

		match &result {
			Ok(CycleOutcome::Idle) => tracing::info!("nothing to forward, awaiting next cycle"),
			Ok(CycleOutcome::Forwarded(count)) => {
				tracing::info!(alerts = count, "forwarding successful")
			}
			Err(err) => tracing::warn!(kind = err.kind(), "pull/push failed: {}", err),
		}

		self.metrics.observe(&result, started.elapsed().as_secs_f64());
	}

	/// pulls the alerts from the source and pushes them to the destination
	/// unless there are none
	pub async fn cycle(&self) -> Result<CycleOutcome, RelayError> {
		let alerts = self.pull().await?;

		if alerts.is_empty() {
			return Ok(CycleOutcome::Idle);
		}

		self.push(&alerts).await?;

		Ok(CycleOutcome::Forwarded(alerts.len()))
	}

	async fn pull(&self) -> Result<AlertBatch, RelayError> {
		let version = &self.settings.api_version;
		let url = self.settings.source.alerts_url(version);

		let request = self.client.get(&url).header(CONTENT_TYPE, "application/json");
		let response = authorize(request, &self.settings.source)
			.send()
			.await
			.map_err(|source| RelayError::Transport { url: url.clone(), source })?;

		let status = response.status();
		let body = response
			.bytes()
			.await
			.map_err(|source| RelayError::Transport { url: url.clone(), source })?;

		tracing::debug!(%url, %status, bytes = body.len(), "pulled alerts");

		AlertBatch::decode(version.shape(), &body).map_err(|source| RelayError::Decode {
			url,
			version: version.clone(),
			status,
			source,
		})
	}

	async fn push(&self, alerts: &AlertBatch) -> Result<(), RelayError> {
		let url = self.settings.destination.alerts_url(&self.settings.api_version);

		// `json` sets the content type as well
		let request = self.client.post(&url).json(alerts);
		let response = authorize(request, &self.settings.destination)
			.send()
			.await
			.map_err(|source| RelayError::Transport { url: url.clone(), source })?;

		let status = response.status();

		if status.as_u16() >= 300 {
			let body = match response.text().await {
				Ok(body) => body,
				Err(err) => {
					tracing::debug!(%url, "can't read rejection body: {}", err);
					String::new()
				}
			};

			return Err(RelayError::DestinationRejected {
				url,
				status,
				body: body.trim().chars().take(BODY_EXCERPT_LEN).collect(),
			});
		}

		tracing::debug!(%url, %status, alerts = alerts.len(), "pushed alerts");

		Ok(())
	}
}

/// adds basic auth if the endpoint has credentials configured
fn authorize(request: RequestBuilder, endpoint: &Endpoint) -> RequestBuilder {
	match &endpoint.credentials {
		Some(credentials) => request.header(AUTHORIZATION, credentials.authorization()),
		None => request,
	}
}
