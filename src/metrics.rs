//! prometheus meters for the relay cycle

use prometheus::{
	exponential_buckets, histogram_opts, opts, Encoder, Histogram, IntCounter, IntCounterVec,
	Registry, TextEncoder,
};

use crate::relay::{CycleOutcome, RelayError};

#[derive(Debug, Clone)]
pub struct RelayMetrics {
	/// meters below are registered here instead of the process wide default
	/// registry
	registry: Registry,
	/// finished cycles by outcome
	cycles: IntCounterVec,
	/// total number of alerts accepted by the destination
	alerts_forwarded: IntCounter,
	/// time spent in a cycle
	cycle_duration: Histogram,
}

impl RelayMetrics {
	/// construct and register prometheus meters
	pub fn new() -> Result<Self, prometheus::Error> {
		let registry = Registry::new();

		let cycles = IntCounterVec::new(
			opts!("cycles_total", "number of finished relay cycles")
				.namespace("alertmanager_relay"),
			&["outcome"],
		)?;

		let alerts_forwarded = IntCounter::with_opts(
			opts!("alerts_forwarded_total", "number of alerts pushed to the destination")
				.namespace("alertmanager_relay"),
		)?;

		let cycle_duration = Histogram::with_opts(
			histogram_opts!(
				"cycle_duration_seconds",
				"time spent pulling and pushing alerts in seconds",
				exponential_buckets(0.005, 2., 12)?
			)
			.namespace("alertmanager_relay"),
		)?;

		registry.register(Box::new(cycles.clone()))?;
		registry.register(Box::new(alerts_forwarded.clone()))?;
		registry.register(Box::new(cycle_duration.clone()))?;

		Ok(Self { registry, cycles, alerts_forwarded, cycle_duration })
	}

	/// records the result of a finished cycle which took `seconds`
	pub fn observe(&self, result: &Result<CycleOutcome, RelayError>, seconds: f64) {
		let outcome = match result {
			Ok(CycleOutcome::Idle) => "idle",
			Ok(CycleOutcome::Forwarded(count)) => {
				self.alerts_forwarded.inc_by(*count as u64);
				"forwarded"
			}
			Err(err) => err.kind(),
		};

		self.cycles.with_label_values(&[outcome]).inc();
		self.cycle_duration.observe(seconds);
	}

	/// text exposition format of all meters
	pub fn encode(&self) -> Result<(Vec<u8>, String), prometheus::Error> {
		let mut buffer = vec![];
		let encoder = TextEncoder::new();

		encoder.encode(&self.registry.gather(), &mut buffer)?;

		Ok((buffer, encoder.format_type().to_owned()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_outcomes() {
		let metrics = RelayMetrics::new().unwrap();

		metrics.observe(&Ok(CycleOutcome::Forwarded(3)), 0.1);
		metrics.observe(&Ok(CycleOutcome::Forwarded(2)), 0.1);
		metrics.observe(&Ok(CycleOutcome::Idle), 0.01);
		metrics.observe(
			&Err(RelayError::DestinationRejected {
				url: "http://dst/api/v1/alerts".to_owned(),
				status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
				body: String::new(),
			}),
			0.2,
		);

		assert_eq!(metrics.alerts_forwarded.get(), 5);
		assert_eq!(metrics.cycles.with_label_values(&["forwarded"]).get(), 2);
		assert_eq!(metrics.cycles.with_label_values(&["idle"]).get(), 1);
		assert_eq!(metrics.cycles.with_label_values(&["destination_rejected"]).get(), 1);
		assert_eq!(metrics.cycle_duration.get_sample_count(), 4);
	}

	#[test]
	fn encodes_text_format() {
		let metrics = RelayMetrics::new().unwrap();
		metrics.observe(&Ok(CycleOutcome::Idle), 0.01);

		let (buffer, content_type) = metrics.encode().unwrap();
		let text = String::from_utf8(buffer).unwrap();

		assert!(content_type.starts_with("text/plain"));
		assert!(text.contains("alertmanager_relay_cycles_total{outcome=\"idle\"} 1"));
		assert!(text.contains("alertmanager_relay_cycle_duration_seconds_count 1"));
	}

	#[test]
	fn instances_do_not_collide() {
		assert!(RelayMetrics::new().is_ok());
		assert!(RelayMetrics::new().is_ok());
	}
}
