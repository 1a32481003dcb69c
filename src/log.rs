use std::str::FromStr;

use anyhow::{Context, Result};
use tracing_subscriber::{
    filter::LevelFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
}

impl LogSettings {
    /// the configured level, accepts any casing
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(self.level.trim())
            .with_context(|| format!("invalid log level {:?}", self.level))
    }
}

fn filter(settings: &LogSettings) -> Result<EnvFilter> {
    Ok(EnvFilter::default()
        .add_directive(settings.level_filter()?.into())
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?))
}

pub fn setup_logging(settings: &LogSettings) -> Result<()> {
    let fmt_layer = fmt::layer();

    let filter_layer = filter(settings)?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(())
}
