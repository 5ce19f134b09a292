use anyhow::Error;
use confique::Config;
use std::sync::{Arc, OnceLock};

use crate::datamodel::TimeGrainUnit;

#[derive(Debug, Config)]
pub struct AzMonConfig {
    #[config(env = "AZMON_DEFAULT_TIME_GRAIN", default = 1)]
    pub default_time_grain: u32,

    #[config(env = "AZMON_DEFAULT_TIME_GRAIN_UNIT", default = "hour")]
    pub default_time_grain_unit: String,

    /// Drop aggregation responses that a newer metric name change overtook.
    #[config(env = "AZMON_DISCARD_SUPERSEDED", default = false)]
    pub discard_superseded: bool,

    #[config(env = "AZMON_LOG_FILTER", default = "info")]
    pub log_filter: String,
}

impl AzMonConfig {
    pub fn load() -> Result<AzMonConfig, Error> {
        let c = AzMonConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }

    pub fn time_grain_unit(&self) -> Result<TimeGrainUnit, Error> {
        self.default_time_grain_unit
            .parse::<TimeGrainUnit>()
            .map_err(Error::msg)
    }
}

static AZMON_CONFIG: OnceLock<Arc<AzMonConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<AzMonConfig>, Error> {
    AZMON_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. \
             Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    if AZMON_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = AzMonConfig::load()?;
    AZMON_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}
