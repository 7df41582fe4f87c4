use crate::calendar::RestDays;
use crate::scheduler::{AllocOptions, FillPolicy, TeamPolicy};
use anyhow::{bail, Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Paramètres d'un run, persistables en JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub rest_days: [Weekday; 2],
    pub team_policy: TeamPolicy,
    pub fill_policy: FillPolicy,
    pub allow_double_booking: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let rest = RestDays::default();
        Self {
            rest_days: [rest.0, rest.1],
            team_policy: TeamPolicy::default(),
            fill_policy: FillPolicy::default(),
            allow_double_booking: true,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rest_days[0] == self.rest_days[1] {
            bail!("rest_days must name two different weekdays");
        }
        Ok(())
    }

    pub fn to_options(&self) -> AllocOptions {
        AllocOptions {
            rest_days: RestDays(self.rest_days[0], self.rest_days[1]),
            team_policy: self.team_policy,
            fill_policy: self.fill_policy,
            allow_double_booking: self.allow_double_booking,
            seed: self.seed,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: RunConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn export_config<P: AsRef<Path>>(path: P, config: &RunConfig) -> Result<()> {
    config.validate()?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
