pub mod cli;

use crate::domain::ports::MapConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "quakemap")]
#[command(about = "Renders live USGS seismic events as an interactive map")]
pub struct CliConfig {
    #[arg(
        long,
        default_value = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
    )]
    pub events_url: String,

    #[arg(
        long,
        default_value = "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json"
    )]
    pub boundaries_url: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl MapConfig for CliConfig {
    fn events_url(&self) -> &str {
        &self.events_url
    }

    fn boundaries_url(&self) -> &str {
        &self.boundaries_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("events_url", &self.events_url)?;
        validate_url("boundaries_url", &self.boundaries_url)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
