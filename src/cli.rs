#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::weather::{Units, parse_date};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Celsius => Units::Celsius,
            UnitsArg::Fahrenheit => Units::Fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconMode {
    Emoji,
    Ascii,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "environment-reader",
    version,
    about = "Terminal weather dashboard with hour and day navigation"
)]
pub struct Cli {
    /// City to search for instead of detecting the location
    pub city: Option<String>,

    /// Exact latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Exact longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Open on a specific day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Temperature units; overrides the saved preference
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,

    /// Force ASCII icons
    #[arg(long)]
    pub ascii_icons: bool,

    /// Search bias (ISO2); detected from IP lookup when omitted
    #[arg(long)]
    pub country_code: Option<String>,

    /// Forced refresh interval in seconds
    #[arg(long, default_value_t = 600)]
    pub refresh_interval: u64,

    /// Override the forecast endpoint
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Print a plain-text snapshot to stdout and exit
    #[arg(long)]
    pub one_shot: bool,

    /// Write logs to this file while the dashboard is open
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn icon_mode(&self) -> IconMode {
        if self.ascii_icons {
            IconMode::Ascii
        } else {
            IconMode::Emoji
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("expected YYYY-MM-DD, got {value:?}"))
}
