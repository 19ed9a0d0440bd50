use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::{config::AppConfig, error::Error, resources::Resource, utils::version};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
  /// Resource to list.
  #[arg(short, long, value_enum, default_value_t = Resource::Reports)]
  pub resource: Resource,

  /// Directory holding `<resource>.json` files.
  #[arg(short, long, value_name = "DIR")]
  pub data: Option<PathBuf>,

  /// Project the resources belong to.
  #[arg(long)]
  pub project: Option<String>,

  /// Page to open on.
  #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
  pub page: u32,

  /// Rows per page.
  #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
  pub per_page: Option<u32>,

  /// Only show rows containing this text.
  #[arg(short, long)]
  pub search: Option<String>,

  /// Only show rows dated on or after this day (YYYY-MM-DD).
  #[arg(long, value_parser = parse_date)]
  pub start_date: Option<NaiveDate>,

  /// Only show rows dated on or before this day (YYYY-MM-DD).
  #[arg(long, value_parser = parse_date)]
  pub end_date: Option<NaiveDate>,

  /// Tick rate, i.e. number of ticks per second.
  #[arg(short, long, value_name = "FLOAT")]
  pub tick_rate: Option<f64>,

  /// Frame rate, i.e. number of frames per second.
  #[arg(short, long, value_name = "FLOAT")]
  pub frame_rate: Option<f64>,
}

impl Cli {
  /// Flags win over the loaded configuration.
  pub fn apply(&self, config: &mut AppConfig) {
    if let Some(data) = &self.data {
      config.data_path = data.clone();
    }
    if let Some(project) = &self.project {
      config.project = project.clone();
    }
    if let Some(per_page) = self.per_page {
      config.per_page = per_page;
    }
    if let Some(tick_rate) = self.tick_rate {
      config.tick_rate = tick_rate;
    }
    if let Some(frame_rate) = self.frame_rate {
      config.frame_rate = frame_rate;
    }
  }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, Error> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::Date(s.to_string()))
}
