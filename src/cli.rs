//! Command-line interface of the tickets query.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tickets::{TrainFilter, TrainKind};

#[derive(Parser, Debug)]
#[command(
    name = "tickets",
    version,
    about = "Train tickets query via command-line",
    long_about = None,
    after_help = "Example:\n    tickets 南京 北京 2016-07-01\n    tickets -gd 上海 杭州 07-01"
)]
pub struct Cli {
    /// High-speed trains (G)
    #[arg(short = 'g')]
    high_speed: bool,

    /// Bullet trains (D)
    #[arg(short = 'd')]
    bullet: bool,

    /// Express trains (T)
    #[arg(short = 't')]
    express: bool,

    /// Fast trains (K)
    #[arg(short = 'k')]
    fast: bool,

    /// Direct trains (Z)
    #[arg(short = 'z')]
    direct: bool,

    /// Departure station name
    from: String,

    /// Arrival station name
    to: String,

    /// Departure date, e.g. 2016-07-01 or 07-01 for the current year
    date: String,

    /// Path to TOML configuration file
    #[arg(short, long)]
    conf: Option<PathBuf>,

    /// Extra stations in 12306 station_name.js format
    #[arg(long)]
    stations: Option<PathBuf>,

    /// Don't verify the certificate of the server
    #[arg(long)]
    insecure: bool,

    /// Show more logs, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Returns the departure station name.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the arrival station name.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the date as typed.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the train types selected by the flags, empty if none is set.
    pub fn filter(&self) -> TrainFilter {
        [
            (self.high_speed, TrainKind::HighSpeed),
            (self.bullet, TrainKind::Bullet),
            (self.express, TrainKind::Express),
            (self.fast, TrainKind::Fast),
            (self.direct, TrainKind::Direct),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .map(|(_, kind)| kind)
        .collect()
    }

    pub fn conf(&self) -> Option<&Path> {
        self.conf.as_deref()
    }

    pub fn stations(&self) -> Option<&Path> {
        self.stations.as_deref()
    }

    pub fn insecure(&self) -> bool {
        self.insecure
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }
}
