//! Train tickets query via command-line.
//!
//! ```bash
//! # All the trains from Nanjing to Beijing
//! tickets 南京 北京 2016-07-01
//!
//! # High-speed and bullet trains only, the current year is taken
//! tickets -gd 南京 北京 07-01
//! ```

#[macro_use]
extern crate log;

use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tickets::{
    colorize, render, Error, Role, StationDirectory, TicketsClient, TicketsCollector, TicketsQuery,
};

mod cli;
mod conf;

use crate::cli::Cli;
use crate::conf::Conf;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose());

    let collector = match run(&cli) {
        Ok(c) => c,
        Err(e) => report_and_exit(e),
    };

    if let Err(e) = render(&collector, &mut io::stdout()) {
        error!("writing the table: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> tickets::Result<TicketsCollector> {
    let conf = match cli.conf() {
        Some(path) => Conf::load(path)?,
        None => Conf::default(),
    };

    let mut stations = StationDirectory::bundled();
    if let Some(path) = cli.stations().or_else(|| conf.stations()) {
        stations.load_file(path)?;
    }

    let query = TicketsQuery::new(&stations, cli.from(), cli.to(), cli.date(), cli.filter());
    debug!("{}", query);
    let params = query.build_params()?;

    let client = TicketsClient::new(conf.client_options(cli.insecure()));
    let collector = client.query(&params, query.filter().clone())?;
    info!("{}", collector);

    Ok(collector)
}

// Prints the message in red and stops the program.
fn report_and_exit(error: Error) -> ! {
    debug!("{} error of {:?}", error.kind(), error.field());
    println!("{}", colorize(&error.to_string(), Role::Alert));
    process::exit(1);
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
