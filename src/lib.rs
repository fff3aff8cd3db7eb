//! # tickets
//!
//! The `tickets` crate queries the 12306 train tickets service
//! and prints the available trains as a console table.
//!
//! ## Making requests
//!
//! Build a query from station names and a date, send it with the client
//! and render the collected trains:
//!
//! ```rust,no_run
//! # use tickets::{StationDirectory, TicketsQuery, TicketsClient, TrainFilter, render};
//! #
//! let stations = StationDirectory::bundled();
//! let filter: TrainFilter = "gd".parse().unwrap();
//!
//! let q = TicketsQuery::new(&stations, "南京", "北京", "07-01", filter);
//! let params = q.build_params().unwrap();
//!
//! let client = TicketsClient::default();
//! let collector = client.query(&params, q.filter().clone()).unwrap();
//!
//! render(&collector, &mut std::io::stdout()).unwrap();
//! ```
//!

#[macro_use]
extern crate log;

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::{fmt, fmt::Display, str::FromStr};

mod error;
pub use crate::error::{Error, ErrorKind};

/// A `Result` alias where the `Err` case is `tickets::Error`.
pub type Result<T> = std::result::Result<T, Error>;

mod color;
pub use crate::color::{colorize, Role};

mod client;
pub use crate::client::{ClientOptions, TicketsClient, QUERY_URL};

mod des;

mod stations;
pub use crate::stations::StationDirectory;

mod query;
pub use crate::query::{normalize_date, QueryParams, TicketsQuery};

mod tickets;
pub use crate::tickets::{format_duration, RawTicket, Ticket, TicketsCollector};

mod table;
pub use crate::table::{render, Table};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
/// A date of departure accepted by the tickets service.
pub struct QueryDate(NaiveDate);

impl QueryDate {
    /// Creates `QueryDate` from a year, a month and a day.
    ///
    /// Returns `None` if the values don't make a calendar date.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tickets::QueryDate;
    /// #
    /// let d = QueryDate::new(2016, 7, 1).unwrap();
    ///
    /// assert_eq!(format!("{}", d), "2016-07-01");
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(QueryDate)
    }

    /// Returns the number of whole days between `today` and this date.
    ///
    /// The value is negative for dates in the past.
    pub fn days_from(&self, today: NaiveDate) -> i64 {
        self.0.signed_duration_since(today).num_days()
    }

    /// Returns the year of the date.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl Display for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for QueryDate {
    fn from(d: NaiveDate) -> Self {
        QueryDate(d)
    }
}

impl From<QueryDate> for NaiveDate {
    #[inline]
    fn from(d: QueryDate) -> Self {
        d.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Kind of the train, named by the first letter of the train code.
pub enum TrainKind {
    /// High-speed trains, `G`.
    HighSpeed,
    /// Bullet (EMU) trains, `D`.
    Bullet,
    /// Express trains, `T`.
    Express,
    /// Fast trains, `K`.
    Fast,
    /// Direct trains, `Z`.
    Direct,
}

impl TrainKind {
    /// Returns the lowercase filter code of the kind.
    pub fn code(&self) -> char {
        match self {
            TrainKind::HighSpeed => 'g',
            TrainKind::Bullet => 'd',
            TrainKind::Express => 't',
            TrainKind::Fast => 'k',
            TrainKind::Direct => 'z',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Set of the train type codes to show.
///
/// An empty filter shows every train.
pub struct TrainFilter(BTreeSet<char>);

impl TrainFilter {
    /// Creates a filter showing all the trains.
    pub fn all() -> Self {
        TrainFilter::default()
    }

    /// Adds a train kind to the filter.
    pub fn with(mut self, kind: TrainKind) -> Self {
        self.0.insert(kind.code());
        self
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if a train with the given type code should be shown.
    pub fn allows(&self, code: char) -> bool {
        self.0.is_empty() || self.0.contains(&code)
    }
}

impl FromIterator<TrainKind> for TrainFilter {
    fn from_iter<I: IntoIterator<Item = TrainKind>>(iter: I) -> Self {
        TrainFilter(iter.into_iter().map(|k| k.code()).collect())
    }
}

impl Display for TrainFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for TrainFilter {
    type Err = Error;

    /// Takes the codes as letters, e.g. `"gd"`; the case is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut codes = BTreeSet::new();
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            if !c.is_ascii_alphabetic() {
                return Err(Error::value_invalid(
                    "filter",
                    format!("Unknown train type '{}'", c),
                ));
            }
            codes.insert(c.to_ascii_lowercase());
        }
        Ok(TrainFilter(codes))
    }
}
