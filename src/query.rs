use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::fmt;
use url::form_urlencoded;

use crate::stations::StationDirectory;
use crate::{error::Error, Result};
use crate::{QueryDate, TrainFilter};

// 12306 can only query within 50 days, starting from yesterday.
const QUERY_WINDOW_START: i64 = -1;
const QUERY_WINDOW_END: i64 = 50;

const PURPOSE_CODES: &str = "ADULT";

/// Query of the train tickets by departure and arrival station names
/// and departure date.
#[derive(Debug, Clone)]
pub struct TicketsQuery<'a> {
    stations: &'a StationDirectory,
    from_station: String,
    to_station: String,
    date: String,
    filter: TrainFilter,
}

impl<'a> TicketsQuery<'a> {
    /// Takes station names as they are written in the directory,
    /// the date as the user typed it, and the train types to show.
    pub fn new(
        stations: &'a StationDirectory,
        from_station: &str,
        to_station: &str,
        date: &str,
        filter: TrainFilter,
    ) -> Self {
        TicketsQuery {
            stations,
            from_station: from_station.to_string(),
            to_station: to_station.to_string(),
            date: date.to_string(),
            filter,
        }
    }

    /// Returns the name of the departure station.
    #[inline]
    pub fn from_station(&self) -> &str {
        &self.from_station
    }

    /// Returns the name of the arrival station.
    #[inline]
    pub fn to_station(&self) -> &str {
        &self.to_station
    }

    /// Returns the train types to show.
    #[inline]
    pub fn filter(&self) -> &TrainFilter {
        &self.filter
    }

    /// Returns the telecode of the station.
    ///
    /// # Errors
    ///
    /// The method fails if the station isn't in the directory.
    pub fn resolve_station(&self, name: &str) -> Result<&'a str> {
        self.stations.lookup(name)
    }

    fn from_telecode(&self) -> Result<&'a str> {
        self.stations.get(&self.from_station).ok_or_else(|| {
            Error::resource_not_found(
                "from_station_telecode",
                "Can't find the telecode of from_station",
            )
        })
    }

    fn to_telecode(&self) -> Result<&'a str> {
        self.stations.get(&self.to_station).ok_or_else(|| {
            Error::resource_not_found(
                "to_station_telecode",
                "Can't find the telecode of to_station",
            )
        })
    }

    /// Validates the date against today's date.
    ///
    /// # Errors
    ///
    /// The method fails if the date is empty, malformed or out of the query window.
    pub fn normalize_date(&self) -> Result<QueryDate> {
        normalize_date(&self.date, Local::now().date_naive())
    }

    /// Makes the request parameters, in the order the service expects.
    ///
    /// # Errors
    ///
    /// The method fails if the date is invalid or a station is unknown.
    pub fn build_params(&self) -> Result<QueryParams> {
        self.build_params_on(Local::now().date_naive())
    }

    /// Makes the request parameters as if the query was made on `today`.
    pub fn build_params_on(&self, today: NaiveDate) -> Result<QueryParams> {
        let query_date = normalize_date(&self.date, today)?;
        let from_code = self.from_telecode()?;
        let to_code = self.to_telecode()?;

        let params = QueryParams {
            query_date,
            from_station: from_code.to_string(),
            to_station: to_code.to_string(),
        };
        debug!("params: {}", params);

        Ok(params)
    }
}

impl fmt::Display for TicketsQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TicketsQuery from={} to={} date={}",
            self.from_station, self.to_station, self.date
        )
    }
}

/// Turns the date typed by the user into the date of the query.
///
/// The date is written as three groups of digits, year, month and day,
/// e.g. `2016-07-01`, or as two groups, month and day, taking the year of `today`.
/// The date must lie from yesterday up to 49 days after `today`.
///
/// # Examples
///
/// ```rust
/// # use tickets::normalize_date;
/// # use chrono::NaiveDate;
/// #
/// let today = NaiveDate::from_ymd_opt(2016, 6, 20).unwrap();
/// let d = normalize_date("07/01", today).unwrap();
///
/// assert_eq!(format!("{}", d), "2016-07-01");
/// ```
pub fn normalize_date(input: &str, today: NaiveDate) -> Result<QueryDate> {
    let re = Regex::new(r"\d+").map_err(|e| Error::value_invalid("date", format!("{}", e)))?;
    let groups: Vec<&str> = re.find_iter(input).map(|m| m.as_str()).collect();
    trace!("date groups: {:?}", groups);

    let date_str = match &groups[..] {
        [] => return Err(Error::value_invalid("date", "Date can't be empty")),
        [month, day] => format!("{:0>4}{:0>2}{:0>2}", today.year(), month, day),
        [year, month, day] => format!("{:0>4}{:0>2}{:0>2}", year, month, day),
        _ => {
            return Err(Error::value_invalid(
                "date",
                "Input date is invalid, format maybe error",
            ))
        }
    };

    let date = match NaiveDate::parse_from_str(&date_str, "%Y%m%d") {
        Ok(d) => QueryDate::from(d),
        Err(e) => {
            debug!("parsing date {} error: {}", date_str, e);
            return Err(Error::value_invalid("date", "Input date format is invalid"));
        }
    };

    let offset = date.days_from(today);
    if !(QUERY_WINDOW_START..QUERY_WINDOW_END).contains(&offset) {
        debug!("date {} is {} days from today", date, offset);
        return Err(Error::value_invalid(
            "date",
            "Input date is invalid, just can only within 50 days from today",
        ));
    }

    Ok(date)
}

/// Parameters of the tickets request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    query_date: QueryDate,
    from_station: String,
    to_station: String,
}

impl QueryParams {
    /// Returns the date of the query.
    #[inline]
    pub fn query_date(&self) -> QueryDate {
        self.query_date
    }

    /// Returns the telecode of the departure station.
    #[inline]
    pub fn from_station(&self) -> &str {
        &self.from_station
    }

    /// Returns the telecode of the arrival station.
    #[inline]
    pub fn to_station(&self) -> &str {
        &self.to_station
    }

    /// Returns the name and value pairs in the order of the request.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("purpose_codes", PURPOSE_CODES.to_string()),
            ("queryDate", self.query_date.to_string()),
            ("from_station", self.from_station.clone()),
            ("to_station", self.to_station.clone()),
        ]
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish();
        write!(f, "{}", query)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_date, TicketsQuery};
    use crate::{ErrorKind, StationDirectory, TrainFilter};
    use chrono::{Duration, NaiveDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stations() -> StationDirectory {
        vec![("南京", "NJH"), ("北京", "BJP")].into_iter().collect()
    }

    #[test]
    fn date_with_year_test() {
        let today = day(2016, 6, 20);

        let d = normalize_date("2016-07-01", today).unwrap();
        assert_eq!(format!("{}", d), "2016-07-01");

        let d = normalize_date("2016年7月1日", today).unwrap();
        assert_eq!(format!("{}", d), "2016-07-01");
    }

    #[test]
    fn date_without_year_test() {
        let today = day(2016, 6, 20);

        let d = normalize_date("07-01", today).unwrap();
        assert_eq!(format!("{}", d), "2016-07-01");

        let d = normalize_date("7.1", today).unwrap();
        assert_eq!(format!("{}", d), "2016-07-01");
    }

    #[test]
    fn date_invalid_test() {
        let today = day(2016, 6, 20);

        for input in ["", "tomorrow", "20160701", "2016-07-01-08", "13-45-99", "2016-02-30"] {
            let e = normalize_date(input, today).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::ValueInvalid, "input: {:?}", input);
            assert_eq!(e.field(), "date");
        }

        assert_eq!(
            normalize_date("", today).unwrap_err().message(),
            "Date can't be empty"
        );
        assert_eq!(
            normalize_date("2016-007-01", today).unwrap_err().message(),
            "Input date format is invalid"
        );
    }

    #[test]
    fn date_window_test() {
        let today = day(2016, 6, 20);
        let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();

        assert!(normalize_date(&fmt(today), today).is_ok());
        assert!(normalize_date(&fmt(today - Duration::days(1)), today).is_ok());
        assert!(normalize_date(&fmt(today + Duration::days(49)), today).is_ok());

        assert!(normalize_date(&fmt(today - Duration::days(2)), today).is_err());
        assert!(normalize_date(&fmt(today + Duration::days(50)), today).is_err());
    }

    #[test]
    fn date_window_across_year_test() {
        let today = day(2016, 12, 31);

        // Without a year the date stays in the current year.
        assert!(normalize_date("01-05", today).is_err());
        assert!(normalize_date("2017-01-05", today).is_ok());
    }

    #[test]
    fn resolve_station_test() {
        let stations = stations();
        let q = TicketsQuery::new(&stations, "南京", "北京", "07-01", TrainFilter::all());

        assert_eq!(q.resolve_station("南京").unwrap(), "NJH");
        assert_eq!(
            q.resolve_station("上海").unwrap_err().kind(),
            ErrorKind::ResourceNotFound
        );
    }

    #[test]
    fn build_params_test() {
        let stations = stations();
        let q = TicketsQuery::new(&stations, "南京", "北京", "07-01", TrainFilter::all());

        let params = q.build_params_on(day(2016, 6, 20)).unwrap();
        assert_eq!(params.from_station(), "NJH");
        assert_eq!(params.to_station(), "BJP");

        let names: Vec<&str> = params.pairs().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["purpose_codes", "queryDate", "from_station", "to_station"]
        );
        assert_eq!(
            format!("{}", params),
            "purpose_codes=ADULT&queryDate=2016-07-01&from_station=NJH&to_station=BJP"
        );
    }

    #[test]
    fn build_params_unknown_station_test() {
        let stations = stations();
        let today = day(2016, 6, 20);

        let q = TicketsQuery::new(&stations, "火星", "北京", "07-01", TrainFilter::all());
        let e = q.build_params_on(today).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(e.field(), "from_station_telecode");

        let q = TicketsQuery::new(&stations, "南京", "火星", "07-01", TrainFilter::all());
        let e = q.build_params_on(today).unwrap_err();
        assert_eq!(e.field(), "to_station_telecode");
    }

    #[test]
    fn build_params_checks_date_first_test() {
        let stations = stations();
        let q = TicketsQuery::new(&stations, "火星", "北京", "", TrainFilter::all());

        let e = q.build_params_on(day(2016, 6, 20)).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ValueInvalid);
    }
}
