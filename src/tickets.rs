use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::color::{colorize, Role};
use crate::des::des_to_text;
use crate::{error::Error, Result, TrainFilter};

/// Number of the seat classes in a row.
pub const SEAT_CLASSES: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
/// A train as it is returned by 12306.
pub struct RawTicket {
    #[serde(default, deserialize_with = "des_to_text")]
    station_train_code: String,
    #[serde(default, deserialize_with = "des_to_text")]
    from_station_name: String,
    #[serde(default, deserialize_with = "des_to_text")]
    to_station_name: String,
    #[serde(default, deserialize_with = "des_to_text")]
    start_time: String,
    #[serde(default, deserialize_with = "des_to_text")]
    arrive_time: String,
    #[serde(default, deserialize_with = "des_to_text")]
    lishi: String,
    // business
    #[serde(default, deserialize_with = "des_to_text")]
    swz_num: String,
    // first class
    #[serde(default, deserialize_with = "des_to_text")]
    zy_num: String,
    // second class
    #[serde(default, deserialize_with = "des_to_text")]
    ze_num: String,
    // soft sleeper
    #[serde(default, deserialize_with = "des_to_text")]
    rw_num: String,
    // hard sleeper
    #[serde(default, deserialize_with = "des_to_text")]
    yw_num: String,
    // soft seat
    #[serde(default, deserialize_with = "des_to_text")]
    rz_num: String,
    // hard seat
    #[serde(default, deserialize_with = "des_to_text")]
    yz_num: String,
    // no seat
    #[serde(default, deserialize_with = "des_to_text")]
    wz_num: String,
}

impl RawTicket {
    /// Returns the train code, e.g. `G101`.
    #[inline]
    pub fn train_code(&self) -> &str {
        &self.station_train_code
    }

    /// Returns the lowercase first letter of the train code.
    pub fn type_code(&self) -> Option<char> {
        self.station_train_code
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase())
    }

    /// Returns the numbers of free seats from the business class to no seat.
    ///
    /// The values are kept as the service wrote them, `--` means there is no such class.
    pub fn seats(&self) -> [&str; SEAT_CLASSES] {
        [
            &self.swz_num,
            &self.zy_num,
            &self.ze_num,
            &self.rw_num,
            &self.yw_num,
            &self.rz_num,
            &self.yz_num,
            &self.wz_num,
        ]
    }
}

/// Formats the trip duration `HH:MM` as hours and minutes.
///
/// # Examples
///
/// ```rust
/// # use tickets::format_duration;
/// #
/// assert_eq!(format_duration("12:05"), "12小时05分钟");
/// assert_eq!(format_duration("01:30"), "1小时30分钟");
/// assert_eq!(format_duration("00:45"), "45分钟");
/// ```
pub fn format_duration(lishi: &str) -> String {
    match lishi.split_once(':') {
        Some((hours, minutes)) if hours.chars().all(|c| c == '0') => {
            format!("{}分钟", minutes)
        }
        Some((hours, minutes)) => {
            let hours = hours.strip_prefix('0').unwrap_or(hours);
            format!("{}小时{}分钟", hours, minutes)
        }
        None => format!("{}分钟", lishi),
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A train prepared to be shown in the table.
pub struct Ticket {
    train_code: String,
    station: String,
    time: String,
    duration: String,
    seats: [String; SEAT_CLASSES],
}

impl Ticket {
    fn new(raw: &RawTicket) -> Self {
        let station = [
            colorize(&raw.from_station_name, Role::Departure),
            colorize(&raw.to_station_name, Role::Arrival),
        ]
        .join("\n");
        let time = [
            colorize(&raw.start_time, Role::Departure),
            colorize(&raw.arrive_time, Role::Arrival),
        ]
        .join("\n");

        Ticket {
            train_code: raw.station_train_code.clone(),
            station,
            time,
            duration: format_duration(&raw.lishi),
            seats: raw.seats().map(String::from),
        }
    }

    /// Returns the train code.
    #[inline]
    pub fn train_code(&self) -> &str {
        &self.train_code
    }

    /// Returns the departure and arrival stations, one per line.
    #[inline]
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Returns the departure and arrival times, one per line.
    #[inline]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the trip duration.
    #[inline]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Returns the numbers of free seats from the business class to no seat.
    #[inline]
    pub fn seats(&self) -> &[String] {
        &self.seats
    }

    /// Returns all the fields in the order of the table columns.
    pub fn cells(&self) -> Vec<&str> {
        let mut cells = vec![
            self.train_code.as_str(),
            self.station.as_str(),
            self.time.as_str(),
            self.duration.as_str(),
        ];
        cells.extend(self.seats.iter().map(String::as_str));
        cells
    }
}

/// The trains returned by a query together with the train types to show.
#[derive(Debug, Clone, Default)]
pub struct TicketsCollector {
    rows: Vec<RawTicket>,
    filter: TrainFilter,
}

impl TicketsCollector {
    /// Takes the rows of the reply and the train types to show.
    pub fn new(rows: Vec<RawTicket>, filter: TrainFilter) -> Self {
        TicketsCollector { rows, filter }
    }

    /// Returns the number of all the trains, whatever the filter is.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the service found no trains.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the train types to show.
    #[inline]
    pub fn filter(&self) -> &TrainFilter {
        &self.filter
    }

    /// Creates an iterator over the trains passing the filter, in the order of the reply.
    pub fn trains(&self) -> impl Iterator<Item = Ticket> + '_ {
        self.rows.iter().filter_map(move |row| {
            let shown = match row.type_code() {
                Some(code) => self.filter.allows(code),
                None => self.filter.is_empty(),
            };
            trace!("train {:?} shown: {}", row.train_code(), shown);

            if shown {
                Some(Ticket::new(row))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for TicketsCollector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Trains size={}>", self.len())
    }
}

// The reply is `{"data": {"datas": [...]}}`, missing keys mean no trains.
pub(crate) fn parse_reply(body: &str) -> Result<Vec<RawTicket>> {
    let reply: Value = serde_json::from_str(body).map_err(|e| {
        error!("bad reply: {}", e);
        no_response()
    })?;

    let data = match reply {
        Value::Object(mut map) => map.remove("data"),
        _ => return Err(no_response()),
    };
    let datas = match data {
        None | Some(Value::Null) => None,
        Some(Value::Object(mut map)) => map.remove("datas"),
        Some(_) => return Err(no_response()),
    };
    let rows = match datas {
        None | Some(Value::Null) => {
            warn!("reply has no trains list");
            Vec::new()
        }
        Some(v @ Value::Array(_)) => Vec::<RawTicket>::deserialize(v).map_err(|e| {
            error!("bad trains list: {}", e);
            no_response()
        })?,
        Some(_) => return Err(no_response()),
    };
    info!("{} trains found", rows.len());

    Ok(rows)
}

fn no_response() -> Error {
    Error::resource_not_found("response", "No response")
}

#[cfg(test)]
mod tests {
    use super::{format_duration, parse_reply, RawTicket, TicketsCollector};
    use crate::color::strip_ansi;
    use crate::{ErrorKind, TrainFilter};

    const REPLY: &str = r#"{"data":{"flag":true,"datas":[
        {"station_train_code":"G101","from_station_name":"北京南","to_station_name":"上海虹桥",
         "start_time":"06:44","arrive_time":"12:38","lishi":"05:54",
         "swz_num":"9","zy_num":"有","ze_num":"有","rw_num":"--","yw_num":"--",
         "rz_num":"--","yz_num":"--","wz_num":"无"},
        {"station_train_code":"D205","from_station_name":"北京","to_station_name":"上海",
         "start_time":"21:23","arrive_time":"09:13","lishi":"11:50",
         "swz_num":"--","zy_num":"--","ze_num":"--","rw_num":"2","yw_num":"--",
         "rz_num":"--","yz_num":"--","wz_num":"--"},
        {"station_train_code":"K9","from_station_name":"北京","to_station_name":"上海",
         "start_time":"10:00","arrive_time":"10:45","lishi":"00:45",
         "swz_num":"--","zy_num":"--","ze_num":"--","rw_num":"--","yw_num":12,
         "rz_num":"--","yz_num":"有","wz_num":null}
    ]},"status":true}"#;

    fn rows() -> Vec<RawTicket> {
        parse_reply(REPLY).unwrap()
    }

    fn codes(c: &TicketsCollector) -> Vec<String> {
        c.trains().map(|t| t.train_code().to_string()).collect()
    }

    #[test]
    fn parse_reply_test() {
        let rows = rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].train_code(), "G101");
        assert_eq!(rows[0].type_code(), Some('g'));
        assert_eq!(
            rows[2].seats(),
            ["--", "--", "--", "--", "12", "--", "有", ""]
        );
    }

    #[test]
    fn parse_reply_missing_keys_test() {
        assert!(parse_reply(r#"{}"#).unwrap().is_empty());
        assert!(parse_reply(r#"{"data":null}"#).unwrap().is_empty());
        assert!(parse_reply(r#"{"data":{"flag":false,"message":"busy"}}"#)
            .unwrap()
            .is_empty());
        assert!(parse_reply(r#"{"data":{"datas":null}}"#).unwrap().is_empty());
        assert!(parse_reply(r#"{"data":{"datas":[]}}"#).unwrap().is_empty());
    }

    #[test]
    fn parse_reply_bad_shape_test() {
        for body in [
            "",
            "<html>busy</html>",
            "[]",
            r#"{"data":"none"}"#,
            r#"{"data":[]}"#,
            r#"{"data":{"datas":{}}}"#,
            r#"{"data":{"datas":["G101"]}}"#,
        ] {
            let e = parse_reply(body).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::ResourceNotFound, "body: {:?}", body);
            assert_eq!(e.field(), "response");
        }
    }

    #[test]
    fn filter_test() {
        let filter: TrainFilter = "gd".parse().unwrap();
        let c = TicketsCollector::new(rows(), filter);

        assert_eq!(codes(&c), vec!["G101", "D205"]);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn filter_uppercase_code_test() {
        let filter: TrainFilter = "k".parse().unwrap();
        let c = TicketsCollector::new(rows(), filter);

        assert_eq!(codes(&c), vec!["K9"]);
    }

    #[test]
    fn no_filter_test() {
        let c = TicketsCollector::new(rows(), TrainFilter::all());

        assert_eq!(codes(&c), vec!["G101", "D205", "K9"]);
    }

    #[test]
    fn trains_again_test() {
        let c = TicketsCollector::new(rows(), "g".parse().unwrap());

        let first: Vec<_> = c.trains().collect();
        let second: Vec<_> = c.trains().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_train_code_test() {
        let rows = parse_reply(r#"{"data":{"datas":[{"lishi":"01:00"}]}}"#).unwrap();

        let c = TicketsCollector::new(rows.clone(), TrainFilter::all());
        assert_eq!(c.trains().count(), 1);

        let c = TicketsCollector::new(rows, "g".parse().unwrap());
        assert_eq!(c.trains().count(), 0);
    }

    #[test]
    fn ticket_fields_test() {
        let c = TicketsCollector::new(rows(), TrainFilter::all());
        let t = c.trains().next().unwrap();

        assert_eq!(t.train_code(), "G101");
        assert_eq!(strip_ansi(t.station()), "北京南\n上海虹桥");
        assert_eq!(strip_ansi(t.time()), "06:44\n12:38");
        assert_eq!(t.duration(), "5小时54分钟");
        assert_eq!(t.seats()[0], "9");
        assert_eq!(t.seats()[7], "无");
        assert_eq!(t.cells().len(), 12);
    }

    #[test]
    fn duration_test() {
        assert_eq!(format_duration("02:05"), "2小时05分钟");
        assert_eq!(format_duration("00:45"), "45分钟");
        assert_eq!(format_duration("01:30"), "1小时30分钟");
        assert_eq!(format_duration("11:50"), "11小时50分钟");
        assert_eq!(format_duration("10:00"), "10小时00分钟");
    }
}
