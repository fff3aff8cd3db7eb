use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{error::Error, Result};

// A station in 12306 `station_name.js` is written as `...|<name>|<TELECODE>|...`.
const STATION_PATTERN: &str = r"([\x{4e00}-\x{9fa5}]+)\|([A-Z]+)";

// Major stations, enough to query between the province capitals.
const BUNDLED_STATIONS: &[(&str, &str)] = &[
    ("北京", "BJP"),
    ("北京北", "VAP"),
    ("北京东", "BOP"),
    ("北京南", "VNP"),
    ("北京西", "BXP"),
    ("上海", "SHH"),
    ("上海南", "SNH"),
    ("上海虹桥", "AOH"),
    ("上海西", "SXH"),
    ("天津", "TJP"),
    ("天津西", "TXP"),
    ("天津南", "TIP"),
    ("重庆", "CQW"),
    ("重庆北", "CUW"),
    ("南京", "NJH"),
    ("南京南", "NKH"),
    ("杭州", "HZH"),
    ("杭州东", "HGH"),
    ("广州", "GZQ"),
    ("广州南", "IZQ"),
    ("广州东", "GGQ"),
    ("深圳", "SZQ"),
    ("深圳北", "IOQ"),
    ("武汉", "WHN"),
    ("汉口", "HKN"),
    ("武昌", "WCN"),
    ("西安", "XAY"),
    ("西安北", "EAY"),
    ("成都", "CDW"),
    ("成都东", "ICW"),
    ("长沙", "CSQ"),
    ("长沙南", "CWQ"),
    ("郑州", "ZZF"),
    ("郑州东", "ZAF"),
    ("济南", "JNK"),
    ("济南西", "JGK"),
    ("沈阳", "SYT"),
    ("沈阳北", "SBT"),
    ("哈尔滨", "HBB"),
    ("哈尔滨西", "VAB"),
    ("长春", "CCT"),
    ("合肥", "HFH"),
    ("合肥南", "ENH"),
    ("南昌", "NCG"),
    ("福州", "FZS"),
    ("厦门", "XMS"),
    ("昆明", "KMM"),
    ("贵阳", "GIW"),
    ("南宁", "NNZ"),
    ("兰州", "LZJ"),
    ("太原", "TYV"),
    ("石家庄", "SJP"),
    ("呼和浩特", "HHC"),
    ("乌鲁木齐", "WAR"),
    ("西宁", "XNO"),
    ("银川", "YIJ"),
    ("拉萨", "LSO"),
    ("海口", "VUQ"),
    ("三亚", "SEQ"),
    ("苏州", "SZH"),
    ("无锡", "WXH"),
    ("常州", "CZH"),
    ("镇江", "ZJH"),
    ("徐州", "XCH"),
    ("宁波", "NGH"),
    ("青岛", "QDK"),
    ("大连", "DLT"),
    ("洛阳", "LYF"),
    ("桂林", "GLZ"),
    ("保定", "BDP"),
    ("秦皇岛", "QTP"),
];

/// Correlation of the station names and the telecodes used by 12306.
///
/// The directory is built once at startup and is only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationDirectory {
    stations: HashMap<String, String>,
}

impl StationDirectory {
    /// Creates a directory of the stations shipped with the crate.
    pub fn bundled() -> Self {
        BUNDLED_STATIONS.iter().copied().collect()
    }

    /// Returns the number of the known stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if no station is known.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Returns the telecode of the station, the name must match exactly.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.stations.get(name).map(String::as_str)
    }

    /// Returns the telecode of the station.
    ///
    /// # Errors
    ///
    /// The method fails if there is no station with such a name.
    pub fn lookup(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(code) => Ok(code),
            None => Err(Error::resource_not_found(
                "station",
                format!("Can't find the telecode of {}", name),
            )),
        }
    }

    /// Adds the stations found in the text of 12306 `station_name.js`.
    ///
    /// Returns the number of the parsed stations. A station already known
    /// gets the new telecode.
    pub fn extend_from_station_names(&mut self, text: &str) -> Result<usize> {
        let re = Regex::new(STATION_PATTERN)
            .map_err(|e| Error::value_invalid("stations", format!("{}", e)))?;

        let mut count = 0;
        for cap in re.captures_iter(text) {
            trace!("station {} - {}", &cap[1], &cap[2]);
            self.stations.insert(cap[1].to_string(), cap[2].to_string());
            count += 1;
        }
        info!("{} stations parsed", count);

        Ok(count)
    }

    /// Adds the stations from a file in 12306 `station_name.js` format.
    ///
    /// # Errors
    ///
    /// The method fails if the file can't be read.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        debug!("loading stations from {}", path.display());

        let text = fs::read_to_string(path).map_err(|e| {
            warn!("{}: {}", path.display(), e);
            Error::resource_not_found(
                "stations",
                format!("Can't read the stations file '{}'", path.display()),
            )
        })?;

        self.extend_from_station_names(&text)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for StationDirectory {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        StationDirectory {
            stations: iter
                .into_iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StationDirectory;
    use crate::ErrorKind;

    #[test]
    fn lookup_test() {
        let stations = StationDirectory::bundled();

        assert_eq!(stations.lookup("北京").unwrap(), "BJP");
        assert_eq!(stations.lookup("南京南").unwrap(), "NKH");
        assert_eq!(stations.get("上海虹桥"), Some("AOH"));

        let e = stations.lookup("火星").unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ResourceNotFound);
    }

    #[test]
    fn lookup_is_exact_test() {
        let stations: StationDirectory = vec![("北京", "BJP")].into_iter().collect();

        assert!(stations.lookup("北京").is_ok());
        assert!(stations.lookup("北").is_err());
        assert!(stations.lookup(" 北京").is_err());
        assert!(stations.lookup("北京南").is_err());
    }

    #[test]
    fn station_names_test() {
        let mut stations = StationDirectory::default();
        assert!(stations.is_empty());

        let text = "var station_names ='@bjb|北京北|VAP|beijingbei|bjb|0\
                    @bjd|北京东|BOP|beijingdong|bjd|1\
                    @sh|上海|SHH|shanghai|sh|2';";
        let n = stations.extend_from_station_names(text).unwrap();

        assert_eq!(n, 3);
        assert_eq!(stations.len(), 3);
        assert_eq!(stations.get("北京东"), Some("BOP"));
        assert_eq!(stations.get("上海"), Some("SHH"));
    }

    #[test]
    fn station_names_override_test() {
        let mut stations = StationDirectory::bundled();
        let size = stations.len();

        stations.extend_from_station_names("@bj|北京|XXP|beijing").unwrap();

        assert_eq!(stations.len(), size);
        assert_eq!(stations.get("北京"), Some("XXP"));
    }

    #[test]
    fn load_missing_file_test() {
        let mut stations = StationDirectory::default();
        let e = stations
            .load_file("/nonexistent/station_name.js")
            .unwrap_err();

        assert_eq!(e.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(e.field(), "stations");
    }
}
