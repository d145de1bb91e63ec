use crate::sdk::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, fs, io::Result as IoResult, path::Path, str::FromStr};

/// Cache key for reverse-geocode lookups: the coordinate snapped to the
/// 1e-5 grid so positions that decode to the same point hash equally.
#[derive(Serialize, Deserialize, Eq, PartialEq, Hash, Clone, Copy, Debug)]
pub struct CoordKey {
    lat_e5: i64,
    lng_e5: i64,
}

impl CoordKey {
    pub fn new(position: Coordinate) -> Self {
        Self {
            lat_e5: (position.latitude * 1e5).round() as i64,
            lng_e5: (position.longitude * 1e5).round() as i64,
        }
    }
}

impl fmt::Display for CoordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.lat_e5, self.lng_e5)
    }
}

impl FromStr for CoordKey {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split("::").collect();
        if parts.len() == 2 {
            Ok(CoordKey {
                lat_e5: parts[0].parse().map_err(|_| "Invalid CoordKey latitude")?,
                lng_e5: parts[1].parse().map_err(|_| "Invalid CoordKey longitude")?,
            })
        } else {
            Err("Invalid CoordKey format")
        }
    }
}

/// A resolved destination stored against the query that produced it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlaceHit {
    pub description: String,
    pub position: Coordinate,
}

// --- Serde helper for the complex key ---
mod coord_key_map {
    use super::CoordKey;
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
    use std::{collections::HashMap, str::FromStr};

    pub fn serialize<S: Serializer>(
        map: &HashMap<CoordKey, String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let string_map: HashMap<String, &String> =
            map.iter().map(|(k, v)| (k.to_string(), v)).collect();
        string_map.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<CoordKey, String>, D::Error> {
        let string_map = HashMap::<String, String>::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(k, v)| Ok((CoordKey::from_str(&k).map_err(Error::custom)?, v)))
            .collect()
    }
}

/// JSON-persisted lookup cache for place searches and reverse-geocode
/// labels. Safety scores are deliberately never cached: they are rebuilt on
/// every fetch.
#[derive(Serialize, Deserialize, Default)]
pub struct GeoCache {
    places: HashMap<String, PlaceHit>,
    #[serde(with = "coord_key_map")]
    reverse: HashMap<CoordKey, String>,
}

impl GeoCache {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        if path.as_ref().exists() {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
    }

    pub fn get_place(&self, query: &str) -> Option<&PlaceHit> {
        self.places.get(query)
    }

    pub fn insert_place(&mut self, query: &str, hit: PlaceHit) {
        self.places.insert(query.to_string(), hit);
    }

    pub fn get_reverse(&self, position: Coordinate) -> Option<&String> {
        self.reverse.get(&CoordKey::new(position))
    }

    pub fn insert_reverse(&mut self, position: Coordinate, address: String) {
        self.reverse.insert(CoordKey::new(position), address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn coord_key_round_trips_through_display() {
        let key = CoordKey::new(Coordinate::new(19.0760, -72.8777));
        let parsed: CoordKey = key.to_string().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn coord_key_rejects_garbage() {
        assert!("19.0".parse::<CoordKey>().is_err());
        assert!("a::b".parse::<CoordKey>().is_err());
    }

    #[test]
    fn cache_survives_save_and_load() {
        let mut cache = GeoCache::default();
        cache.insert_place(
            "thane station",
            PlaceHit {
                description: "Thane Railway Station, Thane West".to_string(),
                position: Coordinate::new(19.1860, 72.9753),
            },
        );
        cache.insert_reverse(
            Coordinate::new(19.0760, 72.8777),
            "Mumbai, Maharashtra".to_string(),
        );

        let path = env::temp_dir().join(format!("saferoute_cache_{}.json", std::process::id()));
        cache.save_to_file(&path).unwrap();
        let reloaded = GeoCache::load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            reloaded.get_place("thane station"),
            cache.get_place("thane station")
        );
        assert_eq!(
            reloaded.get_reverse(Coordinate::new(19.0760, 72.8777)),
            Some(&"Mumbai, Maharashtra".to_string())
        );
    }

    #[test]
    fn missing_file_loads_as_empty_cache() {
        let cache = GeoCache::load_from_file("/nonexistent/saferoute.json").unwrap();
        assert!(cache.get_place("anything").is_none());
    }
}
