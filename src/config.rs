use platform_dirs::AppDirs;
use serde::{Serialize, Deserialize};
use ron::ser::{to_string_pretty, PrettyConfig};
use ron::de::from_reader;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::converter::DEFAULT_FRACTIONAL_PLACES;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "defaults::fractional_places")]
    pub fractional_places: u32,
    /// Ratio table used when none is given on the command line.
    #[serde(default = "defaults::table")]
    pub table: Option<String>,
}

macro_rules! default_ {
    ($name:ident, $type:ty) => {
        pub fn $name() -> $type {
            Config::default().$name
        }
    };
}

mod defaults {
    use super::Config;
    default_!(fractional_places, u32);
    default_!(table, Option<String>);
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fractional_places: DEFAULT_FRACTIONAL_PLACES,
            table: None,
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        let dirs = AppDirs::new(Some("uniconv"), false)?;
        Some(dirs.config_dir.join("uniconv.cfg"))
    }

    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let conf = match fs::File::open(&path) {
            Ok(file) => match from_reader::<fs::File, Self>(file) {
                Ok(conf) => conf,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                    return Self::default();
                }
            },
            Err(_) => Self::default(),
        };
        // write back default values of any fields not present
        conf.store(&path);
        debug!(path = %path.display(), ?conf, "config loaded");
        conf
    }

    fn store(&self, path: &Path) {
        match to_string_pretty(self, PrettyConfig::default()) {
            Ok(text) => {
                if let Err(e) = fs::write(path, text) {
                    warn!(path = %path.display(), error = %e, "could not write config");
                }
            }
            Err(e) => warn!(error = %e, "could not serialize config"),
        }
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }
}

#[test]
fn missing_fields_use_defaults() {
    let conf = Config::from_ron("()").unwrap();
    assert_eq!(conf, Config::default());
    assert_eq!(conf.fractional_places, 15);

    let conf = Config::from_ron("(fractional_places: 4)").unwrap();
    assert_eq!(conf.fractional_places, 4);
    assert_eq!(conf.table, None);
}

#[test]
fn round_trips_through_ron() {
    let conf = Config { fractional_places: 6, table: Some("units.csv".to_owned()) };
    let text = to_string_pretty(&conf, PrettyConfig::default()).unwrap();
    assert_eq!(Config::from_ron(&text).unwrap(), conf);
}
