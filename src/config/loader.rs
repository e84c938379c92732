//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the DWP grid
//! anchors, the State Pension age timetable and bundled holidays from YAML
//! files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::HolidayMap;

use super::timetable::SpaTable;
use super::types::{DwpConfig, GridConfig, HolidayFile, SpaTimetableFile};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
/// [`ConfigLoader::builtin`] gives the same configuration without touching
/// the filesystem, minus bundled holidays.
///
/// # Directory Structure
///
/// ```text
/// config/dwp/
/// ├── grid.yaml            # DWP grid anchor dates
/// ├── spa_timetable.yaml   # State Pension age timetable
/// └── holidays/
///     └── england-and-wales.yaml  # Bundled bank holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use pension_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/dwp").unwrap();
/// println!("Base anchor: {}", loader.grid().base_date);
/// println!("Bundled holidays: {}", loader.holidays().len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: DwpConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/dwp")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The grid anchors or timetable are inconsistent (`InvalidConfiguration`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pension_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/dwp")?;
    /// # Ok::<(), pension_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let grid = Self::load_yaml::<GridConfig>(&path.join("grid.yaml"))?;
        grid.validate()?;

        let timetable = Self::load_yaml::<SpaTimetableFile>(&path.join("spa_timetable.yaml"))?;
        debug!(
            source = %timetable.source,
            rules = timetable.rules.len(),
            "Loaded State Pension age timetable"
        );
        let spa_table = SpaTable::new(timetable.rules)?;

        let holiday_files = Self::load_holidays(&path.join("holidays"))?;

        let config = DwpConfig::new(grid, spa_table, holiday_files);
        debug!(
            path = %path.display(),
            holidays = config.holidays().len(),
            "Loaded engine configuration"
        );

        Ok(Self { config })
    }

    /// Configuration built from the compiled-in DWP anchors and GOV.UK
    /// timetable, with no bundled holidays.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all holiday files from the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<Vec<HolidayFile>> {
        let holidays_dir_str = holidays_dir.display().to_string();

        if !holidays_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: holidays_dir_str,
            });
        }

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: holidays_dir_str.clone(),
        })?;

        let mut files = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: holidays_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(Self::load_yaml::<HolidayFile>(&path)?);
            }
        }

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no holiday files found)", holidays_dir_str),
            });
        }

        Ok(files)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &DwpConfig {
        &self.config
    }

    /// Returns the grid anchors.
    pub fn grid(&self) -> &GridConfig {
        self.config.grid()
    }

    /// Returns the State Pension age timetable.
    pub fn spa_table(&self) -> &SpaTable {
        self.config.spa_table()
    }

    /// Returns the bundled holidays, merged across divisions.
    pub fn holidays(&self) -> &HolidayMap {
        self.config.holidays()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/dwp"
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    /// Copies the bundled configuration into a scratch directory so a test
    /// can break one file.
    fn scratch_copy(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pension_engine_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("holidays")).unwrap();
        for file in ["grid.yaml", "spa_timetable.yaml", "holidays/england-and-wales.yaml"] {
            fs::copy(Path::new(config_path()).join(file), dir.join(file)).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.grid(), &GridConfig::dwp());
    }

    #[test]
    fn test_loaded_timetable_matches_builtin() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.spa_table(), &SpaTable::gov_uk());
    }

    #[test]
    fn test_bundled_holidays_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.config().divisions(), ["england-and-wales"]);
        assert_eq!(
            loader.holidays().name(make_date("2026-04-03")),
            Some("Good Friday")
        );
        assert_eq!(
            loader.holidays().name(make_date("2025-12-25")),
            Some("Christmas Day")
        );
    }

    #[test]
    fn test_builtin_has_no_holidays() {
        let loader = ConfigLoader::builtin();
        assert!(loader.holidays().is_empty());
        assert_eq!(loader.grid(), &GridConfig::dwp());
        assert_eq!(loader.spa_table(), &SpaTable::gov_uk());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("grid.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_copy("bad_yaml");
        fs::write(dir.join("grid.yaml"), "base_date: [not a date").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("grid.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_saturday_base_date_is_invalid_configuration() {
        let dir = scratch_copy("saturday_grid");
        fs::write(
            dir.join("grid.yaml"),
            r#"
base_date: 2026-01-03
base_ni: 00A
fortnight_week_1: 2026-01-05
fortnight_week_2: 2026-01-12
"#,
        )
        .unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidConfiguration { .. })
        ));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_gapped_timetable_is_invalid_configuration() {
        let dir = scratch_copy("gapped_table");
        fs::write(
            dir.join("spa_timetable.yaml"),
            r#"
source: test
rules:
  - type: birthday
    start: 1900-01-01
    end: 1950-01-01
    years: 65
  - type: birthday
    start: 1960-01-01
    end: 9999-12-31
    years: 66
"#,
        )
        .unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidConfiguration { .. })
        ));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_empty_holiday_directory_returns_error() {
        let dir = scratch_copy("no_holidays");
        fs::remove_file(dir.join("holidays/england-and-wales.yaml")).unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("no holiday files found"));
            }
            other => panic!("Expected ConfigNotFound error, got {other:?}"),
        }
        let _ = fs::remove_dir_all(dir);
    }
}
