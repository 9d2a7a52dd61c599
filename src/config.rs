//! Configuration management for the personal assistant.
//!
//! Configuration is read once from environment variables (optionally seeded
//! from a `.env` file) and then passed by value to whatever needs it. Nothing
//! here is global.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

const DEFAULT_CONTACTS_FILE: &str = "addressbook.json";

/// Configuration for the personal assistant.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding both data files (default: ".")
    pub data_dir: PathBuf,

    /// Contacts file name, relative to `data_dir` (default: "addressbook.json")
    pub contacts_file: String,

    /// Notes file name, relative to `data_dir`
    /// (default: contacts file name with a `_notes` suffix)
    pub notes_file: String,

    /// Default look-ahead for upcoming birthdays in days (default: 7)
    pub birthday_window_days: u32,

    /// Whether a contact may hold the same phone twice (default: true)
    pub allow_duplicate_phones: bool,

    /// Whether birthdays after today are accepted (default: true)
    pub allow_future_birthdays: bool,

    /// Log level used when RUST_LOG is unset (default: "warn")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ASSISTANT_DATA_DIR`: data directory (default: ".")
    /// - `ASSISTANT_CONTACTS_FILE`: contacts file name (default: "addressbook.json")
    /// - `ASSISTANT_NOTES_FILE`: notes file name (default: derived from contacts file)
    /// - `ASSISTANT_BIRTHDAY_WINDOW_DAYS`: upcoming birthday window (default: 7)
    /// - `ASSISTANT_ALLOW_DUPLICATE_PHONES`: true/false (default: true)
    /// - `ASSISTANT_ALLOW_FUTURE_BIRTHDAYS`: true/false (default: true)
    /// - `LOG_LEVEL`: logging level (default: "warn")
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine; dotenvy does not print to stdout.
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let data_dir = env::var("ASSISTANT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let contacts_file = Self::parse_env_file_name("ASSISTANT_CONTACTS_FILE")?
            .unwrap_or_else(|| DEFAULT_CONTACTS_FILE.to_string());

        let notes_file = Self::parse_env_file_name("ASSISTANT_NOTES_FILE")?
            .unwrap_or_else(|| notes_file_for(&contacts_file));

        if contacts_file == notes_file {
            return Err(ConfigError::InvalidValue {
                var: "ASSISTANT_NOTES_FILE".to_string(),
                reason: "Must differ from the contacts file".to_string(),
            });
        }

        let birthday_window_days =
            Self::parse_env_u32("ASSISTANT_BIRTHDAY_WINDOW_DAYS", defaults.birthday_window_days)?;
        let allow_duplicate_phones = Self::parse_env_bool(
            "ASSISTANT_ALLOW_DUPLICATE_PHONES",
            defaults.allow_duplicate_phones,
        )?;
        let allow_future_birthdays = Self::parse_env_bool(
            "ASSISTANT_ALLOW_FUTURE_BIRTHDAYS",
            defaults.allow_future_birthdays,
        )?;

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            data_dir,
            contacts_file,
            notes_file,
            birthday_window_days,
            allow_duplicate_phones,
            allow_future_birthdays,
            log_level,
        })
    }

    /// Full path of the contacts file.
    pub fn contacts_path(&self) -> PathBuf {
        self.data_dir.join(&self.contacts_file)
    }

    /// Full path of the notes file.
    pub fn notes_path(&self) -> PathBuf {
        self.data_dir.join(&self.notes_file)
    }

    /// Read an optional file name, rejecting blanks.
    fn parse_env_file_name(var_name: &str) -> ConfigResult<Option<String>> {
        match env::var(var_name) {
            Ok(val) if val.trim().is_empty() => Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            }),
            Ok(val) => Ok(Some(val.trim().to_string())),
            Err(_) => Ok(None),
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

/// `addressbook.json` -> `addressbook_notes.json`, `book` -> `book_notes.json`.
fn notes_file_for(contacts_file: &str) -> String {
    match contacts_file.strip_suffix(".json") {
        Some(stem) => format!("{}_notes.json", stem),
        None => format!("{}_notes.json", contacts_file),
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("."),
            contacts_file: DEFAULT_CONTACTS_FILE.to_string(),
            notes_file: notes_file_for(DEFAULT_CONTACTS_FILE),
            birthday_window_days: 7,
            allow_duplicate_phones: true,
            allow_future_birthdays: true,
            log_level: "warn".to_string(),
        }
    }
}
