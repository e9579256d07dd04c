// Readpace Settings Engine
// Key-value settings store used for the reading speed.
// Settings are stored as a flat JSON object at the platform-specific config path.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::{ReadingSpeed, READING_SPEED_KEY};

/// Trait defining the persistent key-value store interface.
pub trait SettingsStore {
    /// Returns the stored value for `key`, or `default` when it is absent.
    fn get(&self, key: &str, default: Value) -> Value;
    /// Stores `value` under `key`; returns once the change is persisted.
    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
}

/// Reads the reading speed, falling back to the default for missing or
/// malformed values.
pub fn load_reading_speed<S: SettingsStore + ?Sized>(store: &S) -> ReadingSpeed {
    let raw = store.get(READING_SPEED_KEY, Value::Null);
    match ReadingSpeed::parse_value(&raw) {
        Some(speed) => speed,
        None => {
            let speed = ReadingSpeed::default();
            if !raw.is_null() {
                log::warn!("Stored reading speed {} is invalid, using {}", raw, speed);
            }
            speed
        }
    }
}

pub fn save_reading_speed<S: SettingsStore + ?Sized>(
    store: &mut S,
    speed: ReadingSpeed,
) -> Result<(), SettingsError> {
    store.set(READING_SPEED_KEY, Value::from(speed.wpm()))
}

/// Checks a key/value pair before it is written.
fn validate(key: &str, value: &Value) -> Result<(), SettingsError> {
    if key.is_empty() {
        return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
    }

    if key == READING_SPEED_KEY {
        let valid = value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .and_then(ReadingSpeed::new)
            .is_some();
        if !valid {
            return Err(SettingsError::InvalidValue(format!(
                "Invalid value for key '{}': {}",
                key, value
            )));
        }
    }

    Ok(())
}

/// Settings store that persists settings as JSON on disk.
pub struct JsonSettingsStore {
    config_path: String,
    values: Map<String, Value>,
}

impl JsonSettingsStore {
    /// Creates a new JsonSettingsStore.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            values: Map::new(),
        }
    }

    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields an empty store; a malformed one is an error and
    /// leaves the in-memory values untouched.
    pub fn load(&mut self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.values = Map::new();
            return Ok(());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let values: Map<String, Value> = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.values = values;
        Ok(())
    }

    /// Writes the current settings to the JSON config file.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.values).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Drops every stored value and saves the empty store.
    pub fn reset(&mut self) -> Result<(), SettingsError> {
        self.values = Map::new();
        self.save()
    }

    pub fn get_config_path(&self) -> &str {
        &self.config_path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, key: &str, default: Value) -> Value {
        self.values.get(key).cloned().unwrap_or(default)
    }

    /// Validates, updates in memory, then saves to disk.
    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        validate(key, &value)?;
        let previous = self.values.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            // Keep memory consistent with what is on disk.
            match previous {
                Some(v) => self.values.insert(key.to_string(), v),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

/// Settings store that lives only for the process.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: HashMap<String, Value>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value without validation, as an external writer might.
    pub fn with_raw(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str, default: Value) -> Value {
        self.values.get(key).cloned().unwrap_or(default)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        validate(key, &value)?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// A store shared between a session and another writer, such as an
/// options page. Changes made through either handle are seen by both.
impl<T: SettingsStore> SettingsStore for Rc<RefCell<T>> {
    fn get(&self, key: &str, default: Value) -> Value {
        self.borrow().get(key, default)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.borrow_mut().set(key, value)
    }
}
