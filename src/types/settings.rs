use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which the reading speed is persisted.
pub const READING_SPEED_KEY: &str = "readingSpeed";

pub const DEFAULT_READING_SPEED: u32 = 200;
pub const MIN_READING_SPEED: u32 = 1;
pub const MAX_READING_SPEED: u32 = 1000;

/// Reading speed in words per minute, always within
/// `MIN_READING_SPEED..=MAX_READING_SPEED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ReadingSpeed(u32);

impl ReadingSpeed {
    /// Returns `None` when `wpm` is outside the valid range.
    pub fn new(wpm: u32) -> Option<Self> {
        if (MIN_READING_SPEED..=MAX_READING_SPEED).contains(&wpm) {
            Some(Self(wpm))
        } else {
            None
        }
    }

    /// Interprets a stored value. Integers and numeric strings in range
    /// are accepted; anything else is `None`.
    pub fn parse_value(value: &Value) -> Option<Self> {
        let parsed = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed
            .and_then(|n| u32::try_from(n).ok())
            .and_then(Self::new)
    }

    /// Like [`ReadingSpeed::parse_value`], falling back to the default for
    /// anything missing, malformed or out of range.
    pub fn from_value(value: &Value) -> Self {
        Self::parse_value(value).unwrap_or_default()
    }

    pub fn wpm(self) -> u32 {
        self.0
    }
}

impl Default for ReadingSpeed {
    fn default() -> Self {
        Self(DEFAULT_READING_SPEED)
    }
}

impl TryFrom<u32> for ReadingSpeed {
    type Error = String;

    fn try_from(wpm: u32) -> Result<Self, Self::Error> {
        Self::new(wpm).ok_or_else(|| {
            format!(
                "reading speed {} outside {}..={}",
                wpm, MIN_READING_SPEED, MAX_READING_SPEED
            )
        })
    }
}

impl From<ReadingSpeed> for u32 {
    fn from(speed: ReadingSpeed) -> Self {
        speed.0
    }
}

impl std::fmt::Display for ReadingSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wpm", self.0)
    }
}
