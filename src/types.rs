use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One controller input combination, an index into the 12-symbol action alphabet.
pub type Action = u8;

/// Number of distinct action codes.
pub const ACTION_COUNT: usize = 12;

/// Why a simulated run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinishReason {
    Win,
    Death,
    NoMoreCommands,
    Other(String),
}

impl From<String> for FinishReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "win" => FinishReason::Win,
            "death" => FinishReason::Death,
            "no_more_commands" => FinishReason::NoMoreCommands,
            _ => FinishReason::Other(value),
        }
    }
}

impl From<FinishReason> for String {
    fn from(reason: FinishReason) -> Self {
        reason.to_string()
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Win => f.write_str("win"),
            FinishReason::Death => f.write_str("death"),
            FinishReason::NoMoreCommands => f.write_str("no_more_commands"),
            FinishReason::Other(other) => f.write_str(other),
        }
    }
}

/// Result of running one action sequence through the simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub x_pos: f64,
    pub time_left: f64,
    pub coins: u32,
    pub score: u64,
    #[serde(deserialize_with = "lenient_bool")]
    pub flag_get: bool,
    pub reason_finish: FinishReason,
    #[serde(default)]
    pub status: String,
    pub commands_used: usize,
}

impl Outcome {
    /// Horizontal distance per elapsed time unit; 0 when no time has elapsed.
    pub fn speed(&self, time_budget: f64) -> f64 {
        let elapsed = time_budget - self.time_left;
        if elapsed <= 0.0 {
            return 0.0;
        }
        self.x_pos / elapsed
    }
}

// The simulator reports the flag as either a JSON boolean or "true"/"false".
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolRepr {
        Bool(bool),
        Text(String),
    }

    Ok(match BoolRepr::deserialize(deserializer)? {
        BoolRepr::Bool(value) => value,
        BoolRepr::Text(text) => text.trim().eq_ignore_ascii_case("true"),
    })
}
