use std::env;

use crate::error::AppError;

const DEFAULT_MIN_NUMBER: i64 = 2;
const DEFAULT_MAX_NUMBER: i64 = 56;

/// Bounds for the random start number handed to the second player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub min_number: i64,
    pub max_number: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_number: DEFAULT_MIN_NUMBER,
            max_number: DEFAULT_MAX_NUMBER,
        }
    }
}

impl GameConfig {
    /// Reads `GAME_MIN_NUMBER` / `GAME_MAX_NUMBER`, falling back to the
    /// defaults (2 and 56). Malformed values or an inverted range are
    /// configuration errors and abort startup.
    pub fn from_env() -> Result<Self, AppError> {
        let min_number = read_bound("GAME_MIN_NUMBER", DEFAULT_MIN_NUMBER)?;
        let max_number = read_bound("GAME_MAX_NUMBER", DEFAULT_MAX_NUMBER)?;
        if min_number > max_number {
            return Err(AppError::config(format!(
                "GAME_MIN_NUMBER ({min_number}) must not exceed GAME_MAX_NUMBER ({max_number})"
            )));
        }
        Ok(Self {
            min_number,
            max_number,
        })
    }
}

fn read_bound(var: &str, default: i64) -> Result<i64, AppError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::config(format!("{var} must be an integer, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}
