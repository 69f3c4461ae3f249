use std::{fmt::Display, fs, path::Path, str::FromStr, time::Duration};

use anyhow::{anyhow, Context, Result};
use derivative::Derivative;
use serde::{Deserialize, Serialize};

use crate::game::Color;

/// How the opponent samples from its scored candidate moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(anyhow!("Invalid difficulty: {s} (expected easy, medium or hard)")),
        }
    }
}

/// Per-side clock budget. Serialised as whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeControl {
    FiveMinutes,
    #[default]
    TenMinutes,
    FifteenMinutes,
}

impl TimeControl {
    pub const ALL: [TimeControl; 3] = [
        TimeControl::FiveMinutes,
        TimeControl::TenMinutes,
        TimeControl::FifteenMinutes,
    ];

    pub const fn seconds(self) -> u32 {
        match self {
            TimeControl::FiveMinutes => 300,
            TimeControl::TenMinutes => 600,
            TimeControl::FifteenMinutes => 900,
        }
    }
}

impl TryFrom<u32> for TimeControl {
    type Error = anyhow::Error;

    fn try_from(seconds: u32) -> Result<Self> {
        TimeControl::ALL
            .into_iter()
            .find(|tc| tc.seconds() == seconds)
            .ok_or_else(|| anyhow!("Unsupported time control: {seconds}s (expected 300, 600 or 900)"))
    }
}

impl From<TimeControl> for u32 {
    fn from(tc: TimeControl) -> Self {
        tc.seconds()
    }
}

impl FromStr for TimeControl {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let seconds: u32 = s
            .trim()
            .parse()
            .context(format!("Invalid time control: {s}"))?;
        TimeControl::try_from(seconds)
    }
}

/// Settings chosen before a game starts. They do not change while it runs.
#[derive(Derivative, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derivative(Debug, Default)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub time_control: TimeControl,
    /// Pause before the opponent replies. Purely cosmetic.
    #[derivative(Default(value = "1000"))]
    pub think_delay_ms: u64,
    #[derivative(Default(value = "Color::White"))]
    pub human: Color,
    /// Seed for the opponent's random source; `None` draws from entropy.
    #[derivative(Debug(format_with = "fmt_seed"))]
    pub seed: Option<u64>,
}

fn fmt_seed(seed: &Option<u64>, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match seed {
        Some(seed) => write!(f, "{seed}"),
        None => write!(f, "entropy"),
    }
}

impl GameConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).context("Failed to parse game config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    pub fn opponent(&self) -> Color {
        self.human.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.time_control.seconds(), 600);
        assert_eq!(config.think_delay_ms, 1000);
        assert_eq!(config.human, Color::White);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn parse_partial_toml() {
        let config = GameConfig::from_toml_str(
            "difficulty = \"hard\"\ntime_control = 300\nseed = 7\n",
        )
        .unwrap();

        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.time_control, TimeControl::FiveMinutes);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.think_delay_ms, 1000);
    }

    #[test]
    fn reject_unknown_time_control() {
        assert!(GameConfig::from_toml_str("time_control = 450").is_err());
        assert!("450".parse::<TimeControl>().is_err());
        assert_eq!("900".parse::<TimeControl>().unwrap(), TimeControl::FifteenMinutes);
    }

    #[test]
    fn difficulty_from_str() {
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
