//! Timer modes, periods and the duration presets they select

use std::fmt;

use serde::{Deserialize, Serialize};

/// Timing profile selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Moderate,
    Severe,
    Neurotypical,
    Custom,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Moderate, Mode::Severe, Mode::Neurotypical, Mode::Custom];

    /// Built-in preset for named modes; `None` for custom
    pub fn preset(self) -> Option<Preset> {
        match self {
            Mode::Moderate => Some(Preset::new(15, 5, 10)),
            Mode::Severe => Some(Preset::new(10, 3, 8)),
            Mode::Neurotypical => Some(Preset::new(25, 5, 15)),
            Mode::Custom => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Moderate => "Moderate ADHD",
            Mode::Severe => "Severe ADHD",
            Mode::Neurotypical => "Neurotypical",
            Mode::Custom => "Custom",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Moderate => "moderate",
            Mode::Severe => "severe",
            Mode::Neurotypical => "neurotypical",
            Mode::Custom => "custom",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown timer mode: {}", s))
    }
}

/// Phase of a Pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl Period {
    pub fn label(self) -> &'static str {
        match self {
            Period::Work => "Focus Time",
            Period::ShortBreak => "Short Break",
            Period::LongBreak => "Long Break",
        }
    }

    /// Inclusive bounds accepted for a custom duration of this period
    pub fn minute_bounds(self) -> (u32, u32) {
        match self {
            Period::Work => (1, 60),
            Period::ShortBreak => (1, 30),
            Period::LongBreak => (1, 60),
        }
    }

    pub fn clamp_minutes(self, minutes: i64) -> u32 {
        let (min, max) = self.minute_bounds();
        minutes.clamp(min as i64, max as i64) as u32
    }

    /// Commit a raw input string: leading integer is clamped, anything
    /// non-numeric falls back to the lower bound.
    pub fn commit_minutes(self, raw: &str) -> u32 {
        match parse_leading_int(raw) {
            Some(minutes) => self.clamp_minutes(minutes),
            None => self.minute_bounds().0,
        }
    }
}

/// Parses an optional sign followed by the leading run of digits, ignoring
/// surrounding whitespace. `"12abc"` yields 12, `"abc"` yields `None`.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    // Saturate absurdly long inputs; they clamp to the upper bound anyway.
    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Work/short-break/long-break durations in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Preset {
    pub const fn new(work: u32, short_break: u32, long_break: u32) -> Self {
        Self {
            work,
            short_break,
            long_break,
        }
    }

    pub fn minutes(&self, period: Period) -> u32 {
        match period {
            Period::Work => self.work,
            Period::ShortBreak => self.short_break,
            Period::LongBreak => self.long_break,
        }
    }

    pub fn set_minutes(&mut self, period: Period, minutes: u32) {
        match period {
            Period::Work => self.work = minutes,
            Period::ShortBreak => self.short_break = minutes,
            Period::LongBreak => self.long_break = minutes,
        }
    }

    /// `W-S-L` summary shown under the clock
    pub fn summary(&self) -> String {
        format!("{}-{}-{}", self.work, self.short_break, self.long_break)
    }
}

/// User-adjustable durations used while in custom mode
pub type CustomDurations = Preset;

impl Default for Preset {
    fn default() -> Self {
        Self::new(25, 5, 15)
    }
}

/// Text last committed to each custom duration input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomInputs {
    pub work: String,
    pub short_break: String,
    pub long_break: String,
}

impl CustomInputs {
    pub fn from_durations(durations: &CustomDurations) -> Self {
        Self {
            work: durations.work.to_string(),
            short_break: durations.short_break.to_string(),
            long_break: durations.long_break.to_string(),
        }
    }

    pub fn set(&mut self, period: Period, text: String) {
        match period {
            Period::Work => self.work = text,
            Period::ShortBreak => self.short_break = text,
            Period::LongBreak => self.long_break = text,
        }
    }
}

impl Default for CustomInputs {
    fn default() -> Self {
        Self::from_durations(&CustomDurations::default())
    }
}
