use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Day names indexed by days since Sunday.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Best posting times, local clock, in rotation order.
pub const TIKTOK_BEST_TIMES: [&str; 3] = ["11:30", "18:30", "21:00"];
pub const INSTAGRAM_BEST_TIMES: [&str; 3] = ["12:00", "17:30", "20:30"];
pub const YOUTUBE_BEST_TIMES: [&str; 3] = ["13:00", "19:00", "21:30"];
pub const X_BEST_TIMES: [&str; 3] = ["08:30", "12:30", "18:00"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub window_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { window_days: 14 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    TikTok,
    Instagram,
    YouTube,
    X,
}

impl Platform {
    /// Matches by case-insensitive containment. The checks run in a fixed
    /// order, so "instayoutube" is Instagram. Unknown names fall back to TikTok.
    pub fn from_name(value: &str) -> Self {
        let value = value.to_lowercase();
        if value.contains("tik") {
            Platform::TikTok
        } else if value.contains("insta") {
            Platform::Instagram
        } else if value.contains("you") {
            Platform::YouTube
        } else if value == "x" || value.contains("twitter") {
            Platform::X
        } else {
            Platform::TikTok
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
            Platform::X => "x",
        }
    }

    pub fn best_times(self) -> &'static [&'static str; 3] {
        match self {
            Platform::TikTok => &TIKTOK_BEST_TIMES,
            Platform::Instagram => &INSTAGRAM_BEST_TIMES,
            Platform::YouTube => &YOUTUBE_BEST_TIMES,
            Platform::X => &X_BEST_TIMES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub date: NaiveDate,
    pub day: String,
    pub time: String,
}

/// The schedule follows the first platform only.
pub fn primary_platform(platforms: &[String]) -> Platform {
    platforms
        .first()
        .map(|name| Platform::from_name(name))
        .unwrap_or(Platform::TikTok)
}

/// Walks forward from the day after `today` for at most `window_days` days,
/// skipping Sundays, and hands out the platform's best times round-robin.
/// Returns fewer than `days_per_week` slots when the window runs out.
pub fn build_slots(
    platforms: &[String],
    days_per_week: usize,
    today: NaiveDate,
    window_days: u32,
) -> Vec<ScheduleSlot> {
    let times = primary_platform(platforms).best_times();
    let mut slots = Vec::with_capacity(days_per_week.min(window_days as usize));

    for offset in 1..=u64::from(window_days) {
        if slots.len() >= days_per_week {
            break;
        }
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        if date.weekday() == Weekday::Sun {
            continue;
        }
        let time = times[slots.len() % times.len()];
        slots.push(ScheduleSlot {
            date,
            day: DAY_NAMES[date.weekday().num_days_from_sunday() as usize].to_string(),
            time: time.to_string(),
        });
    }

    slots
}
