//! Snow readings and the comparison message.

use std::cmp::Ordering;
use std::fmt;

use strum::Display;

use super::parse::DayNight;

/// Resorts covered by the snow check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resort {
    #[strum(serialize = "Brian Head")]
    BrianHead,
    #[strum(serialize = "Lee Canyon")]
    LeeCanyon,
}

impl Resort {
    /// Conditions page scraped for this resort.
    #[must_use]
    pub fn url(self) -> &'static str {
        match self {
            Resort::BrianHead => "https://www.brianhead.com/weather-conditions-webcams/",
            Resort::LeeCanyon => "https://www.leecanyonlv.com/weather/",
        }
    }

    /// Text whose presence means the page finished rendering.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Resort::BrianHead => "Snow Forecast",
            Resort::LeeCanyon => "Snow Report",
        }
    }

    /// Channel notice for a marker that never showed up.
    #[must_use]
    pub fn timeout_notice(self) -> String {
        let what = match self {
            Resort::BrianHead => "Brian Head forecast",
            Resort::LeeCanyon => "Lee Canyon page",
        };
        format!("⚠️ Timed out waiting for {what} — parsing anyway.")
    }
}

/// A resort's normalized snow total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnowReading {
    pub resort: Resort,
    /// Whole inches.
    pub total: u32,
    /// Raw day/night figures the total was summed from, when the page splits them.
    pub sub_readings: Option<DayNight>,
}

impl SnowReading {
    #[must_use]
    pub fn from_day_night(resort: Resort, day_night: DayNight) -> Self {
        Self {
            resort,
            total: day_night.total(),
            sub_readings: Some(day_night),
        }
    }

    #[must_use]
    pub fn past_24_hours(resort: Resort, total: u32) -> Self {
        Self {
            resort,
            total,
            sub_readings: None,
        }
    }
}

impl fmt::Display for SnowReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**{}** – {}” total (", self.resort, self.total)?;
        match &self.sub_readings {
            Some(DayNight { day, night }) => write!(f, "🌞 {day} / 🌙 {night})"),
            None => f.write_str("past 24 hrs)"),
        }
    }
}

/// Outcome of comparing Brian Head against Lee Canyon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing anywhere.
    Disband,
    BrianHead,
    LeeCanyon,
    Even,
}

impl Verdict {
    #[must_use]
    pub fn compare(brian_head: u32, lee_canyon: u32) -> Self {
        if brian_head == 0 && lee_canyon == 0 {
            return Verdict::Disband;
        }

        match brian_head.cmp(&lee_canyon) {
            Ordering::Greater => Verdict::BrianHead,
            Ordering::Less => Verdict::LeeCanyon,
            Ordering::Equal => Verdict::Even,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Disband => "**It’s over... let’s disband.**",
            Verdict::BrianHead => "**Brian Head has more snow today!**",
            Verdict::LeeCanyon => "**Lee Canyon has more snow today..**",
            Verdict::Even => "**Both resorts have about the same snow today.**",
        })
    }
}

/// Compose the report posted by `snowcheck`.
#[must_use]
pub fn format_report(brian_head: &SnowReading, lee_canyon: &SnowReading) -> String {
    let verdict = Verdict::compare(brian_head.total, lee_canyon.total);
    format!("**Snow Report:**\n\n{brian_head}\n{lee_canyon}\n\n{verdict}")
}
