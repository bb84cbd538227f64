//! Snow comparator - scrapes two resort pages and compares snow totals.

mod browser;
mod check;
mod commands;
mod parse;
mod report;

pub use browser::{Browser, BrowserLauncher, WebDriverLauncher, WebDriverSession};
pub use check::{Announcer, MARKER_TIMEOUT, run_snowcheck};
pub use commands::snowcheck;
pub use parse::{DayNight, extract_brian_head, extract_lee_canyon, parse_snow_inches};
pub use report::{Resort, SnowReading, Verdict, format_report};
