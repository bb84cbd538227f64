//! Extraction of snow figures from resort page markup.
//!
//! Both pages are third-party and change without notice. Anything missing
//! degrades to zero instead of failing the whole report.

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{BotError, Result};

/// Inch marks used by the resort pages.
const UNIT_MARKERS: [char; 2] = ['”', '"'];

/// Shown for a Brian Head reading that could not be found.
pub const ZERO_INCHES: &str = "0”";

const BRIAN_HEAD_SECTION: &str = "div.m-snow-forecast";
const BRIAN_HEAD_TOTALS: &str = "div.m-snow-totals-top";
const LEE_CANYON_LABEL: &str = "Snowfall (24 hrs)";

/// Normalize a free-text measurement such as `14”` to whole inches.
///
/// Never fails: anything that is not a non-negative integer once the inch
/// marks and surrounding whitespace are removed counts as 0.
#[must_use]
pub fn parse_snow_inches(text: &str) -> u32 {
    let cleaned: String = text.chars().filter(|c| !UNIT_MARKERS.contains(c)).collect();
    cleaned.trim().parse().unwrap_or(0)
}

/// Brian Head's day and night totals as printed on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayNight {
    pub day: String,
    pub night: String,
}

impl DayNight {
    #[must_use]
    pub fn total(&self) -> u32 {
        parse_snow_inches(&self.day).saturating_add(parse_snow_inches(&self.night))
    }
}

impl Default for DayNight {
    fn default() -> Self {
        Self {
            day: ZERO_INCHES.to_string(),
            night: ZERO_INCHES.to_string(),
        }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| BotError::Scrape(format!("invalid selector '{css}': {e}")))
}

/// Text of an element with each text node trimmed, joined without separators.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Read the day and night totals from the Brian Head conditions page.
///
/// Both readings stay at [`ZERO_INCHES`] unless the forecast section holds
/// at least two total cells.
///
/// # Errors
///
/// Only fails if a built-in selector does not parse.
pub fn extract_brian_head(html: &str) -> Result<DayNight> {
    let section_selector = selector(BRIAN_HEAD_SECTION)?;
    let totals_selector = selector(BRIAN_HEAD_TOTALS)?;
    let document = Html::parse_document(html);

    let Some(section) = document.select(&section_selector).next() else {
        return Ok(DayNight::default());
    };

    let totals: Vec<String> = section
        .select(&totals_selector)
        .take(2)
        .map(stripped_text)
        .collect();

    match totals.as_slice() {
        [day, night] => Ok(DayNight {
            day: day.clone(),
            night: night.clone(),
        }),
        _ => Ok(DayNight::default()),
    }
}

/// Read the 24 hour snowfall from the Lee Canyon weather page.
///
/// The value is the first `<p>` following the text node carrying the
/// `Snowfall (24 hrs)` label, in document order.
#[must_use]
pub fn extract_lee_canyon(html: &str) -> u32 {
    let document = Html::parse_document(html);
    let mut nodes = document.tree.root().descendants();

    let labelled = nodes
        .by_ref()
        .any(|node| matches!(node.value(), Node::Text(text) if text.contains(LEE_CANYON_LABEL)));
    if !labelled {
        return 0;
    }

    nodes
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "p")
        .map_or(0, |p| parse_snow_inches(&p.text().collect::<String>()))
}
