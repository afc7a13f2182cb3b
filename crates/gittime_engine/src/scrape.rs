use gittime_core::{Contribution, ContributionInfo};
use gittime_logging::gittime_warn;
use scraper::{ElementRef, Html, Selector};

use crate::{FailureKind, FetchError};

/// Turns a contribution-graph document into a summary.
///
/// Kept behind a trait so a change in the upstream page layout only needs a new parser.
pub trait ContributionParser: Send + Sync {
    fn parse(&self, html: &str) -> Result<ContributionInfo, FetchError>;
}

/// Parser for the calendar markup: one `rect` per day carrying `data-date`,
/// `data-count` and `fill`, plus a heading with the yearly total.
#[derive(Debug, Clone)]
pub struct GraphMarkupParser {
    cell_selector: String,
    total_selector: String,
}

impl Default for GraphMarkupParser {
    fn default() -> Self {
        Self::new("rect", "h2")
    }
}

impl GraphMarkupParser {
    pub fn new(cell_selector: impl Into<String>, total_selector: impl Into<String>) -> Self {
        Self {
            cell_selector: cell_selector.into(),
            total_selector: total_selector.into(),
        }
    }
}

impl ContributionParser for GraphMarkupParser {
    fn parse(&self, html: &str) -> Result<ContributionInfo, FetchError> {
        let cells = selector(&self.cell_selector)?;
        let totals = selector(&self.total_selector)?;
        let doc = Html::parse_document(html);

        let contributions: Vec<Contribution> = doc.select(&cells).filter_map(read_cell).collect();
        let total = doc
            .select(&totals)
            .map(|node| node.text().collect::<String>())
            .find(|text| text.chars().any(|c| c.is_ascii_digit()))
            .map_or(0, |text| total_from_text(&text));

        Ok(ContributionInfo::new(total, contributions))
    }
}

fn selector(raw: &str) -> Result<Selector, FetchError> {
    Selector::parse(raw).map_err(|err| {
        FetchError::new(FailureKind::Markup, format!("invalid selector {raw:?}: {err}"))
    })
}

fn read_cell(cell: ElementRef<'_>) -> Option<Contribution> {
    let attrs = cell.value();
    let date = strip_date(attrs.attr("data-date")?);
    let raw_count = strip_artifacts(attrs.attr("data-count")?);
    let color_hex = strip_artifacts(attrs.attr("fill")?);

    match raw_count.parse::<u32>() {
        Ok(count) => Some(Contribution {
            date,
            count,
            color_hex,
        }),
        Err(err) => {
            gittime_warn!("skipping day {date}: count {raw_count:?} is not a number ({err})");
            None
        }
    }
}

/// Digits of a heading like "1,234 contributions in the last year", read as one number.
fn total_from_text(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    match digits.parse() {
        Ok(total) => total,
        Err(err) => {
            gittime_warn!("contribution total {digits:?} unreadable ({err}); using 0");
            0
        }
    }
}

/// Removes escape and quote residue the transport leaves in attribute values.
fn strip_artifacts(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '\\' | '"')).collect()
}

fn strip_date(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\\' | '"' | '/' | '-'))
        .collect()
}
