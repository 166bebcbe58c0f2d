use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::error::ParseError;

lazy_static! {
    static ref RANK_TABLE: Selector = Selector::parse("table.rankTable").unwrap();
    static ref ROW: Selector = Selector::parse("tr").unwrap();
    static ref BRAND_TITLE: Selector = Selector::parse("span.brand-title").unwrap();
    static ref ONLINE: Selector = Selector::parse("td#online span").unwrap();
    static ref CASH: Selector = Selector::parse("td#cash").unwrap();
    static ref PEAK: Selector = Selector::parse("td#peak").unwrap();
    static ref AVG: Selector = Selector::parse("td#avg").unwrap();
}

// Class the listing puts on sponsored filler rows.
const AD_ROW_CLASS: &str = "cus_top_traffic_coin";

/// One site row of the ranking table, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteRow {
    pub name: String,
    pub players_online: u32,
    pub cash_players: u32,
    pub peak_24h: u32,
    pub seven_day_avg: u32,
}

/// Extracts the site rows from the ranking page. A page without the
/// ranking table is an error, never an empty result: the usual cause is
/// an upstream layout change, and that must not look like zero traffic.
pub fn parse_listing(page: &str) -> Result<Vec<SiteRow>, ParseError> {
    let doc = Html::parse_document(page);
    let table = doc
        .select(&RANK_TABLE)
        .next()
        .ok_or(ParseError::TableNotFound)?;

    let mut rows = Vec::new();
    for tr in table.select(&ROW) {
        if tr.value().classes().any(|c| c == AD_ROW_CLASS) {
            continue;
        }

        let name = match tr.select(&BRAND_TITLE).next() {
            Some(el) => text_of(el),
            // Header row, or placeholder content without a brand.
            None => continue,
        };
        if name.chars().count() < 2 {
            continue;
        }

        rows.push(SiteRow {
            name,
            players_online: cell_count(tr, &ONLINE),
            cash_players: cell_count(tr, &CASH),
            peak_24h: cell_count(tr, &PEAK),
            seven_day_avg: cell_count(tr, &AVG),
        });
    }

    Ok(rows)
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn cell_count(row: ElementRef, cell: &Selector) -> u32 {
    row.select(cell)
        .next()
        .map(|el| parse_count(&text_of(el)))
        .unwrap_or(0)
}

// "134,304" -> 134304; dashes, blanks and anything non-numeric -> 0.
fn parse_count(text: &str) -> u32 {
    text.replace(',', "").parse().unwrap_or(0)
}
