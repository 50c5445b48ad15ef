//! Train detail page extraction.
//!
//! Turns a tutu.ru train view page into a [`TrainDetail`]. The heading
//! carries the train number, name and route; center blocks carry the
//! date, carrier and movement mode; the stop list comes from the
//! `schedule_table` element. Breadcrumbs serve as a fallback for the
//! number and route when the heading yields nothing.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::text::{collapse_whitespace, element_text};
use super::types::{StationStop, TrainDetail};

/// Literal shown upstream when live data for a stop is missing.
const NO_DATA: &str = "Нет данных";

/// Label prefixing the movement mode text.
const MOVEMENT_LABEL: &str = "Режим движения:";

/// Train number between a quoted train name and the route.
static NUMBER_AFTER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"электрички\s+"[^"]+"\s+(\S+\s*[А-ЯA-Z]?)"#).unwrap());

/// Train number directly after the heading phrase.
static NUMBER_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"электрички\s+(\S+\s*[А-ЯA-Z]?)").unwrap());

/// Train number as it appears in the breadcrumb trail.
static NUMBER_BREADCRUMB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"электричк(?:и)?\s+(\S+\s*[А-ЯA-Z]?)").unwrap());

/// Two-part route from the breadcrumb trail.
static ROUTE_BREADCRUMB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Расписание электричек ([^-]+) - ([^<\n]+)").unwrap());

/// Trailing "valid today" clause appended to some route strings.
static ROUTE_TODAY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*на сегодня.*$").unwrap());

/// Extract train details from a train view page.
///
/// `np` is echoed back into the result; it is the caller's lookup key,
/// not something the page itself carries. Never fails: fields that
/// cannot be located stay empty.
pub fn extract_train_detail(html: &str, np: &str) -> TrainDetail {
    let document = Html::parse_document(html);

    let train_name = train_name(&document);
    let mut route = heading_route(&document);
    let mut train_number = heading_train_number(&document);

    let date = block_text(&document, "div.center_block.date_block");
    let carrier = carrier(&document);
    let movement_mode = movement_mode(&document);
    let stations = stations(&document);

    if train_number.is_empty() || route.is_empty() {
        let breadcrumbs = block_text(&document, "div.breadcrumbs_top");
        if train_number.is_empty() {
            train_number = NUMBER_BREADCRUMB
                .captures(&breadcrumbs)
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_default();
        }
        if route.is_empty() {
            route = ROUTE_BREADCRUMB
                .captures(&breadcrumbs)
                .map(|caps| format!("{} → {}", caps[1].trim(), caps[2].trim()))
                .unwrap_or_default();
        }
    }

    let route = collapse_whitespace(&route);
    let route = ROUTE_TODAY_SUFFIX.replace(&route, "").trim().to_string();

    TrainDetail {
        np: np.to_string(),
        train_number: collapse_whitespace(&train_number),
        train_name: collapse_whitespace(&train_name),
        route,
        date,
        carrier,
        movement_mode,
        stations,
    }
}

/// Train name from the heading's comfort/ivolga span, quotes stripped.
fn train_name(document: &Html) -> String {
    let name_sel = Selector::parse("h1 span.comfort, h1 span.ivolga").unwrap();
    document
        .select(&name_sel)
        .next()
        .map(|span| element_text(span).replace('"', "").trim().to_string())
        .unwrap_or_default()
}

/// Route text from the heading's bold element.
fn heading_route(document: &Html) -> String {
    let route_sel = Selector::parse("h1 b").unwrap();
    document
        .select(&route_sel)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Train number matched out of the first heading's full text.
fn heading_train_number(document: &Html) -> String {
    let h1_sel = Selector::parse("h1").unwrap();
    let Some(heading) = document.select(&h1_sel).next() else {
        return String::new();
    };
    let text = element_text(heading);

    NUMBER_AFTER_NAME
        .captures(&text)
        .or_else(|| NUMBER_PLAIN.captures(&text))
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

/// Collapsed text of the first element matching a selector.
fn block_text(document: &Html, selector: &str) -> String {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Carrier name: the first link of the movement block that mentions one.
fn carrier(document: &Html) -> String {
    let block_sel = Selector::parse("div.center_block.movement_block").unwrap();
    let link_sel = Selector::parse("a").unwrap();
    document
        .select(&block_sel)
        .find(|block| element_text(*block).contains("Перевозчик"))
        .and_then(|block| block.select(&link_sel).next())
        .map(element_text)
        .unwrap_or_default()
}

/// Movement mode: the block's text with the label stripped.
fn movement_mode(document: &Html) -> String {
    let block_sel = Selector::parse("div.center_block.movement_block").unwrap();
    document
        .select(&block_sel)
        .map(element_text)
        .find(|text| text.contains("Режим движения"))
        .map(|text| text.replace(MOVEMENT_LABEL, "").trim().to_string())
        .unwrap_or_default()
}

/// Stop rows from the schedule table. Rows with no station link (or an
/// empty one) are dropped.
fn stations(document: &Html) -> Vec<StationStop> {
    let table_sel = Selector::parse("#schedule_table").unwrap();
    let Some(table) = document.select(&table_sel).next() else {
        return Vec::new();
    };

    let tbody_sel = Selector::parse("tbody").unwrap();
    let body = table.select(&tbody_sel).next().unwrap_or(table);

    let row_sel = Selector::parse("tr").unwrap();
    let header_sel = Selector::parse("th").unwrap();
    let cell_sel = Selector::parse("td").unwrap();
    let link_sel = Selector::parse("a").unwrap();
    let span_sel = Selector::parse("span").unwrap();

    let mut stops = Vec::new();
    for row in body.select(&row_sel) {
        if row.select(&header_sel).next().is_some() {
            continue;
        }
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() < 4 {
            continue;
        }

        let station = cells[1]
            .select(&link_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();
        if station.is_empty() {
            continue;
        }

        // Live data column: a "no data" span takes precedence over the
        // rest of the cell's text.
        let no_data_span = cells[2]
            .select(&span_sel)
            .next()
            .is_some_and(|span| element_text(span).contains(NO_DATA));
        let actual_time = if no_data_span {
            NO_DATA.to_string()
        } else {
            element_text(cells[2])
        };

        stops.push(StationStop {
            station,
            actual_time,
            scheduled_time: element_text(cells[3]),
        });
    }
    stops
}
