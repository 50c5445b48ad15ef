//! Schedule page extraction.
//!
//! Turns a tutu.ru schedule search result page into a [`ScheduleResult`].
//! The page layout has changed over time and differs between routes, so
//! extraction is layered: a dedicated timetable element, then any table
//! with a time header, then a raw scan over text nodes.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::text::{collapse_whitespace, element_text};
use super::types::{Route, ScheduleEntry, ScheduleResult};

/// Placeholder when the route cannot be recovered from the title.
const UNKNOWN_STATION: &str = "Unknown";

/// Class token marking the per-train route cell.
const ROUTE_CELL_CLASS: &str = "desktop__route__37GXG";

/// Class tokens marking the departure-time link that carries the train's
/// `np` token in its href.
const DEP_TIME_LINK_CLASSES: [&str; 2] = ["desktop__depTimeLink__1NA_N", "depTimeLink"];

static TITLE_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Расписание электричек\s+(.+?)\s+-\s+(.+?)\s+с изменениями").unwrap()
});

static TIME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

static TRACK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(путь\s*(\d+)\)").unwrap());

/// Train type: everything before the track marker (or the whole text).
static TRAIN_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(?:\(путь\s*\d+\)|$)").unwrap());

/// Train type recovery from the concatenated row text: the stretch
/// between the first time and the track marker.
static TIME_TRAILER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}:\d{2})(.*?)(?:\(путь\s*\d+\)|$)").unwrap());

/// Loose scan used by the whole-document fallback: a time, optional
/// trailing text, and an optional track marker before end of line.
static LOOSE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(\d{1,2}:\d{2})([^\(\n]*?)?(?:\(путь\s*(\d+)\)|$)").unwrap());

static NP_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"np=([^&]*)").unwrap());

/// Extract a schedule from a search result page.
///
/// Never fails: a page with no recognizable timetable yields an empty
/// schedule and `"Unknown"` route stations.
pub fn extract_schedule(html: &str) -> ScheduleResult {
    let document = Html::parse_document(html);

    let route = route_from_title(&document);

    let mut schedule = timetable_entries(&document);
    if schedule.is_empty() {
        schedule = loose_time_entries(&document);
    }

    ScheduleResult { route, schedule }
}

/// Recover route station names from the page title.
fn route_from_title(document: &Html) -> Route {
    let title_sel = Selector::parse("title").unwrap();
    let title = document
        .select(&title_sel)
        .next()
        .map(element_text)
        .unwrap_or_default();

    match TITLE_ROUTE.captures(&title) {
        Some(caps) => Route {
            departure_station: caps[1].to_string(),
            arrival_station: caps[2].to_string(),
        },
        None => Route {
            departure_station: UNKNOWN_STATION.to_string(),
            arrival_station: UNKNOWN_STATION.to_string(),
        },
    }
}

/// Locate the schedule table: the `timetable` element if present, else
/// the first table whose headers mention a time column.
fn find_timetable(document: &Html) -> Option<ElementRef<'_>> {
    let by_id = Selector::parse("#timetable").unwrap();
    if let Some(element) = document.select(&by_id).next() {
        return Some(element);
    }

    let tables = Selector::parse("table").unwrap();
    let headers = Selector::parse("th").unwrap();
    document.select(&tables).find(|table| {
        table.select(&headers).any(|th| {
            let text = element_text(th).to_lowercase();
            text.contains("время") || text.contains("time")
        })
    })
}

/// Parse rows of the located timetable into schedule entries.
fn timetable_entries(document: &Html) -> Vec<ScheduleEntry> {
    let Some(timetable) = find_timetable(document) else {
        return Vec::new();
    };

    let rows = Selector::parse("tr").unwrap();
    let headers = Selector::parse("th").unwrap();
    timetable
        .select(&rows)
        .filter(|row| row.select(&headers).next().is_none())
        .filter_map(row_entry)
        .collect()
}

/// Parse one data row. Yields an entry only when both a departure and
/// an arrival time were found.
fn row_entry(row: ElementRef<'_>) -> Option<ScheduleEntry> {
    let cells: Vec<ElementRef<'_>> = row.children().filter_map(ElementRef::wrap).collect();
    if cells.len() < 2 {
        return None;
    }
    let cell_texts: Vec<String> = cells.iter().map(|cell| element_text(*cell)).collect();

    let stations = route_cell_stations(&cells);
    let np = departure_link_np(&cells);

    let mut departure_time = None;
    let mut arrival_time = None;
    let mut train_type: Option<String> = None;
    let mut path: Option<String> = None;

    for text in &cell_texts {
        if !TIME.is_match(text) {
            continue;
        }

        // The time sits at the front of the cell; whatever follows it
        // is the train type and track marker.
        let time_part: String = text.chars().take(5).collect();
        let extra: String = text.chars().skip(5).collect::<String>().trim().to_string();

        if path.is_none() {
            path = TRACK.captures(text).map(|caps| caps[1].to_string());
        }

        if train_type.is_none() && !extra.is_empty() {
            train_type = TRAIN_TYPE
                .captures(&extra)
                .map(|caps| caps[1].trim().to_string())
                .filter(|t| !t.is_empty());
        }

        if departure_time.is_none() {
            departure_time = Some(time_part);
        } else if arrival_time.is_none() {
            arrival_time = Some(time_part);
            break;
        }
    }

    // Track and type can live in a cell with no time of its own.
    if path.is_none() {
        let full_text = cell_texts.join(" ");
        path = TRACK.captures(&full_text).map(|caps| caps[1].to_string());
    }
    if train_type.is_none() {
        let full_text = cell_texts.join(" ");
        train_type = TIME_TRAILER
            .captures(&full_text)
            .map(|caps| caps[2].trim().to_string())
            .filter(|t| !t.is_empty());
    }

    let (departure_time, arrival_time) = match (departure_time, arrival_time) {
        (Some(dep), Some(arr)) => (dep, arr),
        _ => return None,
    };

    let (train_departure_station, train_arrival_station) = match stations {
        Some((dep, arr)) => (Some(dep), Some(arr)),
        None => (None, None),
    };

    Some(ScheduleEntry {
        departure_time,
        arrival_time,
        train_type,
        path,
        train_departure_station,
        train_arrival_station,
        np,
    })
}

/// Per-train origin and terminus from the row's route cell, when the
/// cell carries at least two station links.
fn route_cell_stations(cells: &[ElementRef<'_>]) -> Option<(String, String)> {
    let links = Selector::parse("a").unwrap();
    for cell in cells {
        let is_route_cell = cell
            .value()
            .attr("class")
            .is_some_and(|class| class.contains(ROUTE_CELL_CLASS));
        if !is_route_cell {
            continue;
        }

        let mut link_iter = cell.select(&links);
        if let (Some(first), Some(second)) = (link_iter.next(), link_iter.next()) {
            let departure = element_text(first);
            let arrival = element_text(second);
            if !departure.is_empty() && !arrival.is_empty() {
                return Some((departure, arrival));
            }
        }
    }
    None
}

/// The `np` token from the row's departure-time link.
///
/// The first matching link with a non-empty href ends the scan, whether
/// or not its href carries an `np` parameter.
fn departure_link_np(cells: &[ElementRef<'_>]) -> Option<String> {
    let links = Selector::parse("a").unwrap();
    for cell in cells {
        for link in cell.select(&links) {
            let is_dep_time_link = link.value().attr("class").is_some_and(|class| {
                DEP_TIME_LINK_CLASSES
                    .iter()
                    .any(|token| class.contains(token))
            });
            if !is_dep_time_link {
                continue;
            }
            let Some(href) = link.value().attr("href").filter(|href| !href.is_empty()) else {
                continue;
            };
            return NP_PARAM
                .captures(href)
                .map(|caps| caps[1].to_string())
                .filter(|np| !np.is_empty());
        }
    }
    None
}

/// A time hit from the whole-document fallback scan.
struct TimeHit {
    time: String,
    train_type: String,
    path: String,
}

/// Last-resort scan over every text node in the document, pairing up
/// consecutive time matches as departure/arrival. An odd final hit is
/// dropped.
fn loose_time_entries(document: &Html) -> Vec<ScheduleEntry> {
    let mut hits = Vec::new();
    for text in document.root_element().text() {
        for caps in LOOSE_TIME.captures_iter(text) {
            hits.push(TimeHit {
                time: caps[1].to_string(),
                train_type: caps
                    .get(2)
                    .map(|m| collapse_whitespace(m.as_str()))
                    .unwrap_or_default(),
                path: caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_default(),
            });
        }
    }

    hits.chunks_exact(2)
        .map(|pair| {
            let (departure, arrival) = (&pair[0], &pair[1]);
            let path = if !departure.path.is_empty() {
                Some(departure.path.clone())
            } else if !arrival.path.is_empty() {
                Some(arrival.path.clone())
            } else {
                None
            };
            ScheduleEntry {
                departure_time: departure.time.clone(),
                arrival_time: arrival.time.clone(),
                train_type: (!departure.train_type.is_empty())
                    .then(|| departure.train_type.clone()),
                path,
                ..Default::default()
            }
        })
        .collect()
}
