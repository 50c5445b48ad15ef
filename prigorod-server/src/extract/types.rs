//! Structured records produced by the extractors.
//!
//! These are the response bodies of the schedule and train endpoints.
//! Field names and the presence rules (optional schedule fields are
//! omitted, train detail fields are always present, empty when not
//! found) are part of the external contract.

use serde::Serialize;

/// Route endpoints for a schedule page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub departure_station: String,
    pub arrival_station: String,
}

/// A single departure row from a schedule table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    /// Departure time, "HH:MM"
    pub departure_time: String,

    /// Arrival time, "HH:MM"
    pub arrival_time: String,

    /// Train type text (e.g. "Экспресс"), when the row carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_type: Option<String>,

    /// Track number from a "(путь N)" marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// This train's own origin, which can differ from the searched route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_departure_station: Option<String>,

    /// This train's own terminus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_arrival_station: Option<String>,

    /// Opaque token linking to the train detail endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub np: Option<String>,
}

/// Full result of a schedule page extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    pub route: Route,
    pub schedule: Vec<ScheduleEntry>,
}

/// One stop row from a train detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStop {
    pub station: String,
    pub actual_time: String,
    pub scheduled_time: String,
}

/// Details for a single train, keyed by its `np` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainDetail {
    pub np: String,
    pub train_number: String,
    pub train_name: String,
    pub route: String,
    pub date: String,
    pub carrier: String,
    pub movement_mode: String,
    pub stations: Vec<StationStop>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_schedule_fields_are_omitted_from_json() {
        let entry = ScheduleEntry {
            departure_time: "08:15".into(),
            arrival_time: "09:40".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"departure_time":"08:15","arrival_time":"09:40"}"#);
    }

    #[test]
    fn unicode_is_not_escaped() {
        let route = Route {
            departure_station: "Москва".into(),
            arrival_station: "Тверь".into(),
        };
        let json = serde_json::to_string(&route).unwrap();
        assert!(json.contains("Москва"));
        assert!(!json.contains("\\u"));
    }
}
