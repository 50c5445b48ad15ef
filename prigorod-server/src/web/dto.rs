//! Data transfer objects for web requests and responses.
//!
//! Parameter names are an external contract shared with the upstream
//! form fields; they must not be renamed.

use serde::{Deserialize, Serialize};

/// Query parameters for the schedule search endpoint.
#[derive(Debug, Deserialize)]
pub struct ScheduleParams {
    /// Departure station name
    pub st1: Option<String>,

    /// Arrival station name
    pub st2: Option<String>,

    /// Departure station numeric identifier
    pub st1_num: Option<String>,

    /// Arrival station numeric identifier
    pub st2_num: Option<String>,

    /// Date, `DD.MM.YYYY` or upstream-native
    pub date: Option<String>,
}

/// Query parameters for the station suggest endpoint.
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    /// Partial station name
    pub name: Option<String>,
}

/// Query parameters for the train detail endpoint.
#[derive(Debug, Deserialize)]
pub struct TrainParams {
    /// Opaque train token from a schedule entry
    pub np: Option<String>,
}

/// Error payload returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
