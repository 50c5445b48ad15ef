//! HTML extraction for tutu.ru pages.
//!
//! The upstream pages are scraped, not consumed via an API, so every
//! extractor is a layered best-effort pipeline: try the precise DOM
//! location first, fall back to coarser strategies, and yield empty
//! fields rather than errors when nothing matches. Absence of data is
//! not a failure.

mod schedule;
mod text;
mod train;
mod types;

pub use schedule::extract_schedule;
pub use train::extract_train_detail;
pub use types::{Route, ScheduleEntry, ScheduleResult, StationStop, TrainDetail};
