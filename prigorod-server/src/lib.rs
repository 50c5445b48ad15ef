//! Suburban train schedule proxy for tutu.ru.
//!
//! Fetches schedule, train-detail and station-suggest pages from tutu.ru
//! and re-emits them as structured JSON over a small HTTP API.

pub mod extract;
pub mod tutu;
pub mod web;
