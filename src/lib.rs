//! campaign-dash: a local dashboard over a campaign performance workbook.
//!
//! The pipeline lives in [`data`] (load, normalize, type) and [`dashboard`]
//! (filter, aggregate, build the page). [`web`] and [`cli`] are thin
//! surfaces that call [`dashboard::render`] once per interaction.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod logging;
pub mod web;
