//! UI Module - egui front end
//!
//! A thin layer over the dashboard context: views draw surface snapshots and
//! forward operator input to the SubmissionController.

pub mod app;
pub mod dashboard;
pub mod widgets;

pub use app::{DashboardApp, UIState};
