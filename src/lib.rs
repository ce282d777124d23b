//! Weather dashboard TUI
//!
//! Pick a city, wait out a simulated fetch, and watch the scene animate.
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod catalog;
pub mod components;
pub mod effect;
pub mod error;
pub mod reducer;
pub mod scene;
pub mod state;
pub mod transition;
