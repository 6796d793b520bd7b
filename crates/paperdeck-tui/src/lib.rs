//! Terminal UI for browsing a paper-metadata catalog.

mod action;
mod app;
mod components;
mod event;
mod theme;

pub use app::App;
