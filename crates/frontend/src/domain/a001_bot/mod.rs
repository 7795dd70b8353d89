//! Bot directory and chat session
//!
//! Structure:
//! - api.rs: HTTP seam (`BotApi`) and its gloo-net implementation
//! - host.rs: UI side-effect seam (`UiHost`): notifications, confirm, download
//! - state.rs: `ClientState`, the single owner of client-side data
//! - controller.rs: `BotController`, every user operation
//! - view_model.rs: pure state -> view transforms
//! - ui/: Leptos components and the browser `UiHost`

pub mod api;
pub mod controller;
pub mod host;
pub mod state;
pub mod ui;
pub mod view_model;
