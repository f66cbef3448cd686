//! Application Layer
//!
//! The dashboard shell, routes and the route guard.

pub mod dashboard;
pub mod navigation;

pub use dashboard::Dashboard;
pub use navigation::{NavItem, Resolution, Route, resolve, sidebar_items};
