//! # node-pulse
//!
//! Client for the Node Pulse monitoring API: session lifecycle, protected
//! route gating, the login flow, and local mirrors of nodes, alerts, and
//! dashboard settings.
//!
//! The session store is the only component with real invariants; the
//! route guard and login page consume it, and the remaining state
//! containers hang off the `App` context.

pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod routing;
pub mod state;
