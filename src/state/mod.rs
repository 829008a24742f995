//! Client-side state containers.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `nodes`, `alerts`, `dashboard`,
//! `toast`) so views depend on small focused models. Only `session` carries
//! real invariants; the rest mirror server lists or hold view settings.

pub mod alerts;
pub mod dashboard;
pub mod nodes;
pub mod session;
pub mod toast;
