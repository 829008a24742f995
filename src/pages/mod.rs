//! Page-level view models. Markup is out of scope; these hold the state
//! and actions a rendered page would bind to.

pub mod dashboard;
pub mod login;
