//! Network layer: wire types and the HTTP client for the Node Pulse API.

pub mod api;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;
