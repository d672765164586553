//! HTTP API: server wiring, routing, and request/response mapping for the
//! forecast engine.

pub mod app;
pub mod config;
