//! End-to-end tests for widgetdb
//!
//! Drive the public API the way an application would: open from
//! configuration, then create, update, query and delete through the service.

mod common;

mod concurrent_service;
mod service_flow;
