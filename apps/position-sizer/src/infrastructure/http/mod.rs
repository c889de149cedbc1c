//! HTTP/REST API adapter.
//!
//! Inbound adapter exposing trade evaluation and downstream recomputation.

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::*;
pub use response::*;
