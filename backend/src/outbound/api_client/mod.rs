//! REST client adapters.
//!
//! This module provides the reqwest implementation of the `GroceryApi`
//! port used by the list controller.

mod dto;
mod http_client;

pub use http_client::{DEFAULT_BASE_URL, HttpGroceryApi};
