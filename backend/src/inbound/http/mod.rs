//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod entries;
pub mod error;
pub mod grocery_items;
pub mod health;
pub mod recipes;
pub mod responses;
pub mod shopping_lists;
pub mod state;
pub mod templates;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod vocabulary;

pub use error::{json_config, json_error_handler};

/// Register every REST route. Health probes are registered separately
/// because they need [`health::HealthState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    grocery_items::configure(cfg);
    templates::configure(cfg);
    recipes::configure(cfg);
    shopping_lists::configure(cfg);
    cfg.service(vocabulary::get_vocabulary);
}
