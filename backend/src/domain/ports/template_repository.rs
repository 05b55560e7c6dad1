//! Port for template persistence.
//!
//! A template and its item snapshots form one aggregate: adapters write them
//! together and re-synchronise the snapshots wholesale on update.

use async_trait::async_trait;

use crate::domain::{Template, TemplateId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by template repository adapters.
    pub enum TemplateRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "template repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "template repository query failed: {message}",
    }
}

/// Port for template storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Every template, oldest first.
    async fn list(&self) -> Result<Vec<Template>, TemplateRepositoryError>;

    /// One template with its items, if it exists.
    async fn find(&self, id: &TemplateId) -> Result<Option<Template>, TemplateRepositoryError>;

    /// Store a new template and its items atomically.
    async fn insert(&self, template: &Template) -> Result<(), TemplateRepositoryError>;

    /// Replace name, timestamp and items. Returns `false` when absent.
    async fn update(&self, template: &Template) -> Result<bool, TemplateRepositoryError>;

    /// Remove a template and its items. Returns `false` when absent.
    async fn delete(&self, id: &TemplateId) -> Result<bool, TemplateRepositoryError>;
}
