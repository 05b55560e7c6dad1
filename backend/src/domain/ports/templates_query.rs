//! Driving port for template reads.

use async_trait::async_trait;

use crate::domain::{Error, Template, TemplateDetail, TemplateId};

/// Driving port for listing templates and reading their merged view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplatesQuery: Send + Sync {
    /// Every template with raw items.
    async fn list(&self) -> Result<Vec<Template>, Error>;

    /// One template with its merged items.
    async fn detail(&self, id: TemplateId) -> Result<TemplateDetail, Error>;
}
