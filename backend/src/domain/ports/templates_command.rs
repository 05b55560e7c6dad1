//! Driving port for template changes.

use async_trait::async_trait;

use crate::domain::{Error, Template, TemplateDraft, TemplateId};

/// Driving port for creating, replacing and removing templates.
///
/// Item references in drafts are resolved against the current list; any
/// unknown reference rejects the whole write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplatesCommand: Send + Sync {
    /// Store a new template.
    async fn create(&self, draft: TemplateDraft) -> Result<Template, Error>;

    /// Replace an existing template wholesale.
    async fn update(&self, id: TemplateId, draft: TemplateDraft) -> Result<Template, Error>;

    /// Remove a template.
    async fn delete(&self, id: TemplateId) -> Result<(), Error>;
}
