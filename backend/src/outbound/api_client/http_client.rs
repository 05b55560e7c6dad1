//! Reqwest-backed grocery API client.
//!
//! The adapter owns transport details only: URL building, the request
//! timeout, status mapping and JSON decoding into domain types.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::{
    ApplyBody, ArchiveBody, DeletedDto, ErrorEnvelopeDto, IdsBody, SuccessDto,
};
use crate::domain::ports::{
    GroceryApi, GroceryApiError, NewGroceryItem, NewTemplate, RecipePayload,
};
use crate::domain::{
    ApplyMode, GroceryItem, GroceryItemId, Recipe, RecipeId, ShoppingList, ShoppingListId,
    Template, TemplateId,
};

/// Base URL used when none was baked in at build time.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// `GroceryApi` adapter speaking JSON over HTTP to one service instance.
#[derive(Debug, Clone)]
pub struct HttpGroceryApi {
    client: Client,
    base_url: Url,
}

impl HttpGroceryApi {
    /// Build a client for `base_url` with an explicit request timeout.
    ///
    /// A missing trailing slash is added so relative joins keep any path
    /// prefix of the base.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL chosen at build time through `GROCERY_API_URL`, falling
    /// back to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URL.
    pub fn build_time_base_url() -> Result<Url, url::ParseError> {
        Url::parse(option_env!("GROCERY_API_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, GroceryApiError> {
        self.base_url
            .join(path)
            .map_err(|error| GroceryApiError::transport(format!("invalid URL {path}: {error}")))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GroceryApiError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(body.as_ref())
    }

    async fn delete_resource(&self, path: &str) -> Result<(), GroceryApiError> {
        let request = self.client.delete(self.endpoint(path)?);
        let outcome: SuccessDto = self.send(request).await?;
        if outcome.success {
            Ok(())
        } else {
            Err(GroceryApiError::decode(format!(
                "DELETE {path} did not report success"
            )))
        }
    }
}

#[async_trait]
impl GroceryApi for HttpGroceryApi {
    async fn list_items(&self) -> Result<Vec<GroceryItem>, GroceryApiError> {
        self.send(self.client.get(self.endpoint("grocery-items")?))
            .await
    }

    async fn accumulate_item(
        &self,
        item: &NewGroceryItem,
    ) -> Result<GroceryItem, GroceryApiError> {
        let url = self.endpoint("grocery-items/accumulate")?;
        self.send(self.client.post(url).json(item)).await
    }

    async fn update_item(&self, item: &GroceryItem) -> Result<GroceryItem, GroceryApiError> {
        let url = self.endpoint(&format!("grocery-items/{}", item.id))?;
        self.send(self.client.put(url).json(item)).await
    }

    async fn delete_item(&self, id: GroceryItemId) -> Result<(), GroceryApiError> {
        self.delete_resource(&format!("grocery-items/{id}")).await
    }

    async fn delete_items(&self, ids: &[GroceryItemId]) -> Result<usize, GroceryApiError> {
        let url = self.endpoint("grocery-items/bulk-delete")?;
        let outcome: DeletedDto = self
            .send(self.client.post(url).json(&IdsBody { ids }))
            .await?;
        Ok(outcome.deleted)
    }

    async fn list_templates(&self) -> Result<Vec<Template>, GroceryApiError> {
        self.send(self.client.get(self.endpoint("templates")?)).await
    }

    async fn create_template(&self, template: &NewTemplate) -> Result<Template, GroceryApiError> {
        let url = self.endpoint("templates")?;
        self.send(self.client.post(url).json(template)).await
    }

    async fn delete_template(&self, id: TemplateId) -> Result<(), GroceryApiError> {
        self.delete_resource(&format!("templates/{id}")).await
    }

    async fn apply_template(
        &self,
        id: TemplateId,
        mode: ApplyMode,
    ) -> Result<Vec<GroceryItem>, GroceryApiError> {
        let url = self.endpoint(&format!("templates/{id}/apply"))?;
        self.send(self.client.post(url).json(&ApplyBody { mode }))
            .await
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, GroceryApiError> {
        self.send(self.client.get(self.endpoint("recipes")?)).await
    }

    async fn create_recipe(&self, recipe: &RecipePayload) -> Result<Recipe, GroceryApiError> {
        let url = self.endpoint("recipes")?;
        self.send(self.client.post(url).json(recipe)).await
    }

    async fn update_recipe(
        &self,
        id: RecipeId,
        recipe: &RecipePayload,
    ) -> Result<Recipe, GroceryApiError> {
        let url = self.endpoint(&format!("recipes/{id}"))?;
        self.send(self.client.put(url).json(recipe)).await
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<(), GroceryApiError> {
        self.delete_resource(&format!("recipes/{id}")).await
    }

    async fn add_recipe_to_list(&self, id: RecipeId) -> Result<Vec<GroceryItem>, GroceryApiError> {
        let url = self.endpoint(&format!("recipes/{id}/add-to-list"))?;
        self.send(self.client.post(url)).await
    }

    async fn list_history(&self) -> Result<Vec<ShoppingList>, GroceryApiError> {
        self.send(self.client.get(self.endpoint("shopping-lists")?))
            .await
    }

    async fn archive_current(&self, clear: bool) -> Result<ShoppingList, GroceryApiError> {
        let url = self.endpoint("shopping-lists/archive")?;
        self.send(self.client.post(url).json(&ArchiveBody { clear }))
            .await
    }

    async fn restore_history(
        &self,
        id: ShoppingListId,
    ) -> Result<Vec<GroceryItem>, GroceryApiError> {
        let url = self.endpoint(&format!("shopping-lists/{id}/restore"))?;
        self.send(self.client.post(url)).await
    }

    async fn delete_history(&self, id: ShoppingListId) -> Result<(), GroceryApiError> {
        self.delete_resource(&format!("shopping-lists/{id}")).await
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GroceryApiError> {
    serde_json::from_slice(body).map_err(|error| {
        GroceryApiError::decode(format!(
            "invalid response body ({error}): {}",
            body_preview(body)
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> GroceryApiError {
    if error.is_timeout() {
        GroceryApiError::transport(format!("request timed out: {error}"))
    } else {
        GroceryApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GroceryApiError {
    let message = serde_json::from_slice::<ErrorEnvelopeDto>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| body_preview(body));
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        message
    };
    GroceryApiError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
