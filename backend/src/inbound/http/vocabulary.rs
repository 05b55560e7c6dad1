//! Unit and category suggestions offered by clients.

use actix_web::{get, web};

use crate::domain::Vocabulary;

/// Fixed unit and category vocabularies. Units stay free-form on write.
#[utoipa::path(
    get,
    path = "/vocabulary",
    tags = ["vocabulary"],
    responses((status = 200, description = "Suggested units and categories", body = Vocabulary))
)]
#[get("/vocabulary")]
pub async fn get_vocabulary() -> web::Json<Vocabulary> {
    web::Json(Vocabulary::default())
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    use super::*;

    #[actix_web::test]
    async fn vocabulary_lists_units_and_categories() {
        let app = actix_test::init_service(App::new().service(get_vocabulary)).await;

        let request = actix_test::TestRequest::get().uri("/vocabulary").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        let units = body["units"].as_array().expect("units array");
        assert!(units.iter().any(|unit| unit == "pièce(s)"));
        assert_eq!(units.len(), 10);
        assert!(body["categories"].as_array().is_some_and(|c| !c.is_empty()));
    }
}
