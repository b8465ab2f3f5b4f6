pub mod health;
pub mod users;

use actix_web::HttpResponse;

/// Fallback for anything the router does not know about.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Not Found" }))
}
