use crate::{db::Db, errors::ApiError, models::user::User};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

// GET /api/users
pub async fn list_users(db: web::Data<Db>) -> Result<HttpResponse, ApiError> {
    let rows = sqlx::query("SELECT id, name, email, created_at FROM users ORDER BY id ASC")
        .fetch_all(&db.0)
        .await
        .map_err(ApiError::storage("error fetching users", "Failed to fetch users"))?;
    let users: Vec<User> = rows.iter().map(User::from_row).collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true, "data": users })))
}

// GET /api/users/{id}
pub async fn get_user(
    db: web::Data<Db>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id: i64 = path
        .into_inner()
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid user id".into()))?;

    let row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&db.0)
        .await
        .map_err(ApiError::storage("error fetching user", "Failed to fetch user"))?;
    let row = row.ok_or(ApiError::NotFound("User not found"))?;

    Ok(HttpResponse::Ok()
        .json(serde_json::json!({ "success": true, "data": User::from_row(&row) })))
}

#[derive(Deserialize)]
pub struct CreateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
}

// POST /api/users
pub async fn create_user(
    db: web::Data<Db>,
    body: web::Json<CreateUserReq>,
) -> Result<HttpResponse, ApiError> {
    let name = body.name.as_deref().unwrap_or("");
    let email = body.email.as_deref().unwrap_or("");
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(ApiError::BadRequest("Name and email are required".into()));
    }

    // id and created_at are assigned by the store.
    let row = sqlx::query(
        "INSERT INTO users(name, email) VALUES (?, ?) RETURNING id, name, email, created_at",
    )
    .bind(name)
    .bind(email)
    .fetch_one(&db.0)
    .await
    .map_err(ApiError::storage("error creating user", "Failed to create user"))?;

    Ok(HttpResponse::Created()
        .json(serde_json::json!({ "success": true, "data": User::from_row(&row) })))
}
