mod config;
mod db;
mod errors;
mod models;
mod routes;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::web::Data;
use actix_web::{guard, web, App, HttpServer};
use env_logger::Env;

use crate::config::Config;
use crate::db::Db;
use crate::errors::ApiError;
use crate::routes::{health as health_routes, users as users_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // info-level logs unless RUST_LOG says otherwise
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cfg = Config::load();

    let db = Db::connect_and_migrate(&cfg.database)
        .await
        .expect("database init failed");

    if std::env::args().nth(1).as_deref() == Some("seed") {
        db.seed().await.expect("seeding failed");
        log::info!("Database seeded");
        return Ok(());
    }

    log::info!("Starting server at {}", cfg.listen);

    let listen_addr = cfg.listen.clone();
    HttpServer::new(move || {
        let cors = Cors::permissive()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::INTERNAL_SERVER_ERROR, errors::render_internal_error),
            )
            .app_data(Data::new(db.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .route("/health", web::get().to(health_routes::health_check))
            .service(
                web::scope("/api").service(
                    web::scope("/users")
                        .route("", web::get().to(users_routes::list_users))
                        .route("", web::post().to(users_routes::create_user))
                        .route("/{id}", web::get().to(users_routes::get_user)),
                ),
            )
            // Files only answers GET/HEAD; the guard lets every other
            // method fall through to the JSON 404 below instead of the
            // plain-text 405 actix-files would emit.
            .service(
                web::scope("")
                    .guard(guard::Any(guard::Get()).or(guard::Head()))
                    .service(
                        Files::new("/", &cfg.static_dir)
                            .index_file("index.html")
                            .default_handler(fn_service(|req: ServiceRequest| async {
                                let (req, _) = req.into_parts();
                                Ok::<_, actix_web::Error>(ServiceResponse::new(
                                    req,
                                    routes::not_found().await,
                                ))
                            })),
                    ),
            )
            .default_service(web::route().to(routes::not_found))
    })
    .bind(listen_addr)?
    .run()
    .await
}
