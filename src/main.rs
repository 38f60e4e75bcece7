use std::sync::Arc;

use actix_session::{SessionMiddleware, config::PersistentSession, storage::CookieSessionStore};
use actix_web::{App, HttpResponse, HttpServer, middleware, web};

use surveys::auth::directory::{StaticDirectory, UserDirectory};
use surveys::config::AppConfig;
use surveys::{db, handlers};

const NOT_FOUND_PAGE: &str = include_str!("../templates/errors/404.html");

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    // Ensure data directory exists
    std::fs::create_dir_all("data")?;

    // Initialize database
    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool)
        .await
        .map_err(std::io::Error::other)?;

    let directory: Arc<dyn UserDirectory> = Arc::new(
        StaticDirectory::from_config(&config).map_err(std::io::Error::other)?,
    );
    let secret_key = config.session_key();
    let cookie_secure = config.cookie_secure;
    let remember_for = actix_web::cookie::time::Duration::days(config.remember_days);
    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);
    let directory = web::Data::from(directory);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .session_lifecycle(PersistentSession::default().session_ttl(remember_for))
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            .app_data(directory.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(NOT_FOUND_PAGE)
            }))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
