#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod api;

use std::env;

use actix_cors::Cors;
use actix_web::{App, http, middleware, web};
use usuarios_config::ServerConfig;

const DEFAULT_PORT: u16 = 5000;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let service_port = env::var("PORT")
        .ok()
        .and_then(|x| x.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let config = ServerConfig::from_env();
    log::info!("Starting usuarios server on port {service_port} with {config:?}");

    let app = move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(config.clone()))
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .service(api::health_endpoint)
            .service(api::index_endpoint)
            .service(api::usuarios_page_endpoint)
            .service(api::navbar_endpoint)
            .service(api::footer_endpoint)
            .service(usuarios_random_user::api::bind_services(web::scope("/api")))
    };

    actix_web::HttpServer::new(app)
        .bind(("0.0.0.0", service_port))?
        .run()
        .await
}
