use actix_web::{
    HttpResponse, Result, route,
    web::Json,
};
use serde_json::{Value, json};

#[route("/health", method = "GET")]
pub async fn health_endpoint() -> Result<Json<Value>> {
    log::info!("Healthy");
    Ok(Json(json!({"healthy": true})))
}

#[route("/", method = "GET")]
pub async fn index_endpoint() -> HttpResponse {
    html(include_str!("../public/index.html"))
}

#[route("/usuarios", method = "GET")]
pub async fn usuarios_page_endpoint() -> HttpResponse {
    html(include_str!("../public/usuarios.html"))
}

#[route("/navbar", method = "GET")]
pub async fn navbar_endpoint() -> HttpResponse {
    html(include_str!("../public/navbar.html"))
}

#[route("/footer", method = "GET")]
pub async fn footer_endpoint() -> HttpResponse {
    html(include_str!("../public/footer.html"))
}

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
