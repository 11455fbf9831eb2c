#![allow(clippy::future_not_send, clippy::module_name_repetitions)]

use actix_web::{
    HttpResponse, Result, Scope,
    dev::{ServiceFactory, ServiceRequest},
    http::StatusCode,
    route,
    web::{self, Json},
};
use serde::{Deserialize, Serialize};
use usuarios_config::ServerConfig;
use usuarios_search::UserFilter;

use crate::{FetchUsersError, RandomUserClient, models::User};

pub fn bind_services<
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
>(
    scope: Scope<T>,
) -> Scope<T> {
    scope.service(usuarios_endpoint)
}

impl actix_web::ResponseError for FetchUsersError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorResponse {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// Wire projection of a normalized [`User`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ApiUsuario {
    pub nome: String,
    pub email: String,
    pub foto: String,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub pais: Option<String>,
    pub telefone: Option<String>,
}

impl From<User> for ApiUsuario {
    fn from(value: User) -> Self {
        Self {
            nome: value.full_name,
            email: value.email,
            foto: value.photo_url,
            cidade: value.city,
            estado: value.state,
            pais: value.country,
            telefone: value.phone,
        }
    }
}

/// Response envelope for the user listing endpoint.
///
/// `total` is the post-filter match count, `per_page` echoes the requested
/// count and `total_pages` echoes the configured constant. The two are
/// intentionally unrelated to `total`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiUsuariosResponse {
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub usuarios: Vec<ApiUsuario>,
}

#[must_use]
pub fn assemble_response(
    users: Vec<User>,
    page: u32,
    per_page: u32,
    total_pages: u32,
) -> ApiUsuariosResponse {
    let usuarios = users.into_iter().map(ApiUsuario::from).collect::<Vec<_>>();

    ApiUsuariosResponse {
        total: u32::try_from(usuarios.len()).unwrap_or(u32::MAX),
        page,
        per_page,
        total_pages,
        usuarios,
    }
}

#[derive(Deserialize)]
pub struct UsuariosQuery {
    results: Option<u32>,
    nat: Option<String>,
    page: Option<u32>,
    q: Option<String>,
    estado: Option<String>,
    cidade: Option<String>,
}

#[route("/usuarios", method = "GET")]
pub async fn usuarios_endpoint(
    query: web::Query<UsuariosQuery>,
    config: web::Data<ServerConfig>,
) -> Result<Json<ApiUsuariosResponse>, FetchUsersError> {
    let results = query.results.unwrap_or(config.default_results);
    let nat = query
        .nat
        .as_deref()
        .filter(|x| !x.is_empty())
        .unwrap_or(&config.default_nat);
    let page = query.page.unwrap_or(1);

    let filter = UserFilter::new(
        query.q.as_deref().unwrap_or(""),
        query.estado.as_deref().unwrap_or(""),
        query.cidade.as_deref().unwrap_or(""),
    );

    let client = RandomUserClient::new(&config);
    let raw = client
        .fetch_users(results, Some(nat), Some(page), Some(&config.seed))
        .await
        .inspect_err(|err| log::error!("Failed to fetch users: {err:?}"))?;

    let users = raw
        .into_iter()
        .map(User::from)
        .filter(|user| {
            filter.matches(
                &user.full_name,
                &user.email,
                user.state.as_deref(),
                user.city.as_deref(),
            )
        })
        .collect::<Vec<_>>();

    Ok(Json(assemble_response(
        users,
        page,
        results,
        config.total_pages,
    )))
}
