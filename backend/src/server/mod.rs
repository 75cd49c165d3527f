//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{SettingsCommand, SettingsQuery};
use crate::domain::AccessibilitySettingsService;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::settings::{get_settings, update_settings};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DieselSettingsRepository, DieselUserDirectory, InMemorySettingsRepository,
    InMemoryUserDirectory,
};

/// Build the HTTP state from configuration.
///
/// Uses the Diesel adapters when a pool is available, otherwise the
/// in-memory adapters so the server still serves settings (non-durably)
/// during local development and tests.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(AccessibilitySettingsService::new(
                Arc::new(DieselSettingsRepository::new(pool.clone())),
                Arc::new(DieselUserDirectory::new(pool.clone())),
            ));
            let query: Arc<dyn SettingsQuery> = service.clone();
            let command: Arc<dyn SettingsCommand> = service;
            HttpState::new(query, command)
        }
        None => {
            let service = Arc::new(AccessibilitySettingsService::new(
                Arc::new(InMemorySettingsRepository::new()),
                Arc::new(InMemoryUserDirectory::new()),
            ));
            let query: Arc<dyn SettingsQuery> = service.clone();
            let command: Arc<dyn SettingsCommand> = service;
            HttpState::new(query, command)
        }
    }
}

/// Assemble the Actix application with routes and middleware.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(get_settings)
        .service(update_settings);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_config_builds_state_without_pool() {
        let config = ServerConfig::in_memory(
            "127.0.0.1:0".parse().expect("valid socket address"),
        );
        let state = build_http_state(&config);

        // Both ports share one service instance behind the Arcs.
        let _query = state.settings_query.clone();
        let _command = state.settings.clone();
    }
}
