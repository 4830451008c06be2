//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{configure_api, json_config, query_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is raised once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(config.db_pool.as_ref()));
    let ServerConfig { bind_addr, .. } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Smoke tests for the assembled application.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use backend::TRACE_ID_HEADER;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(build_http_state(None)),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn registered_users_can_vote() {
        let app = test::init_service(build_app(deps())).await;

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(json!({ "walletAddress": "0xABC", "username": "ada" }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert!(created.headers().contains_key(TRACE_ID_HEADER));

        let voted: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/vote/addVote")
                .set_json(json!({ "walletAddress": "0xABC", "voteType": "upvote", "hash": "Qm1" }))
                .to_request(),
        )
        .await;
        assert_eq!(voted, json!({ "action": "cast" }));

        let summary: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/vote/hash/Qm1/summary")
                .to_request(),
        )
        .await;
        assert_eq!(summary["upvotes"], 1);
    }

    #[rstest]
    #[actix_web::test]
    async fn probes_are_mounted_at_the_root() {
        let deps = deps();
        deps.health_state.mark_ready();
        let app = test::init_service(build_app(deps)).await;

        for uri in ["/health/ready", "/health/live"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
        }
    }
}
