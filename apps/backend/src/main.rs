use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, App, HttpServer};
use db_infra::config::db::RuntimeEnv;
use grigo_backend::config::app::AppConfig;
use grigo_backend::infra::state::build_state;
use grigo_backend::middleware::cors::cors_middleware;
use grigo_backend::middleware::rate_limit::{login_denied_response, login_rate_limit_config};
use grigo_backend::middleware::{security_headers, RequestTrace};
use grigo_backend::routes;
use grigo_backend::state::security_config::SecurityConfig;
use grigo_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let security_config = SecurityConfig::from_app_config(&config);

    let app_state = match build_state()
        .with_db(RuntimeEnv::Prod)
        .with_security(security_config)
        .with_config(config.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "starting GRIGO ERP backend");

    let data = web::Data::new(app_state);
    let login_backend = InMemoryBackend::builder().build();
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let login_limiter =
            RateLimiter::builder(login_backend.clone(), login_rate_limit_config().build())
                .add_headers()
                .request_denied_response(login_denied_response)
                .build();

        App::new()
            .wrap(security_headers())
            .wrap(cors_middleware(&origins))
            .wrap(RequestTrace)
            .app_data(data.clone())
            .service(
                web::scope("/api/auth")
                    .wrap(login_limiter)
                    .configure(routes::auth::configure_routes),
            )
            .configure(routes::configure_app)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
