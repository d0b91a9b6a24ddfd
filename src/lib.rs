use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpResponse, HttpServer, Responder};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod document;
pub mod redraft;
pub mod render;
pub mod state;

pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running")
    )
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Document generator backend running"
    }))
}

pub async fn run() -> std::io::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::index,
            crate::document::handlers::get_template,
            crate::document::handlers::generate_document,
            crate::redraft::handlers::create_redraft,
            crate::redraft::handlers::get_redraft_status,
            crate::redraft::handlers::download_redraft,
        ),
        components(
            schemas(
                ErrorResponse,
                document::handlers::GenerateRequest,
                redraft::models::RedraftRequest,
                redraft::models::RedraftAccepted,
                redraft::models::RedraftStatusResponse,
                redraft::models::TaskStatus,
            )
        ),
        tags(
            (name = "Document Service", description = "Template preview and PDF generation endpoints."),
            (name = "Redraft Service", description = "AI-assisted contract redrafting task endpoints."),
            (name = "Health", description = "Liveness endpoint.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok();
    let app_state = match AppState::new() {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!(
                "Failed to initialize application state. Check REDRAFT_API_KEY in .env. Error: {}",
                e
            );
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("docu_forge_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::resource("/").route(web::get().to(index)))
            .configure(document::handlers::config)
            .configure(redraft::handlers::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
