use std::collections::HashMap;

use actix_web::{http::header, web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use super::templates::{DocumentType, TemplateError};
use super::DocumentError;
use crate::{AppState, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Agreement type key. Unknown values fall back to "nda".
    #[serde(default = "default_document_type")]
    pub document_type: String,
    /// Flat field values keyed by the external data key (e.g. COMPANY_NAME).
    #[serde(default)]
    #[schema(value_type = Object)]
    pub context: HashMap<String, serde_json::Value>,
}

fn default_document_type() -> String {
    "nda".to_string()
}

#[utoipa::path(
    get,
    path = "/get-template/{name}",
    tag = "Document Service",
    params(
        ("name" = String, Path, description = "Document type key, e.g. nda or founders")
    ),
    responses(
        (status = 200, description = "Raw HTML of the template", body = String, content_type = "text/html"),
        (status = 404, description = "Template file missing", body = ErrorResponse)
    )
)]
pub async fn get_template(state: web::Data<AppState>, name: web::Path<String>) -> impl Responder {
    let doc_type = DocumentType::from_key(&name);
    let templates = state.templates.clone();

    match web::block(move || templates.load(doc_type)).await {
        Ok(Ok(text)) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(text),
        Ok(Err(TemplateError::NotFound(file))) => {
            log::warn!("template file '{}' is missing", file);
            HttpResponse::NotFound().json(ErrorResponse::not_found("Template not found"))
        }
        Ok(Err(e)) => {
            log::error!("failed to load template '{}': {}", doc_type.key(), e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to load template"))
        }
        Err(e) => {
            log::error!("blocking pool failure while loading template: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to load template"))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/get-template/{name}").route(web::get().to(get_template)))
        .service(web::resource("/generate").route(web::post().to(generate_document)));
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "Document Service",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated PDF attachment", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Template file missing", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_document(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> impl Responder {
    let GenerateRequest {
        document_type,
        context,
    } = body.into_inner();

    let templates = state.templates.clone();
    let renderer = state.renderer.clone();
    let result = web::block(move || {
        super::generate(&templates, renderer.as_ref(), &document_type, &context)
    })
    .await;

    match result {
        Ok(Ok(doc)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", doc.filename),
            ))
            .body(doc.pdf),
        Ok(Err(DocumentError::Template(TemplateError::NotFound(file)))) => {
            log::warn!("template file '{}' is missing", file);
            HttpResponse::NotFound().json(ErrorResponse::not_found("Template not found"))
        }
        Ok(Err(DocumentError::Template(e))) => {
            log::error!("failed to load template: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to load template"))
        }
        Ok(Err(DocumentError::Render(e))) => {
            log::error!("PDF rendering failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to render PDF"))
        }
        Err(e) => {
            log::error!("blocking pool failure while generating document: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to generate document"))
        }
    }
}
