use actix_web::{http::header, web, HttpResponse, Responder};
use uuid::Uuid;

use super::models::{RedraftAccepted, RedraftRequest, RedraftStatusResponse, TaskStatus};
use crate::{AppState, ErrorResponse};

const DOWNLOAD_FILENAME: &str = "redrafted_contract.pdf";

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/redraft").route(web::post().to(create_redraft)))
        .service(
            web::resource("/redraft/status/{task_id}").route(web::get().to(get_redraft_status)),
        )
        .service(
            web::resource("/redraft/download/{task_id}").route(web::get().to(download_redraft)),
        );
}

/// Pull a required field out of the request body; blank counts as missing.
fn required_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[utoipa::path(
    post,
    path = "/redraft",
    tag = "Redraft Service",
    request_body = RedraftRequest,
    responses(
        (status = 200, description = "Redraft task accepted", body = RedraftAccepted),
        (status = 400, description = "Missing html or instructions", body = ErrorResponse)
    )
)]
pub async fn create_redraft(
    state: web::Data<AppState>,
    body: web::Json<RedraftRequest>,
) -> impl Responder {
    let RedraftRequest { html, instructions } = body.into_inner();

    let (html, instructions) = match (required_field(html), required_field(instructions)) {
        (Some(html), Some(instructions)) => (html, instructions),
        _ => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Missing 'html' or 'instructions'"));
        }
    };

    let task_id = state.tasks.create().await;
    log::info!("redraft task {} created", task_id);

    // The worker owns the single terminal transition; status polls read the
    // store concurrently. No cancellation once started - a hung upstream is
    // cut off by the client timeout and lands in `failed`.
    let tasks = state.tasks.clone();
    let drafter = state.drafter.clone();
    tokio::spawn(async move {
        match drafter.redraft(&html, &instructions).await {
            Ok(result_html) => {
                log::info!("redraft task {} completed", task_id);
                tasks.complete(task_id, result_html).await;
            }
            Err(e) => {
                log::error!("redraft task {} failed: {}", task_id, e);
                tasks.fail(task_id, e.to_string()).await;
            }
        }
    });

    HttpResponse::Ok().json(RedraftAccepted {
        message: "Redraft task accepted".to_string(),
        task_id,
    })
}

#[utoipa::path(
    get,
    path = "/redraft/status/{task_id}",
    tag = "Redraft Service",
    params(
        ("task_id" = Uuid, Path, description = "Redraft task id")
    ),
    responses(
        (status = 200, description = "Task status", body = RedraftStatusResponse),
        (status = 404, description = "Unknown task id", body = ErrorResponse)
    )
)]
pub async fn get_redraft_status(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
) -> impl Responder {
    match state.tasks.get(task_id.into_inner()).await {
        Some(task) => HttpResponse::Ok().json(RedraftStatusResponse {
            status: task.status,
            download_ready: task.is_download_ready(),
        }),
        None => HttpResponse::NotFound().json(ErrorResponse::not_found("Task not found")),
    }
}

#[utoipa::path(
    get,
    path = "/redraft/download/{task_id}",
    tag = "Redraft Service",
    params(
        ("task_id" = Uuid, Path, description = "Redraft task id")
    ),
    responses(
        (status = 200, description = "Redrafted PDF attachment", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Task is not completed", body = ErrorResponse),
        (status = 404, description = "Unknown task id", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn download_redraft(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
) -> impl Responder {
    let task_id = task_id.into_inner();
    let task = match state.tasks.get(task_id).await {
        Some(task) => task,
        None => {
            return HttpResponse::NotFound().json(ErrorResponse::not_found("Task not found"));
        }
    };

    if task.status != TaskStatus::Completed {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Task is not ready for download"));
    }

    let result_html = match task.result_html {
        Some(html) => html,
        None => {
            log::error!("completed redraft task {} has no result html", task_id);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Task result is missing"));
        }
    };

    let renderer = state.renderer.clone();
    match web::block(move || renderer.render_pdf(&result_html)).await {
        Ok(Ok(pdf)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ))
            .body(pdf),
        Ok(Err(e)) => {
            log::error!("PDF rendering failed for redraft task {}: {}", task_id, e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to render PDF"))
        }
        Err(e) => {
            log::error!("blocking pool failure while rendering redraft {}: {}", task_id, e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to render PDF"))
        }
    }
}
