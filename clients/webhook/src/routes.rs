use actix_web::{post, web, HttpResponse};
use ::directory::session::controller::PaginationController;

use crate::{envelope::SkillRequest, error::WebhookError, handlers::dispatch};

/// Voice platform webhook, one call per user turn
#[post("/directory")]
async fn directory(
    controller: web::Data<PaginationController>,
    request: web::Json<SkillRequest>,
) -> Result<HttpResponse, WebhookError> {
    let controller = controller.into_inner();
    let request = request.into_inner();

    // Searches use a blocking HTTP client
    let response = web::block(move || dispatch(&controller, &request))
        .await
        .map_err(|e| WebhookError::UnableToProcessTurn(format!("{}", e)))?;

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(directory);
}
