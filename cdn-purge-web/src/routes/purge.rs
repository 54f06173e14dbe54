//! Cache purge endpoint

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use cdn_purge_core::types::{PurgeFailureKind, PurgeResult};
use cdn_purge_core::{PurgeOrchestrator, parse_host_list};
use serde::Deserialize;

use super::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeForm {
    /// Comma-separated hostnames
    #[serde(default)]
    pub hosts: String,
    /// Purge everything in the configured default zone with one call
    #[serde(default)]
    pub default_zone: bool,
}

fn status_for(result: &PurgeResult) -> StatusCode {
    match result.error_kind {
        None => StatusCode::OK,
        Some(PurgeFailureKind::Validation) => StatusCode::BAD_REQUEST,
        Some(PurgeFailureKind::ZoneLookup | PurgeFailureKind::PurgeDispatch) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

/// POST /purge_cache
pub async fn purge_cache(
    state: web::Data<AppState>,
    user: CurrentUser,
    form: web::Form<PurgeForm>,
) -> HttpResponse {
    let hosts = parse_host_list(&form.hosts);
    tracing::info!(
        user = %user.0,
        default_zone = form.default_zone,
        "Purge requested for: {}",
        hosts.join(", ")
    );

    let orchestrator = PurgeOrchestrator::new(Arc::clone(&state.api), state.orchestrator.clone());
    let result = if form.default_zone {
        orchestrator.purge_default_zone(&hosts).await
    } else {
        orchestrator.purge(&hosts).await
    };

    if result.success {
        tracing::info!(user = %user.0, run_id = %result.run_id, "{}", result.text());
    } else {
        tracing::error!(
            user = %user.0,
            run_id = %result.run_id,
            "Purge failed: {}",
            result.text()
        );
    }

    HttpResponse::build(status_for(&result)).json(result)
}
