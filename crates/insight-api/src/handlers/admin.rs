//! Administrative handlers

use axum::extract::State;
use insight_service::dto::{ReconcileReportResponse, ReconcileRequest};
use insight_service::ReconciliationService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Run one reconciliation batch on demand
///
/// POST /admin/reconcile
pub async fn reconcile(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReconcileRequest>,
) -> ApiResult<ApiJson<ReconcileReportResponse>> {
    let service = ReconciliationService::new(state.service_context());
    let report = service.reconcile(&request).await?;
    Ok(ApiJson(report.into()))
}
