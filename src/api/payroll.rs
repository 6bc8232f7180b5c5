use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::payroll::{EmployeePayrollInput, assemble_payroll_run, summarize_run};
use crate::model::deduction::DeductionConfig;
use crate::model::payroll::{
    PayrollLine, PayrollOverrides, PayrollPeriod, PayrollRunEntry, PayrollRunSummary,
};

#[derive(Deserialize, ToSchema)]
pub struct AssembleRunRequest {
    pub period: PayrollPeriod,

    /// Employees selected for this run, with their salary snapshots.
    pub employees: Vec<EmployeePayrollInput>,

    /// Leave days beyond entitlement per employee, from the leave
    /// subsystem.
    #[serde(default)]
    #[schema(value_type = Object, example = json!({"1001": 2}))]
    pub excess_leave_days: HashMap<u64, u32>,

    /// Manual per-run adjustments per employee.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub overrides: HashMap<u64, PayrollOverrides>,

    /// A previously persisted run for the same period, if any. Entries
    /// found here are restored verbatim instead of recomputed.
    #[serde(default)]
    #[schema(nullable = true)]
    pub existing_run: Option<Vec<PayrollRunEntry>>,

    /// Optional configuration snapshot overriding the server's active
    /// one.
    #[serde(default)]
    #[schema(nullable = true)]
    pub config: Option<DeductionConfig>,
}

#[derive(Serialize, ToSchema)]
pub struct PayrollRunResponse {
    pub period: PayrollPeriod,
    pub summary: PayrollRunSummary,
    pub lines: Vec<PayrollLine>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payroll/assemble",
    request_body = AssembleRunRequest,
    responses(
        (status = 200, description = "Assembled payroll lines", body = PayrollRunResponse),
        (status = 400, description = "No employees selected, invalid period, or bad config snapshot")
    ),
    tag = "Payroll"
)]
pub async fn assemble_run(
    active_config: web::Data<DeductionConfig>,
    payload: web::Json<AssembleRunRequest>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let snapshot = payload.config.as_ref().unwrap_or(active_config.get_ref());

    if let Err(e) = snapshot.validate() {
        tracing::warn!(error = %e, "Rejected deduction config snapshot");
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": e.to_string()
        })));
    }

    let lines = match assemble_payroll_run(
        &payload.employees,
        payload.period,
        &payload.excess_leave_days,
        &payload.overrides,
        payload.existing_run.as_deref(),
        snapshot,
    ) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(
                error = %e,
                month = payload.period.month,
                year = payload.period.year,
                "Payroll run rejected"
            );
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": e.to_string()
            })));
        }
    };

    let summary = summarize_run(&lines);
    tracing::info!(
        month = payload.period.month,
        year = payload.period.year,
        employees = summary.employee_count,
        restored = summary.restored_count,
        total_net = summary.total_net,
        "Payroll run assembled"
    );

    Ok(HttpResponse::Ok().json(PayrollRunResponse {
        period: payload.period,
        summary,
        lines,
    }))
}
