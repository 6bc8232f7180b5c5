use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::deductions::{TdsProjection, compute_deductions, project_tds};
use crate::model::deduction::{DeductionConfig, DeductionResult, TaxRegime};
use crate::model::salary::SalaryStructure;

#[derive(Deserialize, ToSchema)]
pub struct ComputeDeductionsRequest {
    pub salary: SalaryStructure,

    /// Gross salary for eligibility checks; defaults to the sum of the
    /// salary components.
    #[schema(example = 34500, nullable = true)]
    #[serde(default)]
    pub gross_salary: Option<i64>,

    #[schema(example = "Maharashtra")]
    pub state: String,

    /// Optional configuration snapshot overriding the server's active
    /// one, e.g. to preview an edited slab table.
    #[serde(default)]
    #[schema(nullable = true)]
    pub config: Option<DeductionConfig>,
}

#[derive(Serialize, ToSchema)]
pub struct DeductionBreakdownResponse {
    pub state: String,
    pub gross_salary: i64,
    pub deductions: DeductionResult,

    #[schema(example = 2102)]
    pub employee_total: i64,

    #[schema(example = 2301)]
    pub employer_total: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct TdsRequest {
    #[schema(example = 50000)]
    #[serde(default)]
    pub monthly_gross_salary: i64,

    #[schema(example = "new")]
    pub regime: TaxRegime,
}

#[derive(Serialize, ToSchema)]
pub struct TdsResponse {
    #[schema(example = "2025-26")]
    pub financial_year: String,

    pub regime: TaxRegime,

    pub projection: TdsProjection,
}

#[utoipa::path(
    post,
    path = "/api/v1/deductions/compute",
    request_body = ComputeDeductionsRequest,
    responses(
        (status = 200, description = "Itemized statutory deductions", body = DeductionBreakdownResponse),
        (status = 400, description = "Invalid configuration snapshot")
    ),
    tag = "Deductions"
)]
pub async fn compute(
    active_config: web::Data<DeductionConfig>,
    payload: web::Json<ComputeDeductionsRequest>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let snapshot = payload.config.as_ref().unwrap_or(active_config.get_ref());

    if let Err(e) = snapshot.validate() {
        tracing::warn!(error = %e, state = %payload.state, "Rejected deduction config snapshot");
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": e.to_string()
        })));
    }

    let gross_salary = payload
        .gross_salary
        .unwrap_or_else(|| payload.salary.gross())
        .max(0);
    let deductions = compute_deductions(&payload.salary, gross_salary, &payload.state, snapshot);

    Ok(HttpResponse::Ok().json(DeductionBreakdownResponse {
        employee_total: deductions.employee_total(),
        employer_total: deductions.employer_total(),
        state: payload.state,
        gross_salary,
        deductions,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/deductions/config",
    responses(
        (status = 200, description = "Active deduction configuration snapshot", body = DeductionConfig)
    ),
    tag = "Deductions"
)]
pub async fn get_config(
    active_config: web::Data<DeductionConfig>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(active_config.get_ref()))
}

#[utoipa::path(
    post,
    path = "/api/v1/deductions/tds",
    request_body = TdsRequest,
    responses(
        (status = 200, description = "Annual projection and suggested monthly TDS", body = TdsResponse)
    ),
    tag = "Deductions"
)]
pub async fn compute_tds(
    active_config: web::Data<DeductionConfig>,
    payload: web::Json<TdsRequest>,
) -> actix_web::Result<impl Responder> {
    let projection = project_tds(
        payload.monthly_gross_salary,
        payload.regime,
        &active_config.tds,
    );

    Ok(HttpResponse::Ok().json(TdsResponse {
        financial_year: active_config.tds.financial_year.clone(),
        regime: payload.regime,
        projection,
    }))
}
