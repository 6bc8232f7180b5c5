use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::loan::{
    EligibilityParams, LoanEligibility, approve_loan, check_affordability, compute_emi,
    loan_eligibility,
};
use crate::model::loan::{Loan, LoanApplication};

#[derive(Deserialize, ToSchema)]
pub struct EmiRequest {
    #[schema(example = 100000)]
    #[serde(default)]
    pub principal: i64,

    #[schema(example = 12.0)]
    #[serde(default)]
    pub annual_rate_percent: f64,

    #[schema(example = 12)]
    #[serde(default)]
    pub tenure_months: u32,
}

#[derive(Serialize, ToSchema)]
pub struct EmiResponse {
    #[schema(example = 8885)]
    pub monthly_emi: i64,

    /// EMI times tenure.
    #[schema(example = 106620)]
    pub total_payable: i64,

    #[schema(example = 6620)]
    pub total_interest: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct EligibilityRequest {
    #[schema(example = 40000)]
    #[serde(default)]
    pub gross_salary: i64,

    /// Monthly EMIs the employee is already servicing.
    #[schema(example = 3885)]
    #[serde(default)]
    pub existing_monthly_emi: i64,

    #[schema(example = 50.0, nullable = true)]
    #[serde(default)]
    pub dti_ratio_percent: Option<f64>,

    #[schema(example = 24, nullable = true)]
    #[serde(default)]
    pub tenure_months: Option<u32>,

    #[schema(example = 10.0, nullable = true)]
    #[serde(default)]
    pub annual_rate_percent: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoanApplicationRequest {
    pub application: LoanApplication,

    #[schema(example = 30000)]
    #[serde(default)]
    pub gross_salary: i64,

    #[schema(example = 5000)]
    #[serde(default)]
    pub existing_monthly_emi: i64,
}

#[utoipa::path(
    post,
    path = "/api/v1/loans/emi",
    request_body = EmiRequest,
    responses(
        (status = 200, description = "Amortized installment figures", body = EmiResponse)
    ),
    tag = "Loans"
)]
pub async fn emi_quote(payload: web::Json<EmiRequest>) -> actix_web::Result<impl Responder> {
    let monthly_emi = compute_emi(
        payload.principal,
        payload.annual_rate_percent,
        payload.tenure_months,
    );
    let total_payable = monthly_emi * payload.tenure_months as i64;

    Ok(HttpResponse::Ok().json(EmiResponse {
        monthly_emi,
        total_payable,
        total_interest: (total_payable - payload.principal.max(0)).max(0),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/loans/eligibility",
    request_body = EligibilityRequest,
    responses(
        (status = 200, description = "Estimated loan eligibility", body = LoanEligibility)
    ),
    tag = "Loans"
)]
pub async fn eligibility(
    payload: web::Json<EligibilityRequest>,
) -> actix_web::Result<impl Responder> {
    let defaults = EligibilityParams::default();
    let params = EligibilityParams {
        dti_ratio_percent: payload.dti_ratio_percent.unwrap_or(defaults.dti_ratio_percent),
        tenure_months: payload.tenure_months.unwrap_or(defaults.tenure_months),
        annual_rate_percent: payload
            .annual_rate_percent
            .unwrap_or(defaults.annual_rate_percent),
    };

    let result = loan_eligibility(payload.gross_salary, payload.existing_monthly_emi, &params);
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/loans/apply",
    request_body = LoanApplicationRequest,
    responses(
        (status = 200, description = "Application accepted; EMI frozen", body = Loan),
        (status = 400, description = "EMI exceeds available income", body = Object, example = json!({
            "message": "monthly EMI of 88849 exceeds available income of 25000",
            "monthly_emi": 88849,
            "available_income": 25000,
            "max_affordable_principal": 281000
        }))
    ),
    tag = "Loans"
)]
pub async fn apply(
    payload: web::Json<LoanApplicationRequest>,
) -> actix_web::Result<impl Responder> {
    match check_affordability(
        &payload.application,
        payload.gross_salary,
        payload.existing_monthly_emi,
    ) {
        Ok(_emi) => {
            let mut loan = Loan::from_application(&payload.application);
            approve_loan(&mut loan);
            tracing::info!(
                loan_type = %loan.loan_type,
                amount = loan.amount,
                monthly_emi = loan.monthly_emi,
                "Loan application accepted"
            );
            Ok(HttpResponse::Ok().json(loan))
        }
        Err(rejection) => {
            tracing::info!(
                monthly_emi = rejection.monthly_emi,
                available_income = rejection.available_income,
                "Loan application rejected as unaffordable"
            );
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": rejection.to_string(),
                "monthly_emi": rejection.monthly_emi,
                "available_income": rejection.available_income,
                "max_affordable_principal": rejection.max_affordable_principal
            })))
        }
    }
}
