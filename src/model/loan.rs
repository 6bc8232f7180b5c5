use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, StrumDisplay, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoanType {
    Personal,
    Home,
    Vehicle,
    Education,
    SalaryAdvance,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, StrumDisplay, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

/// What an employee submits when applying for a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "loan_type": "personal",
        "amount": 100000,
        "interest_rate": 12.0,
        "tenure_months": 12
    })
)]
pub struct LoanApplication {
    pub loan_type: LoanType,

    /// Requested principal, rupees.
    #[schema(example = 100000)]
    #[serde(default)]
    pub amount: i64,

    /// Annual interest rate, percent. 0 means an interest-free advance.
    #[schema(example = 12.0)]
    #[serde(default)]
    pub interest_rate: f64,

    #[schema(example = 12)]
    #[serde(default)]
    pub tenure_months: u32,
}

/// An employee loan record. `monthly_emi` is computed once at approval
/// and frozen; the repayment ledger (decrementing `outstanding_amount`,
/// advancing `paid_emis`) belongs to the collections collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub loan_type: LoanType,

    #[schema(example = 100000)]
    pub amount: i64,

    #[schema(example = 12.0)]
    pub interest_rate: f64,

    #[schema(example = 12)]
    pub tenure_months: u32,

    #[schema(example = 8885)]
    pub monthly_emi: i64,

    #[schema(example = 100000)]
    pub disbursed_amount: i64,

    #[schema(example = 100000)]
    pub outstanding_amount: i64,

    #[schema(example = 0)]
    pub paid_emis: u32,

    #[schema(example = 12)]
    pub remaining_emis: u32,

    #[schema(example = "pending")]
    pub status: LoanStatus,
}

impl Loan {
    /// A fresh record for a submitted application. Nothing is disbursed
    /// and no EMI is fixed until approval.
    pub fn from_application(application: &LoanApplication) -> Self {
        Loan {
            loan_type: application.loan_type,
            amount: application.amount.max(0),
            interest_rate: application.interest_rate.max(0.0),
            tenure_months: application.tenure_months,
            monthly_emi: 0,
            disbursed_amount: 0,
            outstanding_amount: 0,
            paid_emis: 0,
            remaining_emis: 0,
            status: LoanStatus::Pending,
        }
    }
}
