//! Loan amortization: EMI, eligibility ceiling, and the
//! affordability gate applied to applications.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::loan::{Loan, LoanApplication, LoanStatus};
use crate::utils::money::{clamp_amount, floor_to_thousand, round_rupees};

/// Fixed monthly installment for a principal amortized over
/// `tenure_months` at `annual_rate_percent`. A zero tenure is an
/// undefined loan and yields 0; callers treat 0 EMI on a non-zero
/// principal as a precondition failure.
pub fn compute_emi(principal: i64, annual_rate_percent: f64, tenure_months: u32) -> i64 {
    let principal = clamp_amount(principal);
    if tenure_months == 0 || principal == 0 {
        return 0;
    }
    let rate = if annual_rate_percent.is_finite() {
        annual_rate_percent.max(0.0)
    } else {
        0.0
    };
    if rate == 0.0 {
        return round_rupees(principal as f64 / tenure_months as f64);
    }
    let monthly_rate = rate / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
    round_rupees(principal as f64 * monthly_rate * growth / (growth - 1.0))
}

/// Inverse of the EMI formula: the principal whose installment equals
/// `emi` at the given tenure and rate, in whole rupees.
fn principal_for_emi(emi: f64, annual_rate_percent: f64, tenure_months: u32) -> i64 {
    if tenure_months == 0 || !emi.is_finite() || emi <= 0.0 {
        return 0;
    }
    let rate = if annual_rate_percent.is_finite() {
        annual_rate_percent.max(0.0)
    } else {
        0.0
    };
    if rate == 0.0 {
        return (emi * tenure_months as f64).floor() as i64;
    }
    let monthly_rate = rate / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
    (emi * (growth - 1.0) / (monthly_rate * growth)).floor() as i64
}

/// Assumptions behind an eligibility estimate. The defaults mirror the
/// lending policy: half of gross income may service debt, quoted
/// against a 24-month loan at 10% per annum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EligibilityParams {
    #[schema(example = 50.0)]
    pub dti_ratio_percent: f64,

    #[schema(example = 24)]
    pub tenure_months: u32,

    #[schema(example = 10.0)]
    pub annual_rate_percent: f64,
}

impl Default for EligibilityParams {
    fn default() -> Self {
        EligibilityParams {
            dti_ratio_percent: 50.0,
            tenure_months: 24,
            annual_rate_percent: 10.0,
        }
    }
}

/// An eligibility estimate. The principal assumes the quoted tenure
/// and rate, not whatever terms the employee eventually picks.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "max_emi_capacity": 16115,
        "max_eligible_principal": 349000,
        "assumed_tenure_months": 24,
        "assumed_annual_rate_percent": 10.0
    })
)]
pub struct LoanEligibility {
    /// Monthly repayment room left after existing EMIs.
    pub max_emi_capacity: i64,

    /// Largest principal serviceable with that capacity, floored to
    /// the nearest 1,000 rupees.
    pub max_eligible_principal: i64,

    pub assumed_tenure_months: u32,

    pub assumed_annual_rate_percent: f64,
}

/// Repayment capacity under the debt-to-income policy, inverted into a
/// maximum principal at the assumed tenure/rate.
pub fn loan_eligibility(
    gross_salary: i64,
    existing_monthly_emi: i64,
    params: &EligibilityParams,
) -> LoanEligibility {
    let gross = clamp_amount(gross_salary) as f64;
    let existing = clamp_amount(existing_monthly_emi) as f64;
    let dti = if params.dti_ratio_percent.is_finite() {
        params.dti_ratio_percent.max(0.0)
    } else {
        0.0
    };
    let capacity = (gross * dti / 100.0 - existing).max(0.0);
    let principal = principal_for_emi(capacity, params.annual_rate_percent, params.tenure_months);
    LoanEligibility {
        max_emi_capacity: round_rupees(capacity),
        max_eligible_principal: floor_to_thousand(principal),
        assumed_tenure_months: params.tenure_months,
        assumed_annual_rate_percent: params.annual_rate_percent,
    }
}

/// Why an application was turned down, with the actionable ceiling the
/// employee could request at the same tenure and rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, Display, Error)]
#[display(
    fmt = "monthly EMI of {} exceeds available income of {}",
    monthly_emi,
    available_income
)]
pub struct AffordabilityError {
    pub monthly_emi: i64,
    /// Gross salary less EMIs already being serviced.
    pub available_income: i64,
    /// Largest principal affordable at the requested tenure/rate,
    /// floored to the nearest 1,000 rupees.
    pub max_affordable_principal: i64,
}

/// Gate applied when an application is submitted: the computed EMI
/// must fit inside the income left after existing EMIs. Returns the
/// EMI on success.
pub fn check_affordability(
    application: &LoanApplication,
    gross_salary: i64,
    existing_monthly_emi: i64,
) -> Result<i64, AffordabilityError> {
    let emi = compute_emi(
        application.amount,
        application.interest_rate,
        application.tenure_months,
    );
    let available = clamp_amount(clamp_amount(gross_salary) - clamp_amount(existing_monthly_emi));
    if emi > available {
        return Err(AffordabilityError {
            monthly_emi: emi,
            available_income: available,
            max_affordable_principal: floor_to_thousand(principal_for_emi(
                available as f64,
                application.interest_rate,
                application.tenure_months,
            )),
        });
    }
    Ok(emi)
}

/// Approval freezes the EMI and opens the repayment schedule. The
/// ledger itself (collections, outstanding balance updates) belongs to
/// the payroll and finance collaborators.
pub fn approve_loan(loan: &mut Loan) {
    loan.monthly_emi = compute_emi(loan.amount, loan.interest_rate, loan.tenure_months);
    loan.disbursed_amount = loan.amount;
    loan.outstanding_amount = loan.amount;
    loan.paid_emis = 0;
    loan.remaining_emis = loan.tenure_months;
    loan.status = LoanStatus::Approved;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::loan::LoanType;

    #[test]
    fn zero_rate_emi_is_straight_division() {
        assert_eq!(compute_emi(24000, 0.0, 12), 2000);
    }

    #[test]
    fn standard_emi_matches_the_annuity_formula() {
        // 1% monthly over 12 months
        assert_eq!(compute_emi(100000, 12.0, 12), 8885);
    }

    #[test]
    fn undefined_loans_compute_to_zero() {
        assert_eq!(compute_emi(100000, 12.0, 0), 0);
        assert_eq!(compute_emi(0, 12.0, 12), 0);
        assert_eq!(compute_emi(-100000, 12.0, 12), 0);
    }

    #[test]
    fn emi_inversion_round_trips() {
        let emi = compute_emi(100000, 12.0, 12);
        let principal = principal_for_emi(emi as f64, 12.0, 12);
        // inversion lands within a rupee-rounding neighborhood
        assert!((principal - 100000).abs() <= 100, "got {principal}");
    }

    #[test]
    fn eligibility_uses_the_dti_policy() {
        let result = loan_eligibility(40000, 3885, &EligibilityParams::default());
        assert_eq!(result.max_emi_capacity, 16115);
        assert!(result.max_eligible_principal > 0);
        assert_eq!(result.max_eligible_principal % 1000, 0);
        assert_eq!(result.assumed_tenure_months, 24);
    }

    #[test]
    fn eligibility_is_monotonic_in_existing_emi() {
        let params = EligibilityParams::default();
        let mut previous = i64::MAX;
        for existing in [0, 5000, 10000, 20000, 40000] {
            let result = loan_eligibility(40000, existing, &params);
            assert!(result.max_eligible_principal <= previous);
            previous = result.max_eligible_principal;
        }
    }

    #[test]
    fn eligibility_is_monotonic_in_gross_salary() {
        let params = EligibilityParams::default();
        let mut previous = 0;
        for gross in [10000, 20000, 40000, 80000] {
            let result = loan_eligibility(gross, 2000, &params);
            assert!(result.max_eligible_principal >= previous);
            previous = result.max_eligible_principal;
        }
    }

    #[test]
    fn exhausted_capacity_clamps_to_zero() {
        let result = loan_eligibility(10000, 20000, &EligibilityParams::default());
        assert_eq!(result.max_emi_capacity, 0);
        assert_eq!(result.max_eligible_principal, 0);
    }

    #[test]
    fn unaffordable_application_reports_the_ceiling() {
        let application = LoanApplication {
            loan_type: LoanType::Personal,
            amount: 1_000_000,
            interest_rate: 12.0,
            tenure_months: 12,
        };
        let err = check_affordability(&application, 30000, 5000).unwrap_err();
        assert_eq!(err.available_income, 25000);
        assert!(err.monthly_emi > err.available_income);
        assert_eq!(err.max_affordable_principal % 1000, 0);

        // the suggested ceiling must itself pass the gate
        let retry = LoanApplication {
            amount: err.max_affordable_principal,
            ..application
        };
        assert!(check_affordability(&retry, 30000, 5000).is_ok());
    }

    #[test]
    fn affordable_application_returns_the_emi() {
        let application = LoanApplication {
            loan_type: LoanType::Vehicle,
            amount: 100000,
            interest_rate: 12.0,
            tenure_months: 12,
        };
        assert_eq!(check_affordability(&application, 30000, 5000), Ok(8885));
    }

    #[test]
    fn approval_freezes_the_schedule() {
        let mut loan = Loan::from_application(&LoanApplication {
            loan_type: LoanType::Home,
            amount: 100000,
            interest_rate: 12.0,
            tenure_months: 12,
        });
        approve_loan(&mut loan);
        assert_eq!(loan.status, LoanStatus::Approved);
        assert_eq!(loan.monthly_emi, 8885);
        assert_eq!(loan.outstanding_amount, 100000);
        assert_eq!(loan.remaining_emis, 12);
        assert_eq!(loan.paid_emis, 0);
    }
}
