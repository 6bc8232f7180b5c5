use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, StrumDisplay, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PayrollStatus {
    Pending,
    Processed,
}

/// Target month of a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"month": 2, "year": 2026}))]
pub struct PayrollPeriod {
    /// 1-based calendar month.
    #[schema(example = 2)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,
}

impl PayrollPeriod {
    /// Calendar days in the period, or `None` for an out-of-range month.
    pub fn days_in_month(&self) -> Option<u32> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        Some((next - first).num_days() as u32)
    }
}

/// Manual per-run adjustments entered for one employee. These are not
/// part of the persisted salary structure; they exist only for the run
/// they were entered on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "bonus": 2000,
        "adjustments": -500,
        "tds": 1200,
        "loan_deductions": 8885
    })
)]
pub struct PayrollOverrides {
    #[schema(example = 2000)]
    #[serde(default)]
    pub bonus: i64,

    /// Ad-hoc adjustment; may be negative.
    #[schema(example = -500)]
    #[serde(default)]
    pub adjustments: i64,

    /// Tax deducted at source for this run. Not derived automatically;
    /// the `/deductions/tds` operation computes a suggested value.
    #[schema(example = 1200)]
    #[serde(default)]
    pub tds: i64,

    /// Current-month loan EMI collection, usually the loan engine's
    /// `monthly_emi` for the employee's running loans.
    #[schema(example = 8885)]
    #[serde(default)]
    pub loan_deductions: i64,

    /// Overrides the computed `days_worked` when set.
    #[schema(example = 26, nullable = true)]
    #[serde(default)]
    pub days_worked: Option<u32>,
}

/// One employee's line in a payroll run. All derived fields are
/// produced together by the assembler; there is no partial update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": 1001,
        "days_in_month": 28,
        "days_worked": 26,
        "excess_leave_days": 2,
        "bonus": 2000,
        "adjustments": 0,
        "tds": 0,
        "loan_deductions": 0,
        "gross_salary": 34500,
        "total_deductions": 2102,
        "net_salary": 34398,
        "status": "pending"
    })
)]
pub struct PayrollRunEntry {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = 28)]
    pub days_in_month: u32,

    #[schema(example = 26)]
    pub days_worked: u32,

    /// Approved leave days beyond the employee's entitlement.
    #[schema(example = 2)]
    pub excess_leave_days: u32,

    pub bonus: i64,
    pub adjustments: i64,
    pub tds: i64,
    pub loan_deductions: i64,

    pub gross_salary: i64,

    /// Employee-side statutory deductions for the month.
    pub total_deductions: i64,

    pub net_salary: i64,

    pub status: PayrollStatus,
}

/// A payroll line, tagged with the path that produced it: computed
/// fresh from the current salary structure, or restored verbatim from a
/// previously persisted run for the same period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "source", content = "entry", rename_all = "lowercase")]
pub enum PayrollLine {
    Computed(PayrollRunEntry),
    Restored(PayrollRunEntry),
}

impl PayrollLine {
    pub fn entry(&self) -> &PayrollRunEntry {
        match self {
            PayrollLine::Computed(entry) | PayrollLine::Restored(entry) => entry,
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, PayrollLine::Restored(_))
    }
}

/// Run-level totals for dashboards and the processing confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_count": 12,
        "restored_count": 3,
        "total_gross": 414000,
        "total_deductions": 25224,
        "total_net": 392776
    })
)]
pub struct PayrollRunSummary {
    pub employee_count: usize,
    pub restored_count: usize,
    pub total_gross: i64,
    pub total_deductions: i64,
    pub total_net: i64,
}
