use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed monthly salary components for one employee. Owned by the HR
/// record store; treated as an immutable snapshot during a payroll
/// computation. Amounts are whole rupees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "basic_salary": 20000,
        "house_rent_allowance": 8000,
        "medical_allowance": 1500,
        "leave_travel_allowance": 1500,
        "conveyance_allowance": 1000,
        "performance_incentive": 2000,
        "other_benefits": 500
    })
)]
pub struct SalaryStructure {
    #[schema(example = 20000)]
    #[serde(default)]
    pub basic_salary: i64,

    #[schema(example = 8000)]
    #[serde(default)]
    pub house_rent_allowance: i64,

    #[schema(example = 1500)]
    #[serde(default)]
    pub medical_allowance: i64,

    #[schema(example = 1500)]
    #[serde(default)]
    pub leave_travel_allowance: i64,

    #[schema(example = 1000)]
    #[serde(default)]
    pub conveyance_allowance: i64,

    #[schema(example = 2000)]
    #[serde(default)]
    pub performance_incentive: i64,

    #[schema(example = 500)]
    #[serde(default)]
    pub other_benefits: i64,
}

impl SalaryStructure {
    /// Gross monthly salary: the sum of every earning component.
    /// Negative components are treated as 0.
    pub fn gross(&self) -> i64 {
        [
            self.basic_salary,
            self.house_rent_allowance,
            self.medical_allowance,
            self.leave_travel_allowance,
            self.conveyance_allowance,
            self.performance_incentive,
            self.other_benefits,
        ]
        .iter()
        .map(|c| (*c).max(0))
        .sum()
    }
}
