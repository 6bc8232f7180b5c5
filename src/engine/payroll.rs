//! Payroll run assembly: one line per employee for a target month,
//! reconciled against a previously persisted run for the same period.
//!
//! Reconciliation is last-computed-wins: an employee present in the
//! existing run is restored verbatim, so payroll a user has already
//! hand-adjusted is never clobbered by a later salary-structure edit.

use std::collections::HashMap;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::deductions::compute_deductions;
use crate::model::deduction::DeductionConfig;
use crate::model::payroll::{
    PayrollLine, PayrollOverrides, PayrollPeriod, PayrollRunEntry, PayrollRunSummary,
    PayrollStatus,
};
use crate::model::salary::SalaryStructure;
use crate::utils::money::clamp_amount;

/// Per-employee inputs supplied by the HR record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": 1001,
        "state": "Maharashtra",
        "salary": {
            "basic_salary": 20000,
            "house_rent_allowance": 8000,
            "medical_allowance": 1500,
            "leave_travel_allowance": 1500,
            "conveyance_allowance": 1000,
            "performance_incentive": 2000,
            "other_benefits": 500
        }
    })
)]
pub struct EmployeePayrollInput {
    #[schema(example = 1001)]
    pub employee_id: u64,

    /// Jurisdiction used for professional tax and LWF lookups.
    #[schema(example = "Maharashtra")]
    pub state: String,

    pub salary: SalaryStructure,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum PayrollRunError {
    #[display(fmt = "no employees selected for the payroll run")]
    NoEmployeesSelected,

    #[display(fmt = "invalid payroll period: month {} is out of range", month)]
    InvalidPeriod { month: u32 },
}

/// Builds one payroll line for every employee.
///
/// Employees found in `existing_run` are restored verbatim and tagged
/// [`PayrollLine::Restored`]; everyone else is computed fresh from the
/// current salary structure, leave data and overrides. The same
/// inputs always produce bit-identical lines.
pub fn assemble_payroll_run(
    employees: &[EmployeePayrollInput],
    period: PayrollPeriod,
    excess_leave_by_employee: &HashMap<u64, u32>,
    overrides_by_employee: &HashMap<u64, PayrollOverrides>,
    existing_run: Option<&[PayrollRunEntry]>,
    config: &DeductionConfig,
) -> Result<Vec<PayrollLine>, PayrollRunError> {
    if employees.is_empty() {
        return Err(PayrollRunError::NoEmployeesSelected);
    }
    let days_in_month = period
        .days_in_month()
        .ok_or(PayrollRunError::InvalidPeriod { month: period.month })?;

    let persisted: HashMap<u64, &PayrollRunEntry> = existing_run
        .unwrap_or_default()
        .iter()
        .map(|entry| (entry.employee_id, entry))
        .collect();

    let lines = employees
        .iter()
        .map(|employee| {
            if let Some(previous) = persisted.get(&employee.employee_id) {
                return PayrollLine::Restored((*previous).clone());
            }
            let excess_leave = excess_leave_by_employee
                .get(&employee.employee_id)
                .copied()
                .unwrap_or(0);
            let overrides = overrides_by_employee
                .get(&employee.employee_id)
                .cloned()
                .unwrap_or_default();
            PayrollLine::Computed(compute_entry(
                employee,
                days_in_month,
                excess_leave,
                &overrides,
                config,
            ))
        })
        .collect();

    Ok(lines)
}

/// Derives one complete entry. Every derived field comes out of this
/// single path, so a change to any input rebuilds all of them together
/// and no caller can observe a partially-stale line.
pub fn compute_entry(
    employee: &EmployeePayrollInput,
    days_in_month: u32,
    excess_leave_days: u32,
    overrides: &PayrollOverrides,
    config: &DeductionConfig,
) -> PayrollRunEntry {
    let days_worked = overrides
        .days_worked
        .unwrap_or_else(|| days_in_month.saturating_sub(excess_leave_days))
        .min(days_in_month);

    let gross_salary = employee.salary.gross();
    let statutory = compute_deductions(&employee.salary, gross_salary, &employee.state, config);
    let total_deductions = statutory.employee_total();

    let bonus = clamp_amount(overrides.bonus);
    let adjustments = overrides.adjustments;
    let tds = clamp_amount(overrides.tds);
    let loan_deductions = clamp_amount(overrides.loan_deductions);

    let net_salary = gross_salary - total_deductions + bonus + adjustments - loan_deductions - tds;

    PayrollRunEntry {
        employee_id: employee.employee_id,
        days_in_month,
        days_worked,
        excess_leave_days,
        bonus,
        adjustments,
        tds,
        loan_deductions,
        gross_salary,
        total_deductions,
        net_salary,
        status: PayrollStatus::Pending,
    }
}

/// Run-level totals over the assembled lines.
pub fn summarize_run(lines: &[PayrollLine]) -> PayrollRunSummary {
    let mut summary = PayrollRunSummary {
        employee_count: lines.len(),
        ..Default::default()
    };
    for line in lines {
        if line.is_restored() {
            summary.restored_count += 1;
        }
        let entry = line.entry();
        summary.total_gross += entry.gross_salary;
        summary.total_deductions += entry.total_deductions;
        summary.total_net += entry.net_salary;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: u64, basic: i64, state: &str) -> EmployeePayrollInput {
        EmployeePayrollInput {
            employee_id: id,
            state: state.to_string(),
            salary: SalaryStructure {
                basic_salary: basic,
                house_rent_allowance: basic / 2,
                ..Default::default()
            },
        }
    }

    fn period() -> PayrollPeriod {
        PayrollPeriod { month: 2, year: 2026 }
    }

    #[test]
    fn empty_selection_is_a_validation_error() {
        let result = assemble_payroll_run(
            &[],
            period(),
            &HashMap::new(),
            &HashMap::new(),
            None,
            &DeductionConfig::india_defaults(),
        );
        assert_eq!(result, Err(PayrollRunError::NoEmployeesSelected));
    }

    #[test]
    fn out_of_range_month_is_a_validation_error() {
        let result = assemble_payroll_run(
            &[employee(1, 20000, "Delhi")],
            PayrollPeriod { month: 13, year: 2026 },
            &HashMap::new(),
            &HashMap::new(),
            None,
            &DeductionConfig::india_defaults(),
        );
        assert_eq!(result, Err(PayrollRunError::InvalidPeriod { month: 13 }));
    }

    #[test]
    fn fresh_entry_combines_salary_leave_and_overrides() {
        let config = DeductionConfig::india_defaults();
        let staff = [employee(1, 20000, "Maharashtra")];
        let leave = HashMap::from([(1u64, 2u32)]);
        let overrides = HashMap::from([(
            1u64,
            PayrollOverrides {
                bonus: 2000,
                adjustments: -500,
                tds: 1200,
                loan_deductions: 3000,
                days_worked: None,
            },
        )]);

        let lines =
            assemble_payroll_run(&staff, period(), &leave, &overrides, None, &config).unwrap();
        assert_eq!(lines.len(), 1);
        let entry = lines[0].entry();

        assert_eq!(entry.days_in_month, 28);
        assert_eq!(entry.excess_leave_days, 2);
        assert_eq!(entry.days_worked, 26);
        assert_eq!(entry.gross_salary, 30000);

        let statutory =
            compute_deductions(&staff[0].salary, 30000, "Maharashtra", &config);
        assert_eq!(entry.total_deductions, statutory.employee_total());
        assert_eq!(
            entry.net_salary,
            30000 - entry.total_deductions + 2000 - 500 - 3000 - 1200
        );
        assert_eq!(entry.status, PayrollStatus::Pending);
        assert!(!lines[0].is_restored());
    }

    #[test]
    fn existing_entries_are_restored_verbatim() {
        let config = DeductionConfig::india_defaults();
        let staff = [employee(1, 20000, "Maharashtra"), employee(2, 15000, "Karnataka")];

        let persisted = PayrollRunEntry {
            employee_id: 1,
            days_in_month: 28,
            days_worked: 20,
            excess_leave_days: 8,
            bonus: 9999,
            adjustments: 1,
            tds: 42,
            loan_deductions: 7,
            gross_salary: 123456,
            total_deductions: 654,
            net_salary: 130753,
            status: PayrollStatus::Processed,
        };

        let lines = assemble_payroll_run(
            &staff,
            period(),
            &HashMap::new(),
            &HashMap::new(),
            Some(std::slice::from_ref(&persisted)),
            &config,
        )
        .unwrap();

        // employee 1 keeps the hand-adjusted figures, employee 2 is fresh
        assert_eq!(lines[0], PayrollLine::Restored(persisted));
        assert!(!lines[1].is_restored());
        assert_eq!(lines[1].entry().employee_id, 2);
    }

    #[test]
    fn assembly_is_idempotent() {
        let config = DeductionConfig::india_defaults();
        let staff = [employee(1, 20000, "Maharashtra"), employee(2, 15000, "Karnataka")];
        let leave = HashMap::from([(2u64, 1u32)]);
        let overrides = HashMap::from([(1u64, PayrollOverrides { bonus: 500, ..Default::default() })]);

        let first =
            assemble_payroll_run(&staff, period(), &leave, &overrides, None, &config).unwrap();
        let second =
            assemble_payroll_run(&staff, period(), &leave, &overrides, None, &config).unwrap();
        assert_eq!(first, second);

        // and with the first result persisted, every line restores
        let persisted: Vec<PayrollRunEntry> =
            first.iter().map(|line| line.entry().clone()).collect();
        let third = assemble_payroll_run(
            &staff,
            period(),
            &leave,
            &overrides,
            Some(&persisted),
            &config,
        )
        .unwrap();
        assert!(third.iter().all(PayrollLine::is_restored));
        assert_eq!(
            third.iter().map(|l| l.entry().clone()).collect::<Vec<_>>(),
            persisted
        );
    }

    #[test]
    fn days_worked_override_wins_but_is_capped() {
        let config = DeductionConfig::india_defaults();
        let staff = [employee(1, 20000, "Delhi")];
        let overrides = HashMap::from([(
            1u64,
            PayrollOverrides { days_worked: Some(40), ..Default::default() },
        )]);
        let lines = assemble_payroll_run(
            &staff,
            period(),
            &HashMap::new(),
            &overrides,
            None,
            &config,
        )
        .unwrap();
        assert_eq!(lines[0].entry().days_worked, 28);
    }

    #[test]
    fn excess_leave_beyond_the_month_floors_days_worked_at_zero() {
        let config = DeductionConfig::india_defaults();
        let staff = [employee(1, 20000, "Delhi")];
        let leave = HashMap::from([(1u64, 45u32)]);
        let lines =
            assemble_payroll_run(&staff, period(), &leave, &HashMap::new(), None, &config)
                .unwrap();
        assert_eq!(lines[0].entry().days_worked, 0);
    }

    #[test]
    fn negative_overrides_coerce_except_adjustments() {
        let config = DeductionConfig::india_defaults();
        let staff = [employee(1, 10000, "Delhi")];
        let overrides = HashMap::from([(
            1u64,
            PayrollOverrides {
                bonus: -1000,
                adjustments: -750,
                tds: -10,
                loan_deductions: -5,
                days_worked: None,
            },
        )]);
        let lines = assemble_payroll_run(
            &staff,
            period(),
            &HashMap::new(),
            &overrides,
            None,
            &config,
        )
        .unwrap();
        let entry = lines[0].entry();
        assert_eq!(entry.bonus, 0);
        assert_eq!(entry.tds, 0);
        assert_eq!(entry.loan_deductions, 0);
        assert_eq!(entry.adjustments, -750);
    }

    #[test]
    fn summary_totals_the_lines() {
        let config = DeductionConfig::india_defaults();
        let staff = [employee(1, 20000, "Maharashtra"), employee(2, 15000, "Karnataka")];
        let lines = assemble_payroll_run(
            &staff,
            period(),
            &HashMap::new(),
            &HashMap::new(),
            None,
            &config,
        )
        .unwrap();

        let summary = summarize_run(&lines);
        assert_eq!(summary.employee_count, 2);
        assert_eq!(summary.restored_count, 0);
        assert_eq!(
            summary.total_gross,
            lines.iter().map(|l| l.entry().gross_salary).sum::<i64>()
        );
        assert_eq!(
            summary.total_net,
            lines.iter().map(|l| l.entry().net_salary).sum::<i64>()
        );
    }
}
