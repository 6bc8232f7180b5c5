//! Statutory deduction calculator: PF, ESI, professional tax, LWF, and
//! the TDS slab projection.
//!
//! Every statute is gated by its `enabled` flag; disabled means exactly
//! zero contribution, never a partial computation. A state missing
//! from a slab table yields `None` (unconfigured), which totals treat
//! as zero but callers can tell apart from a configured zero-tax slab.

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::deduction::{DeductionConfig, DeductionResult, Slab, TaxRegime, TaxSlab, TdsConfig};
use crate::model::salary::SalaryStructure;
use crate::utils::money::{clamp_amount, round_rupees};

/// Itemized employee/employer statutory deductions for one month.
///
/// `gross_salary` is the eligibility figure for ESI, professional tax
/// and LWF; the PF base is the basic salary capped at the PF ceiling.
pub fn compute_deductions(
    salary: &SalaryStructure,
    gross_salary: i64,
    state: &str,
    config: &DeductionConfig,
) -> DeductionResult {
    let gross = clamp_amount(gross_salary);
    let basic = clamp_amount(salary.basic_salary);

    let (pf_employee, pf_employer, pf_admin_charges) = if config.pf.enabled {
        let base = basic.min(clamp_amount(config.pf.ceiling)) as f64;
        (
            round_rupees(base * config.pf.employee_rate / 100.0),
            round_rupees(base * config.pf.employer_rate / 100.0),
            round_rupees(base * config.pf.admin_charges / 100.0),
        )
    } else {
        (0, 0, 0)
    };

    // ESI eligibility is a hard cutoff on gross salary, not a slab:
    // one rupee over the ceiling removes both contributions entirely.
    let (esi_employee, esi_employer) = if config.esi.enabled && gross <= config.esi.ceiling {
        (
            round_rupees(gross as f64 * config.esi.employee_rate / 100.0),
            round_rupees(gross as f64 * config.esi.employer_rate / 100.0),
        )
    } else {
        (0, 0)
    };

    let professional_tax = if config.professional_tax.enabled {
        config
            .professional_tax
            .state_rates
            .get(state)
            .map(|slabs| slab_tax(slabs, gross))
    } else {
        None
    };

    let (lwf_employee, lwf_employer) = if config.lwf.enabled {
        match config.lwf.state_rates.get(state) {
            Some(rates) => (
                Some(clamp_amount(rates.employee)),
                Some(clamp_amount(rates.employer)),
            ),
            None => (None, None),
        }
    } else {
        (None, None)
    };

    DeductionResult {
        pf_employee,
        pf_employer,
        pf_admin_charges,
        esi_employee,
        esi_employer,
        professional_tax,
        lwf_employee,
        lwf_employer,
    }
}

/// Flat tax from the first slab containing `amount`. A validated table
/// partitions `[0, ∞)`, so the fallback 0 is unreachable in practice.
fn slab_tax(slabs: &[Slab], amount: i64) -> i64 {
    slabs
        .iter()
        .find(|slab| slab.contains(amount))
        .map(|slab| clamp_amount(slab.tax))
        .unwrap_or(0)
}

/// Marginal slab tax on `taxable` annual income: each slab taxes the
/// part of the income that falls inside it. Rounded once, at the end.
pub fn annual_tax(taxable: i64, slabs: &[TaxSlab]) -> i64 {
    let taxable = clamp_amount(taxable);
    let mut tax = 0.0;
    for slab in slabs {
        if taxable <= slab.min {
            continue;
        }
        let upper = slab.max.map_or(taxable, |m| taxable.min(m));
        tax += (upper - slab.min) as f64 * slab.rate.max(0.0) / 100.0;
    }
    round_rupees(tax)
}

/// Annual TDS projection for one monthly gross figure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TdsProjection {
    /// Gross salary projected over twelve months.
    pub annual_income: i64,
    /// Annual income less the regime's basic exemption.
    pub taxable_income: i64,
    pub annual_tax: i64,
    /// Annual tax spread evenly over twelve months.
    pub monthly_tds: i64,
}

/// Projects a monthly gross salary to an annual figure, applies the
/// selected regime's exemption and slabs, and derives the equal
/// monthly withholding. The payroll assembler does not call this
/// automatically; TDS stays a per-run override fed by this figure.
pub fn project_tds(monthly_gross: i64, regime: TaxRegime, config: &TdsConfig) -> TdsProjection {
    if !config.enabled {
        return TdsProjection::default();
    }
    let annual_income = clamp_amount(monthly_gross) * 12;
    let regime_config = config.regime(regime);
    let taxable_income = clamp_amount(annual_income - clamp_amount(regime_config.basic_exemption));
    let annual = annual_tax(taxable_income, &regime_config.slabs);
    TdsProjection {
        annual_income,
        taxable_income,
        annual_tax: annual,
        monthly_tds: round_rupees(annual as f64 / 12.0),
    }
}

/// Monthly TDS figure alone, for callers that only want the deduction.
pub fn monthly_tds(monthly_gross: i64, regime: TaxRegime, config: &TdsConfig) -> i64 {
    project_tds(monthly_gross, regime, config).monthly_tds
}
