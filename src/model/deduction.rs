use std::collections::HashMap;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

/// Provident fund section of the statutory configuration. Rates are
/// percentages of the PF base (basic salary capped at `ceiling`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PfConfig {
    #[schema(example = true)]
    pub enabled: bool,

    #[schema(example = 12.0)]
    #[serde(default)]
    pub employee_rate: f64,

    #[schema(example = 12.0)]
    #[serde(default)]
    pub employer_rate: f64,

    /// Wage ceiling on the PF base, in rupees.
    #[schema(example = 15000)]
    #[serde(default)]
    pub ceiling: i64,

    /// Employer-side administration charge, percent of the PF base.
    #[schema(example = 0.5)]
    #[serde(default)]
    pub admin_charges: f64,
}

/// State insurance section. Eligibility is a hard cutoff on gross
/// salary: above `ceiling` no contribution applies at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EsiConfig {
    #[schema(example = true)]
    pub enabled: bool,

    #[schema(example = 0.75)]
    #[serde(default)]
    pub employee_rate: f64,

    #[schema(example = 3.25)]
    #[serde(default)]
    pub employer_rate: f64,

    #[schema(example = 21000)]
    #[serde(default)]
    pub ceiling: i64,
}

/// One professional-tax slab. `max: None` means unbounded above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Slab {
    #[schema(example = 10001)]
    pub min: i64,

    #[schema(example = 15000, nullable = true)]
    #[serde(default)]
    pub max: Option<i64>,

    /// Flat monthly tax for salaries falling in this slab.
    #[schema(example = 200)]
    pub tax: i64,
}

impl Slab {
    pub fn contains(&self, amount: i64) -> bool {
        amount >= self.min && self.max.map_or(true, |m| amount <= m)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfessionalTaxConfig {
    #[schema(example = true)]
    pub enabled: bool,

    /// Slab table per state. A state missing from this map is reported
    /// as unconfigured, not as a zero-tax jurisdiction.
    #[serde(default)]
    pub state_rates: HashMap<String, Vec<Slab>>,
}

/// One income-tax slab; `rate` is a percentage applied to the part of
/// taxable income that falls inside the slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaxSlab {
    #[schema(example = 0)]
    pub min: i64,

    #[schema(example = 250000, nullable = true)]
    #[serde(default)]
    pub max: Option<i64>,

    #[schema(example = 5.0)]
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaxRegimeConfig {
    #[schema(example = 250000)]
    #[serde(default)]
    pub basic_exemption: i64,

    pub slabs: Vec<TaxSlab>,
}

/// Which income-tax regime a deduction is evaluated under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, StrumDisplay, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaxRegime {
    Old,
    New,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TdsConfig {
    #[schema(example = true)]
    pub enabled: bool,

    #[schema(example = "2025-26")]
    pub financial_year: String,

    pub old_regime: TaxRegimeConfig,
    pub new_regime: TaxRegimeConfig,
}

impl TdsConfig {
    pub fn regime(&self, regime: TaxRegime) -> &TaxRegimeConfig {
        match regime {
            TaxRegime::Old => &self.old_regime,
            TaxRegime::New => &self.new_regime,
        }
    }
}

/// Flat monthly labour-welfare-fund contributions for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LwfRates {
    #[schema(example = 12)]
    pub employee: i64,

    #[schema(example = 36)]
    pub employer: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LwfConfig {
    #[schema(example = true)]
    pub enabled: bool,

    #[serde(default)]
    pub state_rates: HashMap<String, LwfRates>,
}

/// Tenant-wide statutory deduction configuration. Mutated only through
/// administration; every computation receives it as a read-only
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeductionConfig {
    pub pf: PfConfig,
    pub esi: EsiConfig,
    pub professional_tax: ProfessionalTaxConfig,
    pub tds: TdsConfig,
    pub lwf: LwfConfig,
}

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[display(fmt = "professional tax slabs for {} do not start at 0", state)]
    SlabsNotFromZero { state: String },

    #[display(fmt = "professional tax slabs for {} leave a gap or overlap at {}", state, at)]
    SlabGap { state: String, at: i64 },

    #[display(
        fmt = "professional tax slabs for {} must end in exactly one unbounded slab",
        state
    )]
    SlabNotUnbounded { state: String },

    #[display(fmt = "professional tax slab table for {} is empty", state)]
    EmptySlabTable { state: String },
}

/// Checks that a slab table partitions `[0, ∞)`: ascending, gap-free,
/// non-overlapping, last slab open-ended.
pub fn validate_slabs(state: &str, slabs: &[Slab]) -> Result<(), ConfigError> {
    let Some(first) = slabs.first() else {
        return Err(ConfigError::EmptySlabTable {
            state: state.to_string(),
        });
    };
    if first.min != 0 {
        return Err(ConfigError::SlabsNotFromZero {
            state: state.to_string(),
        });
    }
    for pair in slabs.windows(2) {
        let upper = pair[0].max.ok_or_else(|| ConfigError::SlabNotUnbounded {
            state: state.to_string(),
        })?;
        if pair[1].min != upper + 1 {
            return Err(ConfigError::SlabGap {
                state: state.to_string(),
                at: pair[1].min,
            });
        }
    }
    // only the final slab may (and must) be open-ended
    let last = slabs.last().unwrap();
    if last.max.is_some() {
        return Err(ConfigError::SlabNotUnbounded {
            state: state.to_string(),
        });
    }
    Ok(())
}

impl DeductionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (state, slabs) in &self.professional_tax.state_rates {
            validate_slabs(state, slabs)?;
        }
        Ok(())
    }

    /// Built-in snapshot used when no `DEDUCTION_CONFIG_PATH` file is
    /// supplied: current Indian PF/ESI parameters plus slab tables for
    /// the states the suite ships with.
    pub fn india_defaults() -> Self {
        let mut pt_states = HashMap::new();
        pt_states.insert(
            "Maharashtra".to_string(),
            vec![
                Slab { min: 0, max: Some(7500), tax: 0 },
                Slab { min: 7501, max: Some(10000), tax: 175 },
                Slab { min: 10001, max: Some(15000), tax: 200 },
                Slab { min: 15001, max: None, tax: 200 },
            ],
        );
        pt_states.insert(
            "Karnataka".to_string(),
            vec![
                Slab { min: 0, max: Some(15000), tax: 0 },
                Slab { min: 15001, max: None, tax: 200 },
            ],
        );
        pt_states.insert(
            "West Bengal".to_string(),
            vec![
                Slab { min: 0, max: Some(10000), tax: 0 },
                Slab { min: 10001, max: Some(15000), tax: 110 },
                Slab { min: 15001, max: Some(25000), tax: 130 },
                Slab { min: 25001, max: Some(40000), tax: 150 },
                Slab { min: 40001, max: None, tax: 200 },
            ],
        );
        pt_states.insert(
            "Tamil Nadu".to_string(),
            vec![
                Slab { min: 0, max: Some(21000), tax: 0 },
                Slab { min: 21001, max: Some(30000), tax: 135 },
                Slab { min: 30001, max: Some(45000), tax: 315 },
                Slab { min: 45001, max: Some(60000), tax: 690 },
                Slab { min: 60001, max: Some(75000), tax: 1025 },
                Slab { min: 75001, max: None, tax: 1250 },
            ],
        );
        // Delhi levies no professional tax: a configured all-zero slab,
        // distinct from a state that is absent from the table.
        pt_states.insert(
            "Delhi".to_string(),
            vec![Slab { min: 0, max: None, tax: 0 }],
        );

        let mut lwf_states = HashMap::new();
        lwf_states.insert("Maharashtra".to_string(), LwfRates { employee: 12, employer: 36 });
        lwf_states.insert("Karnataka".to_string(), LwfRates { employee: 20, employer: 40 });
        lwf_states.insert("West Bengal".to_string(), LwfRates { employee: 3, employer: 15 });
        lwf_states.insert("Tamil Nadu".to_string(), LwfRates { employee: 10, employer: 20 });
        lwf_states.insert("Delhi".to_string(), LwfRates { employee: 9, employer: 27 });

        DeductionConfig {
            pf: PfConfig {
                enabled: true,
                employee_rate: 12.0,
                employer_rate: 12.0,
                ceiling: 15000,
                admin_charges: 0.5,
            },
            esi: EsiConfig {
                enabled: true,
                employee_rate: 0.75,
                employer_rate: 3.25,
                ceiling: 21000,
            },
            professional_tax: ProfessionalTaxConfig {
                enabled: true,
                state_rates: pt_states,
            },
            tds: TdsConfig {
                enabled: true,
                financial_year: "2025-26".to_string(),
                old_regime: TaxRegimeConfig {
                    basic_exemption: 250000,
                    slabs: vec![
                        TaxSlab { min: 0, max: Some(250000), rate: 5.0 },
                        TaxSlab { min: 250001, max: Some(750000), rate: 20.0 },
                        TaxSlab { min: 750001, max: None, rate: 30.0 },
                    ],
                },
                new_regime: TaxRegimeConfig {
                    basic_exemption: 300000,
                    slabs: vec![
                        TaxSlab { min: 0, max: Some(300000), rate: 5.0 },
                        TaxSlab { min: 300001, max: Some(600000), rate: 10.0 },
                        TaxSlab { min: 600001, max: Some(900000), rate: 15.0 },
                        TaxSlab { min: 900001, max: Some(1200000), rate: 20.0 },
                        TaxSlab { min: 1200001, max: None, rate: 30.0 },
                    ],
                },
            },
            lwf: LwfConfig {
                enabled: true,
                state_rates: lwf_states,
            },
        }
    }
}

/// Itemized statutory deductions for one employee and one month.
///
/// `professional_tax` and the LWF amounts are `None` when the statute is
/// disabled or the employee's state has no entry in the slab table;
/// `Some(0)` is a genuine zero-tax jurisdiction. Totals treat `None`
/// as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "pf_employee": 1800,
        "pf_employer": 1800,
        "pf_admin_charges": 75,
        "esi_employee": 90,
        "esi_employer": 390,
        "professional_tax": 200,
        "lwf_employee": 12,
        "lwf_employer": 36
    })
)]
pub struct DeductionResult {
    pub pf_employee: i64,
    pub pf_employer: i64,
    pub pf_admin_charges: i64,
    pub esi_employee: i64,
    pub esi_employer: i64,

    #[schema(nullable = true)]
    pub professional_tax: Option<i64>,

    #[schema(nullable = true)]
    pub lwf_employee: Option<i64>,

    #[schema(nullable = true)]
    pub lwf_employer: Option<i64>,
}

impl DeductionResult {
    /// Amount withheld from the employee's salary.
    pub fn employee_total(&self) -> i64 {
        self.pf_employee
            + self.esi_employee
            + self.professional_tax.unwrap_or(0)
            + self.lwf_employee.unwrap_or(0)
    }

    /// Employer-side statutory cost, administration charges included.
    pub fn employer_total(&self) -> i64 {
        self.pf_employer
            + self.pf_admin_charges
            + self.esi_employer
            + self.lwf_employer.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_contains_respects_bounds() {
        let slab = Slab { min: 7501, max: Some(10000), tax: 175 };
        assert!(!slab.contains(7500));
        assert!(slab.contains(7501));
        assert!(slab.contains(10000));
        assert!(!slab.contains(10001));
    }

    #[test]
    fn open_ended_slab_contains_everything_above_min() {
        let slab = Slab { min: 15001, max: None, tax: 200 };
        assert!(slab.contains(15001));
        assert!(slab.contains(10_000_000));
        assert!(!slab.contains(15000));
    }

    #[test]
    fn india_defaults_pass_validation() {
        assert_eq!(DeductionConfig::india_defaults().validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_gap() {
        let slabs = vec![
            Slab { min: 0, max: Some(10000), tax: 0 },
            Slab { min: 10002, max: None, tax: 200 },
        ];
        assert_eq!(
            validate_slabs("X", &slabs),
            Err(ConfigError::SlabGap { state: "X".to_string(), at: 10002 })
        );
    }

    #[test]
    fn validation_rejects_overlap() {
        let slabs = vec![
            Slab { min: 0, max: Some(10000), tax: 0 },
            Slab { min: 10000, max: None, tax: 200 },
        ];
        assert!(validate_slabs("X", &slabs).is_err());
    }

    #[test]
    fn validation_rejects_bounded_last_slab() {
        let slabs = vec![Slab { min: 0, max: Some(10000), tax: 0 }];
        assert_eq!(
            validate_slabs("X", &slabs),
            Err(ConfigError::SlabNotUnbounded { state: "X".to_string() })
        );
    }

    #[test]
    fn validation_rejects_nonzero_start() {
        let slabs = vec![Slab { min: 100, max: None, tax: 0 }];
        assert_eq!(
            validate_slabs("X", &slabs),
            Err(ConfigError::SlabsNotFromZero { state: "X".to_string() })
        );
    }

    #[test]
    fn employee_total_treats_unconfigured_as_zero() {
        let result = DeductionResult {
            pf_employee: 1800,
            esi_employee: 90,
            professional_tax: None,
            lwf_employee: None,
            ..Default::default()
        };
        assert_eq!(result.employee_total(), 1890);
    }
}
