use crate::api::deductions::{
    ComputeDeductionsRequest, DeductionBreakdownResponse, TdsRequest, TdsResponse,
};
use crate::api::loan::{EligibilityRequest, EmiRequest, EmiResponse, LoanApplicationRequest};
use crate::api::payroll::{AssembleRunRequest, PayrollRunResponse};
use crate::engine::deductions::TdsProjection;
use crate::engine::loan::{EligibilityParams, LoanEligibility};
use crate::engine::payroll::EmployeePayrollInput;
use crate::model::deduction::{
    DeductionConfig, DeductionResult, EsiConfig, LwfConfig, LwfRates, PfConfig,
    ProfessionalTaxConfig, Slab, TaxRegime, TaxRegimeConfig, TaxSlab, TdsConfig,
};
use crate::model::loan::{Loan, LoanApplication, LoanStatus, LoanType};
use crate::model::payroll::{
    PayrollLine, PayrollOverrides, PayrollPeriod, PayrollRunEntry, PayrollRunSummary,
    PayrollStatus,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paymaster API",
        version = "1.0.0",
        description = r#"
## Payroll Computation & Statutory Deduction Service

This API powers the payroll core of an HR administration suite. Every
endpoint is a stateless computation over the data in the request; record
storage, authentication and UI belong to the surrounding application.

### 🔹 Key Features
- **Statutory Deductions**
  - Itemized PF / ESI / professional tax / LWF figures per employee
  - Slab-based TDS projection (old and new regimes)
- **Loans**
  - EMI amortization quotes
  - Eligibility estimates under the debt-to-income policy
  - Affordability-gated application checks
- **Payroll Runs**
  - Assemble per-employee payroll lines for a month
  - Restore-verbatim reconciliation against an existing run

### 📦 Response Format
- JSON-based RESTful responses
- Policy violations return 400 with a structured message body

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::deductions::compute,
        crate::api::deductions::get_config,
        crate::api::deductions::compute_tds,

        crate::api::loan::emi_quote,
        crate::api::loan::eligibility,
        crate::api::loan::apply,

        crate::api::payroll::assemble_run
    ),
    components(
        schemas(
            ComputeDeductionsRequest,
            DeductionBreakdownResponse,
            TdsRequest,
            TdsResponse,
            TdsProjection,
            DeductionConfig,
            DeductionResult,
            PfConfig,
            EsiConfig,
            ProfessionalTaxConfig,
            Slab,
            TdsConfig,
            TaxRegime,
            TaxRegimeConfig,
            TaxSlab,
            LwfConfig,
            LwfRates,
            EmiRequest,
            EmiResponse,
            EligibilityRequest,
            EligibilityParams,
            LoanEligibility,
            LoanApplicationRequest,
            LoanApplication,
            Loan,
            LoanType,
            LoanStatus,
            AssembleRunRequest,
            PayrollRunResponse,
            EmployeePayrollInput,
            PayrollPeriod,
            PayrollOverrides,
            PayrollRunEntry,
            PayrollLine,
            PayrollRunSummary,
            PayrollStatus
        )
    ),
    tags(
        (name = "Deductions", description = "Statutory deduction APIs"),
        (name = "Loans", description = "Loan EMI and eligibility APIs"),
        (name = "Payroll", description = "Payroll run assembly APIs"),
    )
)]
pub struct ApiDoc;
