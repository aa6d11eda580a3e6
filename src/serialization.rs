/// serialization support for plans
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::plan::InstallmentPlan;
use crate::types::{DurationUnit, PlanId};

/// serializable summary of a plan for display and reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanView {
    pub plan_id: PlanId,
    pub created_at: DateTime<Utc>,
    pub currency: String,
    pub customer: CustomerView,
    pub plot: PlotView,
    pub terms: TermsView,
    pub progress: ProgressView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub name: String,
    pub phone: Option<String>,
    pub national_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotView {
    pub number: String,
    pub block: String,
    pub size: String,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermsView {
    pub down_payment: Money,
    pub remaining: Money,
    pub development_charges: Money,
    /// "Full Payment" or e.g. "10 months"
    pub duration: String,
    pub full_payment: bool,
    pub installments: u32,
    pub rounding_drift: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressView {
    pub total_due: Money,
    pub total_paid: Money,
    pub total_outstanding: Money,
    pub paid_count: u32,
    pub pending_count: u32,
    pub next_due: Option<NextDueView>,
    pub settled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextDueView {
    pub sequence_number: u32,
    pub period: String,
    pub due_date: NaiveDate,
    pub total: Money,
}

fn describe_duration(value: u32, unit: DurationUnit, full_payment: bool) -> String {
    if full_payment {
        "Full Payment".to_string()
    } else {
        format!("{} {}", value, unit)
    }
}

impl PlanView {
    pub fn from_plan(plan: &InstallmentPlan, currency: &str) -> Self {
        PlanView {
            plan_id: plan.plan_id,
            created_at: plan.created_at,
            currency: currency.to_string(),
            customer: CustomerView {
                name: plan.customer_name.clone(),
                phone: plan.customer_phone.clone(),
                national_id: plan.customer_national_id.clone(),
            },
            plot: PlotView {
                number: plan.plot_number.clone(),
                block: plan.plot_block.clone(),
                size: plan.plot_size.clone(),
                price: plan.plot_price,
            },
            terms: TermsView {
                down_payment: plan.down_payment,
                remaining: plan.remaining,
                development_charges: plan.development_charges,
                duration: describe_duration(plan.duration_value, plan.duration_unit, plan.full_payment),
                full_payment: plan.full_payment,
                installments: plan.installment_count(),
                rounding_drift: plan.rounding_drift(),
            },
            progress: ProgressView {
                total_due: plan.total_due(),
                total_paid: plan.total_paid(),
                total_outstanding: plan.total_outstanding(),
                paid_count: plan.paid_count(),
                pending_count: plan.pending_count(),
                next_due: plan.next_pending().map(|line| NextDueView {
                    sequence_number: line.sequence_number,
                    period: line.period.clone(),
                    due_date: line.due_date,
                    total: line.total,
                }),
                settled: plan.is_settled(),
            },
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
