use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{DurationUnit, InstallmentStatus, NationalId, PlanId};

/// one scheduled payment obligation within a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentLine {
    #[serde(alias = "id")]
    pub sequence_number: u32,
    pub period: String,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub development_charge: Money,
    pub total: Money,
    pub status: InstallmentStatus,
}

impl InstallmentLine {
    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    pub fn is_pending(&self) -> bool {
        self.status == InstallmentStatus::Pending
    }

    fn paid(&self) -> Self {
        Self {
            status: InstallmentStatus::Paid,
            ..self.clone()
        }
    }
}

/// installment plan for one customer and one plot
///
/// Customer and plot fields are a snapshot taken when the plan is generated;
/// later edits to the customer or plot records are not reflected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPlan {
    pub plan_id: PlanId,
    pub created_at: DateTime<Utc>,

    // customer snapshot
    pub customer_name: String,
    pub customer_phone: Option<String>,
    #[serde(alias = "cnic")]
    pub customer_national_id: String,

    // plot snapshot
    pub plot_number: String,
    pub plot_size: String,
    pub plot_block: String,
    pub plot_price: Money,

    // terms
    pub down_payment: Money,
    pub development_charges: Money,
    pub remaining: Money,
    pub duration_value: u32,
    #[serde(alias = "durationType")]
    pub duration_unit: DurationUnit,
    pub full_payment: bool,

    pub installments: Vec<InstallmentLine>,
}

impl InstallmentPlan {
    /// compare against a raw national id, ignoring formatting separators
    pub fn matches_national_id(&self, national_id: &str) -> bool {
        NationalId::matches(&self.customer_national_id, national_id)
    }

    pub fn line(&self, sequence_number: u32) -> Option<&InstallmentLine> {
        self.installments
            .iter()
            .find(|l| l.sequence_number == sequence_number)
    }

    /// first line still pending, in schedule order
    pub fn next_pending(&self) -> Option<&InstallmentLine> {
        self.installments.iter().find(|l| l.is_pending())
    }

    pub fn installment_count(&self) -> u32 {
        self.installments.len() as u32
    }

    pub fn paid_count(&self) -> u32 {
        self.installments.iter().filter(|l| l.is_paid()).count() as u32
    }

    pub fn pending_count(&self) -> u32 {
        self.installments.iter().filter(|l| l.is_pending()).count() as u32
    }

    /// sum of every line's total (principal plus development charge)
    pub fn total_due(&self) -> Money {
        self.installments.iter().map(|l| l.total).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.installments
            .iter()
            .filter(|l| l.is_paid())
            .map(|l| l.total)
            .sum()
    }

    pub fn total_outstanding(&self) -> Money {
        self.installments
            .iter()
            .filter(|l| l.is_pending())
            .map(|l| l.total)
            .sum()
    }

    /// principal actually scheduled across all lines
    pub fn scheduled_principal(&self) -> Money {
        self.installments.iter().map(|l| l.amount).sum()
    }

    /// development charges actually scheduled across all lines
    pub fn scheduled_development_charges(&self) -> Money {
        self.installments.iter().map(|l| l.development_charge).sum()
    }

    /// scheduled principal minus `remaining`
    ///
    /// Per-line shares are rounded independently and never reconciled, so the
    /// schedule can over- or under-collect by a few currency units.
    pub fn rounding_drift(&self) -> Money {
        self.scheduled_principal() - self.remaining
    }

    pub fn is_settled(&self) -> bool {
        !self.installments.is_empty() && self.installments.iter().all(|l| l.is_paid())
    }

    /// copy of this plan with one line marked Paid
    ///
    /// A line that is already Paid stays Paid.
    pub fn with_line_paid(&self, sequence_number: u32) -> Result<Self> {
        if self.line(sequence_number).is_none() {
            return Err(LedgerError::InstallmentNotFound { sequence_number });
        }

        let installments = self
            .installments
            .iter()
            .map(|l| {
                if l.sequence_number == sequence_number {
                    l.paid()
                } else {
                    l.clone()
                }
            })
            .collect();

        Ok(Self {
            installments,
            ..self.clone()
        })
    }

    /// copy of this plan with every line Paid and `full_payment` set
    ///
    /// Paying everything also reclassifies the plan as a full-payment plan.
    /// The schedule, `down_payment` and `remaining` are left as generated.
    pub fn with_all_paid(&self) -> Self {
        Self {
            installments: self.installments.iter().map(InstallmentLine::paid).collect(),
            full_payment: true,
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
