use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::plan::InstallmentLine;
use crate::types::{DurationUnit, InstallmentStatus, PlanDuration};

/// label used on the single line of a full-payment plan
pub const FULL_PAYMENT_LABEL: &str = "Full Payment";

/// payment terms a schedule is built from
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleTerms {
    pub price: Money,
    pub down_payment: Option<Money>,
    pub development_charges: Option<Money>,
    pub duration: Option<PlanDuration>,
    pub full_payment: bool,
}

impl ScheduleTerms {
    /// lump-sum terms for `price`
    pub fn full(price: Money) -> Self {
        Self {
            price,
            down_payment: None,
            development_charges: None,
            duration: None,
            full_payment: true,
        }
    }

    /// amortized terms for `price` after `down_payment`
    pub fn installments(price: Money, down_payment: Money, duration: PlanDuration) -> Self {
        Self {
            price,
            down_payment: Some(down_payment),
            development_charges: None,
            duration: Some(duration),
            full_payment: false,
        }
    }

    pub fn with_development_charges(mut self, charges: Money) -> Self {
        self.development_charges = Some(charges);
        self
    }

    pub fn development_charges(&self) -> Money {
        self.development_charges.unwrap_or(Money::ZERO)
    }

    /// check price and terms, returning the number of installment periods
    pub fn validate(&self) -> Result<u32> {
        if !self.price.is_positive() {
            return Err(LedgerError::InvalidPlotPrice { price: self.price });
        }

        if self.development_charges().is_negative() {
            return Err(LedgerError::terms(format!(
                "development charges cannot be negative: {}",
                self.development_charges()
            )));
        }

        if self.full_payment {
            return Ok(1);
        }

        let down_payment = self
            .down_payment
            .ok_or_else(|| LedgerError::terms("down payment is required"))?;
        if !down_payment.is_positive() {
            return Err(LedgerError::terms(format!(
                "down payment must be positive: {}",
                down_payment
            )));
        }
        if down_payment >= self.price {
            return Err(LedgerError::terms(format!(
                "down payment {} must be less than price {}",
                down_payment, self.price
            )));
        }

        let duration = self
            .duration
            .ok_or_else(|| LedgerError::terms("duration is required"))?;
        if duration.value == 0 {
            return Err(LedgerError::terms("duration must be positive"));
        }

        duration
            .periods()
            .ok_or_else(|| LedgerError::terms(format!("duration too long: {} {}", duration.value, duration.unit)))
    }
}

/// installment schedule computed from validated terms
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentSchedule {
    pub periods: u32,
    pub remaining: Money,
    pub per_installment: Money,
    pub per_development_charge: Money,
    pub lines: Vec<InstallmentLine>,
}

impl InstallmentSchedule {
    /// generate lines starting on `start_date`
    ///
    /// Per-line shares are rounded to `scale` decimal places, halves away from
    /// zero. The remainder left by rounding is not pushed onto any line.
    pub fn generate(terms: &ScheduleTerms, start_date: NaiveDate, scale: u32) -> Result<Self> {
        let periods = terms.validate()?;
        let charges = terms.development_charges();

        let (remaining, per_installment, per_development_charge) = if terms.full_payment {
            (terms.price, terms.price, charges)
        } else {
            let down_payment = terms.down_payment.unwrap_or(Money::ZERO);
            let remaining = terms.price - down_payment;
            (
                remaining,
                remaining.split(periods, scale),
                charges.split(periods, scale),
            )
        };

        let unit = terms.duration.map(|d| d.unit).unwrap_or_default();

        let lines = (0..periods)
            .map(|i| {
                Ok(InstallmentLine {
                    sequence_number: i + 1,
                    period: period_label(unit, terms.full_payment, i),
                    due_date: due_date(start_date, i)?,
                    amount: per_installment,
                    development_charge: per_development_charge,
                    total: per_installment + per_development_charge,
                    status: InstallmentStatus::Pending,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            periods,
            %remaining,
            %per_installment,
            %per_development_charge,
            "installment schedule computed"
        );

        Ok(Self {
            periods,
            remaining,
            per_installment,
            per_development_charge,
            lines,
        })
    }
}

/// human label for the line at zero-based `index`
///
/// Year durations are scheduled in months, so they read "Month N".
pub fn period_label(unit: DurationUnit, full_payment: bool, index: u32) -> String {
    if full_payment {
        return FULL_PAYMENT_LABEL.to_string();
    }
    match unit {
        DurationUnit::Days => format!("Day {}", index + 1),
        DurationUnit::Months | DurationUnit::Years => format!("Month {}", index + 1),
    }
}

/// due date of the line at zero-based `offset`: `offset` calendar months after `start`
///
/// Always advances by month, including for day durations. Month ends clamp,
/// so Jan 31 + 1 month is Feb 28/29.
pub fn due_date(start: NaiveDate, offset: u32) -> Result<NaiveDate> {
    start
        .checked_add_months(Months::new(offset))
        .ok_or_else(|| LedgerError::InvalidDate {
            message: format!("{} + {} months is out of range", start, offset),
        })
}
