use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a plan
pub type PlanId = Uuid;

/// plot identifier, as assigned by the plot registry
pub type PlotId = u32;

/// customer identifier, as assigned by the customer registry
pub type CustomerId = u32;

/// unit the plan duration is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Days,
    #[default]
    Months,
    Years,
}

impl DurationUnit {
    /// number of installment periods one unit of duration expands to
    ///
    /// Days are counted like months: one period per day entered. Due dates
    /// still advance by calendar month (see `schedule::due_date`).
    pub fn periods_per_unit(&self) -> u32 {
        match self {
            DurationUnit::Days => 1,
            DurationUnit::Months => 1,
            DurationUnit::Years => 12,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DurationUnit::Days => "days",
            DurationUnit::Months => "months",
            DurationUnit::Years => "years",
        };
        write!(f, "{}", s)
    }
}

/// plan duration as entered: value plus unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDuration {
    pub value: u32,
    pub unit: DurationUnit,
}

impl PlanDuration {
    pub fn new(value: u32, unit: DurationUnit) -> Self {
        Self { value, unit }
    }

    pub fn days(value: u32) -> Self {
        Self::new(value, DurationUnit::Days)
    }

    pub fn months(value: u32) -> Self {
        Self::new(value, DurationUnit::Months)
    }

    pub fn years(value: u32) -> Self {
        Self::new(value, DurationUnit::Years)
    }

    /// total installment periods, `None` on overflow
    pub fn periods(&self) -> Option<u32> {
        self.value.checked_mul(self.unit.periods_per_unit())
    }
}

/// installment status; only ever moves Pending -> Paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Pending,
    Paid,
}

/// plot inventory status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotStatus {
    Available,
    Booked,
    Sold,
}

/// national identity number with formatting separators stripped
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    /// strip hyphens and whitespace, e.g. "35202-1234567-1" -> "3520212345671"
    pub fn normalize(raw: &str) -> Self {
        NationalId(
            raw.chars()
                .filter(|c| *c != '-' && !c.is_whitespace())
                .collect(),
        )
    }

    /// compare two raw ids ignoring formatting separators
    pub fn matches(a: &str, b: &str) -> bool {
        Self::normalize(a) == Self::normalize(b)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_all_digits(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_digit())
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
