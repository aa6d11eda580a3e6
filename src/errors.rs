use thiserror::Error;

use crate::decimal::Money;
use crate::types::{PlotId, PlotStatus};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid national id: {national_id}")]
    InvalidNationalId {
        national_id: String,
    },

    #[error("customer not found: {national_id}")]
    CustomerNotFound {
        national_id: String,
    },

    #[error("plot not found: {plot_id}")]
    PlotNotFound {
        plot_id: PlotId,
    },

    #[error("plot {plot_number} is not available: current status is {status:?}")]
    PlotUnavailable {
        plot_number: String,
        status: PlotStatus,
    },

    #[error("invalid plot price: {price}")]
    InvalidPlotPrice {
        price: Money,
    },

    #[error("invalid payment terms: {message}")]
    InvalidPaymentTerms {
        message: String,
    },

    #[error("no installment plan found")]
    PlanNotFound,

    #[error("installment not found: #{sequence_number}")]
    InstallmentNotFound {
        sequence_number: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {message}")]
    Storage {
        message: String,
    },
}

impl LedgerError {
    pub(crate) fn terms(message: impl Into<String>) -> Self {
        LedgerError::InvalidPaymentTerms {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
