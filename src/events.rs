use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::PlanId;

/// all events that can be emitted by the generator and the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // plan lifecycle
    PlanGenerated {
        plan_id: PlanId,
        national_id: String,
        plot_number: String,
        installments: u32,
        total_due: Money,
        full_payment: bool,
        timestamp: DateTime<Utc>,
    },
    PlanReplaced {
        previous_plan_id: PlanId,
        new_plan_id: PlanId,
        timestamp: DateTime<Utc>,
    },

    // payment events
    InstallmentPaid {
        plan_id: PlanId,
        sequence_number: u32,
        total: Money,
        timestamp: DateTime<Utc>,
    },
    PlanFullyPaid {
        plan_id: PlanId,
        lines_settled: u32,
        amount_settled: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
