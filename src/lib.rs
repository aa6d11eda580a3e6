pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod generator;
pub mod ledger;
pub mod plan;
pub mod registry;
pub mod repository;
pub mod schedule;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::LedgerConfig;
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use generator::{PlanGenerator, PlanRequest};
pub use ledger::PaymentLedger;
pub use plan::{InstallmentLine, InstallmentPlan};
pub use registry::{
    Customer, CustomerRegistry, InMemoryCustomerRegistry, InMemoryPlotRegistry, Plot, PlotRegistry,
};
pub use repository::{find_plan, InMemoryPlanRepository, PlanRepository, SerializedPlanRepository};
pub use schedule::{InstallmentSchedule, ScheduleTerms};
pub use serialization::PlanView;
pub use types::{
    DurationUnit, InstallmentStatus, NationalId, PlanDuration, PlanId, PlotId, PlotStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
