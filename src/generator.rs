use hourglass_rs::{SafeTimeProvider, TimeSource};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::plan::InstallmentPlan;
use crate::registry::{CustomerRegistry, Plot, PlotRegistry};
use crate::repository::PlanRepository;
use crate::schedule::{InstallmentSchedule, ScheduleTerms};
use crate::types::{NationalId, PlanDuration, PlotId};

/// what the caller asks a plan for
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub national_id: String,
    pub plot_id: PlotId,
    pub down_payment: Option<Money>,
    pub development_charges: Option<Money>,
    pub duration: Option<PlanDuration>,
    pub full_payment: bool,
}

impl PlanRequest {
    /// amortized plan after a down payment
    pub fn installments(
        national_id: impl Into<String>,
        plot_id: PlotId,
        down_payment: Money,
        duration: PlanDuration,
    ) -> Self {
        Self {
            national_id: national_id.into(),
            plot_id,
            down_payment: Some(down_payment),
            development_charges: None,
            duration: Some(duration),
            full_payment: false,
        }
    }

    /// single lump-sum plan
    pub fn full_payment(national_id: impl Into<String>, plot_id: PlotId) -> Self {
        Self {
            national_id: national_id.into(),
            plot_id,
            down_payment: None,
            development_charges: None,
            duration: None,
            full_payment: true,
        }
    }

    pub fn with_development_charges(mut self, charges: Money) -> Self {
        self.development_charges = Some(charges);
        self
    }

    fn terms(&self, price: Money) -> ScheduleTerms {
        ScheduleTerms {
            price,
            down_payment: self.down_payment,
            development_charges: self.development_charges,
            duration: self.duration,
            full_payment: self.full_payment,
        }
    }
}

/// builds installment plans and stores them as the latest plan
pub struct PlanGenerator<'a, R: PlanRepository> {
    config: LedgerConfig,
    customers: &'a dyn CustomerRegistry,
    plots: &'a dyn PlotRegistry,
    repository: R,
}

impl<'a, R: PlanRepository> PlanGenerator<'a, R> {
    pub fn new(
        config: LedgerConfig,
        customers: &'a dyn CustomerRegistry,
        plots: &'a dyn PlotRegistry,
        repository: R,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            customers,
            plots,
            repository,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    /// plots a plan can be generated for
    pub fn available_plots(&self) -> Vec<Plot> {
        self.plots.available()
    }

    /// generate with system time
    pub fn generate_now(&mut self, request: &PlanRequest, events: &mut EventStore) -> Result<InstallmentPlan> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.generate(request, &time, events)
    }

    /// validate the request, build the schedule and save it as the latest plan
    ///
    /// Any failure returns before the repository is touched, so the previous
    /// plan stays in place. On success the previous plan is replaced
    /// unconditionally.
    #[instrument(skip_all, fields(plot_id = request.plot_id, full_payment = request.full_payment))]
    pub fn generate(
        &mut self,
        request: &PlanRequest,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<InstallmentPlan> {
        let national_id = NationalId::normalize(&request.national_id);
        if let Some(expected) = self.config.national_id_length {
            if national_id.len() != expected {
                warn!(length = national_id.len(), expected, "rejecting national id");
                return Err(LedgerError::InvalidNationalId {
                    national_id: request.national_id.clone(),
                });
            }
        }

        let customer = self
            .customers
            .find_by_national_id(national_id.as_str())
            .ok_or_else(|| LedgerError::CustomerNotFound {
                national_id: request.national_id.clone(),
            })?;

        let plot = self
            .plots
            .find_by_id(request.plot_id)
            .ok_or(LedgerError::PlotNotFound {
                plot_id: request.plot_id,
            })?;
        if self.config.require_available_plot && !plot.is_available() {
            return Err(LedgerError::PlotUnavailable {
                plot_number: plot.plot_number,
                status: plot.status,
            });
        }

        let terms = request.terms(plot.price);
        let now = time_provider.now();
        let schedule =
            InstallmentSchedule::generate(&terms, now.date_naive(), self.config.installment_scale)?;

        let plan = InstallmentPlan {
            plan_id: Uuid::new_v4(),
            created_at: now,
            customer_name: customer.full_name,
            customer_phone: customer.phone,
            customer_national_id: customer.national_id,
            plot_number: plot.plot_number,
            plot_size: plot.size,
            plot_block: plot.block,
            plot_price: plot.price,
            down_payment: if request.full_payment {
                plot.price
            } else {
                request.down_payment.unwrap_or(Money::ZERO)
            },
            development_charges: terms.development_charges(),
            remaining: schedule.remaining,
            duration_value: if request.full_payment {
                1
            } else {
                request.duration.map(|d| d.value).unwrap_or(1)
            },
            duration_unit: request.duration.map(|d| d.unit).unwrap_or_default(),
            full_payment: request.full_payment,
            installments: schedule.lines,
        };

        let previous = match self.repository.load() {
            Ok(previous) => previous,
            Err(e) => {
                warn!(error = %e, "previous plan unreadable, overwriting");
                None
            }
        };

        self.repository.save(&plan)?;

        if let Some(previous) = previous {
            events.emit(Event::PlanReplaced {
                previous_plan_id: previous.plan_id,
                new_plan_id: plan.plan_id,
                timestamp: now,
            });
        }
        events.emit(Event::PlanGenerated {
            plan_id: plan.plan_id,
            national_id: plan.customer_national_id.clone(),
            plot_number: plan.plot_number.clone(),
            installments: plan.installment_count(),
            total_due: plan.total_due(),
            full_payment: plan.full_payment,
            timestamp: now,
        });

        info!(
            plan_id = %plan.plan_id,
            installments = plan.installment_count(),
            total_due = %plan.total_due(),
            currency = %self.config.currency,
            "installment plan generated"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Customer, InMemoryCustomerRegistry, InMemoryPlotRegistry};
    use crate::repository::InMemoryPlanRepository;
    use crate::types::{DurationUnit, InstallmentStatus, PlotStatus};
    use chrono::{Months, TimeZone, Utc};

    const CNIC: &str = "35202-1234567-1";

    fn customers() -> InMemoryCustomerRegistry {
        let mut customers = InMemoryCustomerRegistry::new();
        customers.add(Customer::new(1, "Ali Khan", CNIC).with_phone("0312-1234567"));
        customers
    }

    fn plots() -> InMemoryPlotRegistry {
        let mut plots = InMemoryPlotRegistry::new();
        plots.add(Plot::new(1, "12", "A", "5 Marla", Money::from_major(1_000_000)));
        plots.add(Plot::new(2, "13", "B", "10 Marla", Money::ZERO));
        plots.add(
            Plot::new(3, "14", "C", "1 Kanal", Money::from_major(5_000_000))
                .with_status(PlotStatus::Sold),
        );
        plots
    }

    fn time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        ))
    }

    fn reference_request() -> PlanRequest {
        PlanRequest::installments(
            CNIC,
            1,
            Money::from_major(200_000),
            PlanDuration::months(10),
        )
        .with_development_charges(Money::from_major(50_000))
    }

    #[test]
    fn test_reference_plan() {
        let customers = customers();
        let plots = plots();
        let mut repo = InMemoryPlanRepository::new();
        let mut events = EventStore::new();
        let time = time();

        let mut generator =
            PlanGenerator::new(LedgerConfig::default(), &customers, &plots, &mut repo).unwrap();
        let plan = generator.generate(&reference_request(), &time, &mut events).unwrap();

        assert_eq!(plan.customer_name, "Ali Khan");
        assert_eq!(plan.customer_phone.as_deref(), Some("0312-1234567"));
        assert_eq!(plan.plot_number, "12");
        assert_eq!(plan.plot_block, "A");
        assert_eq!(plan.plot_size, "5 Marla");
        assert_eq!(plan.plot_price, Money::from_major(1_000_000));
        assert_eq!(plan.down_payment, Money::from_major(200_000));
        assert_eq!(plan.remaining, Money::from_major(800_000));
        assert_eq!(plan.development_charges, Money::from_major(50_000));
        assert_eq!(plan.duration_value, 10);
        assert_eq!(plan.duration_unit, DurationUnit::Months);
        assert_eq!(plan.installment_count(), 10);
        assert!(plan
            .installments
            .iter()
            .all(|l| l.amount == Money::from_major(80_000)
                && l.development_charge == Money::from_major(5_000)
                && l.total == Money::from_major(85_000)));
        assert_eq!(plan.total_due(), Money::from_major(850_000));
        assert_eq!(plan.rounding_drift(), Money::ZERO);

        assert_eq!(repo.load().unwrap(), Some(plan.clone()));
        assert!(matches!(events.events(), [Event::PlanGenerated { installments: 10, .. }]));
    }

    #[test]
    fn test_due_dates_follow_creation_date() {
        let customers = customers();
        let plots = plots();
        let time = time();
        let mut generator = PlanGenerator::new(
            LedgerConfig::default(),
            &customers,
            &plots,
            InMemoryPlanRepository::new(),
        )
        .unwrap();

        let plan = generator
            .generate(&reference_request(), &time, &mut EventStore::new())
            .unwrap();

        let created = time.now().date_naive();
        assert_eq!(plan.created_at, time.now());
        for (i, line) in plan.installments.iter().enumerate() {
            assert_eq!(line.due_date, created.checked_add_months(Months::new(i as u32)).unwrap());
        }
    }

    #[test]
    fn test_full_payment_plan() {
        let customers = customers();
        let plots = plots();
        let mut generator = PlanGenerator::new(
            LedgerConfig::default(),
            &customers,
            &plots,
            InMemoryPlanRepository::new(),
        )
        .unwrap();

        let request = PlanRequest::full_payment(CNIC, 1)
            .with_development_charges(Money::from_major(50_000));
        let plan = generator.generate(&request, &time(), &mut EventStore::new()).unwrap();

        assert!(plan.full_payment);
        assert_eq!(plan.installment_count(), 1);
        assert_eq!(plan.down_payment, Money::from_major(1_000_000));
        assert_eq!(plan.remaining, Money::from_major(1_000_000));
        assert_eq!(plan.duration_value, 1);
        let line = &plan.installments[0];
        assert_eq!(line.period, "Full Payment");
        assert_eq!(line.amount, Money::from_major(1_000_000));
        assert_eq!(line.development_charge, Money::from_major(50_000));
        assert_eq!(line.status, InstallmentStatus::Pending);
    }

    #[test]
    fn test_down_payment_equal_to_price_persists_nothing() {
        let customers = customers();
        let plots = plots();
        let mut repo = InMemoryPlanRepository::new();
        let mut events = EventStore::new();

        let mut generator =
            PlanGenerator::new(LedgerConfig::default(), &customers, &plots, &mut repo).unwrap();
        let request = PlanRequest::installments(
            CNIC,
            1,
            Money::from_major(1_000_000),
            PlanDuration::months(10),
        );
        let result = generator.generate(&request, &time(), &mut events);

        assert!(matches!(result, Err(LedgerError::InvalidPaymentTerms { .. })));
        assert!(repo.is_empty());
        assert!(events.events().is_empty());
    }

    #[test]
    fn test_failed_generation_keeps_previous_plan() {
        let customers = customers();
        let plots = plots();
        let mut repo = InMemoryPlanRepository::new();
        let time = time();

        let mut generator =
            PlanGenerator::new(LedgerConfig::default(), &customers, &plots, &mut repo).unwrap();
        let first = generator
            .generate(&reference_request(), &time, &mut EventStore::new())
            .unwrap();

        let bad = PlanRequest::installments(CNIC, 1, Money::from_major(1), PlanDuration::months(0));
        assert!(generator.generate(&bad, &time, &mut EventStore::new()).is_err());

        assert_eq!(repo.load().unwrap(), Some(first));
    }

    #[test]
    fn test_new_plan_replaces_previous() {
        let customers = customers();
        let plots = plots();
        let mut repo = InMemoryPlanRepository::new();
        let mut events = EventStore::new();
        let time = time();

        let mut generator =
            PlanGenerator::new(LedgerConfig::default(), &customers, &plots, &mut repo).unwrap();
        let first = generator.generate(&reference_request(), &time, &mut events).unwrap();
        let second = generator
            .generate(&PlanRequest::full_payment(CNIC, 1), &time, &mut events)
            .unwrap();

        assert_eq!(repo.load().unwrap(), Some(second.clone()));
        assert!(events.events().iter().any(|e| matches!(
            e,
            Event::PlanReplaced { previous_plan_id, new_plan_id, .. }
                if *previous_plan_id == first.plan_id && *new_plan_id == second.plan_id
        )));
    }

    #[test]
    fn test_lookup_failures() {
        let customers = customers();
        let plots = plots();
        let time = time();
        let mut generator = PlanGenerator::new(
            LedgerConfig::default(),
            &customers,
            &plots,
            InMemoryPlanRepository::new(),
        )
        .unwrap();
        let mut events = EventStore::new();

        let short_id = PlanRequest::full_payment("35202-123", 1);
        assert!(matches!(
            generator.generate(&short_id, &time, &mut events),
            Err(LedgerError::InvalidNationalId { .. })
        ));

        let unknown = PlanRequest::full_payment("35202-9999999-9", 1);
        assert!(matches!(
            generator.generate(&unknown, &time, &mut events),
            Err(LedgerError::CustomerNotFound { .. })
        ));

        let missing_plot = PlanRequest::full_payment(CNIC, 42);
        assert!(matches!(
            generator.generate(&missing_plot, &time, &mut events),
            Err(LedgerError::PlotNotFound { plot_id: 42 })
        ));

        let unpriced = PlanRequest::full_payment(CNIC, 2);
        assert!(matches!(
            generator.generate(&unpriced, &time, &mut events),
            Err(LedgerError::InvalidPlotPrice { .. })
        ));

        let sold = PlanRequest::full_payment(CNIC, 3);
        assert!(matches!(
            generator.generate(&sold, &time, &mut events),
            Err(LedgerError::PlotUnavailable { status: PlotStatus::Sold, .. })
        ));

        assert!(generator.repository().is_empty());
        assert!(events.events().is_empty());
    }

    #[test]
    fn test_customer_id_formatting_is_ignored() {
        let customers = customers();
        let plots = plots();
        let mut generator = PlanGenerator::new(
            LedgerConfig::default(),
            &customers,
            &plots,
            InMemoryPlanRepository::new(),
        )
        .unwrap();

        let request = PlanRequest::full_payment("352021234567 1", 1);
        let plan = generator.generate(&request, &time(), &mut EventStore::new()).unwrap();
        // snapshot keeps the registry's formatting
        assert_eq!(plan.customer_national_id, CNIC);
    }

    #[test]
    fn test_lenient_config_allows_sold_plots_and_free_form_ids() {
        let mut customers = InMemoryCustomerRegistry::new();
        customers.add(Customer::new(7, "Sara Khan", "A-12"));
        let plots = plots();

        let mut generator = PlanGenerator::new(
            LedgerConfig::lenient(),
            &customers,
            &plots,
            InMemoryPlanRepository::new(),
        )
        .unwrap();

        let request = PlanRequest::installments(
            "A12",
            3,
            Money::from_major(1_000_000),
            PlanDuration::months(3),
        );
        let plan = generator.generate(&request, &time(), &mut EventStore::new()).unwrap();
        // 4,000,000 / 3 kept at paisa scale
        assert_eq!(plan.installments[0].amount, Money::from_str_exact("1333333.33").unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let customers = customers();
        let plots = plots();
        let config = LedgerConfig::default().with_installment_scale(9);
        assert!(matches!(
            PlanGenerator::new(config, &customers, &plots, InMemoryPlanRepository::new()),
            Err(LedgerError::InvalidConfiguration { .. })
        ));
    }
}
