/// payment ledger - pay lines one by one, then settle the rest in one step
use chrono::{Duration, TimeZone, Utc};
use plot_installments_rs::{
    Customer, EventStore, InMemoryCustomerRegistry, InMemoryPlanRepository, InMemoryPlotRegistry,
    LedgerConfig, Money, PaymentLedger, PlanDuration, PlanGenerator, PlanRequest, Plot,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut customers = InMemoryCustomerRegistry::new();
    customers.add(Customer::new(1, "Sara Khan", "35202-7654321-2"));
    let mut plots = InMemoryPlotRegistry::new();
    plots.add(Plot::new(7, "44", "C", "10 Marla", Money::from_major(2_400_000)));

    let mut repository = InMemoryPlanRepository::new();
    let mut events = EventStore::new();

    // one year plan, twelve monthly lines
    let mut generator =
        PlanGenerator::new(LedgerConfig::default(), &customers, &plots, &mut repository)?;
    let request = PlanRequest::installments(
        "35202-7654321-2",
        7,
        Money::from_major(600_000),
        PlanDuration::years(1),
    );
    generator.generate(&request, &time, &mut events)?;

    let mut ledger = PaymentLedger::new(&mut repository);

    for sequence_number in 1..=3 {
        controller.advance(Duration::days(30));
        let plan = ledger.mark_paid(sequence_number, &time, &mut events)?;
        println!(
            "paid #{}: {} paid, {} outstanding",
            sequence_number,
            plan.total_paid(),
            plan.total_outstanding()
        );
    }

    controller.advance(Duration::days(30));
    let settled = ledger.mark_all_paid(&time, &mut events)?;
    println!(
        "settled: {} lines paid, full payment = {}",
        settled.paid_count(),
        settled.full_payment
    );

    println!("\nevents:");
    for event in events.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
