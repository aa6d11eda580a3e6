/// quick start - generate a ten month plan for one plot
use plot_installments_rs::{
    Customer, EventStore, InMemoryCustomerRegistry, InMemoryPlanRepository, InMemoryPlotRegistry,
    LedgerConfig, Money, PlanDuration, PlanGenerator, PlanRequest, PlanView, Plot,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut customers = InMemoryCustomerRegistry::new();
    customers.add(Customer::new(1, "Ali Khan", "35202-1234567-1").with_phone("0312-1234567"));

    let mut plots = InMemoryPlotRegistry::new();
    plots.add(Plot::new(1, "12", "A", "5 Marla", Money::from_major(1_000_000)));

    let config = LedgerConfig::default();
    let currency = config.currency.clone();
    let mut generator =
        PlanGenerator::new(config, &customers, &plots, InMemoryPlanRepository::new())?;

    let request = PlanRequest::installments(
        "35202-1234567-1",
        1,
        Money::from_major(200_000),
        PlanDuration::months(10),
    )
    .with_development_charges(Money::from_major(50_000));

    let mut events = EventStore::new();
    let plan = generator.generate_now(&request, &mut events)?;

    for line in &plan.installments {
        println!(
            "#{:<3} {:<10} {}  {} + {} = {} [{:?}]",
            line.sequence_number,
            line.period,
            line.due_date,
            line.amount,
            line.development_charge,
            line.total,
            line.status
        );
    }

    println!("\n{}", PlanView::from_plan(&plan, &currency).to_json_pretty()?);

    Ok(())
}
