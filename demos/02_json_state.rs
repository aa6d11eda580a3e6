/// json state - the latest plan kept as a json document in one storage slot
use plot_installments_rs::{
    Customer, EventStore, InMemoryCustomerRegistry, InMemoryPlotRegistry, LedgerConfig, Money,
    PaymentLedger, PlanGenerator, PlanRequest, Plot, SerializedPlanRepository,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut customers = InMemoryCustomerRegistry::new();
    customers.add(Customer::new(1, "Ali Khan", "35202-1234567-1"));
    let mut plots = InMemoryPlotRegistry::new();
    plots.add(Plot::new(1, "12", "A", "5 Marla", Money::from_major(1_000_000)));

    let mut generator = PlanGenerator::new(
        LedgerConfig::default(),
        &customers,
        &plots,
        SerializedPlanRepository::new(),
    )?;
    let request = PlanRequest::full_payment("35202-1234567-1", 1)
        .with_development_charges(Money::from_major(25_000));
    generator.generate_now(&request, &mut EventStore::new())?;

    let repository = generator.into_repository();
    println!("stored under {:?}:", SerializedPlanRepository::SLOT_KEY);
    println!("{}\n", repository.document().unwrap_or_default());

    // reopen from the stored document and look the plan up by a reformatted id
    let document = repository.document().unwrap_or_default().to_string();
    let ledger = PaymentLedger::new(SerializedPlanRepository::from_document(document));
    match ledger.find_plan("352021234567 1")? {
        Some(plan) => println!("found plan for {} on plot {}", plan.customer_name, plan.plot_number),
        None => println!("no plan found"),
    }

    Ok(())
}
