//! customer and plot records consumed during plan generation
//!
//! The dashboard owns these records; the ledger only reads them. In-memory
//! registries are provided for tests and demos.

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{CustomerId, NationalId, PlotId, PlotStatus};

/// registered customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    pub father_or_spouse: Option<String>,
    pub national_id: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    pub fn new(id: CustomerId, full_name: impl Into<String>, national_id: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            father_or_spouse: None,
            national_id: national_id.into(),
            phone: None,
            email: None,
            address: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_father_or_spouse(mut self, name: impl Into<String>) -> Self {
        self.father_or_spouse = Some(name.into());
        self
    }
}

/// plot in the society inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: PlotId,
    pub plot_number: String,
    pub block: String,
    /// size with its unit, e.g. "5 Marla"
    pub size: String,
    pub category: String,
    /// unpriced plots carry zero
    pub price: Money,
    pub status: PlotStatus,
}

impl Plot {
    pub fn new(
        id: PlotId,
        plot_number: impl Into<String>,
        block: impl Into<String>,
        size: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id,
            plot_number: plot_number.into(),
            block: block.into(),
            size: size.into(),
            category: "Residential".to_string(),
            price,
            status: PlotStatus::Available,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_status(mut self, status: PlotStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == PlotStatus::Available
    }
}

/// customer lookup collaborator
pub trait CustomerRegistry {
    /// exact match after stripping formatting separators from both sides
    fn find_by_national_id(&self, national_id: &str) -> Option<Customer>;
}

/// plot lookup collaborator
pub trait PlotRegistry {
    fn find_by_id(&self, plot_id: PlotId) -> Option<Plot>;

    /// plots that can still be put on a plan
    fn available(&self) -> Vec<Plot>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRegistry {
    customers: Vec<Customer>,
}

impl InMemoryCustomerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// newest customers are listed first
    pub fn add(&mut self, customer: Customer) {
        self.customers.insert(0, customer);
    }

    pub fn remove(&mut self, id: CustomerId) -> Option<Customer> {
        let index = self.customers.iter().position(|c| c.id == id)?;
        Some(self.customers.remove(index))
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }
}

impl CustomerRegistry for InMemoryCustomerRegistry {
    fn find_by_national_id(&self, national_id: &str) -> Option<Customer> {
        let wanted = NationalId::normalize(national_id);
        self.customers
            .iter()
            .find(|c| NationalId::normalize(&c.national_id) == wanted)
            .cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPlotRegistry {
    plots: Vec<Plot>,
}

impl InMemoryPlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, plot: Plot) {
        self.plots.push(plot);
    }

    pub fn set_status(&mut self, plot_id: PlotId, status: PlotStatus) -> bool {
        match self.plots.iter_mut().find(|p| p.id == plot_id) {
            Some(plot) => {
                plot.status = status;
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> &[Plot] {
        &self.plots
    }
}

impl PlotRegistry for InMemoryPlotRegistry {
    fn find_by_id(&self, plot_id: PlotId) -> Option<Plot> {
        self.plots.iter().find(|p| p.id == plot_id).cloned()
    }

    fn available(&self) -> Vec<Plot> {
        self.plots.iter().filter(|p| p.is_available()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_lookup_ignores_separators() {
        let mut customers = InMemoryCustomerRegistry::new();
        customers.add(Customer::new(1, "Ali Khan", "35202-1234567-1").with_phone("0312-1234567"));

        let found = customers.find_by_national_id("3520212345671").unwrap();
        assert_eq!(found.full_name, "Ali Khan");
        assert_eq!(found.phone.as_deref(), Some("0312-1234567"));

        assert!(customers.find_by_national_id("35202-1234567-9").is_none());
    }

    #[test]
    fn test_newest_customer_first() {
        let mut customers = InMemoryCustomerRegistry::new();
        customers.add(Customer::new(1, "Ali Khan", "35202-1234567-1"));
        customers.add(Customer::new(2, "Sara Khan", "35202-7654321-2"));
        assert_eq!(customers.list()[0].id, 2);

        assert_eq!(customers.remove(1).map(|c| c.full_name), Some("Ali Khan".to_string()));
        assert_eq!(customers.list().len(), 1);
    }

    #[test]
    fn test_available_plots() {
        let mut plots = InMemoryPlotRegistry::new();
        plots.add(Plot::new(1, "12", "A", "5 Marla", Money::from_major(1_000_000)));
        plots.add(
            Plot::new(2, "13", "A", "10 Marla", Money::from_major(2_000_000))
                .with_status(PlotStatus::Sold),
        );

        let available = plots.available();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].plot_number, "12");

        assert!(plots.set_status(1, PlotStatus::Booked));
        assert!(plots.available().is_empty());
        assert!(!plots.set_status(99, PlotStatus::Booked));
    }
}
