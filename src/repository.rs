//! storage for the single "latest plan" slot
//!
//! Saving always replaces whatever plan was stored before; there is no plan
//! history.

use tracing::debug;

use crate::errors::Result;
use crate::plan::InstallmentPlan;

/// single-slot plan storage
pub trait PlanRepository {
    /// overwrite the stored plan
    fn save(&mut self, plan: &InstallmentPlan) -> Result<()>;

    /// current plan, or `None` if no plan was ever saved
    fn load(&self) -> Result<Option<InstallmentPlan>>;
}

impl<R: PlanRepository + ?Sized> PlanRepository for &mut R {
    fn save(&mut self, plan: &InstallmentPlan) -> Result<()> {
        (**self).save(plan)
    }

    fn load(&self) -> Result<Option<InstallmentPlan>> {
        (**self).load()
    }
}

impl<R: PlanRepository + ?Sized> PlanRepository for Box<R> {
    fn save(&mut self, plan: &InstallmentPlan) -> Result<()> {
        (**self).save(plan)
    }

    fn load(&self) -> Result<Option<InstallmentPlan>> {
        (**self).load()
    }
}

/// plan held as a typed value in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanRepository {
    latest: Option<InstallmentPlan>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_none()
    }
}

impl PlanRepository for InMemoryPlanRepository {
    fn save(&mut self, plan: &InstallmentPlan) -> Result<()> {
        debug!(plan_id = %plan.plan_id, "storing latest plan");
        self.latest = Some(plan.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<InstallmentPlan>> {
        Ok(self.latest.clone())
    }
}

/// plan held as a JSON document under one slot, the way a browser keeps it
/// in local storage
#[derive(Debug, Clone, Default)]
pub struct SerializedPlanRepository {
    slot: Option<String>,
}

impl SerializedPlanRepository {
    /// storage key the dashboard uses for this slot
    pub const SLOT_KEY: &'static str = "latestPlan";

    pub fn new() -> Self {
        Self::default()
    }

    /// start from a previously stored document
    pub fn from_document(document: impl Into<String>) -> Self {
        Self {
            slot: Some(document.into()),
        }
    }

    /// raw stored document
    pub fn document(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl PlanRepository for SerializedPlanRepository {
    fn save(&mut self, plan: &InstallmentPlan) -> Result<()> {
        // serialize first so a failure leaves the old document in place
        let document = plan.to_json()?;
        debug!(plan_id = %plan.plan_id, bytes = document.len(), key = Self::SLOT_KEY, "storing latest plan");
        self.slot = Some(document);
        Ok(())
    }

    fn load(&self) -> Result<Option<InstallmentPlan>> {
        self.slot
            .as_deref()
            .map(InstallmentPlan::from_json)
            .transpose()
    }
}

/// stored plan if it belongs to `national_id`, ignoring formatting separators
///
/// A missing plan, or a plan for someone else, is `Ok(None)`.
pub fn find_plan<R: PlanRepository + ?Sized>(
    repository: &R,
    national_id: &str,
) -> Result<Option<InstallmentPlan>> {
    Ok(repository
        .load()?
        .filter(|plan| plan.matches_national_id(national_id)))
}
