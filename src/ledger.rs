use hourglass_rs::SafeTimeProvider;
use tracing::{debug, info, instrument};

use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::plan::InstallmentPlan;
use crate::repository::{self, PlanRepository};

/// records payments against the latest plan
///
/// Every mutation builds a new plan value and saves it before returning, so a
/// failed save leaves the stored plan unchanged.
pub struct PaymentLedger<R: PlanRepository> {
    repository: R,
}

impl<R: PlanRepository> PaymentLedger<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    /// latest plan regardless of owner
    pub fn current_plan(&self) -> Result<Option<InstallmentPlan>> {
        self.repository.load()
    }

    /// latest plan if it belongs to `national_id`; hyphens and spaces are ignored
    pub fn find_plan(&self, national_id: &str) -> Result<Option<InstallmentPlan>> {
        repository::find_plan(&self.repository, national_id)
    }

    /// mark one line Paid
    ///
    /// Marking a line that is already Paid succeeds and changes nothing.
    #[instrument(skip(self, time_provider, events))]
    pub fn mark_paid(
        &mut self,
        sequence_number: u32,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<InstallmentPlan> {
        let plan = self.repository.load()?.ok_or(LedgerError::PlanNotFound)?;
        let was_pending = plan
            .line(sequence_number)
            .map(|l| l.is_pending())
            .unwrap_or(false);

        let updated = plan.with_line_paid(sequence_number)?;
        self.repository.save(&updated)?;

        if was_pending {
            if let Some(line) = updated.line(sequence_number) {
                events.emit(Event::InstallmentPaid {
                    plan_id: updated.plan_id,
                    sequence_number,
                    total: line.total,
                    timestamp: time_provider.now(),
                });
                info!(plan_id = %updated.plan_id, sequence_number, total = %line.total, "installment paid");
            }
        } else {
            debug!(plan_id = %updated.plan_id, sequence_number, "installment already paid");
        }

        Ok(updated)
    }

    /// mark every line Paid and switch the plan to full-payment mode
    ///
    /// Besides settling each line this sets `full_payment = true` on the plan.
    /// Calling it again on a settled plan yields the same plan.
    #[instrument(skip_all)]
    pub fn mark_all_paid(
        &mut self,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<InstallmentPlan> {
        let plan = self.repository.load()?.ok_or(LedgerError::PlanNotFound)?;
        let amount_settled = plan.total_outstanding();
        let lines_settled = plan.pending_count();

        let updated = plan.with_all_paid();
        self.repository.save(&updated)?;

        if lines_settled > 0 {
            events.emit(Event::PlanFullyPaid {
                plan_id: updated.plan_id,
                lines_settled,
                amount_settled,
                timestamp: time_provider.now(),
            });
        }
        info!(plan_id = %updated.plan_id, lines_settled, amount_settled = %amount_settled, "plan fully paid");

        Ok(updated)
    }
}
