//! Statistics aggregation over one user's ownership subtree.

use chrono::Utc;
use repairdesk_core::error::CoreError;
use repairdesk_core::ownership::{scope_to, RepairScope, UserIdentity};
use repairdesk_core::stats::StatsReport;
use repairdesk_core::types::Timestamp;

use crate::ownership::OwnershipResolver;

/// Computes a [`StatsReport`] through the ownership resolver.
///
/// The report comes from two reads (customers, then repairs of exactly those
/// customers) with no transaction around them. A write landing between the
/// reads can be missed; every figure is still computed from the same pair of
/// result sets, so totals and breakdowns agree with each other.
#[derive(Clone)]
pub struct StatsAggregator {
    resolver: OwnershipResolver,
}

impl StatsAggregator {
    pub fn new(resolver: OwnershipResolver) -> Self {
        Self { resolver }
    }

    pub async fn compute(&self, user: &UserIdentity) -> Result<StatsReport, CoreError> {
        self.compute_at(user, Utc::now()).await
    }

    /// Compute the report as of `now` (the recent-activity window ends there).
    pub async fn compute_at(
        &self,
        user: &UserIdentity,
        now: Timestamp,
    ) -> Result<StatsReport, CoreError> {
        let customers = self.resolver.list_customers(user).await?;
        if customers.is_empty() {
            return Ok(StatsReport::default());
        }

        let scope = RepairScope::within(
            &scope_to(user),
            customers.iter().map(|c| (c.id, c.owner_user_id)),
        );
        let repairs = self.resolver.repairs_in(&scope).await?;

        Ok(StatsReport::from_samples(
            customers.iter().map(|c| c.created_at),
            repairs.iter().map(|r| r.sample()),
            now,
        ))
    }
}
