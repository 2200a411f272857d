pub mod budget_service;
pub mod goal_allocator;
pub mod insight_service;
pub mod record_service;
pub mod score_service;
pub mod totals_service;

pub use budget_service::{BudgetProgress, BudgetService, BudgetStatus, YearMonth};
pub use goal_allocator::{AllocationRejection, AllocationRequest, AllocationResult, GoalAllocator};
pub use insight_service::{
    Achievement, ActivityEntry, ActivityKind, CategoryTotal, InsightService, ScoreTip,
    TrendSeries,
};
pub use record_service::{RecordService, UpsertOutcome};
pub use score_service::{ScoreBreakdown, ScoreService};
pub use totals_service::{Totals, TotalsService};

use crate::core::errors::FinanceError;

pub type ServiceResult<T> = Result<T, FinanceError>;

#[cfg(test)]
mod tests;
