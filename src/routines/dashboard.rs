//! Dashboard summary built from the repository and history settings.

use super::pagination::Page;
use super::repository::{RoutineRepository, WeekFilter, WeeklyStats};
use super::types::Routine;
use super::week::current_week;
use crate::storage::HistorySettings;

/// Everything the dashboard shows at a glance.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Current week label
    pub week: String,
    /// Counters for the current week
    pub stats: WeeklyStats,
    /// Latest routines, newest first
    pub recent: Vec<Routine>,
    /// Earlier sessions with the same name as the latest routine
    pub progress: Vec<Routine>,
    /// First page of the full history
    pub history: Page<Routine>,
}

impl Dashboard {
    /// Build the summary for the current week.
    pub fn build(repository: &RoutineRepository, settings: &HistorySettings) -> Self {
        Self::build_for_week(repository, settings, current_week())
    }

    /// Build the summary with `week` as the current week.
    pub fn build_for_week(
        repository: &RoutineRepository,
        settings: &HistorySettings,
        week: String,
    ) -> Self {
        let recent = repository.recent(settings.recent_limit);
        let progress = recent
            .first()
            .map(|latest| repository.similar_to(latest, settings.similar_limit))
            .unwrap_or_default();

        Self {
            stats: repository.weekly_stats(&week),
            week,
            recent,
            progress,
            history: repository.history_page(&WeekFilter::All, 0, settings.page_size),
        }
    }
}
