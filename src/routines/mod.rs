//! Routine log: types, week labels, and the in-memory repository.

pub mod dashboard;
pub mod pagination;
pub mod repository;
pub mod types;
pub mod week;

pub use dashboard::Dashboard;
pub use pagination::{paginate, Page};
pub use repository::{RoutineRepository, WeekFilter, WeeklyStats};
pub use types::{new_id, Exercise, ExerciseDraft, Routine, RoutineDraft, ValidationError};
pub use week::{current_week, today, week_label, week_number};
