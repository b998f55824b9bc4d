//! RoutineLog - Personal Training Log
//!
//! Records workout routines (exercises with sets, reps, RPE, RIR and notes),
//! groups them by week, and keeps the collection in a key-value store with a
//! versioned primary slot and an automatic backup slot.

pub mod routines;
pub mod storage;

// Re-export commonly used types
pub use routines::{Exercise, Routine, RoutineDraft, RoutineRepository};
pub use storage::config::AppConfig;
pub use storage::RoutineStore;
