//! In-memory routine collection with write-through persistence.

use super::pagination::{paginate, Page};
use super::types::{new_id, Exercise, Routine, RoutineDraft};
use super::week::{current_week, today, week_label};
use crate::storage::{RoutineStore, Subscription};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Which routines to list in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WeekFilter {
    /// Every routine
    #[default]
    All,
    /// Only routines with this week label
    Week(String),
}

impl From<&str> for WeekFilter {
    fn from(label: &str) -> Self {
        if label == "all" {
            WeekFilter::All
        } else {
            WeekFilter::Week(label.to_string())
        }
    }
}

impl std::fmt::Display for WeekFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekFilter::All => write!(f, "all"),
            WeekFilter::Week(label) => write!(f, "{}", label),
        }
    }
}

/// Dashboard counters for one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeeklyStats {
    /// Routines logged in the week
    pub routines_this_week: usize,
    /// Of those, routines marked completed
    pub completed_this_week: usize,
    /// Exercises across the week's routines
    pub total_exercises: usize,
    /// Routines in the whole collection
    pub total_routines: usize,
}

/// Owns the live routine collection for one session.
///
/// Every mutation saves the full collection through the [`RoutineStore`].
/// Repositories built over clones of the same store stay in sync: each one
/// replaces its collection with whatever another one last saved. Mutations
/// on one repository are saved in the order they were applied.
pub struct RoutineRepository {
    store: RoutineStore,
    routines: Arc<RwLock<Vec<Routine>>>,
    save_gate: Mutex<()>,
    sync: Subscription,
}

impl RoutineRepository {
    /// Load the collection from `store` and start listening for changes.
    pub fn open(store: RoutineStore) -> Self {
        let routines = Arc::new(RwLock::new(store.load()));

        let shared = Arc::clone(&routines);
        let sync = store.subscribe(move |updated| {
            *shared.write().unwrap_or_else(|e| e.into_inner()) = updated.to_vec();
        });

        Self {
            store,
            routines,
            save_gate: Mutex::new(()),
            sync,
        }
    }

    /// The store this repository persists to.
    pub fn store(&self) -> &RoutineStore {
        &self.store
    }

    /// Register a callback invoked with the full collection after every save.
    ///
    /// Callbacks run while the save is in progress and must not mutate this
    /// repository.
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Routine]) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Remove a callback registered with [`on_change`](Self::on_change).
    pub fn unsubscribe(&self, token: Subscription) -> bool {
        self.store.unsubscribe(token)
    }

    /// Replace the in-memory collection with what is currently stored.
    pub fn reload(&self) {
        let _gate = self.gate();
        *self.write() = self.store.load();
    }

    // ========== Mutations ==========

    /// Add a new routine built from `draft`.
    ///
    /// The draft is not validated here and its week label is kept as is.
    pub fn create(&self, draft: RoutineDraft) -> Routine {
        let routine = draft.into_routine(new_id());
        tracing::debug!(id = %routine.id, name = %routine.name, "Creating routine");

        let created = routine.clone();
        self.mutate(move |routines| {
            routines.push(routine);
            Some(())
        });
        created
    }

    /// Replace the routine with the same id. Unknown ids change nothing.
    pub fn update(&self, routine: Routine) {
        self.mutate(|routines| {
            if let Some(slot) = routines.iter_mut().find(|r| r.id == routine.id) {
                *slot = routine;
            } else {
                tracing::debug!(id = %routine.id, "Update for unknown routine ignored");
            }
            Some(())
        });
    }

    /// Copy `routine` as a fresh session dated today.
    pub fn duplicate(&self, routine: &Routine) -> Routine {
        self.duplicate_on(routine, today())
    }

    /// Copy `routine` as a fresh session on `date`.
    ///
    /// The copy gets a new id, the week of `date`, `completed = false`, and
    /// exercises with new ids and no RPE, RIR or comments. It is placed at the
    /// front of the collection.
    pub fn duplicate_on(&self, routine: &Routine, date: NaiveDate) -> Routine {
        let copy = Routine {
            id: new_id(),
            name: routine.name.clone(),
            date,
            week: week_label(date),
            exercises: routine.exercises.iter().map(Exercise::clean_copy).collect(),
            completed: false,
        };
        tracing::debug!(from = %routine.id, id = %copy.id, "Duplicating routine");

        let created = copy.clone();
        self.mutate(move |routines| {
            routines.insert(0, copy);
            Some(())
        });
        created
    }

    /// Flip the completed flag of a routine. Returns the updated routine.
    pub fn toggle_complete(&self, id: &str) -> Option<Routine> {
        self.mutate(|routines| {
            let routine = routines.iter_mut().find(|r| r.id == id)?;
            routine.completed = !routine.completed;
            Some(routine.clone())
        })
    }

    /// Replace one exercise inside a routine, keeping its position.
    ///
    /// The routine's week label is left untouched.
    pub fn update_exercise(&self, routine_id: &str, exercise: Exercise) -> Option<Routine> {
        self.mutate(|routines| {
            let routine = routines.iter_mut().find(|r| r.id == routine_id)?;
            let slot = routine.exercises.iter_mut().find(|e| e.id == exercise.id)?;
            *slot = exercise;
            Some(routine.clone())
        })
    }

    // ========== Queries ==========

    /// Snapshot of the collection in stored order.
    pub fn all(&self) -> Vec<Routine> {
        self.read().clone()
    }

    /// Look up a routine by id.
    pub fn get(&self, id: &str) -> Option<Routine> {
        self.read().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Routines matching `filter`, most recent date first.
    pub fn filter_by_week(&self, filter: &WeekFilter) -> Vec<Routine> {
        let mut matching: Vec<Routine> = self
            .read()
            .iter()
            .filter(|r| match filter {
                WeekFilter::All => true,
                WeekFilter::Week(label) => &r.week == label,
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.date.cmp(&a.date));
        matching
    }

    /// One page of [`filter_by_week`](Self::filter_by_week).
    pub fn history_page(&self, filter: &WeekFilter, page: usize, page_size: usize) -> Page<Routine> {
        paginate(&self.filter_by_week(filter), page, page_size)
    }

    /// Other sessions with the same name (ignoring case), most recent first.
    pub fn similar_to(&self, routine: &Routine, limit: usize) -> Vec<Routine> {
        let mut similar: Vec<Routine> = self
            .read()
            .iter()
            .filter(|r| r.id != routine.id && r.same_name_as(routine))
            .cloned()
            .collect();

        similar.sort_by(|a, b| b.date.cmp(&a.date));
        similar.truncate(limit);
        similar
    }

    /// Routines sharing `routine`'s week label, in stored order.
    pub fn week_routines(&self, routine: &Routine) -> Vec<Routine> {
        self.read()
            .iter()
            .filter(|r| r.week == routine.week)
            .cloned()
            .collect()
    }

    /// The last `limit` routines added, newest first.
    pub fn recent(&self, limit: usize) -> Vec<Routine> {
        self.read().iter().rev().take(limit).cloned().collect()
    }

    /// Counters for the routines labelled `week`.
    pub fn weekly_stats(&self, week: &str) -> WeeklyStats {
        let routines = self.read();
        let this_week: Vec<&Routine> = routines.iter().filter(|r| r.week == week).collect();

        WeeklyStats {
            routines_this_week: this_week.len(),
            completed_this_week: this_week.iter().filter(|r| r.completed).count(),
            total_exercises: this_week.iter().map(|r| r.exercises.len()).sum(),
            total_routines: routines.len(),
        }
    }

    /// Counters for the current week.
    pub fn current_week_stats(&self) -> WeeklyStats {
        self.weekly_stats(&current_week())
    }

    // ========== Internals ==========

    /// Apply `f` to the collection, then save a snapshot of the result.
    ///
    /// Nothing is saved when `f` returns `None`. The save gate is held until
    /// the save finishes so an older snapshot can never be written (and
    /// echoed back through the notifier) after a newer one. The collection
    /// lock is released before saving, since the save notifies this
    /// repository's own subscriber.
    fn mutate<R>(&self, f: impl FnOnce(&mut Vec<Routine>) -> Option<R>) -> Option<R> {
        let _gate = self.gate();

        let (result, snapshot) = {
            let mut routines = self.write();
            let result = f(&mut routines)?;
            (result, routines.clone())
        };

        self.store.save(&snapshot);
        Some(result)
    }

    fn gate(&self) -> std::sync::MutexGuard<'_, ()> {
        self.save_gate.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Routine>> {
        self.routines.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Routine>> {
        self.routines.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for RoutineRepository {
    fn drop(&mut self) {
        self.store.unsubscribe(self.sync);
    }
}

impl std::fmt::Debug for RoutineRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutineRepository")
            .field("routines", &self.len())
            .field("store", &self.store)
            .finish()
    }
}
