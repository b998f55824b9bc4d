//! Routine and exercise types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::week::week_label;

/// Generate a fresh opaque identifier for a routine or exercise.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// One movement within a routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions, free text ("8-12", "AMRAP", ...)
    pub reps: String,
    /// Rate of perceived exertion (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<i32>,
    /// Reps in reserve (0-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir: Option<i32>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Exercise {
    /// Copy of this exercise with a fresh id and no effort annotations.
    pub fn clean_copy(&self) -> Self {
        Self {
            id: new_id(),
            name: self.name.clone(),
            sets: self.sets,
            reps: self.reps.clone(),
            rpe: None,
            rir: None,
            comments: None,
        }
    }
}

/// Exercise as entered in the creation form, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub rpe: Option<i32>,
    pub rir: Option<i32>,
    pub comments: Option<String>,
}

impl ExerciseDraft {
    /// Create a draft with the given name, sets and reps.
    pub fn new(name: impl Into<String>, sets: u32, reps: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets,
            reps: reps.into(),
            rpe: None,
            rir: None,
            comments: None,
        }
    }

    pub fn with_rpe(mut self, rpe: i32) -> Self {
        self.rpe = Some(rpe);
        self
    }

    pub fn with_rir(mut self, rir: i32) -> Self {
        self.rir = Some(rir);
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

/// One logged workout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    /// Unique identifier across the collection
    pub id: String,
    /// Display name, matched case-insensitively for progress comparison
    pub name: String,
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Week label derived from `date` when the routine was created
    pub week: String,
    /// Exercises in insertion order
    pub exercises: Vec<Exercise>,
    /// Whether the session was marked done
    #[serde(default)]
    pub completed: bool,
}

impl Routine {
    /// Whether this routine has the same name as `other`, ignoring case.
    pub fn same_name_as(&self, other: &Routine) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

/// A routine that has not been assigned an id yet.
///
/// The week label is computed once from the date passed to [`RoutineDraft::new`];
/// changing `date` afterwards does not touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineDraft {
    pub name: String,
    pub date: NaiveDate,
    pub week: String,
    pub exercises: Vec<Exercise>,
    pub completed: bool,
}

impl RoutineDraft {
    /// Start a new draft for the given name and date.
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            week: week_label(date),
            exercises: Vec::new(),
            completed: false,
        }
    }

    /// Add an exercise to the draft, assigning it a fresh id.
    ///
    /// Name and reps must be non-empty.
    pub fn add_exercise(&mut self, draft: ExerciseDraft) -> Result<&Exercise, ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::EmptyExerciseName);
        }
        if draft.reps.trim().is_empty() {
            return Err(ValidationError::EmptyReps);
        }

        self.exercises.push(Exercise {
            id: new_id(),
            name: draft.name,
            sets: draft.sets,
            reps: draft.reps,
            rpe: draft.rpe,
            rir: draft.rir,
            comments: draft.comments.filter(|c| !c.is_empty()),
        });

        Ok(&self.exercises[self.exercises.len() - 1])
    }

    /// Remove an exercise from the draft. Returns false if no exercise had that id.
    pub fn remove_exercise(&mut self, id: &str) -> bool {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.id != id);
        self.exercises.len() != before
    }

    /// Check that the draft can be saved.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyRoutineName);
        }
        if self.exercises.is_empty() {
            return Err(ValidationError::NoExercises);
        }
        Ok(())
    }

    /// Turn the draft into a routine with the given id.
    pub fn into_routine(self, id: String) -> Routine {
        Routine {
            id,
            name: self.name,
            date: self.date,
            week: self.week,
            exercises: self.exercises,
            completed: self.completed,
        }
    }
}

/// Form-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Routine name must not be empty")]
    EmptyRoutineName,

    #[error("Routine must have at least one exercise")]
    NoExercises,

    #[error("Exercise name must not be empty")]
    EmptyExerciseName,

    #[error("Exercise reps must not be empty")]
    EmptyReps,
}
