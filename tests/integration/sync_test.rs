//! Integration tests for keeping several open repositories in sync.

use chrono::NaiveDate;
use routinelog::routines::{ExerciseDraft, Routine, RoutineDraft, RoutineRepository};
use routinelog::storage::{MemoryStore, RoutineStore};
use std::sync::{Arc, Mutex};

fn draft(name: &str) -> RoutineDraft {
    let mut draft = RoutineDraft::new(name, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    draft
        .add_exercise(ExerciseDraft::new("Deadlift", 3, "5"))
        .unwrap();
    draft
}

#[test]
fn test_saves_propagate_to_other_repositories() {
    let store = RoutineStore::new(Arc::new(MemoryStore::new()));
    let dashboard = RoutineRepository::open(store.clone());
    let editor = RoutineRepository::open(store.clone());

    let created = editor.create(draft("Pull"));
    assert_eq!(dashboard.all(), vec![created.clone()]);

    let toggled = dashboard.toggle_complete(&created.id).unwrap();
    assert_eq!(editor.get(&created.id), Some(toggled));
}

#[test]
fn test_last_writer_wins() {
    let store = RoutineStore::new(Arc::new(MemoryStore::new()));
    let a = RoutineRepository::open(store.clone());
    let b = RoutineRepository::open(store.clone());

    a.create(draft("From A"));
    let from_b = b.create(draft("From B"));

    // b saw a's routine through the notification before creating its own
    assert_eq!(a.all().len(), 2);
    assert_eq!(a.all(), b.all());
    assert_eq!(store.load().last(), Some(&from_b));
}

#[test]
fn test_separate_stores_do_not_notify_each_other() {
    let backend = Arc::new(MemoryStore::new());
    let first = RoutineRepository::open(RoutineStore::new(backend.clone()));
    let second = RoutineRepository::open(RoutineStore::new(backend));

    first.create(draft("Push"));
    assert!(second.is_empty());

    second.reload();
    assert_eq!(second.len(), 1);
}

#[test]
fn test_on_change_observer() {
    let store = RoutineStore::new(Arc::new(MemoryStore::new()));
    let repo = RoutineRepository::open(store);

    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let token = repo.on_change(move |routines: &[Routine]| {
        sink.lock().unwrap().push(routines.len());
    });

    let routine = repo.create(draft("Push"));
    repo.duplicate(&routine);
    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);

    assert!(repo.unsubscribe(token));
    repo.create(draft("Legs"));
    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
}
