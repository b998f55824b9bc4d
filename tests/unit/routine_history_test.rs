//! Unit tests for history filtering and progress comparison.

use chrono::NaiveDate;
use routinelog::routines::{ExerciseDraft, RoutineDraft, RoutineRepository, WeekFilter};
use routinelog::storage::{MemoryStore, RoutineStore};
use std::collections::HashSet;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn log(repo: &RoutineRepository, name: &str, day: NaiveDate) {
    let mut draft = RoutineDraft::new(name, day);
    draft
        .add_exercise(ExerciseDraft::new("Squat", 5, "5"))
        .unwrap();
    repo.create(draft);
}

fn populated() -> RoutineRepository {
    let repo = RoutineRepository::open(RoutineStore::new(Arc::new(MemoryStore::new())));
    let names = ["Legs", "Push", "Pull"];
    for (i, day) in (1..=28).enumerate() {
        log(&repo, names[i % names.len()], date(2024, 2, day));
    }
    repo
}

#[test]
fn test_filter_matches_every_week_present() {
    let repo = populated();
    let weeks: HashSet<String> = repo.all().into_iter().map(|r| r.week).collect();

    let mut total = 0;
    for week in &weeks {
        let filtered = repo.filter_by_week(&WeekFilter::Week(week.clone()));
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|r| &r.week == week));
        assert!(filtered.windows(2).all(|w| w[0].date >= w[1].date));
        total += filtered.len();
    }

    assert_eq!(total, repo.len());
    assert_eq!(repo.filter_by_week(&WeekFilter::All).len(), repo.len());
}

#[test]
fn test_history_pages_reassemble_filtered_list() {
    let repo = populated();
    let filter = WeekFilter::All;
    let expected = repo.filter_by_week(&filter);

    let first = repo.history_page(&filter, 0, 6);
    assert_eq!(first.total_pages, 5);

    let joined: Vec<_> = (0..first.total_pages)
        .flat_map(|p| repo.history_page(&filter, p, 6).items)
        .collect();
    assert_eq!(joined, expected);
}

#[test]
fn test_similar_to_properties() {
    let repo = populated();

    for routine in repo.all() {
        let similar = repo.similar_to(&routine, 3);
        assert!(similar.len() <= 3);
        assert!(similar.iter().all(|r| r.id != routine.id));
        assert!(similar
            .iter()
            .all(|r| r.name.to_lowercase() == routine.name.to_lowercase()));
        assert!(similar.windows(2).all(|w| w[0].date >= w[1].date));
    }
}

#[test]
fn test_similar_to_respects_limit() {
    let repo = populated();
    let target = repo.all().into_iter().next().unwrap();

    assert_eq!(repo.similar_to(&target, 1).len(), 1);
    assert_eq!(repo.similar_to(&target, 100).len(), 9);
    assert!(repo.similar_to(&target, 0).is_empty());
}
