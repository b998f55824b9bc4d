//! Unit tests for history pagination.

use routinelog::routines::paginate;

#[test]
fn test_page_count_is_ceiling() {
    for total in 0..40usize {
        let items: Vec<usize> = (0..total).collect();
        for size in 1..12usize {
            let page = paginate(&items, 0, size);
            assert_eq!(page.total_pages, (total + size - 1) / size);
            assert_eq!(page.total_count, total);
        }
    }
}

#[test]
fn test_pages_cover_everything_once() {
    let items: Vec<String> = (0..31).map(|i| format!("routine-{}", i)).collect();
    let size = 4;
    let total_pages = paginate(&items, 0, size).total_pages;

    let mut seen = Vec::new();
    for p in 0..total_pages {
        let page = paginate(&items, p, size);
        assert!(!page.items.is_empty());
        assert!(page.items.len() <= size);
        seen.extend(page.items);
    }

    assert_eq!(seen, items);
    assert!(paginate(&items, total_pages, size).items.is_empty());
}

#[test]
fn test_huge_page_index_does_not_overflow() {
    let items = vec![1, 2, 3];
    let page = paginate(&items, usize::MAX, 2);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 2);
}
