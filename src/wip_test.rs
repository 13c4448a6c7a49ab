#![allow(clippy::float_cmp)]

use super::*;

fn column(count: usize, max: Option<usize>) -> Column {
    let ids: Vec<String> = (0..count).map(|i| format!("t{i}")).collect();
    let column = Column::new("c", "C", "#000000").with_task_ids(ids);
    match max {
        Some(max) => column.with_max_tasks(max),
        None => column,
    }
}

#[test]
fn no_limit_is_never_at_limit() {
    assert!(!is_column_at_limit(&column(50, None)));
    assert_eq!(wip_percentage(&column(50, None)), 0.0);
    assert_eq!(wip_status(&column(50, None), 80.0), None);
}

#[test]
fn zero_limit_counts_as_none() {
    assert!(!is_column_at_limit(&column(0, Some(0))));
    assert!(!is_column_at_limit(&column(3, Some(0))));
    assert_eq!(wip_status(&column(3, Some(0)), 80.0), None);
}

#[test]
fn at_limit_when_count_reaches_max() {
    assert!(!is_column_at_limit(&column(2, Some(3))));
    assert!(is_column_at_limit(&column(3, Some(3))));
    assert!(is_column_at_limit(&column(4, Some(3))));
}

#[test]
fn percentage_can_exceed_hundred() {
    assert_eq!(wip_percentage(&column(1, Some(4))), 25.0);
    assert_eq!(wip_percentage(&column(6, Some(4))), 150.0);
}

#[test]
fn levels_follow_thresholds() {
    assert_eq!(wip_level(0.0, 80.0), WipLevel::Normal);
    assert_eq!(wip_level(79.9, 80.0), WipLevel::Normal);
    assert_eq!(wip_level(80.0, 80.0), WipLevel::Warning);
    assert_eq!(wip_level(100.0, 80.0), WipLevel::AtLimit);
    assert_eq!(wip_level(60.0, 50.0), WipLevel::Warning);
}

#[test]
fn status_bundles_count_limit_and_level() {
    let status = wip_status(&column(4, Some(5)), 80.0).unwrap();
    assert_eq!(status, WipStatus { count: 4, limit: 5, percentage: 80.0, level: WipLevel::Warning });

    let status = wip_status(&column(1, Some(5)), 80.0).unwrap();
    assert_eq!(status.level, WipLevel::Normal);
    assert_eq!(task_count(&column(1, Some(5))), 1);
}
