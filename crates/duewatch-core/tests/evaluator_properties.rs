//! Property tests for the evaluator and classifier.

use chrono::{Duration, TimeZone, Utc};
use duewatch_core::{
    classify, evaluate, ExecutionRecord, MaintenanceTrigger, RuntimeSnapshot, Severity,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn runtime_progress_stays_in_range(
        threshold in 0.001f64..1.0e6,
        at_completion in 0.0f64..1.0e7,
        current in 0.0f64..1.0e7,
    ) {
        let result = evaluate(
            &MaintenanceTrigger::runtime_hours(threshold),
            &ExecutionRecord { completed_at: None, runtime_hours_at_completion: Some(at_completion) },
            &RuntimeSnapshot::at_hours(current),
            Utc::now(),
        ).unwrap();

        prop_assert!(result.progress_percent <= 100);
        prop_assert_eq!(result.overdue, result.progress_percent >= 100);
    }

    #[test]
    fn calendar_progress_stays_in_range(
        threshold in 1u32..3650,
        offset_minutes in -1_000_000i64..10_000_000,
    ) {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let completed_at = now - Duration::minutes(offset_minutes);
        let result = evaluate(
            &MaintenanceTrigger::calendar_days(threshold),
            &ExecutionRecord::completed(completed_at, None),
            &RuntimeSnapshot::unknown(),
            now,
        ).unwrap();

        prop_assert!(result.progress_percent <= 100);
        prop_assert_eq!(result.overdue, result.progress_percent >= 100);
        prop_assert_eq!(
            result.next_due_date,
            Some(completed_at + Duration::days(i64::from(threshold)))
        );
    }

    #[test]
    fn evaluation_is_deterministic(
        threshold in 0.5f64..5000.0,
        at_completion in 0.0f64..10_000.0,
        delta in 0.0f64..10_000.0,
    ) {
        let trigger = MaintenanceTrigger::runtime_hours(threshold);
        let execution = ExecutionRecord {
            completed_at: None,
            runtime_hours_at_completion: Some(at_completion),
        };
        let snapshot = RuntimeSnapshot::at_hours(at_completion + delta);
        let now = Utc::now();

        let first = evaluate(&trigger, &execution, &snapshot, now).unwrap();
        let second = evaluate(&trigger, &execution, &snapshot, now).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn severity_is_monotonic(a in 0u8..=100, b in 0u8..=100) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(low) <= classify(high));
    }

    #[test]
    fn overdue_results_are_critical(
        threshold in 1.0f64..1000.0,
        extra in 0.0f64..1000.0,
    ) {
        let result = evaluate(
            &MaintenanceTrigger::runtime_hours(threshold),
            &ExecutionRecord { completed_at: None, runtime_hours_at_completion: Some(0.0) },
            &RuntimeSnapshot::at_hours(threshold + extra),
            Utc::now(),
        ).unwrap();

        prop_assert!(result.overdue);
        prop_assert_eq!(classify(result.progress_percent), Severity::Critical);
    }
}
