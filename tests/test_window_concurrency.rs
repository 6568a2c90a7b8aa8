//! Property tests: randomized concurrent batches into shared windows

use numflow::{Category, WindowSet};
use proptest::prelude::*;
use serde_json::Number;
use std::collections::HashSet;
use std::sync::Arc;

fn to_numbers(batch: &[i64]) -> Vec<Number> {
    batch.iter().map(|&v| Number::from(v)).collect()
}

fn assert_invariants(state: &[Number], capacity: usize) {
    assert!(state.len() <= capacity, "window over capacity: {:?}", state);
    let distinct: HashSet<&Number> = state.iter().collect();
    assert_eq!(distinct.len(), state.len(), "duplicate in {:?}", state);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_concurrent_ingest_same_category(
        capacity in 1usize..16,
        batches in prop::collection::vec(prop::collection::vec(0i64..40, 0..12), 1..24),
    ) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .build()
            .unwrap();

        runtime.block_on(async {
            let windows = Arc::new(WindowSet::new(capacity));

            let mut handles = Vec::new();
            for batch in batches {
                let windows = windows.clone();
                handles.push(tokio::spawn(async move {
                    let mut window = windows.get(Category::Random).lock().await;
                    let before = window.snapshot();
                    let after = window.ingest_and_snapshot(&to_numbers(&batch));
                    (before, after)
                }));
            }

            for handle in handles {
                let (before, after) = handle.await.unwrap();
                assert_invariants(&before, capacity);
                assert_invariants(&after, capacity);
            }

            let final_state = windows.get(Category::Random).lock().await.snapshot();
            assert_invariants(&final_state, capacity);
        });
    }

    #[test]
    fn prop_categories_are_independent(
        batch in prop::collection::vec(0i64..100, 0..40),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        runtime.block_on(async {
            let windows = WindowSet::default();

            let prime = windows.get(Category::Prime).lock().await.ingest_and_snapshot(&to_numbers(&batch));
            let even = windows.get(Category::Even).lock().await.ingest_and_snapshot(&[]);

            assert_invariants(&prime, 10);
            assert!(even.is_empty());
        });
    }
}
