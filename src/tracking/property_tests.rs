//! Property-Based Tests for the tracking decorators
//!
//! Replays random call/wait sequences against a reference model of each
//! counting policy on a paused tokio clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use crate::fetch::Fetcher;
use crate::store::{KeyValueStore, MemoryStore};
use crate::tracking::test_support::StubFetcher;
use crate::tracking::{CheckThenTrack, CountThenServe, RESULT_TTL_SECS};

const URLS: [&str; 3] = [
    "http://example.com",
    "http://example.com/a",
    "https://example.org/?q=1",
];

#[derive(Debug, Clone)]
enum Step {
    Call(usize),
    Wait(u64),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0..URLS.len()).prop_map(Step::Call),
        1 => (0u64..15).prop_map(Step::Wait),
    ]
}

/// Expected state of one URL.
#[derive(Debug, Default)]
struct Model {
    count: i64,
    expires_at: Option<u64>,
}

impl Model {
    fn is_live(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|at| now < at)
    }
}

async fn stored_count(store: &MemoryStore, url: &str) -> Option<i64> {
    store
        .get(&format!("count:{}", url))
        .await
        .unwrap()
        .map(|bytes| String::from_utf8(bytes).unwrap().parse().unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Every call counts; a refetch resets the count; pages live RESULT_TTL_SECS.
    #[test]
    fn prop_count_then_serve_matches_model(steps in prop::collection::vec(step_strategy(), 1..40)) {
        tokio_test::block_on(async {
            tokio::time::pause();

            let store = Arc::new(MemoryStore::new());
            let page = CountThenServe::new(store.clone(), StubFetcher::ok("PAGE"));
            let mut models: HashMap<&str, Model> = HashMap::new();
            let mut now = 0u64;
            let mut fetches = 0usize;

            for step in steps {
                match step {
                    Step::Wait(secs) => {
                        tokio::time::advance(Duration::from_secs(secs)).await;
                        now += secs;
                    }
                    Step::Call(i) => {
                        let url = URLS[i];
                        prop_assert_eq!(page.fetch(url).await.unwrap(), "PAGE");

                        let model = models.entry(url).or_default();
                        model.count += 1;
                        if !model.is_live(now) {
                            fetches += 1;
                            model.count = 0;
                            model.expires_at = Some(now + RESULT_TTL_SECS);
                        }

                        prop_assert_eq!(stored_count(&store, url).await, Some(model.count));
                    }
                }
            }

            prop_assert_eq!(page.inner().calls(), fetches);
            Ok(())
        })?;
    }

    // Only misses count and the count never goes down.
    #[test]
    fn prop_check_then_track_matches_model(
        steps in prop::collection::vec(step_strategy(), 1..40),
        expiration in 1u64..20
    ) {
        tokio_test::block_on(async {
            tokio::time::pause();

            let store = Arc::new(MemoryStore::new());
            let page = CheckThenTrack::new(store.clone(), StubFetcher::ok("PAGE"), expiration);
            let mut models: HashMap<&str, Model> = HashMap::new();
            let mut now = 0u64;

            for step in steps {
                match step {
                    Step::Wait(secs) => {
                        tokio::time::advance(Duration::from_secs(secs)).await;
                        now += secs;
                    }
                    Step::Call(i) => {
                        let url = URLS[i];
                        let before = stored_count(&store, url).await.unwrap_or(0);
                        prop_assert_eq!(page.fetch(url).await.unwrap(), "PAGE");

                        let model = models.entry(url).or_default();
                        if !model.is_live(now) {
                            model.count += 1;
                            model.expires_at = Some(now + expiration);
                        }

                        let after = stored_count(&store, url).await.unwrap_or(0);
                        prop_assert!(after >= before, "count went down for {}", url);
                        prop_assert_eq!(after, model.count);
                    }
                }
            }

            let misses: i64 = models.values().map(|m| m.count).sum();
            prop_assert_eq!(page.inner().calls() as i64, misses);
            Ok(())
        })?;
    }
}
