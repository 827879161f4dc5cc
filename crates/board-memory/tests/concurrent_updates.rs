//! Concurrent generations writing into one store.

use std::sync::Arc;

use board_core::entities::{InsightRecord, ParsedInsight};
use board_core::enums::{InsightKind, RecordStatus};
use board_memory::MemoryStore;
use pretty_assertions::assert_eq;

const TASKS: i64 = 32;

fn title(id: i64) -> String {
    format!("Brief {id}")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_generations_each_resolve_once() {
    let store = MemoryStore::new();

    let mut handles = Vec::new();
    for n in 0..TASKS {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            // Every task asks for the same id; the store hands out distinct ones.
            let id = store.append_fresh(1_000, |id| {
                InsightRecord::loading(id, &title(n), InsightKind::Brief)
            });
            tokio::task::yield_now().await;
            let base = title(n);
            let applied = store.update_by_id(id, |record| {
                if n % 2 == 0 {
                    record.resolve(&base, ParsedInsight::summary_only(format!("done {n}")));
                } else {
                    record.fail(&base);
                }
            });
            assert!(applied);
            id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), usize::try_from(TASKS).unwrap());

    let records = store.all();
    assert_eq!(records.len(), ids.len());
    assert!(
        records
            .iter()
            .all(|record| record.status() != Some(RecordStatus::Loading))
    );
    let ready = records
        .iter()
        .filter(|record| record.status() == Some(RecordStatus::Ready))
        .count();
    assert_eq!(ready, 16);
}

#[test]
fn readers_never_see_torn_updates() {
    let store = Arc::new(MemoryStore::new());
    store
        .append(InsightRecord::loading(1, "Pack", InsightKind::BoardPack))
        .unwrap();

    std::thread::scope(|scope| {
        let writer = Arc::clone(&store);
        scope.spawn(move || {
            for round in 0..500 {
                writer.update_by_id(1, |record| {
                    record.title = format!("Pack {round}");
                    record.description = format!("Pack {round}");
                });
            }
        });
        for _ in 0..2 {
            let reader = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..500 {
                    let record = reader.get(1).unwrap();
                    if record.title != "Pack (Loading...)" {
                        assert_eq!(record.title, record.description);
                    }
                }
            });
        }
    });
}
