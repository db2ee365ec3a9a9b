//! Background retrain worker, driven from inside a tokio runtime.

use std::sync::Arc;

use palate_core::config::JoinStrategy;
use palate_core::models::*;
use palate_core::traits::IPreferenceStorage;
use palate_model::{ForestParams, ModelRegistry};
use palate_storage::StorageEngine;
use palate_training::{RetrainWorker, Retrainer};
use tokio::runtime::Handle;

fn retrainer_with_data() -> Arc<Retrainer<StorageEngine>> {
    let store = StorageEngine::open_in_memory().unwrap();
    let (user, _) = store.get_or_create_user("joao").unwrap();
    store
        .save_search_query(
            user.user_id,
            &SearchQuery {
                cuisines: vec!["Mexican".to_string()],
                tastes: vec![],
                diet: Diet::Unrestricted,
                price_range: PriceRange::DEFAULT,
                location: "Braga".to_string(),
                emotion: Emotion::Neutral,
            },
        )
        .unwrap();
    store.record_interaction(user.user_id, "Mexican", Feedback::Like).unwrap();

    Arc::new(Retrainer::new(
        Arc::new(store),
        Arc::new(ModelRegistry::new()),
        ForestParams {
            n_trees: 5,
            ..ForestParams::default()
        },
        JoinStrategy::MostRecent,
    ))
}

#[tokio::test]
async fn requested_retrain_runs_before_shutdown_returns() {
    let retrainer = retrainer_with_data();
    let worker = RetrainWorker::spawn(Arc::clone(&retrainer), &Handle::current());

    assert!(worker.request().unwrap());
    worker.shutdown().await.unwrap();

    assert!(retrainer.registry().is_loaded());
    assert!(retrainer.metrics().trained >= 1);
}

#[tokio::test]
async fn burst_of_requests_is_coalesced() {
    let retrainer = retrainer_with_data();
    let worker = RetrainWorker::spawn(Arc::clone(&retrainer), &Handle::current());

    let queued = (0..50).filter(|_| worker.request().unwrap()).count();
    let coalesced = worker.coalesced() as usize;
    assert_eq!(queued + coalesced, 50);
    assert!(coalesced > 0);

    worker.shutdown().await.unwrap();
    let metrics = retrainer.metrics();
    assert_eq!(metrics.total_runs as usize, queued);
    assert!(retrainer.registry().is_loaded());
}

#[tokio::test]
async fn retrain_now_from_async_task_while_worker_runs() {
    let retrainer = retrainer_with_data();
    let worker = RetrainWorker::spawn(Arc::clone(&retrainer), &Handle::current());
    worker.request().unwrap();

    let direct = {
        let retrainer = Arc::clone(&retrainer);
        tokio::spawn(async move { retrainer.retrain_now() })
    };
    assert!(direct.await.unwrap().unwrap().is_trained());

    worker.shutdown().await.unwrap();
    let metrics = retrainer.metrics();
    assert_eq!(metrics.total_runs, 2);
    assert!(metrics.trained >= 1);
}
