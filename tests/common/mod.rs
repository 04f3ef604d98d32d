#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use hexlink::domain::repositories::UrlRepository;
use hexlink::infrastructure::persistence::MemoryUrlRepository;
use hexlink::routes::public_routes;
use hexlink::state::AppState;
use std::sync::Arc;

pub fn create_test_state() -> (AppState, Arc<MemoryUrlRepository>) {
    let repository = Arc::new(MemoryUrlRepository::new());
    let state = AppState::new(repository.clone());

    (state, repository)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryUrlRepository>) {
    let (state, repository) = create_test_state();
    let app: Router = public_routes().with_state(state);

    (TestServer::new(app).unwrap(), repository)
}

pub async fn insert_mapping(repository: &MemoryUrlRepository, short: &str, original: &str) {
    repository.insert(short, original).await.unwrap();
}
