#![allow(dead_code)]

use wayfinder::{names, store::Store, AdminCredentials, AppState};

/// `admin:aiml1234` as a Basic authorization header value.
pub const GOOD_AUTH: &str = "Basic YWRtaW46YWltbDEyMzQ=";
/// `admin:wrong`
pub const BAD_PASSWORD_AUTH: &str = "Basic YWRtaW46d3Jvbmc=";
/// `mallory:aiml1234`
pub const BAD_USERNAME_AUTH: &str = "Basic bWFsbG9yeTphaW1sMTIzNA==";

pub fn sample_document() -> &'static str {
    r#"{
        "nodes": [
            {
                "id": "root",
                "question": "What do you need?",
                "options": [
                    { "id": "a", "text": "Option A", "nextNodeId": "alpha" },
                    { "id": "b", "text": "Option B", "nextNodeId": "beta" },
                    { "id": "dead", "text": "Dead End" }
                ]
            },
            {
                "id": "alpha",
                "question": "How experienced are you?",
                "options": [
                    { "id": "a1", "text": "Just starting", "nextNodeId": "leaf-a" },
                    { "id": "a2", "text": "Missing target", "nextNodeId": "no-such-node" }
                ]
            },
            {
                "id": "leaf-a",
                "question": "Recommended Solution:",
                "options": [],
                "isLeaf": true,
                "recommendation": "Foo",
                "description": "The Foo toolkit fits a beginner workflow.",
                "skillLevel": "beginner"
            },
            {
                "id": "beta",
                "question": "Recommended Solution:",
                "options": [],
                "isLeaf": true,
                "recommendation": "Bar"
            },
            {
                "id": "orphan",
                "question": "Recommended Solution:",
                "options": [],
                "isLeaf": true,
                "recommendation": "Unreferenced"
            }
        ]
    }"#
}

/// Write `json` to a fresh temp file and open a store over it.
pub async fn create_test_store_with(json: &str) -> Store {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("wayfinder_test_{}_{}.json", std::process::id(), id));
    std::fs::write(&path, json).expect("failed to write test document");
    Store::new(path).await.expect("failed to open test store")
}

pub async fn create_test_store() -> Store {
    create_test_store_with(sample_document()).await
}

pub async fn test_state() -> AppState {
    AppState {
        store: create_test_store().await,
        admin: AdminCredentials {
            username: names::DEFAULT_ADMIN_USERNAME.to_string(),
            password: names::DEFAULT_ADMIN_PASSWORD.to_string(),
        },
    }
}
