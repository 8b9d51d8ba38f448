mod common;

use common::{create_test_store, create_test_store_with};
use pretty_assertions::assert_eq;
use wayfinder::models::Node;
use wayfinder::store::{tree_error, Store};
use wayfinder::tree::TreeError;

fn leaf(id: &str) -> Node {
    Node {
        id: id.to_string(),
        question: "Recommended Solution:".to_string(),
        options: vec![],
        is_leaf: true,
        recommendation: Some("Something".to_string()),
        description: None,
        skill_level: None,
        pros: vec![],
        cons: vec![],
        learning_resources: vec![],
    }
}

#[tokio::test]
async fn open_fails_on_a_missing_file() {
    let path = std::env::temp_dir().join("wayfinder_no_such_file.json");
    let _ = std::fs::remove_file(&path);

    assert!(Store::new(path).await.is_err());
}

#[tokio::test]
async fn open_fails_on_a_malformed_document() {
    let store = create_test_store().await;
    std::fs::write(store.path(), "{ not json").unwrap();

    assert!(store.load().await.is_err());
}

#[tokio::test]
async fn load_then_persist_is_semantically_a_noop() {
    let store = create_test_store().await;

    let before = store.load().await.unwrap();
    store.replace(&before).await.unwrap();
    let after = store.load().await.unwrap();

    assert_eq!(
        serde_json::to_value(&before).unwrap(),
        serde_json::to_value(&after).unwrap(),
    );
}

#[tokio::test]
async fn add_node_is_persisted() {
    let store = create_test_store().await;

    store.add_node(leaf("brand-new")).await.unwrap();

    let doc = store.load().await.unwrap();
    assert_eq!(doc.nodes.len(), 6);
    assert!(doc.nodes.iter().any(|n| n.id == "brand-new"));
}

#[tokio::test]
async fn update_node_is_persisted() {
    let store = create_test_store().await;

    let mut node = leaf("orphan");
    node.recommendation = Some("Rewritten".to_string());
    store.update_node(node).await.unwrap();

    let doc = store.load().await.unwrap();
    let orphan = doc.nodes.iter().find(|n| n.id == "orphan").unwrap();
    assert_eq!(orphan.recommendation.as_deref(), Some("Rewritten"));
}

#[tokio::test]
async fn delete_node_is_persisted() {
    let store = create_test_store().await;

    store.delete_node("orphan").await.unwrap();

    let doc = store.load().await.unwrap();
    assert!(!doc.nodes.iter().any(|n| n.id == "orphan"));
}

#[tokio::test]
async fn delete_root_leaves_the_document_untouched() {
    let store = create_test_store().await;

    let err = store.delete_node("root").await.unwrap_err();
    assert!(matches!(tree_error(&err), Some(TreeError::RootDeletion)));

    let doc = store.load().await.unwrap();
    assert_eq!(doc.nodes.len(), 5);
}

#[tokio::test]
async fn delete_referenced_node_leaves_the_document_untouched() {
    let store = create_test_store().await;

    let err = store.delete_node("leaf-a").await.unwrap_err();
    assert!(matches!(
        tree_error(&err),
        Some(TreeError::Referenced { .. })
    ));

    let doc = store.load().await.unwrap();
    assert_eq!(doc.nodes.len(), 5);
}

#[tokio::test]
async fn enrichment_fields_survive_a_round_trip() {
    let store = create_test_store_with(
        r#"{
            "nodes": [
                {
                    "id": "root",
                    "question": "Recommended Solution:",
                    "options": [],
                    "isLeaf": true,
                    "recommendation": "Foo",
                    "skillLevel": "expert-ish",
                    "pros": ["fast"],
                    "cons": ["new"],
                    "learningResources": [
                        { "title": "Intro", "url": "https://example.com", "type": "video" }
                    ]
                }
            ]
        }"#,
    )
    .await;

    let doc = store.load().await.unwrap();
    store.replace(&doc).await.unwrap();
    let doc = store.load().await.unwrap();

    let root = &doc.nodes[0];
    assert_eq!(
        root.skill_level,
        Some(wayfinder::models::SkillLevel::Other(
            "expert-ish".to_string()
        ))
    );
    assert_eq!(root.pros, vec!["fast"]);
    assert_eq!(root.cons, vec!["new"]);
    assert_eq!(root.learning_resources[0].title, "Intro");
    assert_eq!(
        root.learning_resources[0].kind,
        wayfinder::models::ResourceKind::Video
    );
}
