// Tree store - whole-document persistence over one JSON file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::{eyre::WrapErr, Result};
use tokio::sync::Mutex;

use crate::models::{DecisionTree, Node};
use crate::tree::{self, TreeError};

/// File-backed store for the decision tree document. Reads are wholesale,
/// writes overwrite the whole file; every load-mutate-persist sequence runs
/// under one exclusive lock so concurrent edits cannot silently drop each
/// other's changes.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    write: Mutex<()>,
}

impl Store {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            inner: Arc::new(Inner {
                path: path.into(),
                write: Mutex::new(()),
            }),
        };

        // Verify the document is readable before serving anything.
        let doc = store.load().await?;
        if !doc.nodes.iter().any(|node| node.id == tree::ROOT_ID) {
            tracing::warn!("decision tree document has no root node");
        }

        tracing::info!(
            nodes = doc.nodes.len(),
            path = %store.inner.path.display(),
            "decision tree store has been verified"
        );

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Read and deserialize the whole backing document.
    pub async fn load(&self) -> Result<DecisionTree> {
        let raw = tokio::fs::read(&self.inner.path)
            .await
            .wrap_err_with(|| format!("could not read {}", self.inner.path.display()))?;
        let doc: DecisionTree =
            serde_json::from_slice(&raw).wrap_err("malformed decision tree document")?;
        Ok(doc)
    }

    /// Overwrite the whole persisted document.
    pub async fn replace(&self, doc: &DecisionTree) -> Result<()> {
        let _guard = self.inner.write.lock().await;
        self.persist(doc).await
    }

    pub async fn update_node(&self, node: Node) -> Result<()> {
        let _guard = self.inner.write.lock().await;
        let mut doc = self.load().await?;
        doc.update_node(node);
        self.persist(&doc).await
    }

    pub async fn add_node(&self, node: Node) -> Result<()> {
        let _guard = self.inner.write.lock().await;
        let mut doc = self.load().await?;
        doc.add_node(node);
        self.persist(&doc).await
    }

    pub async fn delete_node(&self, id: &str) -> Result<()> {
        let _guard = self.inner.write.lock().await;
        let mut doc = self.load().await?;
        doc.delete_node(id).map_err(color_eyre::Report::from)?;
        self.persist(&doc).await
    }

    async fn persist(&self, doc: &DecisionTree) -> Result<()> {
        // Dangling references are tolerated, the way the walk tolerates them,
        // but an operator should get to hear about them.
        for (referrer, target) in doc.dangling_references() {
            tracing::warn!("option on node {referrer:?} references missing node {target:?}");
        }

        let raw = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(&self.inner.path, raw)
            .await
            .wrap_err_with(|| format!("could not write {}", self.inner.path.display()))?;

        tracing::debug!(nodes = doc.nodes.len(), "decision tree document persisted");
        Ok(())
    }
}

/// Pull a typed tree mutation failure back out of an error chain, if that is
/// what stopped the operation.
pub fn tree_error(err: &color_eyre::Report) -> Option<&TreeError> {
    err.downcast_ref::<TreeError>()
}
