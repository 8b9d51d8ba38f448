//! Decision-tree traversal and mutation.
//!
//! The persisted document is a flat list of nodes linked by id strings
//! (`Option::next_node_id`). Traversal builds an id index once and then
//! follows references; broken references degrade to no-ops rather than
//! erroring, tolerating malformed data.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

use crate::models::{DecisionTree, Node, NodeOption};

/// Id of the unique entry-point node.
pub const ROOT_ID: &str = "root";

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("the tree has no {ROOT_ID:?} node")]
    RootMissing,
    #[error("the root node cannot be deleted")]
    RootDeletion,
    #[error("node {id:?} is still referenced by node {referrer:?}")]
    Referenced { id: String, referrer: String },
}

/// Id lookup over a loaded document. On duplicate ids the first node wins,
/// matching linear-search semantics over the stored list.
pub struct TreeIndex<'a> {
    by_id: HashMap<&'a str, &'a Node>,
}

impl<'a> TreeIndex<'a> {
    pub fn new(tree: &'a DecisionTree) -> Self {
        let mut by_id = HashMap::with_capacity(tree.nodes.len());
        for node in &tree.nodes {
            by_id.entry(node.id.as_str()).or_insert(node);
        }
        Self { by_id }
    }

    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }

    pub fn root(&self) -> Result<&'a Node, TreeError> {
        self.node(ROOT_ID).ok_or(TreeError::RootMissing)
    }
}

/// A position in the tree plus the path taken to get there.
///
/// The path always starts at the root node; `answers` holds the label of the
/// option chosen at each step, so it is one element shorter than the path.
pub struct Walk<'a> {
    index: &'a TreeIndex<'a>,
    path: Vec<&'a Node>,
    answers: Vec<&'a str>,
}

impl<'a> Walk<'a> {
    pub fn start(index: &'a TreeIndex<'a>) -> Result<Self, TreeError> {
        let root = index.root()?;
        Ok(Self {
            index,
            path: vec![root],
            answers: Vec::new(),
        })
    }

    pub fn current(&self) -> &'a Node {
        self.path.last().copied().expect("walk path is never empty")
    }

    pub fn path(&self) -> &[&'a Node] {
        &self.path
    }

    pub fn answers(&self) -> &[&'a str] {
        &self.answers
    }

    /// Follow `option` to its target node. Returns the new current node, or
    /// `None` (leaving the walk untouched) when the option is a dead end or
    /// its target id does not resolve.
    pub fn advance(&mut self, option: &'a NodeOption) -> Option<&'a Node> {
        let target_id = option.next_node_id.as_deref()?;
        let target = self.index.node(target_id)?;
        self.path.push(target);
        self.answers.push(option.text.as_str());
        Some(target)
    }

    /// Step back to the previous node. No-op when already at the root.
    pub fn back(&mut self) -> &'a Node {
        if self.path.len() > 1 {
            self.path.pop();
            self.answers.pop();
        }
        self.current()
    }

    pub fn reset(&mut self) {
        self.path.truncate(1);
        self.answers.clear();
    }

    /// Rebuild a walk from a serialized id list (a shared link), replaying
    /// `advance` for each listed id and recovering the chosen option labels.
    /// Any id that cannot be reached from the step before it falls back to a
    /// fresh walk at the root.
    pub fn replay<I>(index: &'a TreeIndex<'a>, ids: I) -> Result<Self, TreeError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut walk = Self::start(index)?;
        for id in ids {
            let id = id.as_ref();
            if walk.path.len() == 1 && id == walk.current().id {
                continue; // shared links list the root as their first entry
            }
            let chosen = walk
                .current()
                .options
                .iter()
                .find(|opt| opt.next_node_id.as_deref() == Some(id));
            let advanced = chosen.and_then(|opt| walk.advance(opt));
            if advanced.is_none() {
                tracing::debug!("shared path references unreachable node {id:?}, restarting");
                walk.reset();
                return Ok(walk);
            }
        }
        Ok(walk)
    }
}

impl DecisionTree {
    /// Replace the stored node with a matching id. Silent no-op when the id
    /// is unknown.
    pub fn update_node(&mut self, node: Node) {
        if let Some(slot) = self.nodes.iter_mut().find(|n| n.id == node.id) {
            *slot = node;
        }
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove a node. Refuses to delete the root, and refuses to delete a
    /// node that some other node's option still points at.
    pub fn delete_node(&mut self, id: &str) -> Result<(), TreeError> {
        if id == ROOT_ID {
            return Err(TreeError::RootDeletion);
        }

        let referrer = self.nodes.iter().find(|node| {
            node.id != id
                && node
                    .options
                    .iter()
                    .any(|opt| opt.next_node_id.as_deref() == Some(id))
        });
        if let Some(referrer) = referrer {
            return Err(TreeError::Referenced {
                id: id.to_string(),
                referrer: referrer.id.clone(),
            });
        }

        self.nodes.retain(|node| node.id != id);
        Ok(())
    }

    /// Option references whose target id resolves to no node, as
    /// `(referrer id, missing target id)` pairs.
    pub fn dangling_references(&self) -> Vec<(&str, &str)> {
        let index = TreeIndex::new(self);
        self.nodes
            .iter()
            .flat_map(|node| {
                node.options
                    .iter()
                    .filter_map(|opt| opt.next_node_id.as_deref())
                    .filter(|target| index.node(target).is_none())
                    .map(|target| (node.id.as_str(), target))
            })
            .collect()
    }
}

// encodeURIComponent's unreserved characters.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a walk's path as the query string of a shareable link:
/// the comma-joined id list plus the terminal node id, both escaped.
pub fn share_query(path: &[&Node]) -> String {
    let ids: Vec<&str> = path.iter().map(|node| node.id.as_str()).collect();
    share_query_ids(&ids)
}

pub fn share_query_ids(ids: &[&str]) -> String {
    let joined = ids.join(",");
    let terminal = ids.last().copied().unwrap_or(ROOT_ID);
    format!(
        "path={}&node={}",
        utf8_percent_encode(&joined, QUERY),
        utf8_percent_encode(terminal, QUERY),
    )
}

/// Split a decoded `path` query parameter back into ids.
pub fn split_path_param(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}
