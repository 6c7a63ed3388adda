//! Directed multigraph over extracted entities and relations.
//!
//! Nodes are keyed by entity text. Relations become directed edges and
//! parallel edges are kept, so two different predicates (or the same
//! predicate from two sentences) between one entity pair stay distinct.
//! Endpoints named only by a relation are created as bare nodes.

use std::collections::HashMap;

use kgc_core::{Entity, Relation, Strategy};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// Node payload. Bare nodes created from relation endpoints carry an
/// empty label and no strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub text: String,
    pub label: String,
    pub strategy: Option<Strategy>,
}

/// Edge payload: the predicate and its evidence sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    pub predicate: String,
    pub sentence: String,
}

pub struct KnowledgeGraph {
    graph: DiGraph<NodeData, EdgeData>,
    index: HashMap<String, NodeIndex>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Add an entity node. An existing node with the same text has its
    /// label and strategy overwritten.
    pub fn add_entity(&mut self, entity: &Entity) -> NodeIndex {
        let data = NodeData {
            text: entity.text.clone(),
            label: entity.label.clone(),
            strategy: Some(entity.strategy),
        };
        match self.index.get(&entity.text) {
            Some(&idx) => {
                self.graph[idx] = data;
                idx
            }
            None => {
                let idx = self.graph.add_node(data);
                self.index.insert(entity.text.clone(), idx);
                idx
            }
        }
    }

    /// Node for `text`, created bare if absent.
    fn ensure_node(&mut self, text: &str) -> NodeIndex {
        match self.index.get(text) {
            Some(&idx) => idx,
            None => {
                let idx = self.graph.add_node(NodeData {
                    text: text.to_string(),
                    label: String::new(),
                    strategy: None,
                });
                self.index.insert(text.to_string(), idx);
                idx
            }
        }
    }

    /// Add a relation edge. Both endpoints must be named; the predicate
    /// may be empty. Every call adds an edge, duplicates included.
    pub fn add_relation(&mut self, relation: &Relation) {
        if relation.subject.is_empty() || relation.object.is_empty() {
            return;
        }
        let source = self.ensure_node(&relation.subject);
        let target = self.ensure_node(&relation.object);
        self.graph.add_edge(
            source,
            target,
            EdgeData {
                predicate: relation.predicate.clone(),
                sentence: relation.sentence.clone(),
            },
        );
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, text: &str) -> Option<NodeIndex> {
        self.index.get(text).copied()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Edges with their endpoint payloads, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeData, &NodeData, &EdgeData)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                edge.weight(),
            )
        })
    }

    pub(crate) fn inner(&self) -> &DiGraph<NodeData, EdgeData> {
        &self.graph
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
