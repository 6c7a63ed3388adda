//! Graph serialization formats
//!
//! Writes the multigraph as GraphML and node-link JSON, and the triple
//! store as Turtle and N-Triples. All writers are deterministic: output
//! follows node, edge and statement insertion order, so the same graph
//! always serializes byte-identically.
//!
//! Author: hephaex@gmail.com

use indexmap::IndexMap;
use serde::Serialize;

use crate::multigraph::KnowledgeGraph;
use crate::rdf::{RdfStore, Statement, Term, KG_NS};

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";

// ============================================================================
// Multigraph: GraphML and node-link JSON
// ============================================================================

/// Node-link JSON shape, the interchange format for visualization
/// frontends.
#[derive(Debug, Clone, Serialize)]
pub struct NodeLinkGraph {
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeEntry {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeEntry {
    pub source: String,
    pub target: String,
    pub label: String,
    pub sentence: String,
}

impl KnowledgeGraph {
    /// Serialize as GraphML with node attributes `label`/`type` and
    /// edge attributes `label`/`sentence`. Bare nodes omit the
    /// attributes they do not carry.
    pub fn to_graphml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version='1.0' encoding='utf-8'?>\n");
        out.push_str(
            "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns \
             http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n",
        );
        out.push_str("  <key id=\"d0\" for=\"node\" attr.name=\"label\" attr.type=\"string\" />\n");
        out.push_str("  <key id=\"d1\" for=\"node\" attr.name=\"type\" attr.type=\"string\" />\n");
        out.push_str("  <key id=\"d2\" for=\"edge\" attr.name=\"label\" attr.type=\"string\" />\n");
        out.push_str(
            "  <key id=\"d3\" for=\"edge\" attr.name=\"sentence\" attr.type=\"string\" />\n",
        );
        out.push_str("  <graph edgedefault=\"directed\">\n");

        for node in self.nodes() {
            out.push_str(&format!("    <node id=\"{}\">", xml_escape(&node.text)));
            let mut wrote_data = false;
            if !node.label.is_empty() {
                out.push_str(&format!(
                    "\n      <data key=\"d0\">{}</data>",
                    xml_escape(&node.label)
                ));
                wrote_data = true;
            }
            if let Some(strategy) = node.strategy {
                out.push_str(&format!(
                    "\n      <data key=\"d1\">{}</data>",
                    xml_escape(strategy.as_str())
                ));
                wrote_data = true;
            }
            if wrote_data {
                out.push_str("\n    </node>\n");
            } else {
                out.truncate(out.len() - 1);
                out.push_str(" />\n");
            }
        }

        for (source, target, data) in self.edges() {
            out.push_str(&format!(
                "    <edge source=\"{}\" target=\"{}\">\n",
                xml_escape(&source.text),
                xml_escape(&target.text)
            ));
            out.push_str(&format!(
                "      <data key=\"d2\">{}</data>\n",
                xml_escape(&data.predicate)
            ));
            out.push_str(&format!(
                "      <data key=\"d3\">{}</data>\n",
                xml_escape(&data.sentence)
            ));
            out.push_str("    </edge>\n");
        }

        out.push_str("  </graph>\n</graphml>\n");
        out
    }

    /// Node-link view of the graph. Bare nodes serialize with empty
    /// label and type so consumers always see the same keys.
    pub fn to_node_link(&self) -> NodeLinkGraph {
        let nodes = self
            .nodes()
            .map(|node| NodeEntry {
                id: node.text.clone(),
                label: node.label.clone(),
                kind: node
                    .strategy
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
            })
            .collect();
        let edges = self
            .edges()
            .map(|(source, target, data)| EdgeEntry {
                source: source.text.clone(),
                target: target.text.clone(),
                label: data.predicate.clone(),
                sentence: data.sentence.clone(),
            })
            .collect();
        NodeLinkGraph { nodes, edges }
    }
}

// ============================================================================
// Triple store: Turtle and N-Triples
// ============================================================================

impl RdfStore {
    /// Serialize as Turtle, statements grouped by subject in first-seen
    /// order.
    pub fn to_turtle(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("@prefix kg: <{KG_NS}> .\n"));
        out.push_str(&format!("@prefix owl: <{OWL_NS}> .\n"));
        out.push_str(&format!("@prefix rdf: <{RDF_NS}> .\n"));
        out.push_str(&format!("@prefix rdfs: <{RDFS_NS}> .\n"));

        let mut by_subject: IndexMap<&str, Vec<&Statement>> = IndexMap::new();
        for statement in self.statements() {
            by_subject
                .entry(statement.subject.as_str())
                .or_default()
                .push(statement);
        }

        for (subject, statements) in by_subject {
            out.push('\n');
            out.push_str(&prefixed(subject));
            for (i, statement) in statements.iter().enumerate() {
                if i > 0 {
                    out.push_str(" ;");
                }
                out.push_str(&format!(
                    "\n    {} {}",
                    prefixed(&statement.predicate),
                    turtle_term(&statement.object)
                ));
            }
            out.push_str(" .\n");
        }
        out
    }

    /// Serialize as N-Triples, one statement per line in insertion
    /// order.
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for statement in self.statements() {
            out.push_str(&format!(
                "<{}> <{}> {} .\n",
                statement.subject,
                statement.predicate,
                ntriples_term(&statement.object)
            ));
        }
        out
    }
}

fn prefixed(iri: &str) -> String {
    for (ns, prefix) in [
        (KG_NS, "kg"),
        (OWL_NS, "owl"),
        (RDF_NS, "rdf"),
        (RDFS_NS, "rdfs"),
    ] {
        if let Some(local) = iri.strip_prefix(ns) {
            return format!("{prefix}:{local}");
        }
    }
    format!("<{iri}>")
}

fn turtle_term(term: &Term) -> String {
    match term {
        Term::Iri(iri) => prefixed(iri),
        Term::Literal { value, lang } => literal_form(value, lang.as_deref()),
    }
}

fn ntriples_term(term: &Term) -> String {
    match term {
        Term::Iri(iri) => format!("<{iri}>"),
        Term::Literal { value, lang } => literal_form(value, lang.as_deref()),
    }
}

fn literal_form(value: &str, lang: Option<&str>) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    match lang {
        Some(lang) => format!("\"{escaped}\"@{lang}"),
        None => format!("\"{escaped}\""),
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
