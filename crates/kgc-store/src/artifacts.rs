//! Artifact files under the output directory.
//!
//! One pipeline run leaves a fixed set of files:
//! - `entities.json` / `relations.json` - extraction output
//! - `knowledge_graph.graphml` - the multigraph
//! - `graph.json` - node-link JSON for frontends
//! - `knowledge_graph.ttl` / `knowledge_graph.nt` - the triple store
//! - `graph_statistics.json` - summary over both views
//!
//! All artifacts are deterministic; re-running over the same corpus
//! rewrites byte-identical files.

use std::fs;
use std::path::{Path, PathBuf};

use kgc_core::{Entity, KgcError, Relation, Result};
use kgc_graph::{AssembledGraph, GraphStatistics};
use tracing::info;

pub const ENTITIES_FILE: &str = "entities.json";
pub const RELATIONS_FILE: &str = "relations.json";
pub const GRAPHML_FILE: &str = "knowledge_graph.graphml";
pub const NODE_LINK_FILE: &str = "graph.json";
pub const TURTLE_FILE: &str = "knowledge_graph.ttl";
pub const NTRIPLES_FILE: &str = "knowledge_graph.nt";
pub const STATISTICS_FILE: &str = "graph_statistics.json";

pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `output_dir`, creating it if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            KgcError::StorageError(format!(
                "cannot create output dir {}: {e}",
                output_dir.display()
            ))
        })?;
        Ok(Self { output_dir })
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }

    fn write(&self, file: &str, content: &str) -> Result<()> {
        let path = self.path(file);
        fs::write(&path, content)
            .map_err(|e| KgcError::StorageError(format!("cannot write {}: {e}", path.display())))
    }

    fn write_json<T: serde::Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| KgcError::StorageError(format!("cannot serialize {file}: {e}")))?;
        self.write(file, &json)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        let text = fs::read_to_string(&path)
            .map_err(|e| KgcError::StorageError(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| KgcError::StorageError(format!("invalid JSON in {}: {e}", path.display())))
    }

    pub fn save_entities(&self, entities: &[Entity]) -> Result<()> {
        self.write_json(ENTITIES_FILE, &entities)
    }

    pub fn save_relations(&self, relations: &[Relation]) -> Result<()> {
        self.write_json(RELATIONS_FILE, &relations)
    }

    pub fn load_entities(&self) -> Result<Vec<Entity>> {
        self.read_json(ENTITIES_FILE)
    }

    pub fn load_relations(&self) -> Result<Vec<Relation>> {
        self.read_json(RELATIONS_FILE)
    }

    /// Write every graph-derived artifact: GraphML, node-link JSON,
    /// Turtle, N-Triples and statistics.
    pub fn save_graph(&self, assembled: &AssembledGraph) -> Result<()> {
        self.write(GRAPHML_FILE, &assembled.graph.to_graphml())?;
        self.write_json(NODE_LINK_FILE, &assembled.graph.to_node_link())?;
        self.write(TURTLE_FILE, &assembled.rdf.to_turtle())?;
        self.write(NTRIPLES_FILE, &assembled.rdf.to_ntriples())?;
        self.save_statistics(&assembled.statistics())?;
        info!("graph artifacts written to {}", self.output_dir.display());
        Ok(())
    }

    pub fn save_statistics(&self, statistics: &GraphStatistics) -> Result<()> {
        self.write_json(STATISTICS_FILE, statistics)
    }
}

// ============================================================================
// Tests
// ============================================================================
