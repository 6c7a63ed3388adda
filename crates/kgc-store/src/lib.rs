//! Persistence layer: corpus loading, run artifacts, and the SQLite
//! graph database.
//!
//! - [`load_documents`] reads a JSON corpus from a file or directory
//! - [`ArtifactStore`] writes and reads the per-run output files
//! - [`GraphDb`] keeps the latest graph queryable in SQLite

pub mod artifacts;
pub mod documents;
pub mod sqlite;

pub use artifacts::{
    ArtifactStore, ENTITIES_FILE, GRAPHML_FILE, NODE_LINK_FILE, NTRIPLES_FILE, RELATIONS_FILE,
    STATISTICS_FILE, TURTLE_FILE,
};
pub use documents::load_documents;
pub use sqlite::{GraphDb, DATABASE_FILE};
