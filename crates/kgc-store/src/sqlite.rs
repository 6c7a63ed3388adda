//! SQLite persistence for the assembled graph.
//!
//! The schema mirrors the node-link view: a `nodes` table keyed by
//! entity text and an `edges` table with one row per relation edge.
//! Storing a graph replaces previous contents, so the database always
//! reflects the latest run.

use kgc_core::{KgcError, Result};
use kgc_graph::NodeLinkGraph;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::info;

pub const DATABASE_FILE: &str = "knowledge_graph.db";

const INIT_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS nodes (
    id TEXT PRIMARY KEY,
    label TEXT,
    type TEXT
);

CREATE TABLE IF NOT EXISTS edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL REFERENCES nodes(id),
    target TEXT NOT NULL REFERENCES nodes(id),
    label TEXT,
    sentence TEXT
);

CREATE INDEX IF NOT EXISTS idx_edges_source ON edges(source);
CREATE INDEX IF NOT EXISTS idx_edges_target ON edges(target);
"#;

pub struct GraphDb {
    pool: Pool<Sqlite>,
}

impl GraphDb {
    /// Open (or create) the database at `path`.
    pub async fn open(path: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite:{path}?mode=rwc"))
            .await
            .map_err(|e| KgcError::StorageError(format!("cannot open database {path}: {e}")))?;

        sqlx::query(INIT_SQL)
            .execute(&pool)
            .await
            .map_err(|e| KgcError::StorageError(format!("schema init failed: {e}")))?;

        Ok(Self { pool })
    }

    /// In-memory database, used in tests.
    pub async fn open_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| KgcError::StorageError(format!("cannot open in-memory db: {e}")))?;

        sqlx::query(INIT_SQL)
            .execute(&pool)
            .await
            .map_err(|e| KgcError::StorageError(format!("schema init failed: {e}")))?;

        Ok(Self { pool })
    }

    /// Replace the stored graph with `graph`, atomically.
    pub async fn store_graph(&self, graph: &NodeLinkGraph) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| KgcError::StorageError(format!("transaction begin failed: {e}")))?;

        sqlx::query("DELETE FROM edges")
            .execute(&mut *tx)
            .await
            .map_err(|e| KgcError::StorageError(format!("edge cleanup failed: {e}")))?;
        sqlx::query("DELETE FROM nodes")
            .execute(&mut *tx)
            .await
            .map_err(|e| KgcError::StorageError(format!("node cleanup failed: {e}")))?;

        for node in &graph.nodes {
            sqlx::query("INSERT OR REPLACE INTO nodes (id, label, type) VALUES (?, ?, ?)")
                .bind(&node.id)
                .bind(&node.label)
                .bind(&node.kind)
                .execute(&mut *tx)
                .await
                .map_err(|e| KgcError::StorageError(format!("node insert failed: {e}")))?;
        }

        for edge in &graph.edges {
            sqlx::query(
                "INSERT INTO edges (source, target, label, sentence) VALUES (?, ?, ?, ?)",
            )
            .bind(&edge.source)
            .bind(&edge.target)
            .bind(&edge.label)
            .bind(&edge.sentence)
            .execute(&mut *tx)
            .await
            .map_err(|e| KgcError::StorageError(format!("edge insert failed: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| KgcError::StorageError(format!("transaction commit failed: {e}")))?;

        info!(
            "stored graph: {} nodes, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(())
    }

    pub async fn node_count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM nodes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| KgcError::StorageError(format!("node count failed: {e}")))?;
        Ok(count)
    }

    pub async fn edge_count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM edges")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| KgcError::StorageError(format!("edge count failed: {e}")))?;
        Ok(count)
    }
}

// ============================================================================
// Tests
// ============================================================================
