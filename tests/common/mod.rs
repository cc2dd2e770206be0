//! Integration test common infrastructure.
//!
//! Provides a seeded in-memory SQLite database, the test entity models,
//! and the hint configuration shared by the query- and find-flow tests.

// Not every test file exercises every fixture item.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use ophint::{
    EntitySet, HintHandlerRegistry, HintPerformer, Include, IncludesHandlerExt, RelationSource,
    SelectQuery, SqliteStore, configure_hints,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Hints understood by the test models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestHints {
    SingleRelation,
    MultipleRelation,
    AllRelations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleEntity {
    pub id: i64,
    pub name: String,
}

/// Entity with one to-one and one to-many relation, both lazily `None`
/// until a hint asks for them.
#[derive(Debug, Clone)]
pub struct ComplexEntity {
    pub id: i64,
    pub name: String,
    pub single_relation_id: Option<i64>,
    pub single_relation: Option<SimpleEntity>,
    pub multiple_relation: Option<Vec<SimpleEntity>>,
}

/// Test database: schema plus seed data over an in-memory store.
pub struct LocalDb {
    store: SqliteStore,
}

impl LocalDb {
    /// Connects an isolated in-memory database, creates the schema, and
    /// seeds it twice (two complex rows, each with one single-relation
    /// row and two multiple-relation rows).
    pub async fn connect_seeded() -> Self {
        init_tracing();
        let store = SqliteStore::connect(":memory:")
            .await
            .expect("connect in-memory store");
        let db = Self { store };
        db.create_schema().await;
        db.seed().await;
        db.seed().await;
        db
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        self.store.pool()
    }

    async fn create_schema(&self) {
        sqlx::query(
            "CREATE TABLE simple_entities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                complex_id INTEGER
            )",
        )
        .execute(self.pool())
        .await
        .expect("create simple_entities");

        sqlx::query(
            "CREATE TABLE complex_entities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                single_relation_id INTEGER
            )",
        )
        .execute(self.pool())
        .await
        .expect("create complex_entities");
    }

    async fn seed(&self) {
        let single = sqlx::query("INSERT INTO simple_entities (name) VALUES ('SingleRelation')")
            .execute(self.pool())
            .await
            .expect("insert single relation");

        let complex = sqlx::query(
            "INSERT INTO complex_entities (name, single_relation_id) VALUES ('ComplexEntity', ?)",
        )
        .bind(single.last_insert_rowid())
        .execute(self.pool())
        .await
        .expect("insert complex entity");

        sqlx::query(
            "INSERT INTO simple_entities (name, complex_id)
             VALUES ('MultipleRelation1', ?), ('MultipleRelation2', ?)",
        )
        .bind(complex.last_insert_rowid())
        .bind(complex.last_insert_rowid())
        .execute(self.pool())
        .await
        .expect("insert multiple relations");
    }

    /// Primary key of the first seeded complex entity.
    pub async fn first_complex_id(&self) -> i64 {
        sqlx::query_scalar("SELECT id FROM complex_entities ORDER BY id LIMIT 1")
            .fetch_one(self.pool())
            .await
            .expect("first complex id")
    }
}

fn complex_from_row(row: &SqliteRow) -> ComplexEntity {
    ComplexEntity {
        id: row.get(0),
        name: row.get(1),
        single_relation_id: row.get(2),
        single_relation: None,
        multiple_relation: None,
    }
}

fn simple_from_row(row: &SqliteRow) -> SimpleEntity {
    SimpleEntity {
        id: row.get(0),
        name: row.get(1),
    }
}

#[async_trait]
impl EntitySet<ComplexEntity> for LocalDb {
    async fn find(&self, id: i64) -> anyhow::Result<Option<ComplexEntity>> {
        let row =
            sqlx::query("SELECT id, name, single_relation_id FROM complex_entities WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.as_ref().map(complex_from_row))
    }

    async fn fetch(&self, query: &SelectQuery<ComplexEntity>) -> anyhow::Result<Vec<ComplexEntity>> {
        let rows =
            sqlx::query("SELECT id, name, single_relation_id FROM complex_entities ORDER BY id")
                .fetch_all(self.pool())
                .await?;
        let mut entities: Vec<ComplexEntity> = rows.iter().map(complex_from_row).collect();
        for entity in &mut entities {
            for include in query.includes() {
                self.load_relation_async(entity, include).await?;
            }
        }
        Ok(entities)
    }
}

#[async_trait]
impl RelationSource<ComplexEntity> for LocalDb {
    fn load_relation(&self, entity: &mut ComplexEntity, include: &Include) -> anyhow::Result<()> {
        ophint::relation::block_on_load(self.load_relation_async(entity, include))
    }

    async fn load_relation_async(
        &self,
        entity: &mut ComplexEntity,
        include: &Include,
    ) -> anyhow::Result<()> {
        match include.path() {
            "single_relation" => {
                if let Some(relation_id) = entity.single_relation_id {
                    let row = sqlx::query("SELECT id, name FROM simple_entities WHERE id = ?")
                        .bind(relation_id)
                        .fetch_optional(self.pool())
                        .await?;
                    entity.single_relation = row.as_ref().map(simple_from_row);
                }
                Ok(())
            }
            "multiple_relation" => {
                let rows = sqlx::query(
                    "SELECT id, name FROM simple_entities WHERE complex_id = ? ORDER BY id",
                )
                .bind(entity.id)
                .fetch_all(self.pool())
                .await?;
                entity.multiple_relation = Some(rows.iter().map(simple_from_row).collect());
                Ok(())
            }
            other => anyhow::bail!("unknown relation path: {other}"),
        }
    }
}

/// Registry configuration shared by all integration tests: one includes
/// action registered under both dispatch keys.
pub fn hint_registry() -> Arc<HintHandlerRegistry> {
    configure_hints(|builder| {
        builder.includes_handler::<ComplexEntity, LocalDb, TestHints>(|hint, includes| match hint {
            TestHints::SingleRelation => {
                includes.include_reference("single_relation");
            }
            TestHints::MultipleRelation => {
                includes.include_collection("multiple_relation");
            }
            TestHints::AllRelations => {
                includes
                    .include_reference("single_relation")
                    .include_collection("multiple_relation");
            }
        });
    })
}

/// A fresh performer over [`hint_registry`] with the given hints active.
pub fn performer_with(hints: &[TestHints]) -> HintPerformer {
    let mut performer = HintPerformer::new(hint_registry());
    for &hint in hints {
        performer.add_hint(hint);
    }
    performer
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
