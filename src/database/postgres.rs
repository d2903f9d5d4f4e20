use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info};

use super::manager::DatabaseError;
use super::store::{Datastore, DocumentPage, DocumentQuery, StoredDocument};

const CREATE_DOCUMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        kind        TEXT        NOT NULL,
        id          TEXT        NOT NULL,
        data        JSONB       NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (kind, id)
    )
"#;

const CREATE_DATA_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_data_idx ON documents USING GIN (data jsonb_path_ops)";

const CREATE_ORDER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_kind_order_idx ON documents (kind, created_at, id)";

/// Document store over a single Postgres table of JSONB rows keyed by `(kind, id)`
#[derive(Clone)]
pub struct PgDatastore {
    pool: PgPool,
}

impl PgDatastore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the documents table and its indexes if missing
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        for statement in [CREATE_DOCUMENTS_TABLE, CREATE_DATA_INDEX, CREATE_ORDER_INDEX] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Document store schema is up to date");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Datastore for PgDatastore {
    async fn get(&self, kind: &str, id: &str) -> Result<Option<Value>, DatabaseError> {
        let data = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE kind = $1 AND id = $2",
        )
        .bind(kind)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(data)
    }

    async fn put(&self, kind: &str, id: &str, data: Value) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO documents (kind, id, data) VALUES ($1, $2, $3)
             ON CONFLICT (kind, id) DO UPDATE SET data = EXCLUDED.data, updated_at = now()",
        )
        .bind(kind)
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await?;

        debug!(kind, id, "stored document");
        Ok(())
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM documents WHERE kind = $1 AND id = $2")
            .bind(kind)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, kind: &str, query: &DocumentQuery) -> Result<DocumentPage, DatabaseError> {
        // `data @> {}` matches every document, so an empty filter needs no special case
        let filter = Value::Object(query.filter.clone());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE kind = $1 AND data @> $2",
        )
        .bind(kind)
        .bind(&filter)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, (String, Value)>(
            "SELECT id, data FROM documents
             WHERE kind = $1 AND data @> $2
             ORDER BY created_at, id
             OFFSET $3 LIMIT $4",
        )
        .bind(kind)
        .bind(&filter)
        .bind(query.offset as i64)
        .bind(query.limit.map(|l| l as i64))
        .fetch_all(&self.pool)
        .await?;

        Ok(DocumentPage {
            documents: rows
                .into_iter()
                .map(|(id, data)| StoredDocument { id, data })
                .collect(),
            total: total as usize,
        })
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Run with `DATABASE_URL=postgres://... cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    async fn connect() -> Option<PgDatastore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
        let store = PgDatastore::new(pool);
        store.migrate().await.unwrap();
        Some(store)
    }

    /// A kind no other run shares, so tests never see each other's rows
    fn scratch_kind() -> String {
        format!("Test{}", Uuid::new_v4().simple())
    }

    async fn cleanup(store: &PgDatastore, kind: &str) {
        sqlx::query("DELETE FROM documents WHERE kind = $1")
            .bind(kind)
            .execute(&store.pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn upsert_keeps_insertion_order() {
        let Some(store) = connect().await else { return };
        let kind = scratch_kind();

        store.put(&kind, "a", json!({"n": 1})).await.unwrap();
        store.put(&kind, "b", json!({"n": 2})).await.unwrap();
        store.put(&kind, "a", json!({"n": 10})).await.unwrap();

        assert_eq!(store.get(&kind, "a").await.unwrap(), Some(json!({"n": 10})));
        assert_eq!(store.get(&kind, "missing").await.unwrap(), None);

        let page = store.query(&kind, &DocumentQuery::all()).await.unwrap();
        let ids: Vec<&str> = page.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(page.total, 2);

        cleanup(&store, &kind).await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn filters_and_windows_with_total() {
        let Some(store) = connect().await else { return };
        let kind = scratch_kind();

        for (id, owner) in [("a", "alice"), ("b", "bob"), ("c", "alice"), ("d", "alice"), ("e", "bob")] {
            store.put(&kind, id, json!({"owner": owner})).await.unwrap();
        }

        let query = DocumentQuery::all().filter_eq("owner", "alice").window(1, 5);
        let page = store.query(&kind, &query).await.unwrap();
        let ids: Vec<&str> = page.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["c", "d"]);
        assert_eq!(page.total, 3);

        let everything = store.query(&kind, &DocumentQuery::all()).await.unwrap();
        assert_eq!(everything.documents.len(), 5);
        assert_eq!(everything.total, 5);

        let past_end = store.query(&kind, &DocumentQuery::all().window(10, 5)).await.unwrap();
        assert!(past_end.documents.is_empty());
        assert_eq!(past_end.total, 5);

        cleanup(&store, &kind).await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn delete_reports_whether_a_row_went() {
        let Some(store) = connect().await else { return };
        let kind = scratch_kind();

        store.put(&kind, "a", json!({})).await.unwrap();
        assert!(store.delete(&kind, "a").await.unwrap());
        assert!(!store.delete(&kind, "a").await.unwrap());
        assert!(store.health_check().await.is_ok());

        cleanup(&store, &kind).await;
    }
}
