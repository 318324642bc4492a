use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use crate::config::DatabaseConfig;
use crate::errors::AppError;

/// Nearest-neighbor access to the pre-populated passage store.
///
/// The index is populated out of band and is read-only at request time.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Returns the stored passage texts nearest to `embedding`, closest first.
    async fn query(&self, embedding: &[f32], k: u64) -> Result<Vec<String>, AppError>;

    /// Number of passages currently stored.
    async fn count(&self) -> Result<u64, AppError>;
}

/// Postgres + pgvector implementation over a `passages` table.
#[derive(Clone)]
pub struct PgVectorIndex {
    db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct PassageRow {
    content: String,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

impl PgVectorIndex {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut opt = sea_orm::ConnectOptions::new(&config.url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout))
            .sqlx_logging(false);

        let db = sea_orm::Database::connect(opt).await?;
        Ok(Self { db })
    }
}

#[async_trait]
impl VectorIndex for PgVectorIndex {
    async fn query(&self, embedding: &[f32], k: u64) -> Result<Vec<String>, AppError> {
        // SeaORM has no native pgvector mapping; build the vector literal and
        // order by cosine distance in raw SQL. The literal is constructed
        // internally from floats, never from user input.
        let embedding_str = format!(
            "[{}]",
            embedding
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );

        let sql = format!(
            r#"
            SELECT content,
                   embedding <=> '{}'::vector AS distance
            FROM passages
            ORDER BY distance ASC
            LIMIT {}
            "#,
            embedding_str, k
        );

        let rows: Vec<PassageRow> =
            PassageRow::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
                .all(&self.db)
                .await?;

        Ok(rows.into_iter().map(|r| r.content).collect())
    }

    async fn count(&self) -> Result<u64, AppError> {
        let row = CountRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            "SELECT COUNT(*) AS count FROM passages".to_owned(),
        ))
        .one(&self.db)
        .await?
        .ok_or_else(|| AppError::DatabaseConnectionError("count query returned no row".into()))?;

        Ok(row.count as u64)
    }
}
