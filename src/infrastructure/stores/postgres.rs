use async_trait::async_trait;
use sqlx::PgPool;

use crate::coordinator::errors::StoreResult;
use crate::coordinator::store::RoomStore;

/// PostgreSQL room store for durable, multi-instance deployments
///
/// Expects a single table:
///
/// ```sql
/// CREATE TABLE rooms (
///     room_name TEXT PRIMARY KEY,
///     active    BOOLEAN NOT NULL
/// );
/// ```
///
/// The primary key gives entry uniqueness per room; compare-and-swap maps
/// to a conditional insert/update so concurrent coordinator instances
/// serialize on the row.
pub struct PostgresRoomStore {
    pool: PgPool,
}

impl PostgresRoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for PostgresRoomStore {
    async fn get(&self, room: &str) -> StoreResult<Option<bool>> {
        let active = sqlx::query_scalar::<_, bool>("SELECT active FROM rooms WHERE room_name = $1")
            .bind(room)
            .fetch_optional(&self.pool)
            .await?;

        Ok(active)
    }

    async fn set(&self, room: &str, active: bool) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO rooms (room_name, active) VALUES ($1, $2)
             ON CONFLICT (room_name) DO UPDATE SET active = EXCLUDED.active",
        )
        .bind(room)
        .bind(active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, room: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM rooms WHERE room_name = $1")
            .bind(room)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn contains(&self, room: &str) -> StoreResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rooms WHERE room_name = $1)")
                .bind(room)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn compare_and_swap(
        &self,
        room: &str,
        expected: Option<bool>,
        new: bool,
    ) -> StoreResult<bool> {
        let result = match expected {
            None => {
                sqlx::query(
                    "INSERT INTO rooms (room_name, active) VALUES ($1, $2)
                     ON CONFLICT (room_name) DO NOTHING",
                )
                .bind(room)
                .bind(new)
                .execute(&self.pool)
                .await?
            }
            Some(current) => {
                sqlx::query("UPDATE rooms SET active = $2 WHERE room_name = $1 AND active = $3")
                    .bind(room)
                    .bind(new)
                    .bind(current)
                    .execute(&self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected() == 1)
    }
}
