//! SQLite player repository.
//!
//! One row per player. The upgrade path is a single conditional UPDATE;
//! `rows_affected == 0` is how a failed optimistic check reports itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use driftline_domain::{Player, PlayerId, Reward, RodLevel};

use crate::infrastructure::ports::{PlayerRepo, RepoError, UpgradeCommit};

/// SQLite-backed `PlayerRepo`.
pub struct SqlitePlayerRepo {
    pool: SqlitePool,
}

impl SqlitePlayerRepo {
    /// Connect over an existing pool and ensure the schema exists.
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS players (
                id TEXT PRIMARY KEY,
                display_name TEXT,
                gold INTEGER NOT NULL DEFAULT 0,
                points INTEGER NOT NULL DEFAULT 0,
                rod_level INTEGER NOT NULL DEFAULT 1,
                is_guest INTEGER NOT NULL DEFAULT 0,
                is_verified INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(db_err)?;

        // Ranking query: points desc, then registration order.
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_players_ranking
            ON players(points DESC, created_at ASC)
            "#,
        )
        .execute(&pool)
        .await
        .map_err(db_err)?;

        Ok(Self { pool })
    }

    async fn fetch(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query("SELECT * FROM players WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(row_to_player).transpose()
    }
}

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

fn row_to_player(row: &sqlx::sqlite::SqliteRow) -> Result<Player, RepoError> {
    let id_text: String = row.try_get("id").map_err(db_err)?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|e| RepoError::Database(format!("bad player id '{id_text}': {e}")))?;

    let gold: i64 = row.try_get("gold").map_err(db_err)?;
    let points: i64 = row.try_get("points").map_err(db_err)?;
    let rod_level: i64 = row.try_get("rod_level").map_err(db_err)?;
    let created_at_text: String = row.try_get("created_at").map_err(db_err)?;

    let rod_level = u8::try_from(rod_level)
        .ok()
        .and_then(|l| RodLevel::new(l).ok())
        .ok_or_else(|| RepoError::Database(format!("rod level {rod_level} out of range")))?;

    let created_at: DateTime<Utc> = created_at_text
        .parse()
        .map_err(|e| RepoError::Database(format!("bad created_at '{created_at_text}': {e}")))?;

    Ok(Player {
        id: PlayerId::from_uuid(id),
        display_name: row.try_get("display_name").map_err(db_err)?,
        gold: u64::try_from(gold).unwrap_or(0),
        points: u64::try_from(points).unwrap_or(0),
        rod_level,
        is_guest: row.try_get::<i64, _>("is_guest").map_err(db_err)? != 0,
        is_verified: row.try_get::<i64, _>("is_verified").map_err(db_err)? != 0,
        created_at,
    })
}

fn as_db_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl PlayerRepo for SqlitePlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        self.fetch(id).await
    }

    async fn create(&self, player: &Player) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO players (id, display_name, gold, points, rod_level, is_guest, is_verified, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(player.id.to_string())
        .bind(player.display_name.as_deref())
        .bind(as_db_int(player.gold))
        .bind(as_db_int(player.points))
        .bind(i64::from(player.rod_level.get()))
        .bind(i64::from(player.is_guest))
        .bind(i64::from(player.is_verified))
        .bind(player.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn record_catch(&self, id: PlayerId, reward: Reward) -> Result<Player, RepoError> {
        let result = sqlx::query("UPDATE players SET gold = gold + ?, points = points + ? WHERE id = ?")
            .bind(as_db_int(reward.gold))
            .bind(as_db_int(reward.points))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.fetch(id).await?.ok_or(RepoError::NotFound(id))
    }

    async fn commit_upgrade(
        &self,
        id: PlayerId,
        expected_level: RodLevel,
        cost: u64,
    ) -> Result<UpgradeCommit, RepoError> {
        // The whole precondition rides on this one statement: the balance
        // must still cover the cost AND the level must be the one the
        // caller read. Anything else is a failed optimistic check.
        let result = sqlx::query(
            r#"
            UPDATE players
            SET gold = gold - ?, rod_level = rod_level + 1
            WHERE id = ? AND gold >= ? AND rod_level = ?
            "#,
        )
        .bind(as_db_int(cost))
        .bind(id.to_string())
        .bind(as_db_int(cost))
        .bind(i64::from(expected_level.get()))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Ok(UpgradeCommit::PreconditionFailed);
        }

        let player = self.fetch(id).await?.ok_or(RepoError::NotFound(id))?;
        Ok(UpgradeCommit::Committed(player))
    }

    async fn top_ranked(&self, limit: u32) -> Result<Vec<Player>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM players
            WHERE is_guest = 1 OR is_verified = 1
            ORDER BY points DESC, created_at ASC, id ASC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_player).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> SqlitePlayerRepo {
        // Single connection so every query sees the same :memory: database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        SqlitePlayerRepo::new(pool).await.expect("schema")
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let repo = repo().await;
        let player = Player::new_guest(Utc::now());
        repo.create(&player).await.expect("create");

        let loaded = repo.get(player.id).await.expect("get").expect("exists");
        assert_eq!(loaded.id, player.id);
        assert_eq!(loaded.gold, 0);
        assert_eq!(loaded.rod_level, RodLevel::MIN);
        assert!(loaded.is_guest);
    }

    #[tokio::test]
    async fn test_record_catch_increments_both_balances() {
        let repo = repo().await;
        let player = Player::new_guest(Utc::now());
        repo.create(&player).await.expect("create");

        let updated = repo
            .record_catch(player.id, Reward::new(10, 10))
            .await
            .expect("catch");
        assert_eq!(updated.gold, 10);
        assert_eq!(updated.points, 10);

        let updated = repo
            .record_catch(player.id, Reward::new(2, 2))
            .await
            .expect("catch");
        assert_eq!(updated.gold, 12);
        assert_eq!(updated.points, 12);
    }

    #[tokio::test]
    async fn test_commit_upgrade_checks_gold_and_level() {
        let repo = repo().await;
        let mut player = Player::new_guest(Utc::now());
        player.gold = 10;
        repo.create(&player).await.expect("create");

        match repo
            .commit_upgrade(player.id, RodLevel::MIN, 10)
            .await
            .expect("commit")
        {
            UpgradeCommit::Committed(updated) => {
                assert_eq!(updated.gold, 0);
                assert_eq!(updated.rod_level.get(), 2);
            }
            UpgradeCommit::PreconditionFailed => panic!("upgrade should commit"),
        }

        // Same expected level again: the row moved on, check must fail.
        let second = repo
            .commit_upgrade(player.id, RodLevel::MIN, 10)
            .await
            .expect("commit");
        assert!(matches!(second, UpgradeCommit::PreconditionFailed));

        let current = repo.get(player.id).await.expect("get").expect("exists");
        assert_eq!(current.gold, 0);
        assert_eq!(current.rod_level.get(), 2);
    }

    #[tokio::test]
    async fn test_top_ranked_orders_and_filters() {
        let repo = repo().await;

        let mut first = Player::new_guest(Utc::now());
        first.points = 50;
        let mut second = Player::new_guest(Utc::now());
        second.points = 80;
        let mut hidden = Player::new_guest(Utc::now());
        hidden.points = 999;
        hidden.is_guest = false; // pending registration, not ranked

        for p in [&first, &second, &hidden] {
            repo.create(p).await.expect("create");
        }

        let top = repo.top_ranked(10).await.expect("top");
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, second.id);
        assert_eq!(top[1].id, first.id);
    }
}
