use std::fmt::Debug;

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use crate::error::CatalogResult;
use crate::models::{DbGame, NewGame};

#[cfg(test)]
use mockall::automock;

/// Durable storage of catalog entries.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Debug + Send + Sync {
     /// All games, newest first.
     async fn list_games(&self) -> CatalogResult<Vec<DbGame>>;
     /// Inserts a game and returns the id assigned by the store.
     async fn create_game(&self, game: &NewGame) -> CatalogResult<i32>;
     /// Deletes by id and returns the number of rows removed, which is zero
     /// when nothing matched.
     async fn delete_game(&self, id: i32) -> CatalogResult<u64>;
}

/// Postgres-backed repository. No pool: each call opens its own
/// connection and closes it before returning, whatever the outcome.
#[derive(Clone)]
pub struct PgGameRepository {
     database_url: String,
}

impl Debug for PgGameRepository {
     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
          f.debug_struct("PgGameRepository").finish_non_exhaustive()
     }
}

impl PgGameRepository {
     pub fn new(database_url: impl Into<String>) -> Self {
          Self {
               database_url: database_url.into(),
          }
     }

     async fn connect(&self) -> CatalogResult<PgConnection> {
          Ok(PgConnection::connect(&self.database_url).await?)
     }
}

async fn release(conn: PgConnection) {
     if let Err(e) = conn.close().await {
          tracing::warn!("Failed to close database connection: {}", e);
     }
}

#[async_trait]
impl GameRepository for PgGameRepository {
     async fn list_games(&self) -> CatalogResult<Vec<DbGame>> {
          let mut conn = self.connect().await?;
          let result = select_games(&mut conn).await;
          release(conn).await;
          Ok(result?)
     }

     async fn create_game(&self, game: &NewGame) -> CatalogResult<i32> {
          let mut conn = self.connect().await?;
          let result = insert_game(&mut conn, game).await;
          release(conn).await;
          Ok(result?)
     }

     async fn delete_game(&self, id: i32) -> CatalogResult<u64> {
          let mut conn = self.connect().await?;
          let result = delete_game_by_id(&mut conn, id).await;
          release(conn).await;
          Ok(result?)
     }
}

pub async fn select_games(conn: &mut PgConnection) -> Result<Vec<DbGame>, sqlx::Error> {
     sqlx::query_as::<_, DbGame>(
          r#"
          SELECT id, title, genre, rating, image_url, trailer_url,
                 description, release_date, created_at
          FROM games
          ORDER BY created_at DESC
          "#,
     )
     .fetch_all(conn)
     .await
}

// Dropping an uncommitted transaction rolls it back.
pub async fn insert_game(conn: &mut PgConnection, game: &NewGame) -> Result<i32, sqlx::Error> {
     let mut tx = conn.begin().await?;

     let id = sqlx::query_scalar::<_, i32>(
          r#"
          INSERT INTO games (title, genre, rating, image_url, trailer_url, description, release_date)
          VALUES ($1, $2, $3, $4, $5, $6, $7)
          RETURNING id
          "#,
     )
     .bind(&game.title)
     .bind(&game.genre)
     .bind(game.rating)
     .bind(&game.image_url)
     .bind(&game.trailer_url)
     .bind(&game.description)
     .bind(game.release_date)
     .fetch_one(&mut *tx)
     .await?;

     tx.commit().await?;
     Ok(id)
}

pub async fn delete_game_by_id(conn: &mut PgConnection, id: i32) -> Result<u64, sqlx::Error> {
     let mut tx = conn.begin().await?;

     let result = sqlx::query("DELETE FROM games WHERE id = $1")
          .bind(id)
          .execute(&mut *tx)
          .await?;

     tx.commit().await?;
     Ok(result.rows_affected())
}
