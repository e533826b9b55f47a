use chrono::{DateTime, NaiveDate, Utc};
use common::GameView;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

/// A row of the `games` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DbGame {
     pub id: i32,
     pub title: String,
     pub genre: String,
     pub rating: Option<Decimal>,
     pub image_url: Option<String>,
     pub trailer_url: Option<String>,
     pub description: String,
     pub release_date: NaiveDate,
     pub created_at: DateTime<Utc>,
}

/// Validated values for an insert; `id` and `created_at` come from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
     pub title: String,
     pub genre: String,
     pub rating: Decimal,
     pub image_url: Option<String>,
     pub trailer_url: String,
     pub description: String,
     pub release_date: NaiveDate,
}

impl From<DbGame> for GameView {
     fn from(game: DbGame) -> Self {
          GameView {
               id: game.id,
               title: game.title,
               genre: game.genre,
               rating: game.rating.and_then(|r| r.to_f64()).unwrap_or(0.0),
               image: game.image_url,
               trailer: game.trailer_url.unwrap_or_default(),
               description: game.description,
               release_date: game.release_date,
          }
     }
}
