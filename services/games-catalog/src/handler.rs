use common::{CreateGamePayload, CreatedGame, GameView, MessageBody};
use lambda_http::http::StatusCode;

use crate::db::GameRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::storage::{self, ImageStore};
use crate::types::{CatalogEvent, CatalogResponse};
use crate::validation;

/// Dispatches catalog requests by HTTP method.
///
/// | method  | effect                                   | status |
/// |---------|------------------------------------------|--------|
/// | OPTIONS | CORS preflight, no store access          | 200    |
/// | GET     | every game, newest first                 | 200    |
/// | POST    | create, optionally uploading a cover     | 201    |
/// | DELETE  | delete by `id` query parameter           | 200    |
/// | other   | rejected (PUT is advertised, not served) | 405    |
#[derive(Debug)]
pub struct CatalogHandler<R: GameRepository, S: ImageStore> {
    repository: R,
    images: S,
}

impl<R: GameRepository, S: ImageStore> CatalogHandler<R, S> {
    pub fn new(repository: R, images: S) -> Self {
        Self { repository, images }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn handle(&self, event: CatalogEvent) -> CatalogResponse {
        // Case-sensitive: `get` is not `GET`.
        let method = event.http_method.clone();
        tracing::info!(method = %method, "Received catalog request");

        let result = match method.as_str() {
            "OPTIONS" => Ok(CatalogResponse::preflight()),
            "GET" => self.list().await,
            "POST" => self.create(&event).await,
            "DELETE" => self.delete(&event).await,
            _ => Err(CatalogError::MethodNotAllowed),
        };

        match result {
            Ok(response) => {
                tracing::info!(method = %method, status = response.status_code, "Request handled");
                response
            }
            Err(e) => {
                let status = e.status_code();
                if status.is_server_error() {
                    tracing::error!(method = %method, "Request failed: {}", e);
                } else {
                    tracing::warn!(method = %method, status = status.as_u16(), "Request rejected: {}", e);
                }
                e.into()
            }
        }
    }

    async fn list(&self) -> CatalogResult<CatalogResponse> {
        let games: Vec<GameView> = self
            .repository
            .list_games()
            .await?
            .into_iter()
            .map(GameView::from)
            .collect();
        Ok(CatalogResponse::json(StatusCode::OK, &games))
    }

    async fn create(&self, event: &CatalogEvent) -> CatalogResult<CatalogResponse> {
        let body: serde_json::Value = serde_json::from_str(&event.body_text()?)?;
        let payload: CreateGamePayload =
            serde_json::from_value(body).map_err(|e| CatalogError::Validation(e.to_string()))?;
        let mut game = validation::validate_create_game(&payload).map_err(CatalogError::Validation)?;

        // An uploaded file always wins over a directly supplied image URL.
        if let Some(image_file) = payload.image_file.as_deref().filter(|f| !f.is_empty()) {
            let image_type = validation::validate_image_type(payload.image_type.as_deref())
                .map_err(CatalogError::Validation)?;
            let bytes = storage::decode_data_url(image_file)?;
            let key = storage::object_key(&image_type);
            let url = self
                .images
                .put_image(&key, bytes, &format!("image/{}", image_type))
                .await?;
            game.image_url = Some(url);
        }

        let id = self.repository.create_game(&game).await?;
        tracing::info!(id, title = %game.title, "Game created");

        Ok(CatalogResponse::json(
            StatusCode::CREATED,
            &CreatedGame {
                id,
                message: common::GAME_CREATED.to_string(),
            },
        ))
    }

    async fn delete(&self, event: &CatalogEvent) -> CatalogResult<CatalogResponse> {
        let raw_id = event.query_param("id").ok_or(CatalogError::MissingId)?;
        let id: i32 = raw_id
            .trim()
            .parse()
            .map_err(|_| CatalogError::Validation(format!("Invalid game ID: {}", raw_id)))?;

        let removed = self.repository.delete_game(id).await?;
        if removed == 0 {
            tracing::debug!(id, "Delete matched no game");
        }

        Ok(CatalogResponse::json(
            StatusCode::OK,
            &MessageBody::new(common::GAME_DELETED),
        ))
    }
}
