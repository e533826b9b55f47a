use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use sqlx::{Connection, PgConnection};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use games_catalog::{
    CatalogConfig, CatalogEvent, CatalogHandler, CatalogResponse, GameRepository, ImageStore,
    PgGameRepository, S3ImageStore,
};

fn into_axum_response(response: CatalogResponse) -> Response {
    let mut headers = HeaderMap::new();
    for (name, value) in &response.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, headers, response.body).into_response()
}

// Extractor failures are shaped here so they carry the same CORS headers
// as every other response.
async fn dispatch<R: GameRepository + 'static, S: ImageStore + 'static>(
    State(handler): State<Arc<CatalogHandler<R, S>>>,
    method: Method,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::warn!("Rejected query string: {}", rejection.body_text());
            return into_axum_response(CatalogResponse::error(
                rejection.status(),
                &rejection.body_text(),
            ));
        }
    };

    let (body, is_base64_encoded) = match std::str::from_utf8(&body) {
        Ok("") => (None, false),
        Ok(text) => (Some(text.to_string()), false),
        Err(_) => (Some(STANDARD.encode(&body)), true),
    };

    let event = CatalogEvent {
        http_method: method.as_str().to_string(),
        query_string_parameters: Some(params),
        body,
        headers: Some(
            headers
                .iter()
                .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
                .collect(),
        ),
        is_base64_encoded,
    };

    into_axum_response(handler.handle(event).await)
}

fn app<R: GameRepository + 'static, S: ImageStore + 'static>(
    handler: Arc<CatalogHandler<R, S>>,
) -> Router {
    Router::new()
        .fallback(dispatch::<R, S>)
        .with_state(handler)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = CatalogConfig::load()?;

    let mut conn = PgConnection::connect(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&mut conn).await?;
    conn.close().await?;

    let repository = PgGameRepository::new(config.database_url.clone());
    let images = S3ImageStore::from_config(&config).await;
    let handler = Arc::new(CatalogHandler::new(repository, images));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Catalog API listening on http://{}", config.listen_addr);
    axum::serve(listener, app(handler)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use games_catalog::CatalogResult;
    use games_catalog::models::{DbGame, NewGame};
    use tower::ServiceExt;

    #[derive(Debug, Default)]
    struct RecordingGames {
        created: Mutex<Vec<NewGame>>,
        deleted: Mutex<Vec<i32>>,
    }

    #[async_trait]
    impl GameRepository for RecordingGames {
        async fn list_games(&self) -> CatalogResult<Vec<DbGame>> {
            Ok(vec![])
        }

        async fn create_game(&self, game: &NewGame) -> CatalogResult<i32> {
            self.created.lock().unwrap().push(game.clone());
            Ok(1)
        }

        async fn delete_game(&self, id: i32) -> CatalogResult<u64> {
            self.deleted.lock().unwrap().push(id);
            Ok(0)
        }
    }

    #[derive(Debug)]
    struct NoImages;

    #[async_trait]
    impl ImageStore for NoImages {
        async fn put_image(&self, _key: &str, _body: Vec<u8>, _content_type: &str) -> CatalogResult<String> {
            panic!("no upload expected");
        }
    }

    fn handler() -> Arc<CatalogHandler<RecordingGames, NoImages>> {
        Arc::new(CatalogHandler::new(RecordingGames::default(), NoImages))
    }

    #[tokio::test]
    async fn delete_query_reaches_handler() {
        let response = app(handler())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/?id=999999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn non_utf8_body_gets_cors_error_without_insert() {
        let handler = handler();
        let mut body = br#"{"title":"Fo"#.to_vec();
        body.push(0xFF);
        body.extend_from_slice(
            br#"o","genre":"RPG","rating":4.5,"description":"d","releaseDate":"2024-01-01"}"#,
        );

        let response = app(handler.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.headers()["content-type"], "application/json");
        assert!(handler_created(&handler).is_empty());
    }

    #[tokio::test]
    async fn options_preflight_is_served() {
        let response = app(handler())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["access-control-allow-methods"],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
    }

    fn handler_created(handler: &CatalogHandler<RecordingGames, NoImages>) -> Vec<NewGame> {
        handler.repository().created.lock().unwrap().clone()
    }
}
