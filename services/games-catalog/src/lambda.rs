use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Request, RequestExt, Response, run, service_fn};

use crate::db::GameRepository;
use crate::handler::CatalogHandler;
use crate::storage::ImageStore;
use crate::types::{CatalogEvent, CatalogResponse};

/// Normalises a gateway request. `lambda_http` has already undone any
/// base64 transfer encoding by this point; a binary body that is not UTF-8
/// is re-encoded so that `CatalogEvent::body_text` rejects it.
pub fn event_from_request(request: &Request) -> CatalogEvent {
    let query_string_parameters: HashMap<String, String> = request
        .query_string_parameters()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let headers: HashMap<String, String> = request
        .headers()
        .iter()
        .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let mut is_base64_encoded = false;
    let body = match request.body() {
        Body::Empty => None,
        Body::Text(text) => Some(text.clone()),
        Body::Binary(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Some(text.to_string()),
            Err(_) => {
                is_base64_encoded = true;
                Some(STANDARD.encode(bytes))
            }
        },
    };

    CatalogEvent {
        http_method: request.method().as_str().to_string(),
        query_string_parameters: Some(query_string_parameters),
        body,
        headers: Some(headers),
        is_base64_encoded,
    }
}

pub fn into_lambda_response(response: CatalogResponse) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(StatusCode::from_u16(response.status_code)?);
    for (name, value) in &response.headers {
        builder = builder.header(name, value);
    }
    let body = if response.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(response.body)
    };
    Ok(builder.body(body).map_err(Box::new)?)
}

pub(crate) async fn function_handler<R: GameRepository, S: ImageStore>(
    handler: &CatalogHandler<R, S>,
    request: Request,
) -> Result<Response<Body>, Error> {
    let response = handler.handle(event_from_request(&request)).await;
    into_lambda_response(response)
}

pub async fn run_lambda<R: GameRepository, S: ImageStore>(
    handler: CatalogHandler<R, S>,
) -> Result<(), Error> {
    run(service_fn(|request: Request| function_handler(&handler, request))).await
}
