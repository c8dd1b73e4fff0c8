//! Blocking CRUD client for the todo API.
//!
//! # Design
//! Each method performs one HTTP round-trip with `ureq` and interprets the
//! status code itself; the agent is configured not to turn 4xx/5xx into
//! transport errors. Status interpretation is centralized in
//! `check_status` so every method maps 404 and 400 the same way.

use crate::error::ApiError;
use crate::types::TodoItem;

/// Blocking client for the todo API.
#[derive(Clone)]
pub struct TodoApi {
    agent: ureq::Agent,
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: &str) -> Self {
        // 4xx/5xx come back as responses, not errors; check_status decides.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    /// `POST /todos`. Any id on `item` is ignored by the server; the
    /// returned item carries the assigned one.
    pub fn create(&self, item: &TodoItem) -> Result<TodoItem, ApiError> {
        let payload =
            serde_json::to_string(item).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = self
            .agent
            .post(&self.todos_url())
            .content_type("application/json")
            .send(payload.as_bytes())
            .map_err(transport)?;
        let (status, body) = read_response(response)?;
        check_status(status, &body, 201)?;
        parse(&body)
    }

    /// `GET /todos`. An empty store yields an empty vector.
    pub fn get_all(&self) -> Result<Vec<TodoItem>, ApiError> {
        let response = self.agent.get(&self.todos_url()).call().map_err(transport)?;
        let (status, body) = read_response(response)?;
        check_status(status, &body, 200)?;
        parse(&body)
    }

    /// `GET /todos/{id}`.
    pub fn get(&self, id: i64) -> Result<TodoItem, ApiError> {
        let response = self.agent.get(&self.todo_url(id)).call().map_err(transport)?;
        let (status, body) = read_response(response)?;
        check_status(status, &body, 200)?;
        parse(&body)
    }

    /// `PUT /todos/{id}`. The server upserts: when `id` matches no item a
    /// new one is created, so the returned id may differ from `id`.
    pub fn update(&self, id: i64, item: &TodoItem) -> Result<TodoItem, ApiError> {
        let payload =
            serde_json::to_string(item).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = self
            .agent
            .put(&self.todo_url(id))
            .content_type("application/json")
            .send(payload.as_bytes())
            .map_err(transport)?;
        let (status, body) = read_response(response)?;
        check_status(status, &body, 200)?;
        parse(&body)
    }

    /// `DELETE /todos/{id}`.
    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .agent
            .delete(&self.todo_url(id))
            .call()
            .map_err(transport)?;
        let (status, body) = read_response(response)?;
        check_status(status, &body, 200)
    }
}

fn transport(err: ureq::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn read_response(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<(u16, String), ApiError> {
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok((status, body))
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(status: u16, body: &str, expected: u16) -> Result<(), ApiError> {
    if status == expected {
        return Ok(());
    }
    match status {
        404 => Err(ApiError::NotFound),
        400 => Err(ApiError::Validation(body.to_string())),
        _ => Err(ApiError::Http {
            status,
            body: body.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let api = TodoApi::new("http://localhost:8080/");
        assert_eq!(api.todos_url(), "http://localhost:8080/todos");
        assert_eq!(api.todo_url(3), "http://localhost:8080/todos/3");
    }

    #[test]
    fn check_status_passes_expected() {
        assert!(check_status(201, "", 201).is_ok());
    }

    #[test]
    fn check_status_maps_404_to_not_found() {
        let err = check_status(404, "gone", 200).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn check_status_maps_400_to_validation() {
        let err = check_status(400, "description too long", 200).unwrap_err();
        match err {
            ApiError::Validation(body) => assert_eq!(body, "description too long"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn check_status_keeps_other_statuses_raw() {
        let err = check_status(500, "internal error", 200).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_reports_bad_json() {
        let err = parse::<TodoItem>("not json").unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
