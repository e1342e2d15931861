//! [`RemoteStore`] over HTTP with JSON bodies.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::RemoteStore;
use crate::config::ImportConfig;
use crate::error::{ApiError, ApiResult, ConfigError};
use crate::logs::log_warning;
use crate::models::{NewPerson, PersonRecord, PiecePayload, PieceRecord, RecordId};

/// HTTP client for the Sheet Database API.
///
/// No authentication, no retries, and no timeout beyond reqwest's defaults.
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    config: ImportConfig,
}

impl HttpStore {
    pub fn new(config: ImportConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Send a request and return the body of a success response.
    async fn send(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetch a collection, skipping elements that do not decode.
    async fn send_list<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> ApiResult<Vec<T>> {
        let items: Vec<Value> = self.send_json(request).await?;
        let (records, skipped) = decode_records(items);
        if skipped > 0 {
            log_warning(format!("Ignored {} unreadable {} record(s)", skipped, what));
        }
        Ok(records)
    }
}

/// Decode each element on its own. Returns the records and the number of
/// elements that were dropped.
fn decode_records<T: DeserializeOwned>(items: Vec<Value>) -> (Vec<T>, usize) {
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    let skipped = total - records.len();
    (records, skipped)
}

impl RemoteStore for HttpStore {
    async fn list_persons(&self) -> ApiResult<Vec<PersonRecord>> {
        self.send_list(self.client.get(self.config.persons_url()), "person")
            .await
    }

    async fn create_person(&self, person: &NewPerson) -> ApiResult<RecordId> {
        let body: Value = self
            .send_json(self.client.post(self.config.persons_url()).json(person))
            .await?;
        RecordId::from_field(&body, "pid").ok_or(ApiError::MissingId { field: "pid" })
    }

    async fn list_pieces(&self) -> ApiResult<Vec<PieceRecord>> {
        self.send_list(self.client.get(self.config.pieces_url()), "piece")
            .await
    }

    async fn create_piece(&self, payload: &PiecePayload) -> ApiResult<Value> {
        self.send_json(self.client.post(self.config.pieces_url()).json(payload))
            .await
    }

    async fn update_piece(&self, id: &RecordId, payload: &PiecePayload) -> ApiResult<Value> {
        self.send_json(self.client.put(self.config.piece_url(id)).json(payload))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bad_piece_does_not_hide_the_rest() {
        let items = vec![
            json!({ "stid": 1, "name": null, "composerIds": null }),
            json!({ "name": "ohne id" }),
            json!({ "stid": 3, "name": "Air", "isdigitalisiert": "ja" }),
        ];
        let (pieces, skipped): (Vec<PieceRecord>, _) = decode_records(items);

        assert_eq!(skipped, 1);
        assert_eq!(pieces.len(), 2);
        assert!(pieces[1].matches("Air"));
        assert_eq!(pieces[1].id, RecordId::Int(3));
    }

    #[test]
    fn test_bad_person_does_not_hide_the_rest() {
        let items = vec![
            json!({ "vorname": "Anonym" }),
            json!({ "pid": 7, "vorname": "Johann Sebastian", "name": "Bach" }),
        ];
        let (persons, skipped): (Vec<PersonRecord>, _) = decode_records(items);

        assert_eq!(skipped, 1);
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].id, RecordId::Int(7));
    }
}
