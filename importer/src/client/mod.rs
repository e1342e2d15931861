//! Access to the remote Sheet Database API.
//!
//! | Method | Path            | Used for                      |
//! |--------|-----------------|-------------------------------|
//! | GET    | `/personen`     | Person lookup (full scan)     |
//! | POST   | `/personen`     | Person creation               |
//! | GET    | `/stuecke`      | Piece snapshot (full scan)    |
//! | POST   | `/stuecke`      | Piece creation                |
//! | PUT    | `/stuecke/{id}` | Piece update                  |
//!
//! The resolver and reconciler only see the [`RemoteStore`] trait.
//! [`HttpStore`] is the production implementation.

pub mod http;

pub use http::HttpStore;

use serde_json::Value;

use crate::error::ApiResult;
use crate::models::{NewPerson, PersonRecord, PiecePayload, PieceRecord, RecordId};

/// The five remote operations an import run needs.
///
/// Calls are awaited one at a time; implementations need not be `Sync`.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// `GET /personen`
    async fn list_persons(&self) -> ApiResult<Vec<PersonRecord>>;

    /// `POST /personen`, returning the assigned identifier.
    async fn create_person(&self, person: &NewPerson) -> ApiResult<RecordId>;

    /// `GET /stuecke`
    async fn list_pieces(&self) -> ApiResult<Vec<PieceRecord>>;

    /// `POST /stuecke`, returning the decoded response body.
    async fn create_piece(&self, payload: &PiecePayload) -> ApiResult<Value>;

    /// `PUT /stuecke/{id}`, returning the decoded response body.
    async fn update_piece(&self, id: &RecordId, payload: &PiecePayload) -> ApiResult<Value>;
}
