//! In-memory [`RemoteStore`] recording every call, for resolver and
//! reconciler tests.

use serde_json::{json, Value};
use std::sync::Mutex;

use crate::client::RemoteStore;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewPerson, PersonRecord, PiecePayload, PieceRecord, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListPersons,
    CreatePerson(NewPerson),
    ListPieces,
    CreatePiece(PiecePayload),
    UpdatePiece(RecordId, PiecePayload),
}

#[derive(Default)]
struct State {
    persons: Vec<PersonRecord>,
    pieces: Vec<PieceRecord>,
    next_id: i64,
    calls: Vec<Call>,
    list_persons_error: Option<ApiError>,
    list_pieces_error: Option<ApiError>,
    create_piece_error: Option<ApiError>,
    update_piece_error: Option<ApiError>,
    rejected_families: Vec<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.state.lock().unwrap().next_id = 100;
        store
    }

    pub fn with_person(self, id: i64, given: &str, family: &str) -> Self {
        self.state.lock().unwrap().persons.push(PersonRecord {
            id: RecordId::Int(id),
            given: Some(given.to_string()),
            family: Some(family.to_string()),
        });
        self
    }

    pub fn with_piece(self, id: i64, name: &str) -> Self {
        self.state.lock().unwrap().pieces.push(PieceRecord {
            id: RecordId::Int(id),
            name: Some(name.to_string()),
        });
        self
    }

    pub fn failing_person_lookup(self, err: ApiError) -> Self {
        self.state.lock().unwrap().list_persons_error = Some(err);
        self
    }

    pub fn failing_piece_lookup(self, err: ApiError) -> Self {
        self.state.lock().unwrap().list_pieces_error = Some(err);
        self
    }

    pub fn failing_piece_create(self, err: ApiError) -> Self {
        self.state.lock().unwrap().create_piece_error = Some(err);
        self
    }

    pub fn failing_piece_update(self, err: ApiError) -> Self {
        self.state.lock().unwrap().update_piece_error = Some(err);
        self
    }

    /// Person creation fails for this family name.
    pub fn rejecting_person(self, family: &str) -> Self {
        self.state.lock().unwrap().rejected_families.push(family.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn piece_names(&self) -> Vec<String> {
        self.state.lock().unwrap().pieces.iter().filter_map(|p| p.name.clone()).collect()
    }
}

impl RemoteStore for MemoryStore {
    async fn list_persons(&self) -> ApiResult<Vec<PersonRecord>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListPersons);
        match &state.list_persons_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.persons.clone()),
        }
    }

    async fn create_person(&self, person: &NewPerson) -> ApiResult<RecordId> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreatePerson(person.clone()));
        if state.rejected_families.contains(&person.family) {
            return Err(ApiError::Remote {
                status: 400,
                body: "rejected".to_string(),
            });
        }
        state.next_id += 1;
        let id = RecordId::Int(state.next_id);
        state.persons.push(PersonRecord {
            id: id.clone(),
            given: Some(person.given.clone()),
            family: Some(person.family.clone()),
        });
        Ok(id)
    }

    async fn list_pieces(&self) -> ApiResult<Vec<PieceRecord>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListPieces);
        match &state.list_pieces_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.pieces.clone()),
        }
    }

    async fn create_piece(&self, payload: &PiecePayload) -> ApiResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreatePiece(payload.clone()));
        if let Some(err) = &state.create_piece_error {
            return Err(err.clone());
        }
        state.next_id += 1;
        let id = state.next_id;
        state.pieces.push(PieceRecord {
            id: RecordId::Int(id),
            name: Some(payload.name.clone()),
        });
        Ok(json!({ "stid": id, "name": payload.name, "genre": payload.genre }))
    }

    async fn update_piece(&self, id: &RecordId, payload: &PiecePayload) -> ApiResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::UpdatePiece(id.clone(), payload.clone()));
        if let Some(err) = &state.update_piece_error {
            return Err(err.clone());
        }
        Ok(json!({ "stid": id, "name": payload.name, "genre": payload.genre }))
    }
}
