//! REST clients for the hosted document store and auth service.
//!
//! The document store exposes a small per-collection API:
//!
//! - `POST {base}/v1/{collection}/query` — equality-filtered list.
//! - `POST {base}/v1/{collection}/documents` — insert, returns the
//!   store-assigned id.
//! - `PATCH {base}/v1/{collection}/documents/{id}` — partial update.
//! - `DELETE {base}/v1/{collection}/documents/{id}` — delete.
//!
//! The auth service exposes `POST /v1/auth/reauthenticate` and
//! `POST /v1/auth/password`; failures carry a JSON body with an
//! `auth/...` code that is translated for the user.

use async_trait::async_trait;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use noteleaf_core::types::RecordId;

use crate::auth::AuthProvider;
use crate::error::StoreError;
use crate::models::{CategoryRecord, NewNote, Note};
use crate::store::RecordStore;

/// Collection holding note records.
const NOTES_COLLECTION: &str = "notes";

/// Collection holding category records.
const CATEGORIES_COLLECTION: &str = "categories";

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// Response of a `query` call: the matching documents, each with its
/// store-assigned `id` inlined alongside the record fields.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    documents: Vec<serde_json::Value>,
}

/// Response of an insert: the store-assigned document key.
#[derive(Debug, Deserialize)]
struct InsertResponse {
    id: RecordId,
}

/// Error body shape of the auth service.
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    code: Option<String>,
}

// ---------------------------------------------------------------------------
// RestStore
// ---------------------------------------------------------------------------

/// HTTP client for the hosted document store.
#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestStore {
    /// Create a client for the store at `base_url`, e.g.
    /// `https://store.example.com`.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for sharing a connection pool with [`RestAuth`]).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Attach the session's bearer token to every request.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Equality-filtered list over one collection.
    async fn query(
        &self,
        collection: &str,
        filter: serde_json::Value,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        let request = self
            .client
            .post(format!("{}/v1/{collection}/query", self.base_url))
            .json(&json!({ "filter": filter }));

        let response = self.authorize(request).send().await?;
        let response = ensure_success(response).await?;
        let parsed: QueryResponse = decode_json(response).await?;
        Ok(parsed.documents)
    }

    async fn insert(
        &self,
        collection: &str,
        fields: &impl serde::Serialize,
    ) -> Result<RecordId, StoreError> {
        let request = self
            .client
            .post(format!("{}/v1/{collection}/documents", self.base_url))
            .json(fields);

        let response = self.authorize(request).send().await?;
        let response = ensure_success(response).await?;
        let parsed: InsertResponse = decode_json(response).await?;
        Ok(parsed.id)
    }

    async fn patch(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(format!("{}/v1/{collection}/documents/{id}", self.base_url))
            .json(&fields);

        let response = self.authorize(request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(format!("{}/v1/{collection}/documents/{id}", self.base_url));

        let response = self.authorize(request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Category records matching (`owner`, `name`) exactly.
    async fn matching_category_records(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        let documents = self
            .query(
                CATEGORIES_COLLECTION,
                json!({ "owner_id": owner, "name": name }),
            )
            .await?;
        documents.into_iter().map(decode_document).collect()
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn list_notes(&self, owner: &str) -> Result<Vec<Note>, StoreError> {
        let documents = self
            .query(NOTES_COLLECTION, json!({ "owner_id": owner }))
            .await?;
        documents.into_iter().map(decode_document).collect()
    }

    async fn create_note(&self, note: NewNote) -> Result<RecordId, StoreError> {
        let id = self.insert(NOTES_COLLECTION, &note).await?;
        tracing::debug!(note_id = %id, owner_id = %note.owner_id, "Note record created");
        Ok(id)
    }

    async fn update_note_text(&self, id: &str, text: &str) -> Result<(), StoreError> {
        self.patch(NOTES_COLLECTION, id, json!({ "text": text })).await
    }

    async fn update_note_category(
        &self,
        id: &str,
        category: Option<&str>,
    ) -> Result<(), StoreError> {
        self.patch(NOTES_COLLECTION, id, json!({ "category": category }))
            .await
    }

    async fn set_note_completion(&self, id: &str, completed: bool) -> Result<(), StoreError> {
        self.patch(NOTES_COLLECTION, id, json!({ "completed": completed }))
            .await
    }

    async fn delete_note(&self, id: &str) -> Result<(), StoreError> {
        self.delete_document(NOTES_COLLECTION, id).await
    }

    async fn list_category_records(
        &self,
        owner: &str,
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        let documents = self
            .query(CATEGORIES_COLLECTION, json!({ "owner_id": owner }))
            .await?;
        documents.into_iter().map(decode_document).collect()
    }

    async fn insert_category(&self, owner: &str, name: &str) -> Result<(), StoreError> {
        self.insert(
            CATEGORIES_COLLECTION,
            &json!({ "owner_id": owner, "name": name }),
        )
        .await?;
        Ok(())
    }

    async fn rename_category(
        &self,
        owner: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), StoreError> {
        let records = self.matching_category_records(owner, old_name).await?;

        // One partial update per matching record, issued together.
        let updates = records.iter().map(|record| {
            self.patch(
                CATEGORIES_COLLECTION,
                &record.id,
                json!({ "name": new_name }),
            )
        });
        for result in join_all(updates).await {
            result?;
        }

        tracing::debug!(
            owner_id = owner,
            old_name,
            new_name,
            "Category records renamed"
        );
        Ok(())
    }

    async fn remove_category(&self, owner: &str, name: &str) -> Result<(), StoreError> {
        let records = self.matching_category_records(owner, name).await?;

        let deletes = records
            .iter()
            .map(|record| self.delete_document(CATEGORIES_COLLECTION, &record.id));
        for result in join_all(deletes).await {
            result?;
        }

        tracing::debug!(owner_id = owner, name, "Category records removed");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RestAuth
// ---------------------------------------------------------------------------

/// HTTP client for the auth service's password operations.
#[derive(Clone)]
pub struct RestAuth {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestAuth {
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Attach the session's bearer token to every request.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    async fn post_auth(&self, path: &str, body: serde_json::Value) -> Result<(), StoreError> {
        let mut request = self
            .client
            .post(format!("{}/v1/auth/{path}", self.base_url))
            .json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        // Auth failures carry a translatable code; anything else is a
        // plain API error.
        if let Ok(parsed) = serde_json::from_str::<AuthErrorBody>(&body) {
            if let Some(code) = parsed.code {
                return Err(StoreError::auth(code));
            }
        }
        Err(StoreError::Api { status, body })
    }
}

#[async_trait]
impl AuthProvider for RestAuth {
    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        // Re-authenticate with the current password first; nothing is
        // mutated when this fails.
        self.post_auth("reauthenticate", json!({ "password": current_password }))
            .await?;
        self.post_auth("password", json!({ "password": new_password }))
            .await
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`StoreError::Api`] with the status and
/// body text on failure.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(StoreError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Decode a full response body into `T`.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| StoreError::Decode(err.to_string()))
}

/// Decode a single document value into a record type.
fn decode_document<T: DeserializeOwned>(document: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(document).map_err(|err| StoreError::Decode(err.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_document_reads_note_fields() {
        let document = json!({
            "id": "n-1",
            "owner_id": "owner-1",
            "text": "water plants",
            "completed": false,
            "created_at": "2025-03-01T08:00:00Z",
        });

        let note: Note = decode_document(document).unwrap();
        assert_eq!(note.id, "n-1");
        assert_eq!(note.text, "water plants");
        assert_eq!(note.category, None);
    }

    #[test]
    fn decode_document_rejects_missing_fields() {
        let document = json!({ "id": "n-1" });
        let result: Result<Note, _> = decode_document(document);
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }

    #[test]
    fn query_response_shape() {
        let body = r#"{ "documents": [ { "id": "c-1", "owner_id": "o", "name": "Home" } ] }"#;
        let parsed: QueryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.documents.len(), 1);

        let record: CategoryRecord = decode_document(parsed.documents[0].clone()).unwrap();
        assert_eq!(record.name, "Home");
    }

    #[test]
    fn auth_error_body_tolerates_extra_fields() {
        let body = r#"{ "code": "auth/weak-password", "trace": "abc" }"#;
        let parsed: AuthErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code.as_deref(), Some("auth/weak-password"));
    }
}
