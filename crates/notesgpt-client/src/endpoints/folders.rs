//! Folder routes.

use reqwest::Method;
use serde_json::Value;

use notesgpt_core::result::AppResult;
use notesgpt_core::types::FolderId;
use notesgpt_entity::folder::{CreateFolder, Folder, UpdateFolder};

use crate::body::RequestBody;
use crate::client::ApiClient;
use crate::dto::{AnswerEnvelope, FolderEnvelope, FoldersEnvelope, QueryFolderRequest};

impl ApiClient {
    /// `POST /v1/folders`
    pub async fn create_folder(&self, folder: &CreateFolder) -> AppResult<Folder> {
        let body = RequestBody::json(folder)?;
        let envelope: FolderEnvelope = self
            .request_as(Method::POST, "/v1/folders", &[], body)
            .await?;
        Ok(envelope.folder)
    }

    /// `GET /v1/folders[?parent_id]`: root folders when `parent_id` is `None`.
    pub async fn list_folders(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let query: Vec<(&str, String)> = parent_id
            .map(|id| vec![("parent_id", id.to_string())])
            .unwrap_or_default();
        let envelope: FoldersEnvelope = self
            .request_as(Method::GET, "/v1/folders", &query, RequestBody::Empty)
            .await?;
        Ok(envelope.folders.unwrap_or_default())
    }

    /// `GET /v1/folders/{id}`
    pub async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        let envelope: FolderEnvelope = self
            .request_as(Method::GET, &format!("/v1/folders/{id}"), &[], RequestBody::Empty)
            .await?;
        Ok(envelope.folder)
    }

    /// `PUT /v1/folders/{id}`
    pub async fn update_folder(&self, id: FolderId, update: &UpdateFolder) -> AppResult<Folder> {
        let body = RequestBody::json(update)?;
        let envelope: FolderEnvelope = self
            .request_as(Method::PUT, &format!("/v1/folders/{id}"), &[], body)
            .await?;
        Ok(envelope.folder)
    }

    /// `DELETE /v1/folders/{id}`
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        self.request(Method::DELETE, &format!("/v1/folders/{id}"), &[], RequestBody::Empty)
            .await?;
        Ok(())
    }

    /// `POST /v1/folders/{id}/query`: ask a question about a folder's notes.
    pub async fn query_folder(&self, id: FolderId, query: &str) -> AppResult<String> {
        let body = RequestBody::json(&QueryFolderRequest { query })?;
        let envelope: AnswerEnvelope = self
            .request_as(Method::POST, &format!("/v1/folders/{id}/query"), &[], body)
            .await?;
        Ok(match envelope.answer {
            Value::String(answer) => answer,
            other => other.to_string(),
        })
    }
}
