//! Files attached to cards.

use super::Session;
use crate::error::ClientResult;
use crate::http::{FileUpload, HttpClient, HttpRequest};
use crate::models::{Created, FileContent, FileInfo};
use kanban_storage::TokenStore;

impl<C: HttpClient, S: TokenStore> Session<C, S> {
    /// Lists the files of a card.
    pub async fn get_files(&self, board_id: &str, card_id: &str) -> ClientResult<Vec<FileInfo>> {
        let request = HttpRequest::get(self.paths.files(board_id, card_id));
        self.call_json(request, "load files").await
    }

    /// Uploads a file as a multipart form.
    pub async fn upload_file(
        &self,
        board_id: &str,
        card_id: &str,
        upload: FileUpload,
    ) -> ClientResult<Created> {
        let request = HttpRequest::post(self.paths.files(board_id, card_id)).multipart(upload);
        self.call_json(request, "upload files").await
    }

    /// Downloads a file.
    pub async fn get_file(
        &self,
        board_id: &str,
        card_id: &str,
        file_id: &str,
    ) -> ClientResult<FileContent> {
        let request = HttpRequest::get(self.paths.file(board_id, card_id, file_id));
        let response = self.call(request, "download file").await?;
        Ok(FileContent {
            content_type: response.content_type,
            bytes: response.body,
        })
    }

    /// Deletes a file.
    pub async fn delete_file(
        &self,
        board_id: &str,
        card_id: &str,
        file_id: &str,
    ) -> ClientResult<()> {
        let request = HttpRequest::delete(self.paths.file(board_id, card_id, file_id));
        self.call_unit(request, "delete file").await
    }
}
