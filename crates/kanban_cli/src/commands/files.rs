//! Attachment commands.

use super::{done, report, CliError, CommandResult};
use kanban_client::{FileUpload, HttpClient, Session};
use kanban_storage::TokenStore;
use serde_json::json;
use std::fs;
use std::path::Path;

/// Lists the files of a card.
pub async fn list<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    card: &str,
) -> CommandResult {
    report(&session.get_files(board, card).await?)
}

/// Uploads a local file.
pub async fn upload<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    card: &str,
    path: &Path,
) -> CommandResult {
    let bytes = fs::read(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    report(&session.upload_file(board, card, FileUpload::new(file_name, bytes)).await?)
}

/// Downloads a file to `output`.
pub async fn download<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    card: &str,
    file: &str,
    output: &Path,
) -> CommandResult {
    let content = session.get_file(board, card, file).await?;
    fs::write(output, &content.bytes).map_err(|source| CliError::WriteFile {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(json!({
        "result": "file downloaded",
        "path": output.display().to_string(),
        "bytes": content.bytes.len(),
        "content_type": content.content_type,
    }))
}

/// Deletes a file.
pub async fn delete<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    card: &str,
    file: &str,
) -> CommandResult {
    session.delete_file(board, card, file).await?;
    done("file deleted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_client::{HttpMethod, HttpResponse, RequestBody};
    use kanban_testkit::prelude::*;

    #[tokio::test]
    async fn upload_and_download() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        fs::write(&source, b"hello").unwrap();

        let (session, server) = signed_in_session("user");
        server
            .on_json(
                HttpMethod::Post,
                "/wodss3/api/boards/b1/cards/c1/files",
                200,
                json!({ "id": "f1" }),
            )
            .on(
                HttpMethod::Get,
                "/wodss3/api/boards/b1/cards/c1/files/f1",
                HttpResponse::with_bytes(200, "text/plain", b"hello".to_vec()),
            );

        let report = upload(&session, "b1", "c1", &source).await.unwrap();
        assert_eq!(report["id"], "f1");
        let RequestBody::Multipart(sent) = server.last_request().unwrap().body else {
            panic!("expected a multipart body");
        };
        assert_eq!(sent.file_name, "notes.txt");
        assert_eq!(sent.bytes, b"hello");

        let target = dir.path().join("copy.txt");
        let report = download(&session, "b1", "c1", "f1", &target).await.unwrap();
        assert_eq!(report["bytes"], 5);
        assert_eq!(fs::read(&target).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn missing_local_file() {
        let (session, server) = signed_in_session("user");
        let err = upload(&session, "b1", "c1", Path::new("/nonexistent/file.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("cannot read /nonexistent/file.txt"));
        assert_eq!(server.request_count(), 0);
    }
}
