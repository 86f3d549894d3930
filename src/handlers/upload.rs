use std::path::{Path, PathBuf};

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::post,
    Router,
};
use chrono::Utc;
use rand::Rng;
use serde_json::{json, Value};

use crate::constants::{API_NAME, MAX_UPLOAD_FILES, UPLOAD_FIELD_NAME};
use crate::error::AppError;
use crate::models::AdminClaims;
use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_images))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Stores every `images` part under the upload dir and returns the public
/// URLs, ready to be put in a car's `images` list. Parts are read in full
/// before anything touches the disk, so a rejected upload leaves no files.
async fn upload_images(
    _admin: AdminClaims,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        if parts.len() == MAX_UPLOAD_FILES {
            return Err(AppError::Validation(format!(
                "at most {} images per upload",
                MAX_UPLOAD_FILES
            )));
        }

        let filename = stored_filename(field.file_name());
        parts.push((filename, field.bytes().await?));
    }

    let upload_dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(upload_dir).await?;

    let mut written = Vec::with_capacity(parts.len());
    for (filename, bytes) in &parts {
        let path = upload_dir.join(filename);
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            remove_files(&written).await;
            return Err(e.into());
        }
        tracing::info!("{} Stored upload {} ({} bytes)", API_NAME, filename, bytes.len());
        written.push(path);
    }

    let prefix = state.config.upload_url_prefix.trim_end_matches('/');
    let files: Vec<String> = parts
        .iter()
        .map(|(filename, _)| format!("{}/{}", prefix, filename))
        .collect();

    Ok(Json(json!({
        "success": true,
        "files": files
    })))
}

async fn remove_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!("{} Could not remove partial upload {}: {}", API_NAME, path.display(), e);
        }
    }
}

/// `images-<millis>-<random><ext>`, keeping only the client's extension.
fn stored_filename(original: Option<&str>) -> String {
    let ext = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    let unique: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

    format!(
        "{}-{}-{}{}",
        UPLOAD_FIELD_NAME,
        Utc::now().timestamp_millis(),
        unique,
        ext
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_filename_keeps_extension_only() {
        let name = stored_filename(Some("../../etc/Photo.JPG"));
        assert!(name.starts_with("images-"));
        assert!(name.ends_with(".jpg"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_stored_filename_without_extension() {
        let name = stored_filename(None);
        assert!(!name.contains('.'));
        assert_eq!(name.split('-').count(), 3);
    }
}
