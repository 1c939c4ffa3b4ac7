use crate::blog::{get_random_hex_string, MEDIA_KEY_BYTES};
use crate::thumbnail::Thumbnail;
use axum::body::Bytes;
use std::path::{Component, Path, PathBuf};

pub const BLOG_IMAGE_DIR: &str = "blog_images";
pub const COVER_IMAGE_DIR: &str = "post_images";

#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

pub fn url(relative_path: &str) -> String {
    let encoded = relative_path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    format!("/media/{encoded}")
}

/// Maps a requested media path onto the media root, refusing anything that
/// could escape it.
pub fn resolve(media_root: &Path, requested: &str) -> Option<PathBuf> {
    let requested = Path::new(requested);
    let is_plain = requested
        .components()
        .all(|component| matches!(component, Component::Normal(_)));

    (is_plain && requested.components().next().is_some()).then(|| media_root.join(requested))
}

/// Thumbnails every upload and writes the results under `dir`, returning the
/// stored media paths. An upload that can't be decoded or written is logged
/// and left out; the others are unaffected.
pub async fn store_thumbnails(
    media_root: &Path,
    dir: &str,
    uploads: Vec<Upload>,
) -> Result<Vec<String>, tokio::task::JoinError> {
    let thumbnails = tokio::task::spawn_blocking(move || {
        uploads
            .into_iter()
            .filter_map(|upload| match crate::thumbnail::shrink(&upload.bytes) {
                Ok(thumbnail) => Some((upload.file_name, thumbnail)),
                Err(err) => {
                    tracing::warn!(file = %upload.file_name, error = %err, "skipping image that could not be thumbnailed");
                    None
                }
            })
            .collect::<Vec<_>>()
    })
    .await?;

    let mut stored = Vec::with_capacity(thumbnails.len());
    for (file_name, thumbnail) in thumbnails {
        match save(media_root, dir, &thumbnail).await {
            Ok(relative_path) => {
                tracing::debug!(
                    file = %file_name,
                    path = %relative_path,
                    width = thumbnail.width,
                    height = thumbnail.height,
                    "stored thumbnail"
                );
                stored.push(relative_path);
            }
            Err(err) => {
                tracing::warn!(file = %file_name, error = %err, "could not write thumbnail");
            }
        }
    }

    Ok(stored)
}

async fn save(media_root: &Path, dir: &str, thumbnail: &Thumbnail) -> std::io::Result<String> {
    let key = get_random_hex_string::<MEDIA_KEY_BYTES>();
    let relative_path = format!("{dir}/{key}.{}", thumbnail.extension());

    let path = media_root.join(&relative_path);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &thumbnail.bytes).await?;

    Ok(relative_path)
}

/// Best-effort removal of a stored file.
pub async fn remove(media_root: &Path, relative_path: &str) {
    let Some(path) = resolve(media_root, relative_path) else {
        return;
    };

    match tokio::fs::remove_file(&path).await {
        Ok(()) => (),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => (),
        Err(err) => tracing::warn!(path = %relative_path, error = %err, "could not delete media file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageOutputFormat;

    #[test]
    fn urls_encode_each_segment() {
        assert_eq!(url("blog_images/a b.png"), "/media/blog_images/a%20b.png");
    }

    #[test]
    fn resolve_rejects_escaping_paths() {
        let root = Path::new("/srv/media");

        assert_eq!(
            resolve(root, "blog_images/x.png"),
            Some(PathBuf::from("/srv/media/blog_images/x.png"))
        );
        assert_eq!(resolve(root, "../etc/passwd"), None);
        assert_eq!(resolve(root, "/etc/passwd"), None);
        assert_eq!(resolve(root, ""), None);
    }

    #[tokio::test]
    async fn bad_uploads_are_skipped_without_failing_the_batch() {
        let media_root = tempfile::tempdir().unwrap();
        let uploads = vec![
            Upload {
                file_name: "good.png".into(),
                bytes: Bytes::from(crate::thumbnail::tests::encoded(
                    800,
                    800,
                    ImageOutputFormat::Png,
                )),
            },
            Upload {
                file_name: "bad.png".into(),
                bytes: Bytes::from_static(b"not a png"),
            },
        ];

        let stored = store_thumbnails(media_root.path(), BLOG_IMAGE_DIR, uploads)
            .await
            .unwrap();

        assert_eq!(stored.len(), 1);
        assert!(stored[0].starts_with("blog_images/"));
        assert!(stored[0].ends_with(".png"));

        let written = image::open(media_root.path().join(&stored[0])).unwrap();
        assert_eq!((written.width(), written.height()), (500, 500));

        remove(media_root.path(), &stored[0]).await;
        assert!(!media_root.path().join(&stored[0]).exists());
    }
}
