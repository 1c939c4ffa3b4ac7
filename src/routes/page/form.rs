use crate::blog::TITLE_MAX_CHARS;
use crate::error::{Error, Result};
use crate::media::Upload;
use axum::extract::Multipart;

/// Fields of the multipart post form shared by create and update.
#[derive(Debug, Default)]
pub(super) struct PostSubmission {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub new_category: Option<String>,
    pub image: Option<Upload>,
    pub images: Vec<Upload>,
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl PostSubmission {
    pub async fn read(mut multipart: Multipart) -> Result<PostSubmission> {
        let mut submission = PostSubmission::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                "title" => submission.title = field.text().await?.trim().to_owned(),
                "content" => submission.content = field.text().await?,
                "category" => submission.category = non_blank(field.text().await?),
                "new_category" => submission.new_category = non_blank(field.text().await?),
                "image" | "images" => {
                    let file_name = field.file_name().unwrap_or("upload").to_owned();
                    let bytes = field.bytes().await?;
                    // browsers send an empty part for an untouched file input
                    if bytes.is_empty() {
                        continue;
                    }

                    let upload = Upload { file_name, bytes };
                    if name == "image" {
                        submission.image = Some(upload);
                    } else {
                        submission.images.push(upload);
                    }
                }
                _ => (),
            }
        }

        submission.validate()?;
        Ok(submission)
    }

    fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(Error::Validation("title must not be blank".into()));
        }
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(Error::Validation(format!(
                "title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }
        if self.content.trim().is_empty() {
            return Err(Error::Validation("content must not be blank".into()));
        }

        Ok(())
    }
}
