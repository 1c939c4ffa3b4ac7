use image::{DynamicImage, ImageFormat, ImageOutputFormat};
use std::io::Cursor;

pub const THUMB_MAX_SIZE: u32 = 500;
pub const JPEG_QUALITY: u8 = 85;

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("could not determine image format")]
    UnknownFormat,
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl Thumbnail {
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}

/// Decodes `raw`, shrinks it to fit within [`THUMB_MAX_SIZE`] on both sides and
/// re-encodes it. Images that already fit are re-encoded at their own size.
pub fn shrink(raw: &[u8]) -> Result<Thumbnail, ThumbnailError> {
    let reader = image::io::Reader::new(Cursor::new(raw)).with_guessed_format()?;
    let format = reader.format().ok_or(ThumbnailError::UnknownFormat)?;
    let image = fit_within(reader.decode()?, THUMB_MAX_SIZE);

    let (output, format) = output_format(format);
    let image = match output {
        // jpeg has no alpha channel
        ImageOutputFormat::Jpeg(_) => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image,
    };

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), output)?;

    Ok(Thumbnail {
        bytes,
        format,
        width: image.width(),
        height: image.height(),
    })
}

fn fit_within(image: DynamicImage, max_size: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());

    if height <= max_size && width <= max_size {
        image
    } else {
        image.thumbnail(max_size, max_size)
    }
}

// formats this build can't encode are stored as png
fn output_format(input: ImageFormat) -> (ImageOutputFormat, ImageFormat) {
    match input {
        ImageFormat::Jpeg => (ImageOutputFormat::Jpeg(JPEG_QUALITY), ImageFormat::Jpeg),
        other => match ImageOutputFormat::from(other) {
            ImageOutputFormat::Unsupported(_) => (ImageOutputFormat::Png, ImageFormat::Png),
            supported => (supported, other),
        },
    }
}
