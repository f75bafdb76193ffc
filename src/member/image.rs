use crate::member::error::ImageError;
use crate::member::error::ImageError::{
    CantCreateImagesFolder, CantWriteImage, MissingImageName, UnsupportedImageType,
};
use image::ImageReader;
use log::{debug, error, warn};
use std::path::{Path, PathBuf};

type Result<T, E = ImageError> = std::result::Result<T, E>;

const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Formats an image can be displayed in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// What can be shown for a member's image path.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ImageStatus {
    Available(ImageFormat),
    NotProvided,
    NotFound,
    /// The file exists but its content is not a complete JPEG or PNG image.
    Undecodable,
}

pub fn create_images_folder(folder: &Path) -> Result<()> {
    std::fs::create_dir_all(folder).map_err(|error| {
        error!("Can't create images folder {folder:?}.\n{error:#?}");
        CantCreateImagesFolder(folder.display().to_string())
    })
}

/// Location an uploaded image is stored at: the images folder joined with the uploaded name.
/// Only the last component of the name is kept, so that nothing is written outside the folder.
pub fn image_path(folder: &Path, uploaded_name: &str) -> Result<PathBuf> {
    let file_name = uploaded_name
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .ok_or(MissingImageName)?;

    let extension = Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .ok_or(UnsupportedImageType)?;
    if !ACCEPTED_EXTENSIONS
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(extension))
    {
        return Err(UnsupportedImageType);
    }

    Ok(folder.join(file_name))
}

/// Write `bytes` as-is into the images folder.
/// An image with the same name is overwritten.
pub fn save_image(folder: &Path, uploaded_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = image_path(folder, uploaded_name)?;
    if path.exists() {
        warn!("Image {path:?} already exists and is going to be overwritten.");
    }

    std::fs::write(&path, bytes).map_err(|error| {
        error!("Can't write image {path:?}.\n{error:#?}");
        CantWriteImage(error.to_string())
    })?;

    debug!("{} bytes written to {path:?}.", bytes.len());
    Ok(path)
}

/// Check whether the image stored at `image_path` can be displayed, by decoding it entirely.
pub fn inspect_image(image_path: &str) -> ImageStatus {
    if image_path.is_empty() {
        return ImageStatus::NotProvided;
    }

    let reader = match ImageReader::open(image_path) {
        Ok(reader) => reader,
        Err(error) => {
            debug!("Image `{image_path}` can't be opened: {error}");
            return ImageStatus::NotFound;
        }
    };
    let reader = match reader.with_guessed_format() {
        Ok(reader) => reader,
        Err(error) => {
            warn!("Image `{image_path}` can't be read: {error}");
            return ImageStatus::Undecodable;
        }
    };

    let format = match reader.format() {
        Some(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
        Some(image::ImageFormat::Png) => ImageFormat::Png,
        other => {
            warn!("Image `{image_path}` is neither a JPEG nor a PNG image: {other:?}");
            return ImageStatus::Undecodable;
        }
    };
    match reader.decode() {
        Ok(_) => ImageStatus::Available(format),
        Err(error) => {
            warn!("Image `{image_path}` can't be decoded: {error}");
            ImageStatus::Undecodable
        }
    }
}
