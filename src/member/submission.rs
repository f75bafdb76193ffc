use crate::member::error::SubmissionError;
use crate::member::error::SubmissionError::MissingRequiredFields;
use crate::member::image::save_image;
use crate::member::record::MemberRecord;
use crate::member::store::MemberStore;
use derive_getters::Getters;
use log::{debug, info};
use std::path::Path;

type Result<T, E = SubmissionError> = std::result::Result<T, E>;

/// An image file sent along with a member.
#[derive(Debug, Getters, Clone, PartialEq)]
pub struct UploadedImage {
    name: String,
    bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(name: String, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }
}

/// Record a new member:
/// 1. check required fields are filled,
/// 2. save the image, if any, and remember its path,
/// 3. append the member and rewrite the members file.
///
/// When the members file can't be written, the member is still kept in memory
/// and the error is returned so that the user can be told the data is not saved.
pub fn submit_member(
    store: &mut MemberStore,
    images_folder: &Path,
    mut record: MemberRecord,
    image: Option<UploadedImage>,
) -> Result<MemberRecord> {
    let missing_fields = record.missing_required_fields();
    if !missing_fields.is_empty() {
        debug!("Member refused, missing fields: {missing_fields:?}");
        return Err(MissingRequiredFields(missing_fields));
    }

    let image_path = match image {
        Some(image) => save_image(images_folder, image.name(), image.bytes())?
            .display()
            .to_string(),
        None => String::new(),
    };
    record.set_image_path(image_path);

    store.append(record.clone());
    store.persist()?;

    info!(
        "Member `{}` recorded into {:?}.",
        record.id(),
        store.file_path()
    );
    Ok(record)
}
