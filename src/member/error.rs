use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("The members file `{0}` can't be opened.")]
    CantOpenMembersFile(String),
    #[error("The members file can't be read: {0}")]
    CantReadMembersFile(String),
    #[error("The members file can't be written: {0}")]
    CantWriteMembersFile(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ImageError {
    #[error("The images folder `{0}` can't be created.")]
    CantCreateImagesFolder(String),
    #[error("The uploaded image has no usable file name.")]
    MissingImageName,
    #[error("Only jpg, jpeg and png images are accepted.")]
    UnsupportedImageType,
    #[error("The image can't be saved: {0}")]
    CantWriteImage(String),
}

/// Reasons for which a submitted member is not, or not durably, recorded.
#[derive(Debug, Error, PartialEq)]
pub enum SubmissionError {
    #[error("Please fill in all required fields: {}.", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmissionError {
    /// Whether the submission has been refused before anything was written.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            SubmissionError::MissingRequiredFields(_)
                | SubmissionError::Image(ImageError::MissingImageName)
                | SubmissionError::Image(ImageError::UnsupportedImageType)
        )
    }
}
