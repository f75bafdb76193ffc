use crate::member::error::{ImageError, StoreError};
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("An error has occurred with the members file.")]
    Store(#[from] StoreError),
    #[error("An error has occurred with the images folder.")]
    Image(#[from] ImageError),
}
