use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{ParseIdError, UserSettingsError};
use crate::pagination::PaginationError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error(transparent)]
    UserSettings(#[from] UserSettingsError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
