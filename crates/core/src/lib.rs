#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod pace;
pub mod pagination;
pub mod time;

pub use catalog::{Catalog, CatalogError};
pub use error::Error;
pub use pace::{PaceStats, PaceStatus};
pub use pagination::{PageController, PageEvent, PaginationError, ResumePoint};
pub use time::Clock;
