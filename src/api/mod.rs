pub mod error;
pub mod route;

pub use error::{ApiError, RequestMeta};
pub use route::create_router;
