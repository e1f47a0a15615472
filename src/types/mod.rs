//! Shared request/response types.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginationMeta, PaginationParams, PaymentPage};
pub use response::{MessageResponse, NoContent};
