pub mod body;
pub mod form;
pub mod response;

pub use body::{lenient, token_from_headers, AuthToken, JsonBody, TOKEN_HEADER};
pub use form::{FormData, UploadedFile};
pub use response::{ApiResponse, ApiResult};
