pub mod private_files;
pub mod rate_limit;
pub mod security;

pub use private_files::{PrivateFiles, private_files_middleware};
pub use rate_limit::{RateLimiter, rate_limit_middleware};
pub use security::security_headers_middleware;
