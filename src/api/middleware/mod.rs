mod rate_limit;
mod security_headers;

pub use rate_limit::{RateLimiter, rate_limit};
pub use security_headers::set_security_headers;
