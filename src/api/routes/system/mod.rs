pub mod public;
mod router;
pub use router::{api_not_found, health_handler, router};
