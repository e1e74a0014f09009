pub mod prompt;
pub mod writer;

pub use writer::{EmailWriter, OpenAiEmailWriter};
