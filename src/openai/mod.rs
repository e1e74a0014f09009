mod core;
pub use self::core::{
    CompletionError, CompletionOptions, Message, Role, completion, first_choice_text,
};
