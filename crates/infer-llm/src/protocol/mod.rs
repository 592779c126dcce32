//! Wire format types for provider APIs

pub mod openai;
