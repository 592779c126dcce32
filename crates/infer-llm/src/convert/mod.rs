//! Conversion between internal canonical types and provider wire formats

pub mod openai;
