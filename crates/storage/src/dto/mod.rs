pub mod account;
pub mod athlete;
pub mod common;
pub mod search;
pub mod vocabulary;
