pub mod admin;
pub mod athletes;
pub mod session;
pub mod vocabulary;
