pub mod account;
pub mod athlete;
