pub mod errors;
pub mod book;
