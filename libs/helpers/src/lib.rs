pub mod catalog;
pub mod stream;
