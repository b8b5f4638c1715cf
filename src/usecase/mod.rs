pub mod contracts;
pub mod reviews;
pub mod tours;
