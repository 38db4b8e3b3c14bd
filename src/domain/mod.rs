pub mod category;
pub mod models;

pub use category::AgeCategory;
pub use models::*;
