pub mod category;
pub mod listing;
pub mod product;
pub mod stock;
