pub mod category;
pub mod health;
pub mod listing;
pub mod review;
