pub mod category;
pub mod listing;
pub mod review;
pub mod shared;
