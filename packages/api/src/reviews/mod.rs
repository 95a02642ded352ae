//! Review storage and the listing rating aggregate.

mod service;

pub use service::{NewReview, ReviewService, default_avatar};
