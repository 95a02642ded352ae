//! JSON contract of the Yellow Book API.
//!
//! These are the shapes clients see on the wire. Storage rows and request
//! payloads live in the `api` crate; everything here is plain data.

pub mod category;
pub mod listing;
pub mod rating;
pub mod review;

pub use category::CategoryView;
pub use listing::{Address, Contact, DEFAULT_CITY, DEFAULT_LOCATION, ListingView, Location};
pub use rating::{MAX_RATING, MIN_RATING, round_rating};
pub use review::ReviewView;
