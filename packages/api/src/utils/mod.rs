pub mod search;
pub mod transform;
