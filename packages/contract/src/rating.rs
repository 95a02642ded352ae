/// Lowest star rating a review may carry.
pub const MIN_RATING: i32 = 1;
/// Highest star rating a review may carry.
pub const MAX_RATING: i32 = 5;

/// Average of `count` ratings summing to `sum`, rounded to one decimal.
///
/// Returns `0.0` for a listing without reviews.
pub fn round_rating(sum: i64, count: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    let mean = sum as f64 / count as f64;
    (mean * 10.0).round() / 10.0
}
