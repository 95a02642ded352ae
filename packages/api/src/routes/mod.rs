use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{category, health, listing, review};
use crate::state::AppState;

/// Routes mounted under `/api`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/yellow-books", listing_routes())
        .nest("/categories", category_routes())
        .nest("/reviews", review_routes())
}

/// Routes mounted at the root.
pub fn service_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health::index))
        .routes(routes!(health::health))
}

fn listing_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(listing::list_listings, listing::create_listing))
        .routes(routes!(
            listing::get_listing,
            listing::update_listing,
            listing::delete_listing
        ))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(category::list_categories, category::create_category))
        .routes(routes!(category::list_primary_categories))
        .routes(routes!(
            category::get_category,
            category::update_category,
            category::delete_category
        ))
}

fn review_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(review::create_review))
        .routes(routes!(review::list_reviews))
}
