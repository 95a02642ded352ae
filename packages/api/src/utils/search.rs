//! Listing search filter.

use sea_orm::sea_query::extension::postgres::PgBinOper;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr};
use sea_orm::*;

use crate::entity::listing;
use crate::models::shared::{escape_like, non_blank};

/// Search parameters for the listing index. Blank inputs are dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListingSearch {
    /// Matched against name, description and category names.
    pub text: Option<String>,
    /// Matched against the four address fields.
    pub location_text: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
}

impl ListingSearch {
    pub fn new(text: Option<&str>, location_text: Option<&str>, category: Option<&str>) -> Self {
        Self {
            text: non_blank(text),
            location_text: non_blank(location_text),
            category: non_blank(category),
        }
    }
}

fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(&term.to_lowercase()))
}

fn column_contains<C: IntoColumnRef>(column: C, pattern: &str) -> Condition {
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(pattern).escape('\\')),
    )
}

/// Some category name contains `pattern`. Rows whose column is not a JSON
/// array never match.
fn category_name_contains(pattern: &str) -> Condition {
    Condition::all().add(Expr::cust_with_values(
        r#"CASE WHEN jsonb_typeof("listing"."categories") = 'array' THEN EXISTS (SELECT 1 FROM jsonb_array_elements_text("listing"."categories") AS "category"("name") WHERE lower("category"."name") LIKE $1 ESCAPE '\') ELSE FALSE END"#,
        [pattern.to_string()],
    ))
}

fn has_category(name: &str) -> Condition {
    let needle = serde_json::Value::Array(vec![serde_json::Value::String(name.to_string())]);
    Condition::all().add(
        Expr::col((listing::Entity, listing::Column::Categories))
            .binary(PgBinOper::Contains, Expr::val(needle)),
    )
}

/// Build the `WHERE` condition for a listing search.
///
/// The text group and the location group are each OR-combined across their
/// columns, then AND-combined with each other and with the category test.
/// An empty search matches everything.
pub fn build_listing_filter(search: &ListingSearch) -> Condition {
    let mut cond = Condition::all();

    if let Some(ref text) = search.text {
        let pattern = contains_pattern(text);
        cond = cond.add(
            Condition::any()
                .add(column_contains((listing::Entity, listing::Column::Name), &pattern))
                .add(column_contains(
                    (listing::Entity, listing::Column::Description),
                    &pattern,
                ))
                .add(category_name_contains(&pattern)),
        );
    }

    if let Some(ref loc) = search.location_text {
        let pattern = contains_pattern(loc);
        cond = cond.add(
            Condition::any()
                .add(column_contains(
                    (listing::Entity, listing::Column::AddressCity),
                    &pattern,
                ))
                .add(column_contains(
                    (listing::Entity, listing::Column::AddressDistrict),
                    &pattern,
                ))
                .add(column_contains(
                    (listing::Entity, listing::Column::AddressKhoroo),
                    &pattern,
                ))
                .add(column_contains(
                    (listing::Entity, listing::Column::AddressFull),
                    &pattern,
                )),
        );
    }

    if let Some(ref category) = search.category {
        cond = cond.add(has_category(category));
    }

    cond
}
