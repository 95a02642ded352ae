use chrono::{DateTime, Utc};
use contract::{MAX_RATING, MIN_RATING, round_rating};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr, sea_query::LockType,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::{listing, review};
use crate::error::AppError;

/// A validated review waiting to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub business_id: String,
    pub author: String,
    pub avatar: Option<String>,
    pub rating: i32,
    pub comment: String,
}

/// Generated avatar for authors who did not supply one.
///
/// The author name becomes a single percent-encoded path segment.
pub fn default_avatar(author: &str) -> String {
    let seed = author.split_whitespace().collect::<Vec<_>>().join("-");
    format!(
        "https://picsum.photos/seed/{}/100/100",
        urlencoding::encode(&seed)
    )
}

fn review_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

pub struct ReviewService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait<Transaction = DatabaseTransaction>> ReviewService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Store a review and refresh the listing's `rating` / `review_count`.
    ///
    /// The listing row stays locked until commit, so concurrent reviews of
    /// the same listing are applied one after another.
    pub async fn record(&self, new: NewReview) -> Result<review::Model, AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&new.rating) {
            return Err(AppError::Validation(format!(
                "rating must be a whole number from {MIN_RATING} to {MAX_RATING}"
            )));
        }

        let txn = self.conn.begin().await?;

        listing::Entity::find_by_id(new.business_id.clone())
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Business not found".into()))?;

        let now = Utc::now();
        let avatar = new.avatar.unwrap_or_else(|| default_avatar(&new.author));
        let model = review::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            business_id: Set(new.business_id.clone()),
            author: Set(new.author),
            avatar: Set(avatar),
            rating: Set(new.rating),
            comment: Set(new.comment),
            date: Set(review_date(now)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let (rating, count) = refresh_listing_rating(&txn, &new.business_id).await?;
        txn.commit().await?;

        debug!(
            business_id = %model.business_id,
            rating,
            review_count = count,
            "Review recorded"
        );
        Ok(model)
    }

    /// Reviews of a listing, newest first. Unknown ids yield an empty list.
    pub async fn list_for_listing(&self, business_id: &str) -> Result<Vec<review::Model>, AppError> {
        Ok(review::Entity::find()
            .filter(review::Column::BusinessId.eq(business_id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .all(self.conn)
            .await?)
    }
}

/// Recompute `rating` and `review_count` of a listing from its reviews.
///
/// Must run inside the transaction that holds the listing row lock.
pub(crate) async fn refresh_listing_rating(
    txn: &DatabaseTransaction,
    business_id: &str,
) -> Result<(f64, i32), AppError> {
    let (sum, count) = review::Entity::find()
        .filter(review::Column::BusinessId.eq(business_id))
        .select_only()
        .column_as(review::Column::Rating.sum(), "rating_sum")
        .column_as(review::Column::Id.count(), "review_count")
        .into_tuple::<(Option<i64>, i64)>()
        .one(txn)
        .await?
        .unwrap_or((None, 0));

    let rating = round_rating(sum.unwrap_or(0), count);
    let review_count = i32::try_from(count)
        .map_err(|_| AppError::Internal(format!("review count overflow for {business_id}")))?;

    listing::Entity::update_many()
        .col_expr(listing::Column::Rating, Expr::value(rating))
        .col_expr(listing::Column::ReviewCount, Expr::value(review_count))
        .filter(listing::Column::Id.eq(business_id))
        .exec(txn)
        .await?;

    Ok((rating, review_count))
}
