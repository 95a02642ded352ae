use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use contract::{Address, Contact, DEFAULT_CITY, ListingView, Location};
use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entity::{category, listing, review};
use crate::reviews::{NewReview, ReviewService};
use crate::utils::transform::listing_active_from_view;

/// `(name, icon, order)`; entries with an order are primary.
const DEFAULT_CATEGORIES: &[(&str, &str, Option<i32>)] = &[
    ("Ресторан", "utensils", Some(1)),
    ("Кафе", "coffee", Some(2)),
    ("Дэлгүүр", "shopping-cart", Some(3)),
    ("Үйлчилгээ", "wrench", Some(4)),
    ("Авто засвар", "car", Some(5)),
    ("Гоо сайхан", "palette", Some(6)),
    ("Банк", "building-2", Some(7)),
    ("Боловсрол", "graduation-cap", None),
    ("Зочид буудал", "hotel", None),
    ("Спорт", "dumbbell", None),
    ("Монгол хоол", "utensils", None),
    ("Кофе шоп", "coffee", None),
    ("Хүнсний бүтээгдэхүүн", "shopping-bag", None),
    ("Засвар", "wrench", None),
    ("Санхүү", "dollar-sign", None),
    ("Фитнес", "dumbbell", None),
    ("Аялал", "map", None),
    ("Сургалт", "book", None),
    ("Бусад", "more-horizontal", None),
];

/// Insert the default categories. Existing names are left alone.
pub async fn seed_categories(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    let now = Utc::now();

    for &(name, icon, order) in DEFAULT_CATEGORIES {
        let model = category::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            name: Set(name.to_string()),
            icon: Set(icon.to_string()),
            is_primary: Set(order.is_some()),
            sort_order: Set(order),
            created_at: Set(now),
            ..Default::default()
        };

        let result = category::Entity::insert(model)
            .on_conflict(
                OnConflict::column(category::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(0) | Err(DbErr::RecordNotInserted) => {}
            Ok(_) => inserted += 1,
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new categories", inserted);
    }
    Ok(())
}

struct DemoListing {
    name: &'static str,
    description: &'static str,
    categories: &'static [&'static str],
    district: &'static str,
    khoroo: &'static str,
    full: &'static str,
    location: (f64, f64),
    phones: &'static [&'static str],
    email: Option<&'static str>,
    website: Option<&'static str>,
    hours: &'static [(&'static str, &'static str)],
    image_seeds: &'static [&'static str],
    /// `(author, rating, comment)`
    reviews: &'static [(&'static str, i32, &'static str)],
}

const DEMO_LISTINGS: &[DemoListing] = &[
    DemoListing {
        name: "Modern Nomads",
        description: "Монгол үндэстний зоогийн газар. Бид танд монгол ахуй, соёлыг мэдрүүлэх болно.",
        categories: &["Ресторан", "Монгол хоол"],
        district: "Сүхбаатар",
        khoroo: "1-р хороо",
        full: "Сүхбаатар дүүрэг, 1-р хороо, Чингисийн өргөн чөлөө",
        location: (47.918, 106.917),
        phones: &["7011-0393", "9909-1100"],
        email: Some("info@modernnomads.mn"),
        website: Some("http://www.modernnomads.mn"),
        hours: &[("Даваа-Баасан", "10:00 - 22:00"), ("Бямба-Ням", "11:00 - 23:00")],
        image_seeds: &["restaurant-1", "restaurant-2"],
        reviews: &[
            ("Болд", 5, "Хоол нь үнэхээр амттай, үйлчилгээ сайн."),
            ("Сараа", 4, "Найзуудтайгаа суухад тохиромжтой юм байна. Жоохон үнэтэй санагдсан."),
            ("Өнөрбаяр", 5, "Монгол дундаж хоолны амт дэх сайхан орчин. Найзуудтай очиж байна."),
        ],
    },
    DemoListing {
        name: "Ubean Coffee",
        description: "Тансаг зэрэглэлийн кофе шоп. Амтат кофе, тав тухтай орчин таныг хүлээж байна.",
        categories: &["Кофе шоп", "Кафе"],
        district: "Баянзүрх",
        khoroo: "26-р хороо",
        full: "Баянзүрх дүүрэг, 26-р хороо, Peace Mall-н 1-р давхарт",
        location: (47.912, 106.953),
        phones: &["7711-5555"],
        email: Some("info@ubeancoffee.mn"),
        website: Some("http://www.ubeancoffee.mn"),
        hours: &[("Даваа-Ням", "07:00 - 21:00")],
        image_seeds: &["coffee-1", "coffee-2"],
        reviews: &[("Тэмүүлэн", 5, "Миний дуртай кофе шоп. Ялангуяа латте нь үнэхээр гоё.")],
    },
    DemoListing {
        name: "Мини маркет",
        description: "Өдөр тутмын хэрэгцээт зүйлс. Дэлгүүр таны ойр орчимд.",
        categories: &["Дэлгүүр", "Хүнсний бүтээгдэхүүн"],
        district: "Чингэлтэй",
        khoroo: "3-р хороо",
        full: "Чингэлтэй дүүрэг, 3-р хороо",
        location: (47.923, 106.905),
        phones: &["7012-3456"],
        email: Some("info@minimarket.mn"),
        website: None,
        hours: &[("Даваа-Ням", "08:00 - 22:00")],
        image_seeds: &["store-1"],
        reviews: &[
            ("Энхбаяр", 4, "Хэрэгцээт зүйлс байдаг. Үнэ боломжийн."),
            ("Нарангэрэл", 4, "Орон нутгийн дэлгүүр шиг л байна. Сайн."),
        ],
    },
    DemoListing {
        name: "Хурдан сантехникч",
        description: "Усны шугам, халаалтын системийн засварчин. 24/7 үйлчилгээ.",
        categories: &["Үйлчилгээ", "Засвар"],
        district: "Хан-Уул",
        khoroo: "15-р хороо",
        full: "Хан-Уул дүүрэг, 15-р хороо, оффисгүй",
        location: (47.892, 106.898),
        phones: &["9911-9911"],
        email: Some("hurd.santehnik@example.com"),
        website: None,
        hours: &[("Даваа-Ням", "24 цаг")],
        image_seeds: &["plumber-1"],
        reviews: &[("Бат-Эрдэнэ", 5, "Шөнө дунд дуудсан ч ирсэн. Мэргэжилтэй ажил хийсэн.")],
    },
    DemoListing {
        name: "Хаан банк салбар",
        description: "Санхүүгийн үйлчилгээ, зээл, хадгаламж, гүйлгээ. Найдвартай банкны үйлчилгээ.",
        categories: &["Банк", "Санхүү"],
        district: "Сүхбаатар",
        khoroo: "1-р хороо",
        full: "Сүхбаатар дүүрэг, 1-р хороо, Сүхбаатарын талбай",
        location: (47.9077, 106.9062),
        phones: &["1900-1955", "7777-7777"],
        email: Some("info@khanbank.com"),
        website: Some("https://www.khanbank.com"),
        hours: &[
            ("Даваа-Баасан", "09:00 - 18:00"),
            ("Бямба", "10:00 - 16:00"),
            ("Ням", "Амрах өдөр"),
        ],
        image_seeds: &["bank-1"],
        reviews: &[
            ("Дорж", 4, "Хурдан үйлчилгээ, ажилтнууд эелдэг."),
            ("Алтанцэцэг", 5, "Зээлийн үйлчилгээ маш сайн. Хурдан шийдвэрлэж өгсөн."),
        ],
    },
];

fn demo_view(demo: &DemoListing, index: usize, now: chrono::DateTime<Utc>) -> ListingView {
    // Stagger timestamps so the listing order is stable.
    let created_at = now - Duration::minutes((DEMO_LISTINGS.len() - index) as i64);
    ListingView {
        id: Uuid::now_v7().to_string(),
        name: demo.name.to_string(),
        description: demo.description.to_string(),
        categories: demo.categories.iter().map(|c| ToString::to_string(c)).collect(),
        address: Address {
            city: DEFAULT_CITY.to_string(),
            district: demo.district.to_string(),
            khoroo: demo.khoroo.to_string(),
            full: demo.full.to_string(),
        },
        location: Location {
            lat: demo.location.0,
            lng: demo.location.1,
        },
        contact: Contact {
            phone: demo.phones.iter().map(|p| ToString::to_string(p)).collect(),
            email: demo.email.map(String::from),
            website: demo.website.map(String::from),
        },
        hours: demo
            .hours
            .iter()
            .map(|(day, schedule)| (ToString::to_string(day), ToString::to_string(schedule)))
            .collect::<BTreeMap<_, _>>(),
        rating: 0.0,
        review_count: 0,
        images: demo
            .image_seeds
            .iter()
            .map(|seed| format!("https://picsum.photos/seed/{seed}/800/600"))
            .collect(),
        logo: Some(format!("https://picsum.photos/seed/logo-{}/200/200", index + 1)),
        created_at,
        updated_at: created_at,
    }
}

/// Insert demo listings with reviews when no listing exists yet.
///
/// Ratings are produced by [`ReviewService::record`], the same path
/// `POST /api/reviews` takes.
pub async fn seed_demo_listings(db: &DatabaseConnection) -> Result<(), DbErr> {
    if listing::Entity::find().count(db).await? > 0 {
        info!("Listings present, skipping demo data");
        return Ok(());
    }

    let now = Utc::now();
    let reviews = ReviewService::new(db);
    let mut review_total = 0usize;

    for (index, demo) in DEMO_LISTINGS.iter().enumerate() {
        let view = demo_view(demo, index, now);
        listing_active_from_view(&view).insert(db).await?;

        for &(author, rating, comment) in demo.reviews {
            reviews
                .record(NewReview {
                    business_id: view.id.clone(),
                    author: author.to_string(),
                    avatar: None,
                    rating,
                    comment: comment.to_string(),
                })
                .await
                .map_err(|e| DbErr::Custom(format!("demo review for {}: {e:?}", demo.name)))?;
            review_total += 1;
        }
    }

    info!(
        listings = DEMO_LISTINGS.len(),
        reviews = review_total,
        "Seeded demo data"
    );
    Ok(())
}

/// Ensure required database indexes exist.
///
/// Schema sync only creates single-column unique indexes, so the composite
/// and ordering indexes are created here.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let indexes = [
        (
            "idx_review_business_created",
            Index::create()
                .if_not_exists()
                .name("idx_review_business_created")
                .table(review::Entity)
                .col(review::Column::BusinessId)
                .col(review::Column::CreatedAt)
                .to_string(PostgresQueryBuilder),
        ),
        (
            "idx_listing_created",
            Index::create()
                .if_not_exists()
                .name("idx_listing_created")
                .table(listing::Entity)
                .col(listing::Column::CreatedAt)
                .col(listing::Column::Id)
                .to_string(PostgresQueryBuilder),
        ),
    ];

    for (name, stmt) in indexes {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
