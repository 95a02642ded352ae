use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use api::entity::listing;

use crate::common::{TestApp, listing_body, routes};

mod listing_creation {
    use super::*;

    #[tokio::test]
    async fn create_returns_nested_listing_with_defaults() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::LISTINGS, &listing_body("Modern Nomads", &["Ресторан"]))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["message"], "Business created successfully");
        let data = &res.body["data"];
        assert_eq!(data["name"], "Modern Nomads");
        assert_eq!(data["categories"], json!(["Ресторан"]));
        assert_eq!(data["address"]["city"], "Улаанбаатар");
        assert_eq!(data["address"]["district"], "Сүхбаатар");
        assert_eq!(data["location"]["lat"], 47.9184);
        assert_eq!(data["contact"]["phone"], json!(["7011-0393"]));
        assert_eq!(data["rating"], 0.0);
        assert_eq!(data["reviewCount"], 0);
        assert_eq!(data["hours"], json!({}));
        assert_eq!(data["images"], json!([]));
        assert!(data.get("logo").is_none());
        assert!(data["createdAt"].is_string());
    }

    #[tokio::test]
    async fn create_round_trips_every_field() {
        let app = TestApp::spawn().await;
        let mut body = listing_body("Ubean Coffee", &["Кофе шоп", "Кафе"]);
        body["location"] = json!({ "lat": 47.912, "lng": 106.953 });
        body["contact"] = json!({
            "phone": ["7711-5555", "9911-0000"],
            "email": "info@ubeancoffee.mn",
            "website": "http://www.ubeancoffee.mn",
        });
        body["hours"] = json!({ "Даваа-Ням": "07:00 - 21:00" });
        body["images"] = json!(["https://picsum.photos/seed/coffee-1/800/600"]);
        body["logo"] = json!("https://picsum.photos/seed/logo-2/200/200");

        let id = {
            let res = app.post(routes::LISTINGS, &body).await;
            assert_eq!(res.status, 201, "{}", res.text);
            res.data_id()
        };

        let res = app.get(&routes::listing(&id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        let data = &res.body["data"];
        assert_eq!(data["location"], body["location"]);
        assert_eq!(data["contact"], body["contact"]);
        assert_eq!(data["hours"], body["hours"]);
        assert_eq!(data["images"], body["images"]);
        assert_eq!(data["logo"], body["logo"]);
        assert_eq!(data["reviews"], json!([]));
    }

    #[tokio::test]
    async fn missing_address_is_rejected_without_creating_a_row() {
        let app = TestApp::spawn().await;
        let mut body = listing_body("Хаан банк", &["Банк"]);
        body.as_object_mut().unwrap().remove("address");

        let res = app.post(routes::LISTINGS, &body).await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["error"], "VALIDATION_ERROR");
        assert_eq!(res.body["details"], json!(["address"]));
        assert_eq!(listing::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn every_missing_field_is_listed() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::LISTINGS, &json!({})).await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["details"],
            json!(["name", "description", "categories", "address", "contact"])
        );
    }

    #[tokio::test]
    async fn client_supplied_rating_is_ignored() {
        let app = TestApp::spawn().await;
        let mut body = listing_body("Мини маркет", &["Дэлгүүр"]);
        body["rating"] = json!(5.0);
        body["reviewCount"] = json!(99);

        let res = app.post(routes::LISTINGS, &body).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["data"]["rating"], 0.0);
        assert_eq!(res.body["data"]["reviewCount"], 0);
    }

    #[tokio::test]
    async fn invalid_website_is_rejected() {
        let app = TestApp::spawn().await;
        let mut body = listing_body("Bad", &["Бусад"]);
        body["contact"]["website"] = json!("not a url");

        let res = app.post(routes::LISTINGS, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::LISTINGS, "{\"name\": ").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "VALIDATION_ERROR");
    }
}

mod listing_search {
    use super::*;

    async fn seed(app: &TestApp) {
        app.create_listing("Modern Nomads", &["Ресторан", "Монгол хоол"])
            .await;
        app.create_listing("Ubean Coffee", &["Кофе шоп", "Кафе"])
            .await;
        app.create_listing("Ресторан Хаус дэлгүүр", &["Дэлгүүр"])
            .await;
    }

    #[tokio::test]
    async fn lists_newest_first_with_pagination() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(&format!("{}?limit=2", routes::LISTINGS)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.names(), vec!["Ресторан Хаус дэлгүүр", "Ubean Coffee"]);
        assert_eq!(
            res.body["pagination"],
            json!({ "total": 3, "limit": 2, "offset": 0, "hasMore": true })
        );

        let res = app
            .get(&format!("{}?limit=2&offset=2", routes::LISTINGS))
            .await;
        assert_eq!(res.names(), vec!["Modern Nomads"]);
        assert_eq!(res.body["pagination"]["hasMore"], false);
    }

    #[tokio::test]
    async fn category_filter_is_exact_membership() {
        let app = TestApp::spawn().await;
        seed(&app).await;
        app.create_listing("Ресторан-кафе", &["Ресторан-кафе"]).await;

        let res = app
            .get(&format!("{}?category=Ресторан", routes::LISTINGS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.names(), vec!["Modern Nomads"]);
        assert_eq!(res.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn text_search_is_case_insensitive_across_name_and_categories() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(&format!("{}?q=ubean", routes::LISTINGS)).await;
        assert_eq!(res.names(), vec!["Ubean Coffee"]);

        // matches a category of one listing and the name of another
        let res = app.get(&format!("{}?q=ресторан", routes::LISTINGS)).await;
        assert_eq!(res.names(), vec!["Ресторан Хаус дэлгүүр", "Modern Nomads"]);

        let res = app.get(&format!("{}?search=КАФЕ", routes::LISTINGS)).await;
        assert_eq!(res.names(), vec!["Ubean Coffee"]);
    }

    #[tokio::test]
    async fn location_search_matches_address_fields() {
        let app = TestApp::spawn().await;
        seed(&app).await;
        let mut body = listing_body("Peace Mall кофе", &["Кафе"]);
        body["address"] = json!({ "district": "Баянзүрх", "full": "Peace Mall" });
        app.post(routes::LISTINGS, &body).await;

        let res = app.get(&format!("{}?loc=баянзүрх", routes::LISTINGS)).await;
        assert_eq!(res.names(), vec!["Peace Mall кофе"]);

        let res = app
            .get(&format!("{}?q=кофе&loc=Сүхбаатар", routes::LISTINGS))
            .await;
        assert_eq!(res.names(), vec!["Ubean Coffee"]);
    }

    #[tokio::test]
    async fn like_wildcards_are_literal() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(&format!("{}?q=%25", routes::LISTINGS)).await;

        assert_eq!(res.status, 200);
        assert!(res.names().is_empty());
    }

    #[tokio::test]
    async fn empty_query_params_fall_back_to_defaults() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app
            .get(&format!(
                "{}?q=&loc=&category=&limit=&offset=",
                routes::LISTINGS
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.names().len(), 3);
        assert_eq!(
            res.body["pagination"],
            json!({ "total": 3, "limit": 20, "offset": 0, "hasMore": false })
        );

        let res = app.get(&format!("{}?q=ubean&limit=", routes::LISTINGS)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.names(), vec!["Ubean Coffee"]);
    }

    #[tokio::test]
    async fn text_search_ignores_category_json_syntax() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        for q in ["%5B", "%22%2C%20%22"] {
            let res = app.get(&format!("{}?q={q}", routes::LISTINGS)).await;
            assert_eq!(res.status, 200, "{}", res.text);
            assert!(res.names().is_empty(), "q={q}: {:?}", res.names());
        }

        let res = app.get(&format!("{}?q=монгол", routes::LISTINGS)).await;
        assert_eq!(res.names(), vec!["Modern Nomads"]);
    }

    #[tokio::test]
    async fn limit_is_clamped_and_negative_offset_rejected() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(&format!("{}?limit=1000", routes::LISTINGS)).await;
        assert_eq!(res.body["pagination"]["limit"], 100);

        let res = app.get(&format!("{}?offset=-1", routes::LISTINGS)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "VALIDATION_ERROR");

        let res = app.get(&format!("{}?limit=abc", routes::LISTINGS)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "VALIDATION_ERROR");
    }
}

mod listing_update {
    use super::*;

    #[tokio::test]
    async fn update_merges_fields_and_replaces_contact() {
        let app = TestApp::spawn().await;
        let mut body = listing_body("Modern Nomads", &["Ресторан"]);
        body["contact"]["email"] = json!("info@modernnomads.mn");
        let id = {
            let res = app.post(routes::LISTINGS, &body).await;
            res.data_id()
        };

        let res = app
            .put(
                &routes::listing(&id),
                &json!({
                    "description": "Шинэ тайлбар",
                    "contact": { "phone": ["9909-1100"] },
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Business updated successfully");
        let data = &res.body["data"];
        assert_eq!(data["name"], "Modern Nomads");
        assert_eq!(data["description"], "Шинэ тайлбар");
        assert_eq!(data["contact"], json!({ "phone": ["9909-1100"] }));
        assert_ne!(data["updatedAt"], data["createdAt"]);
    }

    #[tokio::test]
    async fn empty_update_returns_listing_unchanged() {
        let app = TestApp::spawn().await;
        let id = app.create_listing("Modern Nomads", &["Ресторан"]).await;
        let before = app.get(&routes::listing(&id)).await;

        let res = app.put(&routes::listing(&id), &json!({})).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["updatedAt"], before.body["data"]["updatedAt"]);
    }

    #[tokio::test]
    async fn update_keeps_review_aggregate() {
        let app = TestApp::spawn().await;
        let id = app.create_listing("Modern Nomads", &["Ресторан"]).await;
        app.review(&id, "Bold", 5).await;

        let res = app
            .put(&routes::listing(&id), &json!({ "rating": 1.0, "name": "MN" }))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["name"], "MN");
        assert_eq!(res.body["data"]["rating"], 5.0);
        assert_eq!(res.body["data"]["reviewCount"], 1);
    }

    #[tokio::test]
    async fn update_unknown_listing_is_404() {
        let app = TestApp::spawn().await;

        let res = app
            .put(&routes::listing("missing"), &json!({ "name": "X" }))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn update_rejects_blank_name() {
        let app = TestApp::spawn().await;
        let id = app.create_listing("Modern Nomads", &["Ресторан"]).await;

        let res = app.put(&routes::listing(&id), &json!({ "name": "  " })).await;

        assert_eq!(res.status, 400);
    }
}

mod listing_deletion {
    use sea_orm::{ColumnTrait, QueryFilter};

    use api::entity::review;

    use super::*;

    #[tokio::test]
    async fn delete_removes_listing_and_its_reviews() {
        let app = TestApp::spawn().await;
        let id = app.create_listing("Modern Nomads", &["Ресторан"]).await;
        let other = app.create_listing("Ubean Coffee", &["Кафе"]).await;
        app.review(&id, "Bold", 5).await;
        app.review(&id, "Сараа", 4).await;
        app.review(&other, "Тэмүүлэн", 5).await;

        let res = app.delete(&routes::listing(&id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Business deleted successfully");
        assert_eq!(res.body["data"]["id"], id.as_str());

        let remaining = review::Entity::find()
            .filter(review::Column::BusinessId.eq(id.as_str()))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        let others = review::Entity::find()
            .filter(review::Column::BusinessId.eq(other.as_str()))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(others, 1);

        let res = app.get(&routes::listing(&id)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_unknown_listing_is_404() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::listing("missing")).await;

        assert_eq!(res.status, 404);
    }
}

mod malformed_records {
    use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};

    use super::*;

    #[tokio::test]
    async fn undecodable_column_surfaces_as_500() {
        let app = TestApp::spawn().await;
        let id = app.create_listing("Modern Nomads", &["Ресторан"]).await;

        let row = listing::Entity::find_by_id(id.clone())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        let mut active = row.into_active_model();
        active.images = Set(Some(json!({ "not": "a list" })));
        active.update(&app.db).await.unwrap();

        let res = app.get(&routes::listing(&id)).await;
        assert_eq!(res.status, 500);
        assert_eq!(res.body["error"], "MALFORMED_RECORD");

        let res = app.get(routes::LISTINGS).await;
        assert_eq!(res.status, 500);
    }
}

mod service_routes {
    use super::*;

    #[tokio::test]
    async fn health_and_banner() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::HEALTH).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "ok");

        let res = app.get("/").await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Yellow Book API");
        assert_eq!(res.body["endpoints"]["yellowBooks"], "/api/yellow-books");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = TestApp::spawn().await;

        let res = app.get("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().expect("paths object");
        assert!(
            paths.keys().any(|p| p.starts_with("/api/yellow-books")),
            "{:?}",
            paths.keys().collect::<Vec<_>>()
        );
        assert!(paths.contains_key("/api/reviews/{businessId}"));
    }
}
