use crate::common::{ALLOWED_ORIGIN, TestApp, routes};

#[tokio::test]
async fn preflight_from_allowed_origin() {
    let app = TestApp::spawn().await;

    let res = app
        .options(
            routes::LISTINGS,
            &[
                ("Origin", ALLOWED_ORIGIN),
                ("Access-Control-Request-Method", "POST"),
                ("Access-Control-Request-Headers", "content-type"),
            ],
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.header("access-control-allow-origin"),
        Some(ALLOWED_ORIGIN)
    );
    assert_eq!(res.header("access-control-allow-credentials"), Some("true"));
    let methods = res.header("access-control-allow-methods").unwrap_or_default();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "{methods}");
    }
}

#[tokio::test]
async fn preflight_from_unknown_origin_gets_no_allow_header() {
    let app = TestApp::spawn().await;

    let res = app
        .options(
            routes::LISTINGS,
            &[
                ("Origin", "http://evil.example"),
                ("Access-Control-Request-Method", "DELETE"),
            ],
        )
        .await;

    assert!(res.header("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn bare_options_on_any_path_is_empty_200() {
    let app = TestApp::spawn().await;

    for path in [routes::LISTINGS, "/api/does-not-exist", routes::HEALTH] {
        let res = app.options(path, &[]).await;
        assert_eq!(res.status, 200, "{path}");
        assert!(res.text.is_empty(), "{path}: {}", res.text);
    }
}

#[tokio::test]
async fn simple_request_echoes_allowed_origin() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .get(format!("http://{}{}", app.addr, routes::CATEGORIES))
        .header("Origin", ALLOWED_ORIGIN)
        .send()
        .await
        .expect("Failed to send GET request");

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
}
