//! Integration tests for the produce market API

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bytes::Bytes;
use market::MarketBuilder;
use produce::{Code, Produce, Registry};
use tower::ServiceExt;

const APPLE: &str = r#"{"name":"apple","code":"YRT6-72AS-K736-L4ee", "price":"12.12"}"#;

/// Helper to create a test market, keeping a handle on its registry
fn test_market() -> (axum::Router, Registry) {
    let registry = Registry::new();
    let app = MarketBuilder::new().registry(registry.clone()).build();
    (app, registry)
}

/// Send a request and collect the status and body
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Bytes) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

fn payload(i: usize) -> String {
    format!(r#"{{"name":"apple","code":"YRT6-72AS-K736-{i:04}", "price":"12.12"}}"#)
}

fn load(registry: &Registry, count: usize) {
    for i in 0..count {
        let produce = serde_json::from_str::<Produce>(&payload(i)).unwrap();
        registry.add(produce).unwrap();
    }
}

#[tokio::test]
async fn test_produce_resource() {
    let (app, registry) = test_market();

    let (status, _) = send(&app, "POST", "/produce", Some(APPLE.into())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "GET", "/produce", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "PUT", "/produce", Some(APPLE.into())).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(&app, "DELETE", "/produce?code=YRT6-72AS-K736-L4ee", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_add_number_price() {
    let (app, registry) = test_market();

    let payload = r#"{"name":"apple","code":"YRT6-72AS-K736-L4AR","price":12}"#;
    let (status, _) = send(&app, "POST", "/add", Some(payload.into())).await;
    assert_eq!(status, StatusCode::CREATED);

    let payload = r#"{"name":"pear","code":"YRT6-72AS-K736-L4AS","price":0.07}"#;
    let (status, _) = send(&app, "POST", "/add", Some(payload.into())).await;
    assert_eq!(status, StatusCode::CREATED);

    let prices: Vec<_> = registry
        .list()
        .iter()
        .map(|produce| produce.price().cents())
        .collect();
    assert_eq!(prices, vec![1200, 7]);
}

#[tokio::test]
async fn test_add() {
    let (app, registry) = test_market();

    let (status, _) = send(&app, "POST", "/add", Some(APPLE.into())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/add", Some(APPLE.into())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["errors"][0]["code"], "ENTRY_EXISTS");

    let stored = registry
        .get(&Code::parse("yrt6-72as-k736-l4ee").unwrap())
        .unwrap();
    assert_eq!(stored.name().as_str(), "apple");
    assert_eq!(stored.price().cents(), 1212);
}

#[tokio::test]
async fn test_add_invalid() {
    let (app, registry) = test_market();

    let cases = [
        (
            r#"{"name":"apple","code":"YRT6-72AS-K736-L4ee", "price":"12.123"}"#,
            "PRICE_INVALID",
        ),
        (
            r#"{"name":"apple","code":"YRT6-72AS-K736-L4eee", "price":"12.12"}"#,
            "CODE_INVALID",
        ),
        (
            r#"{"name":"apple--","code":"YRT6-72AS-K736-L4ee", "price":"12.12"}"#,
            "NAME_INVALID",
        ),
        (
            r#"{"name":"apple","code":"YRT6-72AS-K736-L4ee", "price":"0"}"#,
            "PRICE_INVALID",
        ),
        (
            r#"{"name":"apple","code":"YRT6-72AS-K736-L4ee", "price":-1}"#,
            "PRICE_INVALID",
        ),
        (
            r#"{"name":"apple","code":"YRT6-72AS-K736-L4ee", "price":0.000000001}"#,
            "PRICE_INVALID",
        ),
        (
            r#"{"name":"apple","code":"YRT6-72AS-K736-L4ee", "price":0.001}"#,
            "PRICE_INVALID",
        ),
        (
            r#"{"name":"apple","code":"YRT6-72AS-K736-L4ee", "price":12.1200000001}"#,
            "PRICE_INVALID",
        ),
        (
            r#"{"name":"apple--","code":"YRT6-72AS-K736-L4ee", "price":"12.12""#,
            "BAD_REQUEST",
        ),
        (r#"{"name":"apple","price":"12.12"}"#, "BAD_REQUEST"),
    ];

    for (payload, expected) in cases {
        let (status, body) = send(&app, "POST", "/add", Some(payload.into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["errors"][0]["code"], expected, "{payload}");
    }

    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_add_wrong_method() {
    let (app, _) = test_market();

    let (status, _) = send(&app, "GET", "/add", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_delete() {
    let (app, registry) = test_market();
    load(&registry, 10);

    let (status, _) = send(&app, "GET", "/delete?code=YRT6-72AS-K736-0001", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, body) = send(&app, "DELETE", "/delete?code=YRT6-72AS-K736-10000", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["errors"][0]["code"], "CODE_INVALID");

    let (status, _) = send(&app, "DELETE", "/delete", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "DELETE", "/delete?code=YRT6-72AS-K736-0001", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/delete?code=YRT6-72AS-K736-0001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["errors"][0]["code"], "ENTRY_UNKNOWN");

    assert_eq!(registry.len(), 9);
}

#[tokio::test]
async fn test_delete_repeated_code_uses_first() {
    let (app, registry) = test_market();
    load(&registry, 2);

    let uri = "/delete?code=YRT6-72AS-K736-0001&code=YRT6-72AS-K736-0000";
    let (status, _) = send(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let remaining: Vec<_> = registry
        .list()
        .iter()
        .map(|produce| produce.code().to_string())
        .collect();
    assert_eq!(remaining, vec!["yrt6-72as-k736-0000"]);

    let uri = "/produce?code=nope&code=YRT6-72AS-K736-0000";
    let (status, body) = send(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["errors"][0]["code"], "CODE_INVALID");
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_delete_case_insensitive() {
    let (app, registry) = test_market();

    let payload = r#"{"name":"apple","code":"yrt6-72as-k736-l4ar","price":"1"}"#;
    let (status, _) = send(&app, "POST", "/add", Some(payload.into())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "DELETE", "/delete?code=YRT6-72AS-K736-L4AR", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_fetch() {
    let (app, registry) = test_market();

    let (status, body) = send(&app, "GET", "/fetch", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"[]");

    load(&registry, 100);
    registry
        .delete(&Code::parse("YRT6-72AS-K736-0050").unwrap())
        .unwrap();

    let (status, body) = send(&app, "GET", "/fetch", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries: Vec<Produce> = serde_json::from_slice(&body).unwrap();
    assert_eq!(entries.len(), 99);
    assert_eq!(entries[0].code().as_str(), "yrt6-72as-k736-0000");
    assert_eq!(entries[0].name().as_str(), "apple");
    assert_eq!(entries[50].code().as_str(), "yrt6-72as-k736-0051");

    let raw: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        raw[0],
        serde_json::json!({"code": "yrt6-72as-k736-0000", "name": "apple", "price": "12.12"})
    );

    let (status, _) = send(&app, "POST", "/fetch", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_page_not_found() {
    let (app, _) = test_market();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["errors"][0]["code"], "PAGE_NOT_FOUND");

    let (status, _) = send(&app, "POST", "/nowhere", Some(APPLE.into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_add_and_delete() {
    let (app, registry) = test_market();
    let total = 2000;

    let tasks: Vec<_> = (0..total)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { send(&app, "POST", "/add", Some(payload(i))).await.0 })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }
    assert_eq!(registry.len(), total);

    let tasks: Vec<_> = (0..total)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let uri = format!("/delete?code=YRT6-72AS-K736-{i:04}");
                send(&app, "DELETE", &uri, None).await.0
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::NO_CONTENT);
    }
    assert!(registry.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_duplicates() {
    let (app, registry) = test_market();

    let tasks: Vec<_> = (0..200)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { send(&app, "POST", "/produce", Some(APPLE.into())).await.0 })
        })
        .collect();

    let mut created = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::CONFLICT),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(registry.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_load() {
    let (app, registry) = test_market();

    let tasks: Vec<_> = (0..100)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let mut code = format!("YRT6-72AS-K736-{i:04}");
                if i % 5 == 0 {
                    code = code.to_lowercase();
                } else if i % 3 == 0 {
                    code = code.to_uppercase();
                }

                let (status, _) = send(&app, "POST", "/produce", Some(payload(i))).await;
                assert_eq!(status, StatusCode::CREATED);

                let (status, _) = send(&app, "GET", "/produce", None).await;
                assert_eq!(status, StatusCode::OK);

                let uri = format!("/produce?code={code}");
                let (status, _) = send(&app, "DELETE", &uri, None).await;
                assert_eq!(status, StatusCode::NO_CONTENT);
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }
    assert!(registry.is_empty());
}
