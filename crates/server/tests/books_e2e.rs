use std::net::SocketAddr;

use configs::DatabaseConfig;
use reqwest::{header, StatusCode};
use serde_json::{json, Value};
use service::books::ConnectionManager;
use tokio::net::TcpListener;

use server::routes;

const JSON_UTF8: &str = "application/json; charset=utf-8";

struct TestApp {
    base_url: String,
}

/// Book service on an ephemeral port over a private in-memory store.
async fn start_server() -> anyhow::Result<TestApp> {
    let manager = ConnectionManager::connect(&DatabaseConfig::sqlite_memory()).await?;
    manager.ensure_index().await?;
    serve(manager).await
}

async fn serve(manager: ConnectionManager) -> anyhow::Result<TestApp> {
    let app = routes::build_books_router(manager);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn book(isbn: &str, title: &str) -> Value {
    json!({ "isbn": isbn, "title": title, "authors": ["X", "Y"], "price": "9.99" })
}

impl TestApp {
    async fn create(&self, c: &reqwest::Client, body: &Value) -> anyhow::Result<reqwest::Response> {
        Ok(c.put(format!("{}/books", self.base_url)).json(body).send().await?)
    }

    async fn list_len(&self, c: &reqwest::Client) -> anyhow::Result<usize> {
        let res = c.get(format!("{}/books", self.base_url)).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body = res.json::<Vec<Value>>().await?;
        Ok(body.len())
    }
}

async fn message(res: reqwest::Response) -> anyhow::Result<String> {
    let v = res.json::<Value>().await?;
    Ok(v["message"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn e2e_create_get_delete_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = app
        .create(&c, &json!({ "isbn": "111", "title": "A", "authors": ["X"], "price": "9.99" }))
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()[header::LOCATION], "/books/111");
    assert_eq!(res.headers()[header::CONTENT_TYPE], JSON_UTF8);
    assert!(res.bytes().await?.is_empty());

    let res = c.get(format!("{}/books/111", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], JSON_UTF8);
    let text = res.text().await?;
    assert!(text.contains("\n  \"isbn\""), "expected indented JSON, got {text}");
    let body: Value = serde_json::from_str(&text)?;
    assert_eq!(body, json!({ "isbn": "111", "title": "A", "authors": ["X"], "price": "9.99" }));

    let res = c.delete(format!("{}/books/111", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = c.get(format!("{}/books/111", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()[header::CONTENT_TYPE], JSON_UTF8);
    assert_eq!(message(res).await?, "book not found");
    Ok(())
}

#[tokio::test]
async fn e2e_list_tracks_store_size() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/books", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?.trim(), "[]");

    for i in 0..3 {
        let res = app.create(&c, &book(&format!("isbn-{i}"), "t")).await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
    assert_eq!(app.list_len(&c).await?, 3);
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_isbn_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    assert_eq!(app.create(&c, &book("222", "first")).await?.status(), StatusCode::CREATED);
    let res = app.create(&c, &book("222", "second")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(res).await?, "a book with this ISBN already exists in the database");

    assert_eq!(app.list_len(&c).await?, 1);
    let res = c.get(format!("{}/books/222", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?["title"], "first");
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_body_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.put(format!("{}/books", app.base_url)).body("{not json").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(res).await?, "incorrect body");

    let res = c.put(format!("{}/books/111", app.base_url)).body("[1, 2").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.list_len(&c).await?, 0);
    Ok(())
}

#[tokio::test]
async fn e2e_body_without_content_type_is_accepted() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .put(format!("{}/books", app.base_url))
        .body(book("333", "plain").to_string())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn e2e_update_replaces_whole_document() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.put(format!("{}/books/444", app.base_url)).json(&book("444", "ghost")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.list_len(&c).await?, 0);

    app.create(&c, &book("444", "old")).await?;
    let res = c
        .put(format!("{}/books/444", app.base_url))
        .json(&json!({ "isbn": "444", "title": "new" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let got = c.get(format!("{}/books/444", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(got, json!({ "isbn": "444", "title": "new", "authors": [], "price": "" }));
    Ok(())
}

#[tokio::test]
async fn e2e_update_key_comes_from_body() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    app.create(&c, &book("555", "moving")).await?;
    let res = c.put(format!("{}/books/555", app.base_url)).json(&book("556", "moved")).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = c.get(format!("{}/books/555", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = c.get(format!("{}/books/556", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_update_onto_taken_isbn_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    app.create(&c, &book("666", "a")).await?;
    app.create(&c, &book("667", "b")).await?;
    let res = c.put(format!("{}/books/666", app.base_url)).json(&book("667", "clash")).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "database error" }));
    assert_eq!(app.list_len(&c).await?, 2);

    let res = c.get(format!("{}/books/666", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?["title"], "a");
    Ok(())
}

#[tokio::test]
async fn e2e_delete_missing_is_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    app.create(&c, &book("777", "stays")).await?;
    let res = c.delete(format!("{}/books/000", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(message(res).await?, "book not found");
    assert_eq!(app.list_len(&c).await?, 1);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_method_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/books", app.base_url)).json(&book("888", "x")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[header::CONTENT_TYPE], JSON_UTF8);
    assert_eq!(message(res).await?, "method not allowed");

    let res = c.patch(format!("{}/books/888", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[header::CONTENT_TYPE], JSON_UTF8);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_path_is_json_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    for path in ["/", "/authors", "/books/111/reviews"] {
        let res = c.get(format!("{}{}", app.base_url, path)).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(res.headers()[header::CONTENT_TYPE], JSON_UTF8);
        assert_eq!(message(res).await?, "not found");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_store_failure_is_generic_500() -> anyhow::Result<()> {
    let manager = ConnectionManager::connect(&DatabaseConfig::sqlite_memory()).await?;
    manager.ensure_index().await?;
    let app = serve(manager.clone()).await?;
    manager.close().await?;
    let c = reqwest::Client::new();

    let requests = [
        c.get(format!("{}/books", app.base_url)),
        c.put(format!("{}/books", app.base_url)).json(&book("111", "t")),
        c.get(format!("{}/books/111", app.base_url)),
        c.put(format!("{}/books/111", app.base_url)).json(&book("111", "t")),
        c.delete(format!("{}/books/111", app.base_url)),
    ];
    for req in requests {
        let res = req.send().await?;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()[header::CONTENT_TYPE], JSON_UTF8);
        assert_eq!(res.text().await?, r#"{"message":"database error"}"#);
    }
    Ok(())
}
