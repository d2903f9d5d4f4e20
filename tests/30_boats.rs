mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, StatusCode},
};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn create_and_fetch_boat() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("alice");

    let res = app
        .json(
            Method::POST,
            "/boats",
            Some(&token),
            json!({ "name": "Sea Witch", "type": "Catamaran", "length": 28 }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED, "unexpected body: {}", res.body);

    let id = res.body["id"].as_str().unwrap_or_default().to_string();
    let self_link = format!("http://boats.test/boats/{}", id);
    assert_eq!(res.body["owner"], "alice");
    assert_eq!(res.body["type"], "Catamaran");
    assert_eq!(res.body["loads"], json!([]));
    assert_eq!(res.body["self"], self_link);
    assert_eq!(res.header(header::LOCATION), Some(self_link.as_str()));

    let fetched = app.get(&format!("/boats/{}", id), Some(&token)).await?;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, res.body);

    Ok(())
}

#[tokio::test]
async fn create_rejects_bad_payloads() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("alice");

    let missing = app
        .json(Method::POST, "/boats", Some(&token), json!({ "name": "Sea Witch" }))
        .await?;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["code"], "VALIDATION_ERROR");
    assert!(missing.body["field_errors"]["length"].is_string());

    let with_id = app
        .json(
            Method::POST,
            "/boats",
            Some(&token),
            json!({ "id": "mine", "name": "Sea Witch", "type": "Catamaran", "length": 28 }),
        )
        .await?;
    assert_eq!(with_id.status, StatusCode::BAD_REQUEST);

    let wrong_type = app
        .json(
            Method::POST,
            "/boats",
            Some(&token),
            json!({ "name": "Sea Witch", "type": "Catamaran", "length": "long" }),
        )
        .await?;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);

    let malformed = TestApp::request(Method::POST, "/boats", Some(&token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))?;
    let res = app.send(malformed).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "INVALID_JSON");

    Ok(())
}

#[tokio::test]
async fn enforces_media_types() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("alice");

    let plain = TestApp::request(Method::POST, "/boats", Some(&token))
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Sea Witch"))?;
    assert_eq!(app.send(plain).await?.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let html_only = axum::http::Request::builder()
        .uri("/boats")
        .header(header::HOST, common::HOST)
        .header(header::ACCEPT, "text/html")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())?;
    let res = app.send(html_only).await?;
    assert_eq!(res.status, StatusCode::NOT_ACCEPTABLE);

    Ok(())
}

#[tokio::test]
async fn boats_are_private_to_their_owner() -> Result<()> {
    let app = TestApp::new();
    let alice = app.token("alice");
    let bob = app.token("bob");
    let id = app.create_boat(&alice, "Sea Witch").await?;

    let res = app.get(&format!("/boats/{}", id), Some(&bob)).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .json(Method::PATCH, &format!("/boats/{}", id), Some(&bob), json!({ "name": "Mine now" }))
        .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app.call(Method::DELETE, &format!("/boats/{}", id), Some(&bob)).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let listing = app.get("/boats", Some(&bob)).await?;
    assert_eq!(listing.body["total_items"], 0);

    let res = app.get("/boats/no-such-boat", Some(&alice)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn lists_owner_boats_five_at_a_time() -> Result<()> {
    let app = TestApp::new();
    let alice = app.token("alice");
    for i in 0..7 {
        app.create_boat(&alice, &format!("Boat {}", i)).await?;
    }
    app.create_boat(&app.token("bob"), "Not Alice's").await?;

    let first = app.get("/boats", Some(&alice)).await?;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["total_items"], 7);
    assert_eq!(first.body["boats"].as_array().map(Vec::len), Some(5));
    assert_eq!(first.body["boats"][0]["name"], "Boat 0");
    assert_eq!(first.body["next"], "http://boats.test/boats?offset=5");

    let second = app.get("/boats?offset=5", Some(&alice)).await?;
    assert_eq!(second.body["boats"].as_array().map(Vec::len), Some(2));
    assert_eq!(second.body["boats"][1]["name"], "Boat 6");
    assert!(second.body.get("next").is_none());

    let bad = app.get("/boats?offset=-1", Some(&alice)).await?;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn put_replaces_and_patch_merges() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("alice");
    let id = app.create_boat(&token, "Sea Witch").await?;
    let path = format!("/boats/{}", id);

    let partial_put = app
        .json(Method::PUT, &path, Some(&token), json!({ "name": "Only a name" }))
        .await?;
    assert_eq!(partial_put.status, StatusCode::BAD_REQUEST);

    let put = app
        .json(
            Method::PUT,
            &path,
            Some(&token),
            json!({ "name": "Odyssey", "type": "Yacht", "length": 99 }),
        )
        .await?;
    assert_eq!(put.status, StatusCode::OK);
    assert_eq!(put.body["name"], "Odyssey");
    assert_eq!(put.body["length"], 99);

    let patch = app
        .json(Method::PATCH, &path, Some(&token), json!({ "length": 100 }))
        .await?;
    assert_eq!(patch.status, StatusCode::OK);
    assert_eq!(patch.body["name"], "Odyssey");
    assert_eq!(patch.body["type"], "Yacht");
    assert_eq!(patch.body["length"], 100);

    let owner_change = app
        .json(Method::PATCH, &path, Some(&token), json!({ "owner": "bob" }))
        .await?;
    assert_eq!(owner_change.status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn delete_then_gone() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("alice");
    let id = app.create_boat(&token, "Sea Witch").await?;
    let path = format!("/boats/{}", id);

    let res = app.call(Method::DELETE, &path, Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_null());

    assert_eq!(app.get(&path, Some(&token)).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.call(Method::DELETE, &path, Some(&token)).await?.status,
        StatusCode::NOT_FOUND
    );

    Ok(())
}

#[tokio::test]
async fn collection_rejects_bulk_writes() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("alice");

    for method in [Method::PUT, Method::PATCH, Method::DELETE] {
        let res = app.call(method.clone(), "/boats", Some(&token)).await?;
        assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED, "{} /boats", method);
        assert_eq!(res.header(header::ALLOW), Some("GET, POST"));
    }

    Ok(())
}

#[tokio::test]
async fn malformed_boat_id_checks_token_then_answers_json_404() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("alice");

    let res = app.get("/boats/%FF", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.get("/boats/%FF", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "NOT_FOUND");

    let res = app.call(Method::PUT, "/boats/%FF/loads/%FE", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], true);

    let res = app.get("/boats?offset=1&offset=2", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "BAD_REQUEST");

    Ok(())
}
