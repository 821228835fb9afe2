mod common;

use anyhow::Result;
use reqwest::StatusCode;
use resource_api::auth::JwtKeys;
use uuid::Uuid;

use common::TestServer;

#[tokio::test]
async fn public_routes_need_no_token() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["resources"].as_array().map_or(false, |r| r.len() == 4), "banner: {}", body);

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn missing_token_is_unauthorized() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client.get(server.url("/todos/v1")).send().await?;
    let (status, body) = common::json(res).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn malformed_and_foreign_tokens_are_rejected() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.get("/records/v1", "not-a-jwt").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let foreign = JwtKeys::from_secret("some-other-secret", 1)?.generate(Uuid::new_v4())?;
    let res = server.get("/records/v1", &foreign).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .get(server.url("/records/v1"))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn valid_token_is_accepted() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.new_user()?;

    let (status, body) = common::json(server.get("/organisations/v1", &token).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn anonymous_access_is_unscoped_when_enabled() -> Result<()> {
    let server = TestServer::start_with(|c| c.security.allow_anonymous = true).await?;
    let (_, token) = server.new_user()?;

    let res = server
        .post("/records/v1", &token, &serde_json::json!({"title": "owned"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Internal callers see every owner's rows.
    let (status, body) = common::json(server.client.get(server.url("/records/v1")).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    // A bad token is still rejected.
    let res = server.get("/records/v1", "garbage").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
