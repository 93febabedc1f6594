//! End-to-end tests against the server binary. They need PostgreSQL with
//! `sql/schema.sql` applied and DATABASE_URL set:
//!
//!     cargo test --test logos_api -- --ignored

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore]
async fn localized_logo_lifecycle() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let category = common::data(
        client
            .post(server.url("/api/categories?lang=ar"))
            .json(&json!({ "name": "تقنية", "name_en": "Tech", "slug": format!("tech-{}", uuid_suffix()) }))
            .send()
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    let category_id = category["id"].as_str().unwrap().to_string();
    assert_eq!(category["name"], "تقنية");

    // Arabic title written through the base name lands in title_ar
    let logo = common::data(
        client
            .post(server.url("/api/logos?lang=ar"))
            .json(&json!({
                "title": "شعار",
                "title_en": "Mark",
                "tags_en": ["bold"],
                "category_id": category_id,
                "canvas_width": 800,
                "canvas_height": 600,
                "background_color": "#FFFFFF",
            }))
            .send()
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    let logo_id = logo["id"].as_str().unwrap().to_string();
    assert_eq!(logo["title"], "شعار");
    assert_eq!(logo["direction"], "rtl");

    let english = common::data(
        client.get(server.url(&format!("/api/logos/{}", logo_id))).send().await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(english["title"], "Mark");
    assert_eq!(english["language"], "en");

    common::data(
        client
            .post(server.url(&format!("/api/logos/{}/layers", logo_id)))
            .json(&json!({
                "layer_type": "text",
                "z_index": 1,
                "properties": { "content_en": "Acme", "content_ar": "أكمي", "color": "#000000" }
            }))
            .send()
            .await?,
        StatusCode::CREATED,
    )
    .await?;

    let legacy = common::data(
        client.get(server.url(&format!("/api/logos/{}/legacy?lang=ar", logo_id))).send().await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(legacy["logoName"], "شعار");
    assert_eq!(legacy["keywords"], json!(["bold"]));
    assert_eq!(legacy["metadata"]["legacyFormat"], true);

    let mobile = common::data(
        client
            .get(server.url(&format!("/api/logos/{}/mobile-structured?lang=ar", logo_id)))
            .send()
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(mobile["document"]["layers"][0]["text"]["content"], "أكمي");
    assert_eq!(mobile["document"]["canvas"]["width"], 800);

    let listed = common::data(
        client
            .get(server.url(&format!("/api/categories/{}/logos", category_id)))
            .send()
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(listed["total"], 1);

    common::data(
        client.delete(server.url(&format!("/api/logos/{}", logo_id))).send().await?,
        StatusCode::OK,
    )
    .await?;
    let gone = client.get(server.url(&format!("/api/logos/{}/mobile", logo_id))).send().await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    common::data(
        client.delete(server.url(&format!("/api/categories/{}", category_id))).send().await?,
        StatusCode::OK,
    )
    .await?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn duplicate_user_email_is_a_conflict() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = format!("designer-{}@example.com", uuid_suffix());

    let user = common::data(
        client.post(server.url("/api/users")).json(&json!({ "email": email })).send().await?,
        StatusCode::CREATED,
    )
    .await?;

    let again = client.post(server.url("/api/users")).json(&json!({ "email": email })).send().await?;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let user_id = user["id"].as_str().unwrap();
    common::data(
        client.delete(server.url(&format!("/api/users/{}", user_id))).send().await?,
        StatusCode::OK,
    )
    .await?;
    Ok(())
}

fn uuid_suffix() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos().to_string())
        .unwrap_or_default()
}
