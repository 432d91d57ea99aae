use reqwest::Client;
use serde_json::json;

use iclouder::api::{get_asset_urls, get_webstream};
use iclouder::error::RemoteError;

fn webstream_body() -> serde_json::Value {
    json!({
        "streamName": "Test Album",
        "userFirstName": "John",
        "userLastName": "Doe",
        "streamCtag": "12345",
        "itemsReturned": 2,
        "photos": [
            {
                "photoGuid": "photo123",
                "derivatives": {
                    "1": { "checksum": "abc123", "fileSize": 12345, "width": 800, "height": 600 },
                    "2": { "checksum": "def456", "fileSize": "54321", "width": "1600", "height": "1200" }
                },
                "caption": "Test image 1",
                "dateCreated": "2023-01-01",
                "width": 1600,
                "height": 1200
            },
            {
                "photoGuid": "photo456",
                "derivatives": {
                    "1": { "checksum": "ghi789", "fileSize": 23456, "width": 800, "height": 600 }
                }
            }
        ]
    })
}

#[tokio::test]
async fn webstream_parses_photos_and_metadata() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/webstream")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(webstream_body().to_string())
        .create_async()
        .await;

    let base_url = format!("{}/", server.url());
    let (photos, metadata) = get_webstream(&Client::new(), &base_url).await.unwrap();

    assert_eq!(metadata.stream_name, "Test Album");
    assert_eq!(metadata.user_first_name, "John");
    assert_eq!(metadata.stream_ctag, "12345");
    assert_eq!(metadata.items_returned, 2);

    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].photo_guid, "photo123");
    assert_eq!(photos[0].derivatives.len(), 2);
    // string-encoded numerics must parse too
    assert_eq!(photos[0].derivatives["2"].file_size, Some(54321));
    assert_eq!(photos[0].derivatives["2"].width, Some(1600));
    assert_eq!(photos[1].photo_guid, "photo456");
}

#[tokio::test]
async fn webstream_missing_photos_field_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/webstream")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "streamName": "No Photos Here" }).to_string())
        .create_async()
        .await;

    let base_url = format!("{}/", server.url());
    let err = get_webstream(&Client::new(), &base_url).await.unwrap_err();
    assert!(matches!(err, RemoteError::MissingField("photos")));
}

#[tokio::test]
async fn webstream_non_success_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/webstream")
        .with_status(500)
        .create_async()
        .await;

    let base_url = format!("{}/", server.url());
    let err = get_webstream(&Client::new(), &base_url).await.unwrap_err();
    assert!(matches!(
        err,
        RemoteError::Status {
            endpoint: "webstream",
            ..
        }
    ));
}

#[tokio::test]
async fn asset_urls_are_built_from_location_and_path() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "items": {
            "abc123": { "url_location": "cvws1.icloud.com", "url_path": "/a.jpg?x=1" },
            "def456": { "url_location": "cvws2.icloud.com", "url_path": "/b.jpg?x=2" },
            // malformed entry: must be skipped, not fail the call
            "ghi789": { "url_location": "" }
        }
    });
    let _m = server
        .mock("POST", "/webasseturls")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let base_url = format!("{}/", server.url());
    let guids = vec!["photo123".to_string(), "photo456".to_string()];
    let urls = get_asset_urls(&Client::new(), &base_url, &guids)
        .await
        .unwrap();

    assert_eq!(urls.len(), 2);
    assert_eq!(
        urls.get("abc123").map(String::as_str),
        Some("https://cvws1.icloud.com/a.jpg?x=1")
    );
    assert_eq!(
        urls.get("def456").map(String::as_str),
        Some("https://cvws2.icloud.com/b.jpg?x=2")
    );
}

#[tokio::test]
async fn asset_urls_empty_guid_list_skips_the_request() {
    let mut server = mockito::Server::new_async().await;
    // no mock registered: a request would fail the test via a connect error
    let base_url = format!("{}/", server.url());
    let urls = get_asset_urls(&Client::new(), &base_url, &[]).await.unwrap();
    assert!(urls.is_empty());
}
