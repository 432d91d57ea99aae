use reqwest::Client;
use serde_json::json;

use iclouder::redirect::redirected_base_url;

#[tokio::test]
async fn status_330_rebuilds_the_base_url_around_the_new_host() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/webstream")
        .with_status(330)
        .with_header("content-type", "application/json")
        .with_body(json!({ "X-Apple-MMe-Host": "p42-sharedstreams.icloud.com" }).to_string())
        .create_async()
        .await;

    let base_url = format!("{}/", server.url());
    let redirected = redirected_base_url(&Client::new(), &base_url, "sometoken")
        .await
        .unwrap();
    assert_eq!(
        redirected,
        "https://p42-sharedstreams.icloud.com/sometoken/sharedstreams/"
    );
}

#[tokio::test]
async fn non_redirect_response_keeps_the_original_url() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/webstream")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let base_url = format!("{}/", server.url());
    let redirected = redirected_base_url(&Client::new(), &base_url, "sometoken")
        .await
        .unwrap();
    assert_eq!(redirected, base_url);
}

#[tokio::test]
async fn status_330_without_host_field_keeps_the_original_url() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/webstream")
        .with_status(330)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let base_url = format!("{}/", server.url());
    let redirected = redirected_base_url(&Client::new(), &base_url, "sometoken")
        .await
        .unwrap();
    assert_eq!(redirected, base_url);
}
