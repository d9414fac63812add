//! End-to-end tests over a real listener.

use std::time::Duration;

use tenant_edge::config::TenantConfig;
use tenant_edge::routing::DeploymentMode;

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_rewrite_is_invisible_to_client() {
    let server = common::start_server(TenantConfig::default()).await;

    let res = client()
        .get(format!("http://{}/dashboard", server.addr))
        .header("Host", "john.localhost:3000")
        .send()
        .await
        .expect("Edge unreachable");

    assert_eq!(res.status(), 200, "No redirect for tenant requests");
    assert_eq!(res.url().path(), "/dashboard");
    assert!(res.headers().get("location").is_none());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant"], "john");

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("Server did not stop");
    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn test_reload_over_channel() {
    let server = common::start_server(TenantConfig::default()).await;
    let url = format!("http://{}/dashboard", server.addr);

    let res = client().get(&url).header("Host", "acme.devbox").send().await.unwrap();
    assert_eq!(res.status(), 404);

    let mut new = TenantConfig::default();
    new.routing.deployment_mode = Some(DeploymentMode::Local);
    server.config_tx.send(new).unwrap();

    // The reload task applies updates asynchronously.
    let mut status = 0;
    for _ in 0..50 {
        status = client()
            .get(&url)
            .header("Host", "acme.devbox")
            .send()
            .await
            .unwrap()
            .status()
            .as_u16();
        if status == 200 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(status, 200);

    server.shutdown.trigger();
}
