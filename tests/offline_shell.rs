mod common;

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use bytes::Bytes;
use serde_json::{json, Value};

use common::{request_log, spawn, spawn_proxy, temp_public_dir, test_config, RecordedRequest};

#[tokio::test]
async fn precached_shell_survives_backing_file_deletion() -> Result<(), Box<dyn std::error::Error>>
{
    let public = temp_public_dir(&[
        ("index.html", "<html>shell v1</html>"),
        ("manifest.json", "{\"name\":\"translator\"}"),
    ]);
    let (base, state) =
        spawn_proxy(test_config("http://bhashini-test.invalid", public.clone())).await;
    state.worker.install().await.expect("precache");

    std::fs::remove_file(public.join("index.html"))?;
    std::fs::remove_file(public.join("manifest.json"))?;

    let client = reqwest::Client::new();
    // `/` and `/index.html` are separate cache entries for the same file.
    for path in ["/", "/index.html"] {
        let resp = client.get(format!("{base}{path}")).send().await?;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(resp.text().await?, "<html>shell v1</html>");
    }
    let resp = client.get(format!("{base}/manifest.json")).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await?, "{\"name\":\"translator\"}");
    Ok(())
}

#[tokio::test]
async fn api_reads_always_go_to_the_origin() -> Result<(), Box<dyn std::error::Error>> {
    let public = temp_public_dir(&[
        ("index.html", "<html>shell</html>"),
        ("manifest.json", "{}"),
        ("api/echo", "v1"),
    ]);
    let (base, state) =
        spawn_proxy(test_config("http://bhashini-test.invalid", public.clone())).await;
    state.worker.install().await.expect("precache");

    let client = reqwest::Client::new();
    let resp = client.get(format!("{base}/api/echo")).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await?, "v1");

    // A cached copy would keep answering v1 here.
    std::fs::write(public.join("api/echo"), "v2")?;
    let resp = client.get(format!("{base}/api/echo")).send().await?;
    assert_eq!(resp.text().await?, "v2");
    Ok(())
}

#[tokio::test]
async fn mutating_requests_are_not_intercepted() -> Result<(), Box<dyn std::error::Error>> {
    let public = temp_public_dir(&[
        ("index.html", "<html>shell</html>"),
        ("manifest.json", "{}"),
    ]);
    let (base, state) = spawn_proxy(test_config("http://bhashini-test.invalid", public)).await;
    state.worker.install().await.expect("precache");

    let client = reqwest::Client::new();
    for method in [
        reqwest::Method::POST,
        reqwest::Method::PUT,
        reqwest::Method::DELETE,
    ] {
        let resp = client
            .request(method, format!("{base}/index.html"))
            .send()
            .await?;
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    }

    // Reads are unaffected.
    let resp = client.get(format!("{base}/index.html")).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn a_hit_serves_stale_and_refreshes_in_the_background(
) -> Result<(), Box<dyn std::error::Error>> {
    let public = temp_public_dir(&[
        ("index.html", "<html>shell</html>"),
        ("manifest.json", "{}"),
        ("app.css", "body { color: red }"),
    ]);
    let (base, _state) =
        spawn_proxy(test_config("http://bhashini-test.invalid", public.clone())).await;

    let client = reqwest::Client::new();
    // First read is a miss: fetched from disk and cached.
    let resp = client.get(format!("{base}/app.css")).send().await?;
    assert_eq!(resp.headers()["content-type"], "text/css");
    assert_eq!(resp.text().await?, "body { color: red }");

    std::fs::write(public.join("app.css"), "body { color: blue }")?;

    // The cached copy answers first...
    let resp = client.get(format!("{base}/app.css")).send().await?;
    assert_eq!(resp.text().await?, "body { color: red }");

    // ...and the background refresh replaces it shortly after.
    let mut latest = String::new();
    for _ in 0..100 {
        latest = client
            .get(format!("{base}/app.css"))
            .send()
            .await?
            .text()
            .await?;
        if latest == "body { color: blue }" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(latest, "body { color: blue }");
    Ok(())
}

#[tokio::test]
async fn api_routes_are_not_shadowed_by_the_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let log = request_log();
    let upstream = Router::new().route(
        "/v1/translate",
        post({
            let log = log.clone();
            move |headers: HeaderMap, body: Bytes| async move {
                log.lock().unwrap().push(RecordedRequest { headers, body });
                (StatusCode::IM_A_TEAPOT, "teapot")
            }
        }),
    );
    let upstream_url = spawn(upstream).await;
    let public = temp_public_dir(&[
        ("index.html", "<html>shell</html>"),
        ("manifest.json", "{}"),
    ]);
    let (base, state) = spawn_proxy(test_config(&upstream_url, public)).await;
    state.worker.install().await.expect("precache");

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/bhashini/translate"))
        .json(&json!({"q": "hello"}))
        .send()
        .await?;

    // The proxy handler answered (with the upstream's error), not the shell.
    assert_eq!(resp.status(), reqwest::StatusCode::IM_A_TEAPOT);
    let requests = log.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get("x-api-key").unwrap(), "test-key");
    let sent: Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(sent["inputText"], "hello");
    Ok(())
}
