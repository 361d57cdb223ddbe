// tests/provider_http.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::collections::HashMap;
use std::error::Error;
use std::net::SocketAddr;

use amplify_dash::errors::AmplifyError;
use amplify_dash::provider::{DataProvider, ListPage, ListParams, ReqwestTransport};
use amplify_dash::types::Sort;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value, json};

type TestResult = Result<(), Box<dyn Error>>;

async fn list_jobs(
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let accept = headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({
        "data": [
            { "id": "job-1", "query": query, "accept": accept },
            { "id": "job-2" },
            { "id": "job-3" },
        ],
        "meta": { "count": 37, "totalPages": 13 },
    }))
}

async fn get_job(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "title": "Could not get job",
                "detail": "job missing not found",
                "status": "404",
            })),
        );
    }
    (StatusCode::OK, Json(json!({ "data": { "id": id, "image": "busybox" } })))
}

async fn put_queue_item(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "data": {
            "id": id,
            "body_id": body["data"]["id"],
            "cid": body["data"]["attributes"]["cid"],
        }
    }))
}

async fn broken() -> &'static str {
    "<html>not json</html>"
}

async fn spawn_server() -> Result<SocketAddr, Box<dyn Error>> {
    let app = Router::new()
        .route("/api/v0/jobs", get(list_jobs))
        .route("/api/v0/jobs/{id}", get(get_job))
        .route("/api/v0/queue/{id}", axum::routing::put(put_queue_item))
        .route("/api/v0/broken", get(broken));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

fn provider_for(addr: SocketAddr) -> Result<DataProvider<ReqwestTransport>, Box<dyn Error>> {
    let transport = ReqwestTransport::new(None)?;
    Ok(DataProvider::new(format!("http://{addr}/api/v0"), transport))
}

#[tokio::test]
async fn list_round_trip_over_http() -> TestResult {
    with_timeout(async {
        init_tracing();
        let addr = spawn_server().await?;
        let provider = provider_for(addr)?;

        let params = ListParams::new(2, 3)
            .with_filter("status", "done")
            .with_sort(Sort::desc("created_at"));
        let page: ListPage<Value> = provider.list("jobs", &params).await?;

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 37);
        assert_eq!(page.total_pages, Some(13));

        let first = &page.items[0];
        assert_eq!(first["accept"], "application/json");
        let query = &first["query"];
        assert_eq!(query["page[number]"], "2");
        assert_eq!(query["page[size]"], "3");
        assert_eq!(query["filter[status]"], "done");
        assert_eq!(query["sort"], "-created_at");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn get_and_create_over_http() -> TestResult {
    with_timeout(async {
        let addr = spawn_server().await?;
        let provider = provider_for(addr)?;

        let job: Value = provider.get("jobs", "bart").await?;
        assert_eq!(job, json!({ "id": "bart", "image": "busybox" }));

        let mut attributes = Map::new();
        attributes.insert("cid".to_string(), json!("bafy"));
        let created: Value = provider.create("queue", attributes).await?;
        assert_eq!(created["id"], created["body_id"]);
        assert_eq!(created["cid"], "bafy");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn error_status_and_detail_are_propagated() -> TestResult {
    with_timeout(async {
        let addr = spawn_server().await?;
        let provider = provider_for(addr)?;

        let err = provider.get::<Value>("jobs", "missing").await.unwrap_err();
        match err {
            AmplifyError::Http { status, message } => {
                assert_eq!(status, Some(404));
                assert_eq!(message, "job missing not found");
            }
            other => panic!("expected Http error, got {other:?}"),
        }

        let err = provider.get::<Value>("nowhere", "x").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Not Found"), "{err}");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn non_json_body_is_reported_as_malformed() -> TestResult {
    with_timeout(async {
        let addr = spawn_server().await?;
        let provider = provider_for(addr)?;

        let err = provider
            .list::<Value>("broken", &ListParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().contains("malformed response body"), "{err}");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn connection_failure_has_no_status() -> TestResult {
    with_timeout(async {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let provider = provider_for(addr)?;
        let err = provider
            .list::<Value>("jobs", &ListParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AmplifyError::Http { status: None, .. }), "{err:?}");
        Ok(())
    })
    .await
}
