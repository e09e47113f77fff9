//! End-to-end tests driving a live todos server over HTTP.

use reqwest::StatusCode;
use serde_json::json;
use tempfile::TempDir;
use todos_server::{ServerConfig, TaskList, TodoServer};

async fn start() -> TodoServer {
    TodoServer::start(ServerConfig::default()).await.unwrap()
}

async fn post(
    client: &reqwest::Client,
    server: &TodoServer,
    day: &str,
    task: &str,
    created: &str,
) {
    let resp = client
        .post(format!("{}/day/{}", server.url(), day))
        .json(&json!({ "Task": task, "Day": day, "Created": created }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

async fn get(client: &reqwest::Client, server: &TodoServer, path: &str) -> TaskList {
    let resp = client
        .get(format!("{}{}", server.url(), path))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/json");
    resp.json().await.unwrap()
}

mod routes {
    use super::*;

    #[tokio::test]
    async fn test_post_confirmation() {
        let server = start().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{}/day/mon", server.url()))
            .body(r#"{"Task":"milk cows","Created":"2026-10-12T06:00:00Z"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        assert_eq!(
            resp.text().await.unwrap(),
            "put todo for 1/2026-10-12T06:00:00.000000000Z: milk cows\n"
        );

        server.close().unwrap();
    }

    #[tokio::test]
    async fn test_post_ignores_payload_day() {
        let server = start().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{}/day/mon", server.url()))
            .body(r#"{"Task":"milk cows","Day":"Monday","Created":"2026-10-12T06:00:00Z"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.text().await.unwrap(),
            "put todo for 1/2026-10-12T06:00:00.000000000Z: milk cows\n"
        );

        let resp = client
            .post(format!("{}/day/mon", server.url()))
            .body(r#"{"task":"feed cows","Day":"","created":"2026-10-12T07:00:00Z"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.text().await.unwrap().starts_with("put todo for 1/"));

        let mon = get(&client, &server, "/day/mon").await;
        assert_eq!(mon.tasks, vec!["milk cows", "feed cows"]);

        server.close().unwrap();
    }

    #[tokio::test]
    async fn test_week_grouping() {
        let server = start().await;
        let client = reqwest::Client::new();

        let posts = [
            ("mon", "milk cows"),
            ("mon", "feed cows"),
            ("mon", "wash cows"),
            ("tue", "wash laundry"),
            ("wed", "flip burgers"),
            ("fri", "kill time"),
            ("sat", "have beer"),
            ("sun", "take aspirin"),
            ("sun", "pray quietly"),
        ];
        for (i, (day, task)) in posts.iter().enumerate() {
            let created = format!("2026-10-12T08:00:{:02}Z", i);
            post(&client, &server, day, task, &created).await;
        }

        let mon = get(&client, &server, "/day/mon").await;
        assert_eq!(mon.when, "mon");
        assert_eq!(mon.tasks, vec!["milk cows", "feed cows", "wash cows"]);

        let thu = get(&client, &server, "/day/thu").await;
        assert_eq!(thu.when, "thu");
        assert!(thu.tasks.is_empty());

        let weekdays = get(&client, &server, "/weekdays").await;
        assert_eq!(weekdays.when, "weekdays");
        assert_eq!(
            weekdays.tasks,
            vec![
                "milk cows",
                "feed cows",
                "wash cows",
                "wash laundry",
                "flip burgers",
                "kill time"
            ]
        );

        let weekend = get(&client, &server, "/weekend").await;
        assert_eq!(weekend.when, "weekend");
        assert_eq!(weekend.tasks, vec!["have beer", "take aspirin", "pray quietly"]);

        server.close().unwrap();
    }

    #[tokio::test]
    async fn test_empty_lists_are_arrays() {
        let server = start().await;

        let body = reqwest::get(format!("{}/weekend", server.url()))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value, json!({ "When": "weekend", "Tasks": [] }));

        server.close().unwrap();
    }
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn test_bad_payload_is_500() {
        let server = start().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{}/day/tue", server.url()))
            .body("not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let tue = get(&client, &server, "/day/tue").await;
        assert!(tue.tasks.is_empty());

        server.close().unwrap();
    }

    #[tokio::test]
    async fn test_unknown_day_is_404() {
        let server = start().await;
        let client = reqwest::Client::new();

        let resp = client
            .get(format!("{}/day/funday", server.url()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = client
            .post(format!("{}/day/funday", server.url()))
            .body(r#"{"Task":"nothing"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        server.close().unwrap();
    }

    #[tokio::test]
    async fn test_unknown_route_and_method() {
        let server = start().await;
        let client = reqwest::Client::new();

        let resp = client
            .get(format!("{}/month", server.url()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = client
            .post(format!("{}/weekend", server.url()))
            .body("{}")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET");

        let resp = client
            .delete(format!("{}/day/mon", server.url()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        server.close().unwrap();
    }
}

mod persistence {
    use super::*;

    #[tokio::test]
    async fn test_todos_survive_restart() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig {
            db_path: dir.path().join("todos.redb"),
            ..ServerConfig::default()
        };
        let client = reqwest::Client::new();

        let server = TodoServer::start(config.clone()).await.unwrap();
        post(&client, &server, "sat", "make merry", "2026-10-17T20:00:00Z").await;
        server.close().unwrap();
        server.closed().await;
        drop(server);

        let server = TodoServer::start(config).await.unwrap();
        let sat = get(&client, &server, "/day/sat").await;
        assert_eq!(sat.tasks, vec!["make merry"]);

        server.close().unwrap();
    }
}
