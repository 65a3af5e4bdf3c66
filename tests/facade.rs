//! Facade calls against a mock Chronos server

use chronos_client::model::{GraphFormat, Job};
use chronos_client::{Chronos, ClientDefaults, SdkError, ServerResponse, TransportError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOUND: Duration = Duration::from_secs(4);

fn client() -> Chronos {
    Chronos::new(&ClientDefaults::default()).unwrap()
}

fn endpoint(server: &MockServer) -> (String, u16) {
    let addr = server.address();
    (addr.ip().to_string(), addr.port())
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong\n"))
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let mut ping = client().debug.ping(&host, port, false).unwrap();
    assert_eq!(ping.operation(), "debug.ping");
    assert!(ping.retrieve(BOUND).await.unwrap());
}

#[tokio::test]
async fn test_list_jobs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduler/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "first", "command": "true", "schedule": "R/2030-01-01T00:00:00Z/PT1H"},
            {"name": "second", "command": "true", "parents": ["first"]}
        ])))
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let jobs = client()
        .scheduler
        .jobs
        .list(&host, port, false)
        .unwrap()
        .retrieve(BOUND)
        .await
        .unwrap();

    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|job| !job.name.is_empty()));
    assert!(jobs[1].is_dependent());
}

#[tokio::test]
async fn test_search_jobs_sends_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduler/jobs/search"))
        .and(query_param("name", "nightly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "nightly"}])))
        .expect(1)
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let jobs = client()
        .scheduler
        .jobs
        .search(&host, port, false, "nightly")
        .unwrap()
        .retrieve(BOUND)
        .await
        .unwrap();
    assert_eq!(jobs[0].name, "nightly");
}

#[tokio::test]
async fn test_submit_routes_by_job_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scheduler/iso8601"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/scheduler/dependency"))
        .respond_with(ResponseTemplate::new(400).set_body_string("parent missing"))
        .expect(1)
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let chronos = client();

    let scheduled = Job::scheduled("parent", "true", "R/2030-01-01T00:00:00Z/PT1H");
    let ack = chronos
        .scheduler
        .jobs
        .submit(&host, port, false, &scheduled)
        .unwrap()
        .retrieve(BOUND)
        .await
        .unwrap();
    assert!(ack.is_success());

    // A rejected submit is a domain-level failure, not a transport error
    let dependent = Job::dependent("child", "true", vec!["ghost".to_string()]);
    let ack = chronos
        .scheduler
        .jobs
        .submit(&host, port, false, &dependent)
        .unwrap()
        .retrieve(BOUND)
        .await
        .unwrap();
    assert!(!ack.is_success());
    assert_eq!(ack.status, 400);
    assert_eq!(ack.body, "parent missing");
}

#[tokio::test]
async fn test_job_lifecycle_paths_are_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/scheduler/job/my%20job"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/scheduler/job/my%20job"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/scheduler/task/kill/my%20job"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let chronos = client();
    let jobs = &chronos.scheduler.jobs;

    assert!(jobs.start(&host, port, false, "my job").unwrap().retrieve(BOUND).await.unwrap().is_success());
    assert!(chronos
        .scheduler
        .tasks
        .kill_all(&host, port, false, "my job")
        .unwrap()
        .retrieve(BOUND)
        .await
        .unwrap()
        .is_success());
    assert!(jobs.delete(&host, port, false, "my job").unwrap().retrieve(BOUND).await.unwrap().is_success());
}

#[tokio::test]
async fn test_complete_task() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scheduler/task/ct:1:0:job"))
        .and(body_json(json!({"statusCode": 0})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let ack = client()
        .scheduler
        .tasks
        .complete(&host, port, false, "ct:1:0:job", 0)
        .unwrap()
        .retrieve(BOUND)
        .await
        .unwrap();
    assert_eq!(ack.operation, "tasks.complete");
    assert!(ack.is_success());
}

#[tokio::test]
async fn test_graphs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduler/graph/dot"))
        .respond_with(ResponseTemplate::new(200).set_body_string("digraph G { a -> b }"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scheduler/graph/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n"))
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let chronos = client();

    let dot = chronos.scheduler.graphs.dot(&host, port, false).unwrap().retrieve(BOUND).await.unwrap();
    assert_eq!(dot.format, GraphFormat::Dot);
    assert!(dot.body.contains("a -> b"));

    let csv = chronos.scheduler.graphs.csv(&host, port, false).unwrap().retrieve(BOUND).await.unwrap();
    assert_eq!(csv.csv_edges(), vec![("a", "b")]);
}

#[tokio::test]
async fn test_metrics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": "3.0.0",
            "gauges": {"jvm.threads.count": {"value": 42}},
            "counters": {},
            "timers": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scheduler/stats/99thPercentile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"jobNameLabel": "nightly", "time": 12.5}
        ])))
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let chronos = client();

    let metrics = chronos.metrics.full(&host, port, false).unwrap().retrieve(BOUND).await.unwrap();
    assert_eq!(metrics.version, "3.0.0");
    assert!(metrics.is_success());

    let stats = chronos
        .metrics
        .summary(&host, port, false, "99thPercentile")
        .unwrap()
        .retrieve(BOUND)
        .await
        .unwrap();
    assert_eq!(stats[0].job_name, "nightly");
}

#[tokio::test]
async fn test_read_errors_surface_on_retrieval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduler/jobs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    // Dispatch itself succeeds
    let mut jobs = client().scheduler.jobs.list(&host, port, false).unwrap();

    match jobs.retrieve(BOUND).await {
        Err(SdkError::RemoteCall { target, operation, cause }) => {
            assert_eq!(target.port(), port);
            assert_eq!(operation, "jobs.list");
            assert!(matches!(*cause, TransportError::UnexpectedStatus { status: 500, .. }));
        }
        other => panic!("expected remote call error, got {:?}", other.map(|jobs| jobs.len())),
    }
}

#[tokio::test]
async fn test_malformed_body_is_remote_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let err = client().metrics.full(&host, port, false).unwrap().retrieve(BOUND).await.unwrap_err();
    assert!(matches!(err, SdkError::RemoteCall { ref cause, .. } if matches!(**cause, TransportError::Json(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_remote_failure() {
    // Bind and drop to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = client().debug.ping("127.0.0.1", port, false).unwrap().retrieve(BOUND).await.unwrap_err();
    assert!(matches!(err, SdkError::RemoteCall { ref cause, .. } if matches!(**cause, TransportError::Http(_))));
}

#[tokio::test]
async fn test_retrieve_times_out_before_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong").set_delay(Duration::from_millis(1000)))
        .mount(&server)
        .await;

    let (host, port) = endpoint(&server);
    let mut ping = client().debug.ping(&host, port, false).unwrap();

    let err = ping.retrieve(Duration::from_millis(100)).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(ping.is_resolved());

    // A longer bound does not revive the abandoned call
    assert!(ping.retrieve(BOUND).await.unwrap_err().is_timeout());
}

#[tokio::test]
async fn test_truncated_acknowledgement_body_is_remote_failure() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        // Announce more body than is sent, then hang up
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 64\r\n\r\npartial")
            .await
            .unwrap();
    });

    let err = client()
        .scheduler
        .jobs
        .delete("127.0.0.1", port, false, "nightly")
        .unwrap()
        .retrieve(BOUND)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::RemoteCall { ref cause, .. } if matches!(**cause, TransportError::Http(_))));
}
