// ApiClient against a real socket: a scripted HTTP responder on
// 127.0.0.1 answers one connection per queued response and hands back the
// raw requests it received.

mod common;

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use common::init_test_logging;
use nomenclature_cli::{
    Action, ApiClient, CatalogApi, CatalogEntry, CatalogError, CatalogStore, Config,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

struct Responder {
    base_url: String,
    requests: JoinHandle<Vec<String>>,
}

impl Responder {
    /// Serve `responses` in order, one connection each.
    fn start(responses: Vec<(&'static str, &'static str)>) -> Self {
        init_test_logging();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = thread::spawn(move || {
            responses
                .into_iter()
                .map(|(status, body)| {
                    let (mut stream, _) = listener.accept().unwrap();
                    let request = read_request(&mut stream);
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(response.as_bytes()).unwrap();
                    request
                })
                .collect()
        });
        Responder { base_url, requests }
    }

    fn client(&self) -> ApiClient {
        let mut config = Config::default();
        config.set_base_url(&self.base_url).unwrap();
        config.timeout = Duration::from_secs(10);
        ApiClient::new(&config).unwrap()
    }

    fn finish(self) -> Vec<String> {
        self.requests.join().unwrap()
    }
}

/// Request head plus body, as received.
fn read_request(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request = String::new();
    let mut content_length = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap();
        }
        let end_of_head = line == "\r\n";
        request.push_str(&line);
        if end_of_head {
            break;
        }
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).unwrap();
    request.push_str(&String::from_utf8(body).unwrap());
    request
}

fn body_of(request: &str) -> serde_json::Value {
    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    serde_json::from_str(body).unwrap()
}

#[test]
fn fetch_maps_success_status_and_decode_failures() {
    let server = Responder::start(vec![
        (
            "200 OK",
            r#"[{"code":"11111","name":"Bolt"},{"code":"22222","name":"Nut"}]"#,
        ),
        ("500 Internal Server Error", "boom"),
        ("200 OK", "this is not json"),
    ]);
    let mut store = CatalogStore::new(server.client(), 5);

    assert_eq!(store.fetch_all().unwrap(), 2);
    assert_eq!(
        store.entries(),
        &[
            CatalogEntry::new("11111", "Bolt"),
            CatalogEntry::new("22222", "Nut"),
        ]
    );

    match store.fetch_all().unwrap_err() {
        CatalogError::Status {
            action,
            status,
            body,
        } => {
            assert_eq!(action, Action::Fetch);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status, got {other:?}"),
    }
    assert_eq!(store.entries().len(), 2);

    let err = store.fetch_all().unwrap_err();
    assert!(
        matches!(
            err,
            CatalogError::Request {
                action: Action::Fetch,
                ..
            }
        ),
        "{err:?}"
    );
    assert_eq!(store.entries().len(), 2);

    let requests = server.finish();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert!(request.starts_with("GET /api/nomenclature HTTP/1.1\r\n"), "{request}");
    }
}

#[test]
fn delete_targets_the_code_path() {
    let server = Responder::start(vec![("200 OK", "")]);
    let mut store = CatalogStore::new(server.client(), 5);

    store.on_delete_click("11111").unwrap();

    let requests = server.finish();
    assert!(
        requests[0].starts_with("DELETE /api/delete/11111 HTTP/1.1\r\n"),
        "{}",
        requests[0]
    );
}

#[test]
fn rejected_delete_keeps_the_server_message() {
    let server = Responder::start(vec![("404 Not Found", "no such code")]);
    let api = server.client();

    let err = api.delete("99999").unwrap_err();
    assert_eq!(
        err.to_string(),
        "deleting the entry failed: 404 Not Found - no such code"
    );
    server.finish();
}

#[test]
fn add_posts_the_entry_as_json() {
    let server = Responder::start(vec![("201 Created", "{}")]);
    let api = server.client();

    api.add(&CatalogEntry::new("12345", "Gear <small>")).unwrap();

    let requests = server.finish();
    assert!(requests[0].starts_with("POST /api/add HTTP/1.1\r\n"), "{}", requests[0]);
    assert_eq!(
        body_of(&requests[0]),
        serde_json::json!({"code": "12345", "name": "Gear <small>"})
    );
}

#[test]
fn import_posts_the_whole_list() {
    let server = Responder::start(vec![("200 OK", "")]);
    let api = server.client();

    api.import(&[
        CatalogEntry::new("111111", "Widget A"),
        CatalogEntry::new("222222", "Widget B"),
    ])
    .unwrap();

    let requests = server.finish();
    assert!(requests[0].starts_with("POST /api/import HTTP/1.1\r\n"), "{}", requests[0]);
    assert_eq!(
        body_of(&requests[0]),
        serde_json::json!([
            {"code": "111111", "name": "Widget A"},
            {"code": "222222", "name": "Widget B"},
        ])
    );
}
