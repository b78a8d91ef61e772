//! Integration tests for wslurp against a local one-shot HTTP server

#[path = "common/mod.rs"]
mod common;
use common::{eval, fault_kind, Value};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serve a single request with the given status line and body.
/// Returns the base URL and the server thread.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        // Drain the request head
        let mut buf = [0u8; 4096];
        let mut request = Vec::new();
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    (url, handle)
}

#[test]
fn test_wslurp_returns_body() {
    let (url, server) = serve_once("200 OK", "(1 2 3)");
    let result = eval(&format!("(wslurp \"{}/data\")", url)).unwrap();
    assert_eq!(result, Value::string("(1 2 3)"));
    server.join().unwrap();
}

#[test]
fn test_wslurp_then_parse() {
    let (url, server) = serve_once("200 OK", "(list \"remote\" 7)");
    let result = eval(&format!("(eval (parse (wslurp \"{}/\")))", url)).unwrap();
    assert_eq!(
        result,
        Value::List(vec![Value::string("remote"), Value::Number(7.0)])
    );
    server.join().unwrap();
}

#[test]
fn test_wslurp_error_status_still_returns_body() {
    let (url, server) = serve_once("404 Not Found", "no such page");
    let result = eval(&format!("(wslurp \"{}/missing\")", url)).unwrap();
    assert_eq!(result, Value::string("no such page"));
    server.join().unwrap();
}

#[test]
fn test_wslurp_unreachable_names_url() {
    // Bind then drop so nothing listens on the port
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/gone", port);
    let fault = eval(&format!("(wslurp \"{}\")", url)).unwrap_err();
    assert_eq!(fault.kind(), "IOFailure");
    assert_eq!(fault.resource(), Some(url.as_str()));
    assert!(fault.to_string().contains(&url));
}

#[test]
fn test_wslurp_malformed_url() {
    assert_eq!(fault_kind("(wslurp \"not a url\")"), "IOFailure");
}

#[test]
fn test_wslurp_requires_string() {
    assert_eq!(fault_kind("(wslurp '(http example))"), "TypeMismatch");
}
