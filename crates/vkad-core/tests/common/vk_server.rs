//! Minimal HTTP/1.1 server imitating the photo API and its image CDN for integration tests.
//!
//! Serves `users.get`, `photos.getAlbums` and `photos.get` under `/method/`, and
//! photo bodies under `/photos/<id>.jpg`. Every response closes the connection.

use serde_json::{json, Value};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// Token the server rejects with error code 5.
pub const BAD_TOKEN: &str = "expired-token";

#[derive(Debug, Clone)]
pub struct FakeAlbum {
    pub title: Option<String>,
    pub photo_count: usize,
    /// Photo whose image URL answers 404.
    pub broken_photo: Option<i64>,
}

/// First photo id; ids are consecutive.
pub const FIRST_PHOTO_ID: i64 = 1000;

/// Body served for a photo at a given width.
pub fn photo_body(id: i64, width: u32) -> Vec<u8> {
    format!("jpeg:{}:{}", id, width).into_bytes()
}

/// Starts the server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345"). The server runs until the process exits.
pub fn start(album: FakeAlbum) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    let album = Arc::new(album);
    let base_for_thread = base.clone();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let album = Arc::clone(&album);
            let base = base_for_thread.clone();
            thread::spawn(move || handle(stream, &album, &base));
        }
    });
    base
}

fn handle(mut stream: std::net::TcpStream, album: &FakeAlbum, base: &str) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf);
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let url = url::Url::parse(&format!("{}{}", base, target)).expect("request target");

    let (status, content_type, body) = route(&url, album, base);
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
}

fn param(url: &url::Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

fn api_ok(response: Value) -> (&'static str, &'static str, Vec<u8>) {
    ("200 OK", "application/json", json!({ "response": response }).to_string().into_bytes())
}

fn api_err(code: i64, msg: &str) -> (&'static str, &'static str, Vec<u8>) {
    (
        "200 OK",
        "application/json",
        json!({ "error": { "error_code": code, "error_msg": msg } })
            .to_string()
            .into_bytes(),
    )
}

fn route(url: &url::Url, album: &FakeAlbum, base: &str) -> (&'static str, &'static str, Vec<u8>) {
    let path = url.path();
    if let Some(method) = path.strip_prefix("/method/") {
        if param(url, "access_token").as_deref() == Some(BAD_TOKEN) {
            return api_err(5, "User authorization failed: invalid access_token (4).");
        }
        return match method {
            "users.get" => api_ok(json!([{ "id": 1, "first_name": "Test", "last_name": "User" }])),
            "photos.getAlbums" => match &album.title {
                Some(title) => api_ok(json!({ "count": 1, "items": [{ "id": 2, "title": title }] })),
                None => api_err(200, "Access denied"),
            },
            "photos.get" => {
                let offset: usize = param(url, "offset").and_then(|v| v.parse().ok()).unwrap_or(0);
                let count: usize = param(url, "count").and_then(|v| v.parse().ok()).unwrap_or(50);
                let items: Vec<Value> = (offset..album.photo_count)
                    .take(count)
                    .map(|i| {
                        let id = FIRST_PHOTO_ID + i as i64;
                        json!({
                            "id": id,
                            "sizes": [
                                { "type": "s", "width": 75, "height": 50, "url": format!("{}/photos/{}.jpg?w=75", base, id) },
                                { "type": "z", "width": 1280, "height": 853, "url": format!("{}/photos/{}.jpg?w=1280", base, id) },
                                { "type": "x", "width": 604, "height": 402, "url": format!("{}/photos/{}.jpg?w=604", base, id) }
                            ]
                        })
                    })
                    .collect();
                api_ok(json!({ "count": album.photo_count, "items": items }))
            }
            _ => api_err(3, "Unknown method passed"),
        };
    }
    if let Some(name) = path.strip_prefix("/photos/") {
        let id: Option<i64> = name.strip_suffix(".jpg").and_then(|s| s.parse().ok());
        let width: u32 = param(url, "w").and_then(|v| v.parse().ok()).unwrap_or(0);
        return match id {
            Some(id) if album.broken_photo != Some(id) => ("200 OK", "image/jpeg", photo_body(id, width)),
            _ => ("404 Not Found", "text/plain", b"not found".to_vec()),
        };
    }
    ("404 Not Found", "text/plain", b"not found".to_vec())
}
