//! Minimal HTTP/1.1 server imitating a PostgREST `links` table for integration tests.
//!
//! Keeps rows in memory (newest first). Understands the subset of PostgREST the
//! client uses: `GET` list, `POST` insert of a one-row array, `PATCH` and
//! `DELETE` filtered by `id=eq.N`. `Prefer: return=representation` is assumed.

use serde_json::{json, Value};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Value>,
    next_id: i64,
    /// When set, every request is answered with 401 and a PostgREST error body.
    reject: bool,
}

/// Handle to a running server.
#[derive(Clone)]
pub struct RestServer {
    pub base_url: String,
    table: Arc<Mutex<Table>>,
}

impl RestServer {
    /// Rows as currently stored, newest first.
    pub fn rows(&self) -> Vec<Value> {
        self.table.lock().unwrap().rows.clone()
    }

    pub fn set_reject(&self, reject: bool) {
        self.table.lock().unwrap().reject = reject;
    }
}

/// Starts a server in a background thread seeded with `rows` (newest first,
/// each needs an `id`). The server runs until the process exits.
pub fn start(rows: Vec<Value>) -> RestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let next_id = rows
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let table = Arc::new(Mutex::new(Table {
        rows,
        next_id,
        reject: false,
    }));
    let shared = Arc::clone(&table);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let table = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &table));
        }
    });
    RestServer {
        base_url: format!("http://127.0.0.1:{port}"),
        table,
    }
}

struct Request {
    method: String,
    target: String,
    body: String,
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let mut lines = head.lines();
    let mut start = lines.next()?.split_whitespace();
    let method = start.next()?.to_string();
    let target = start.next()?.to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while data.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    let body = String::from_utf8_lossy(&data[header_end..]).into_owned();
    Some(Request {
        method,
        target,
        body,
    })
}

fn handle(mut stream: TcpStream, table: &Mutex<Table>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(req) = read_request(&mut stream) else {
        return;
    };
    let (status, body) = respond(&req, &mut table.lock().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}

/// `id=eq.N` from the query string.
fn id_filter(target: &str) -> Option<i64> {
    let query = target.split_once('?')?.1;
    query
        .split('&')
        .find_map(|kv| kv.strip_prefix("id=eq."))
        .and_then(|v| v.parse().ok())
}

fn respond(req: &Request, table: &mut Table) -> (&'static str, String) {
    if table.reject {
        let err = json!({"code": "42501", "message": "permission denied for table links", "details": null});
        return ("401 Unauthorized", err.to_string());
    }
    match req.method.as_str() {
        "GET" => ("200 OK", Value::Array(table.rows.clone()).to_string()),
        "POST" => {
            let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&req.body) else {
                return ("400 Bad Request", json!({"message": "expected array"}).to_string());
            };
            let mut inserted = Vec::new();
            for mut item in items {
                item["id"] = json!(table.next_id);
                table.next_id += 1;
                table.rows.insert(0, item.clone());
                inserted.push(item);
            }
            ("201 Created", Value::Array(inserted).to_string())
        }
        "PATCH" => {
            let Some(id) = id_filter(&req.target) else {
                return ("400 Bad Request", json!({"message": "missing filter"}).to_string());
            };
            let Ok(Value::Object(changes)) = serde_json::from_str::<Value>(&req.body) else {
                return ("400 Bad Request", json!({"message": "expected object"}).to_string());
            };
            let mut updated = Vec::new();
            for row in table.rows.iter_mut().filter(|r| r["id"] == id) {
                for (k, v) in &changes {
                    row[k.as_str()] = v.clone();
                }
                updated.push(row.clone());
            }
            ("200 OK", Value::Array(updated).to_string())
        }
        "DELETE" => {
            if let Some(id) = id_filter(&req.target) {
                table.rows.retain(|r| r["id"] != id);
            }
            ("204 No Content", String::new())
        }
        _ => ("405 Method Not Allowed", String::new()),
    }
}
