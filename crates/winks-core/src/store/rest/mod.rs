//! Hosted links table over PostgREST (the Supabase REST API).
//!
//! Uses the curl crate (libcurl). Each call is a blocking transfer run on
//! tokio's blocking pool.

mod parse;

use anyhow::{Context, Result};
use std::time::Duration;

use super::{LinkRow, LinkStore};
use crate::config::RestEndpoint;
use crate::link_meta::{LinkId, LinkRecord};

use parse::{error_message, parse_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// One fully described HTTP call; built without I/O so it can be inspected.
#[derive(Debug, Clone)]
struct RestRequest {
    method: Method,
    url: String,
    headers: Vec<String>,
    body: Option<String>,
}

/// Client for a `links` table exposed by PostgREST.
#[derive(Debug, Clone)]
pub struct RestStore {
    endpoint: RestEndpoint,
}

impl RestStore {
    pub fn new(endpoint: RestEndpoint) -> Self {
        Self { endpoint }
    }

    fn table_url(&self, query: &str) -> String {
        format!(
            "{}/rest/v1/{}?{}",
            self.endpoint.url, self.endpoint.table, query
        )
    }

    fn request(&self, method: Method, query: &str, body: Option<String>) -> RestRequest {
        let key = &self.endpoint.anon_key;
        let mut headers = vec![
            format!("apikey: {key}"),
            format!("Authorization: Bearer {key}"),
            "Accept: application/json".to_string(),
        ];
        if body.is_some() {
            headers.push("Content-Type: application/json".to_string());
        }
        if matches!(method, Method::Post | Method::Patch) {
            headers.push("Prefer: return=representation".to_string());
        }
        RestRequest {
            method,
            url: self.table_url(query),
            headers,
            body,
        }
    }

    async fn send(&self, req: RestRequest) -> Result<String> {
        let what = format!("{} {}", req.method.as_str(), self.endpoint.table);
        tokio::task::spawn_blocking(move || perform(&req))
            .await
            .context("REST worker panicked")?
            .with_context(|| what)
    }
}

/// Runs the transfer on the current thread and returns the response body.
fn perform(req: &RestRequest) -> Result<String> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&req.url).context("invalid URL")?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;
    match req.method {
        Method::Get => easy.get(true)?,
        Method::Post => easy.post(true)?,
        Method::Patch | Method::Delete => easy.custom_request(req.method.as_str())?,
    }
    if let Some(payload) = &req.body {
        easy.post_fields_copy(payload.as_bytes())?;
    }

    let mut list = curl::easy::List::new();
    for h in &req.headers {
        list.append(h)?;
    }
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    let text = String::from_utf8_lossy(&body).into_owned();
    if !(200..300).contains(&code) {
        tracing::warn!(code, url = %req.url, "hosted store returned an error");
        anyhow::bail!("{}", error_message(code, &text));
    }
    Ok(text)
}

fn id_filter(id: LinkId) -> String {
    format!("id=eq.{id}")
}

impl LinkStore for RestStore {
    async fn fetch_all(&self) -> Result<Vec<LinkRecord>> {
        let req = self.request(Method::Get, "select=*&order=created_at.desc", None);
        parse_rows(&self.send(req).await?)
    }

    async fn insert(&self, row: &LinkRow) -> Result<LinkRecord> {
        let body = serde_json::to_string(&[row])?;
        let req = self.request(Method::Post, "select=*", Some(body));
        parse_rows(&self.send(req).await?)?
            .into_iter()
            .next()
            .context("insert returned no row")
    }

    async fn update(&self, id: LinkId, row: &LinkRow) -> Result<Option<LinkRecord>> {
        let body = serde_json::to_string(row)?;
        let req = self.request(Method::Patch, &format!("{}&select=*", id_filter(id)), Some(body));
        Ok(parse_rows(&self.send(req).await?)?.into_iter().next())
    }

    async fn update_meta(&self, id: LinkId, category: &str) -> Result<()> {
        let body = serde_json::json!({ "category": category }).to_string();
        let req = self.request(Method::Patch, &id_filter(id), Some(body));
        self.send(req).await?;
        Ok(())
    }

    async fn delete(&self, id: LinkId) -> Result<()> {
        let req = self.request(Method::Delete, &id_filter(id), None);
        self.send(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RestStore {
        RestStore::new(RestEndpoint {
            url: "https://xyz.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            table: "links".to_string(),
        })
    }

    #[test]
    fn list_request_orders_newest_first() {
        let req = store().request(Method::Get, "select=*&order=created_at.desc", None);
        assert_eq!(
            req.url,
            "https://xyz.supabase.co/rest/v1/links?select=*&order=created_at.desc"
        );
        assert!(req.headers.contains(&"apikey: anon".to_string()));
        assert!(req.headers.contains(&"Authorization: Bearer anon".to_string()));
        assert!(!req.headers.iter().any(|h| h.starts_with("Prefer")));
        assert!(req.body.is_none());
    }

    #[test]
    fn writes_ask_for_representation() {
        let req = store().request(Method::Patch, &id_filter(7), Some("{}".to_string()));
        assert_eq!(req.url, "https://xyz.supabase.co/rest/v1/links?id=eq.7");
        assert!(req
            .headers
            .contains(&"Prefer: return=representation".to_string()));
        assert!(req
            .headers
            .contains(&"Content-Type: application/json".to_string()));
    }

    #[test]
    fn delete_has_no_body_or_prefer() {
        let req = store().request(Method::Delete, &id_filter(3), None);
        assert_eq!(req.method.as_str(), "DELETE");
        assert!(req.body.is_none());
        assert!(!req.headers.iter().any(|h| h.starts_with("Prefer")));
    }

    #[test]
    fn insert_body_is_single_element_array() {
        let row = LinkRow {
            title: "Linear".to_string(),
            url: "https://linear.app".to_string(),
            category: "x".to_string(),
        };
        let body = serde_json::to_string(&[&row]).unwrap();
        assert_eq!(
            body,
            r#"[{"title":"Linear","url":"https://linear.app","category":"x"}]"#
        );
    }
}
