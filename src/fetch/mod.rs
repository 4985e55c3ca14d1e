mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, bail};
use reqwest::header::{ACCEPT, HeaderValue};

/// GETs `url` as JSON and returns the raw body.
///
/// # Errors
///
/// Transport failures, and any non-2xx status (reported with the body).
pub async fn fetch_json_bytes<C: HttpClient>(client: &C, url: reqwest::Url) -> Result<Vec<u8>> {
    let mut req = reqwest::Request::new(reqwest::Method::GET, url);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("API call failed with status {status}: {body}");
    }

    Ok(resp.bytes().await?.to_vec())
}
