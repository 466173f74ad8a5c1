// src/core/net.rs
//
// The portal conversation is a browser-like walk: GETs, form POSTs and a
// cookie jar carrying the session between them.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::CONTENT_TYPE;
use url::Url;
use url::form_urlencoded;

use crate::config::consts::USER_AGENT;
use crate::error::Result;

/// A fetched document and where it ended up after redirects.
#[derive(Clone, Debug)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

/// Everything the session needs from HTTP. The real client is
/// [`HttpTransport`]; tests script one in memory.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&mut self, url: Url) -> Result<Page>;

    /// POST an `application/x-www-form-urlencoded` body.
    async fn post_form(&mut self, url: Url, body: String) -> Result<Page>;

    /// Current value of a cookie the jar would send to `url`.
    fn cookie(&self, url: &Url, name: &str) -> Option<String>;
}

pub fn encode_form(fields: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(s!())
        .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let mut builder = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .user_agent(USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self { client: builder.build()?, jar })
    }

    async fn read(resp: reqwest::Response) -> Result<Page> {
        let resp = resp.error_for_status()?;
        let url = resp.url().clone();
        let body = resp.text().await?;
        logd!("url:{url}");
        Ok(Page { url, body })
    }
}

impl Transport for HttpTransport {
    async fn get(&mut self, url: Url) -> Result<Page> {
        let resp = self.client.get(url).send().await?;
        Self::read(resp).await
    }

    async fn post_form(&mut self, url: Url, body: String) -> Result<Page> {
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        Self::read(resp).await
    }

    fn cookie(&self, url: &Url, name: &str) -> Option<String> {
        let header = self.jar.cookies(url)?;
        cookie_value(header.to_str().ok()?, name)
    }
}

/// Pick `name` out of a `Cookie:` header value (`a=1; b=2`).
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|kv| kv.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| s!(v))
}
