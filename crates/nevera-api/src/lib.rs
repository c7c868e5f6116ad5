// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Blocking client for the inventory backend. The backend is a thin REST
//! layer over the managed database plus a product-lookup proxy; this client
//! treats both as opaque JSON and leaves date validation to `nevera-app`.

use anyhow::{Context, Result, anyhow, bail};
use nevera_app::model::{InventoryRecord, ItemPatch, NewItem, ProductCandidate};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    bearer_token: Option<String>,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        Url::parse(&base_url).with_context(|| format!("invalid api.base_url {base_url:?}"))?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            bearer_token: None,
            timeout,
            http,
        })
    }

    /// Attaches a session token to every request. Acquiring the token is the
    /// auth provider's business, not ours.
    pub fn with_bearer_token(mut self, token: &str) -> Self {
        if !token.trim().is_empty() {
            self.bearer_token = Some(token.trim().to_owned());
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches the full inventory of one refrigerator. The caller replaces
    /// its snapshot wholesale with the result.
    pub fn list_items(&self, refrigerator_id: &str) -> Result<Vec<InventoryRecord>> {
        let request = self
            .http
            .get(format!("{}/api/items", self.base_url))
            .query(&[("refrigerator_id", refrigerator_id)]);
        let response = self.send(request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        response.json().context("decode inventory list")
    }

    /// Free-text or barcode product lookup. The collaborator encodes "no
    /// results" as HTTP 404, which maps to an empty list here so the dedup
    /// path has one input shape.
    pub fn search_products(&self, query: &str) -> Result<Vec<ProductCandidate>> {
        let request = self
            .http
            .get(format!("{}/api/product", self.base_url))
            .query(&[("code", query)]);
        let response = self.send(request)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        response.json().context("decode product search results")
    }

    pub fn create_item(&self, item: &NewItem) -> Result<()> {
        item.validate()?;
        let request = self
            .http
            .post(format!("{}/api/items", self.base_url))
            .json(item);
        self.expect_success(request)
    }

    /// Partial update; only the fields present in the patch change.
    pub fn update_item(&self, id: &str, patch: &ItemPatch) -> Result<()> {
        if patch.is_empty() {
            bail!("item patch must set at least one field");
        }
        let request = self
            .http
            .patch(format!("{}/api/items/{id}", self.base_url))
            .json(patch);
        self.expect_success(request)
    }

    pub fn delete_item(&self, id: &str) -> Result<()> {
        let request = self.http.delete(format!("{}/api/items/{id}", self.base_url));
        self.expect_success(request)
    }

    fn expect_success(&self, request: RequestBuilder) -> Result<()> {
        let response = self.send(request)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }
        Ok(())
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request
            .send()
            .map_err(|error| connection_error(&self.base_url, error))
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach inventory backend at {} -- check api.base_url and that the backend is running ({} )",
        base_url,
        error
    )
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.is_empty()
    {
        return anyhow!("backend error ({}): {}", status.as_u16(), error);
    }

    if body.len() < 100 && !body.contains('{') {
        return anyhow!("backend error ({}): {}", status.as_u16(), body);
    }

    anyhow!("backend returned {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::Client;
    use std::time::Duration;

    #[test]
    fn base_url_trims_trailing_slashes() {
        let client = Client::new("http://localhost:3001///", Duration::from_secs(1))
            .expect("client should initialize");
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let error = Client::new("", Duration::from_secs(1)).expect_err("empty URL should fail");
        assert!(error.to_string().contains("must not be empty"));
    }

    #[test]
    fn schemeless_base_url_is_rejected() {
        let error = Client::new("not a url", Duration::from_secs(1))
            .expect_err("invalid URL should fail");
        assert!(error.to_string().contains("invalid api.base_url"));
    }

    #[test]
    fn blank_bearer_token_is_ignored() {
        let client = Client::new("http://localhost:3001", Duration::from_secs(1))
            .expect("client should initialize")
            .with_bearer_token("   ");
        assert!(client.bearer_token.is_none());
    }
}
