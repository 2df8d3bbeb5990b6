use async_trait::async_trait;
use monitor_domain::Address;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER},
};
use serde_json::Value;

use super::shape::extract_transactions;
use crate::{ADDRESS_PLACEHOLDER, EndpointFailure};

/// One source of transaction history for an address.
///
/// Implementations report structural success (a transaction list, possibly
/// empty) or why the source could not be used; the probe tries them in order.
#[async_trait]
pub trait ActivityEndpoint: Send + Sync {
    /// Human-readable location for logs.
    fn describe(&self, address: &Address) -> String;

    async fn fetch_transactions(&self, address: &Address) -> Result<Vec<Value>, EndpointFailure>;
}

/// Explorer REST endpoint addressed by a URL template.
pub struct ExplorerEndpoint {
    client: Client,
    url_template: String,
    referer_template: String,
    origin: String,
    accept_language: String,
}

impl ExplorerEndpoint {
    pub fn new(
        client: Client,
        url_template: impl Into<String>,
        referer_template: impl Into<String>,
        origin: impl Into<String>,
        accept_language: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url_template: url_template.into(),
            referer_template: referer_template.into(),
            origin: origin.into(),
            accept_language: accept_language.into(),
        }
    }

    fn render(template: &str, address: &Address) -> String {
        template.replace(ADDRESS_PLACEHOLDER, &address.to_checksum(None))
    }
}

#[async_trait]
impl ActivityEndpoint for ExplorerEndpoint {
    fn describe(&self, address: &Address) -> String {
        Self::render(&self.url_template, address)
    }

    async fn fetch_transactions(&self, address: &Address) -> Result<Vec<Value>, EndpointFailure> {
        let url = Self::render(&self.url_template, address);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .header(REFERER, Self::render(&self.referer_template, address))
            .header(ORIGIN, &self.origin)
            .send()
            .await
            .map_err(|source| EndpointFailure::Transport {
                url: url.clone(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(EndpointFailure::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| EndpointFailure::Transport {
                url: url.clone(),
                source,
            })?;
        let body: Value = serde_json::from_slice(&body).map_err(|source| {
            EndpointFailure::InvalidJson {
                url: url.clone(),
                source,
            }
        })?;

        extract_transactions(&body)
            .map(<[Value]>::to_vec)
            .ok_or(EndpointFailure::UnrecognizedShape { url })
    }
}
