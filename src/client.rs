use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use url::Url;

use crate::query::QueryParams;
use crate::tickets::{parse_reply, RawTicket, TicketsCollector};
use crate::{error::Error, Result, TrainFilter};

/// Address of the 12306 tickets query.
pub const QUERY_URL: &str = "https://kyfw.12306.cn/otn/lcxxcx/query";

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Settings of the connection to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    /// Address of the tickets query.
    pub endpoint: String,
    /// Skip the verification of the server certificate.
    pub insecure: bool,
    /// Time limit of the whole request, the client default if not set.
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            endpoint: QUERY_URL.to_string(),
            insecure: false,
            timeout: None,
        }
    }
}

/// The client gets the trains from the server.
#[derive(Debug, Clone, Default)]
pub struct TicketsClient {
    options: ClientOptions,
}

impl TicketsClient {
    /// Creates a client with the given settings.
    pub fn new(options: ClientOptions) -> Self {
        TicketsClient { options }
    }

    /// Returns the settings of the client.
    #[inline]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Takes the query parameters and makes a request to the server.
    ///
    /// # Errors
    ///
    /// The method fails if the server couldn't be reached
    /// or the reply isn't a list of trains.
    pub fn fetch(&self, params: &QueryParams) -> Result<Vec<RawTicket>> {
        let url = self.request_url(params)?;
        debug!("request: {}", url);

        let response = self.send_blocking_request(url)?;
        let body = response.text()?;
        trace!("reply: {}", body);

        parse_reply(&body)
    }

    /// Fetches the trains and collects them with the train types to show.
    pub fn query(&self, params: &QueryParams, filter: TrainFilter) -> Result<TicketsCollector> {
        let rows = self.fetch(params)?;
        Ok(TicketsCollector::new(rows, filter))
    }

    fn request_url(&self, params: &QueryParams) -> Result<Url> {
        Url::parse_with_params(&self.options.endpoint, params.pairs()).map_err(|e| {
            debug!("endpoint {}: {}", self.options.endpoint, e);
            Error::value_invalid("endpoint", "Query address is invalid")
        })
    }

    fn send_blocking_request(&self, url: Url) -> Result<Response> {
        let mut builder = Client::builder()
            .default_headers(request_headers_default())
            .danger_accept_invalid_certs(self.options.insecure);
        if self.options.insecure {
            warn!("server certificate is not verified");
        }
        if let Some(timeout) = self.options.timeout {
            builder = builder.timeout(timeout);
        }

        let result = builder.build()?.get(url).send()?;

        if !result.status().is_success() {
            error!("server returned {}", result.status());
            return Err(Error::resource_not_found("response", "No response"));
        }

        if let Some(0) = result.content_length() {
            warn!("response body is empty");
        }

        Ok(result)
    }
}

fn request_headers_default() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(APP_USER_AGENT));
    headers
}
