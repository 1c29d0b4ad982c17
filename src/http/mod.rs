use std::io::Read;

use reqwest::blocking::{Client, Response};

use crate::errors::{PotdError, PotdResult};

/// Blocking GET access to the web, one request at a time.
#[cfg_attr(test, mockall::automock)]
pub trait HttpFetcher {
    /// Fetch a whole response body (pages and small JSON documents)
    fn fetch(&self, url: &str) -> PotdResult<Vec<u8>>;

    /// Start a download and hand back the body as a reader once the status is 2xx
    fn open(&self, url: &str) -> PotdResult<Box<dyn Read>>;
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str) -> PotdResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| PotdError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn get(&self, url: &str) -> PotdResult<Response> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PotdError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

impl HttpFetcher for ReqwestFetcher {
    fn fetch(&self, url: &str) -> PotdResult<Vec<u8>> {
        let bytes = self.get(url)?.bytes()?;
        Ok(bytes.to_vec())
    }

    fn open(&self, url: &str) -> PotdResult<Box<dyn Read>> {
        Ok(Box::new(self.get(url)?))
    }
}
