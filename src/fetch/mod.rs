// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::{
    blocking::{multipart, Client},
    StatusCode,
};
use std::{
    fs::File,
    io::Read,
    path::Path,
    time::Duration,
};
use tracing::debug;
use url::Url;

use crate::{HttpStatusError, REQUIRED_COLUMNS};

pub mod retry;

pub use retry::{upload_with_retry, RetryPolicy, UploadOutcome};

/// Public batch endpoint of the Base Adresse Nationale.
pub const DEFAULT_API_URL: &str = "https://api-adresse.data.gouv.fr/search/csv/";

/// Characters of a failed response body kept for diagnostics.
const ERROR_BODY_CHARS: usize = 300;

/// Sends one CSV and hands back the response body as a stream.
///
/// Every call must open `input` itself: a body consumed by one attempt
/// cannot be sent again.
pub trait Uploader {
    fn upload(&self, input: &Path) -> Result<Box<dyn Read>>;
}

/// Multipart uploader for the `search/csv` endpoint.
pub struct HttpUploader {
    client: Client,
    endpoint: Url,
}

impl HttpUploader {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, endpoint })
    }

    fn form(input: &Path) -> Result<multipart::Form> {
        let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
        let len = file.metadata()?.len();
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "data.csv".to_string());

        let data = multipart::Part::reader_with_length(file, len)
            .file_name(file_name)
            .mime_str("text/csv")?;

        Ok(REQUIRED_COLUMNS
            .iter()
            .fold(multipart::Form::new().part("data", data), |form, col| {
                form.text("columns", *col)
            }))
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, input: &Path) -> Result<Box<dyn Read>> {
        let form = Self::form(input)?;
        debug!(endpoint = %self.endpoint, "POST");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .with_context(|| format!("POST {}", self.endpoint))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let text = match resp.text() {
                Ok(text) => text,
                Err(e) => {
                    debug!(%status, error = %e, "could not read error body");
                    String::new()
                }
            };
            return Err(HttpStatusError {
                status,
                body: text.chars().take(ERROR_BODY_CHARS).collect(),
            }
            .into());
        }
        Ok(Box::new(resp))
    }
}
