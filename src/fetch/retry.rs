// src/fetch/retry.rs

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
    time::Duration,
};
use tempfile::NamedTempFile;
use tracing::{error, info, instrument, warn};

use super::Uploader;
use crate::GeocodeError;

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF: Duration = Duration::from_secs(5);

/// How many times to try, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            backoff: BACKOFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOutcome {
    pub attempts: u32,
    pub bytes_written: u64,
}

/// Stream one response into a temp file beside `output`, then move it into place.
fn attempt<U: Uploader>(uploader: &U, input: &Path, output: &Path) -> Result<u64> {
    let mut body = uploader.upload(input)?;

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;

    let mut writer = BufWriter::new(tmp);
    let bytes = io::copy(&mut body, &mut writer).context("streaming response body")?;
    writer.flush()?;
    let tmp = writer.into_inner().map_err(|e| e.into_error())?;

    tmp.persist(output)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(bytes)
}

/// Upload `input` and save the response to `output`, retrying on any
/// failure with a fixed delay. `sleep` is called between attempts only.
///
/// `output` is only touched by a successful attempt.
#[instrument(level = "info", skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn upload_with_retry<U, S>(
    uploader: &U,
    input: &Path,
    output: &Path,
    policy: RetryPolicy,
    mut sleep: S,
) -> Result<UploadOutcome>
where
    U: Uploader,
    S: FnMut(Duration),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;
        info!(attempt = attempts, max_attempts, "sending to geocoding API");

        match attempt(uploader, input, output) {
            Ok(bytes_written) => {
                info!(bytes = bytes_written, path = %output.display(), "geocoding done");
                return Ok(UploadOutcome {
                    attempts,
                    bytes_written,
                });
            }
            Err(e) if attempts < max_attempts => {
                warn!(attempt = attempts, error = %format!("{:#}", e), "upload failed");
                info!(delay_s = policy.backoff.as_secs_f64(), "retrying");
                sleep(policy.backoff);
            }
            Err(e) => {
                error!(attempts, error = %format!("{:#}", e), "upload failed, giving up");
                return Err(GeocodeError::UploadExhausted {
                    attempts,
                    last_error: format!("{:#}", e),
                }
                .into());
            }
        }
    }
}
