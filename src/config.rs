// src/config.rs

use clap::Parser;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::fetch::{RetryPolicy, DEFAULT_API_URL};

/// Geocode an address CSV through the BAN batch API.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// CSV with `adresse`, `commune` and `code_postal` columns
    #[arg(env = "GEOCODER_INPUT")]
    pub input: PathBuf,

    /// Where to write the geocoded CSV [default: <input>_geocoded.csv]
    #[arg(long, short, env = "GEOCODER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Delimiter tried first; `,` and tab are tried after it
    #[arg(long, short, env = "GEOCODER_DELIMITER", default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,

    #[arg(long, env = "GEOCODER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    #[arg(long, env = "GEOCODER_MAX_ATTEMPTS", default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Seconds to wait between attempts
    #[arg(long, env = "GEOCODER_BACKOFF_SECS", default_value_t = 5)]
    pub backoff_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "GEOCODER_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff: Duration::from_secs(self.backoff_secs),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `dir/EHPAD.csv` → `dir/EHPAD_geocoded.csv`
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_geocoded.csv", stem))
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("delimiter must be a single ASCII character, got {:?}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["adresse-geocoder", "data/EHPAD_OREUS.csv"]).unwrap();
        assert_eq!(args.delimiter, b';');
        assert_eq!(args.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(args.retry_policy(), RetryPolicy::default());
        assert_eq!(args.timeout(), Duration::from_secs(60));
        assert_eq!(
            args.output_path(),
            PathBuf::from("data/EHPAD_OREUS_geocoded.csv")
        );
    }

    #[test]
    fn explicit_flags() {
        let args = Args::try_parse_from([
            "adresse-geocoder",
            "in.csv",
            "--output",
            "out.csv",
            "--delimiter",
            "\\t",
            "--max-attempts",
            "5",
            "--backoff-secs",
            "1",
        ])
        .unwrap();
        assert_eq!(args.delimiter, b'\t');
        assert_eq!(args.output_path(), PathBuf::from("out.csv"));
        assert_eq!(args.retry_policy().max_attempts, 5);
        assert_eq!(args.retry_policy().backoff, Duration::from_secs(1));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["g", "in.csv", "--delimiter", ";;"]).is_err());
        assert!(Args::try_parse_from(["g", "in.csv", "--max-attempts", "0"]).is_err());
        assert!(Args::try_parse_from(["g", "in.csv", "--api-url", "not a url"]).is_err());
    }

    #[test]
    fn output_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("a.csv")),
            PathBuf::from("a_geocoded.csv")
        );
    }
}
