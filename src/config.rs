//! Endpoint configuration shared by the auth exchange and the API client.

// self
use crate::{_prelude::*, error::ConfigError};

/// Production base URL of the J-Quants API.
pub const DEFAULT_BASE_URL: &str = "https://api.jpx-jquants.com/v1";

/// Endpoint configuration; the base URL is parsed lazily so construction never fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	base_url: String,
}
impl Config {
	/// Creates a configuration pointing at the production API.
	pub fn new() -> Self {
		Self { base_url: DEFAULT_BASE_URL.into() }
	}

	/// Overrides the base URL (mock servers, staging).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();

		self
	}

	/// Parses the configured base URL.
	pub fn base_url(&self) -> Result<Url> {
		Url::parse(&self.base_url).map_err(|source| {
			ConfigError::InvalidBaseUrl { url: self.base_url.clone(), source }.into()
		})
	}

	/// Appends `segments` to the base path, keeping any prefix such as `/v1`.
	pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
		let mut url = self.base_url()?;

		url.path_segments_mut()
			.map_err(|_| ConfigError::OpaqueBaseUrl { url: self.base_url.clone() })?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}
}
impl Default for Config {
	fn default() -> Self {
		Self::new()
	}
}
