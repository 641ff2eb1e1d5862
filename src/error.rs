//! Client-wide error types shared by token sources, transports, and API calls.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A fixed token source was asked for an ID token it never received.
	#[error("ID token is not set.")]
	TokenNotSet,
	/// A refreshing token source has no refresh token to exchange.
	#[error("Refresh token is not set.")]
	RefreshTokenNotSet,
	/// The auth endpoint answered but reported a failure, or its body could not be decoded.
	#[error("Authentication exchange failed: {message}.")]
	AuthExchangeFailed {
		/// Service-supplied message, or a description of the decoding failure.
		message: String,
	},
	/// A data endpoint answered with a non-empty `message` field.
	#[error("API request failed: {message}.")]
	Api {
		/// Service-supplied message.
		message: String,
		/// HTTP status code of the response.
		status: Option<u16>,
	},
	/// A data endpoint returned a body that does not match the documented schema.
	#[error("API response could not be decoded.")]
	Decode {
		/// Structured decoding failure, including the path to the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: Option<u16>,
	},
}
impl Error {
	/// Builds an [`Error::AuthExchangeFailed`] from any message.
	pub fn auth_exchange_failed(message: impl Into<String>) -> Self {
		Self::AuthExchangeFailed { message: message.into() }
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying builder failure.
		#[source]
		source: BoxError,
	},
	/// Configured base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Configured base URL cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL `{url}` cannot be extended with path segments.")]
	OpaqueBaseUrl {
		/// Raw URL string.
		url: String,
	},
	/// ID token contains bytes that are not allowed in an HTTP header.
	#[error("ID token cannot be encoded as an Authorization header.")]
	InvalidAuthorizationHeader(#[from] reqwest::header::InvalidHeaderValue),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
	/// Credential file exists but could not be read.
	#[error("Credential file `{path}` could not be read.")]
	CredentialRead {
		/// Offending path.
		path: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Credential file is not valid TOML or has an unexpected shape.
	#[error("Credential file `{path}` is malformed.")]
	CredentialParse {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: toml::de::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the J-Quants API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the J-Quants API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
impl From<ReqwestError> for Error {
	fn from(e: ReqwestError) -> Self {
		TransportError::from(e).into()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn auth_exchange_failure_keeps_service_message() {
		let err = Error::auth_exchange_failed("invalid refresh token");

		assert!(
			matches!(&err, Error::AuthExchangeFailed { message } if message == "invalid refresh token")
		);
		assert_eq!(err.to_string(), "Authentication exchange failed: invalid refresh token.");
	}

	#[test]
	fn transport_errors_wrap_io_failures() {
		let err: Error =
			TransportError::from(std::io::Error::other("connection reset by peer")).into();

		assert!(matches!(err, Error::Transport(TransportError::Io(_))));
		assert!(err.source().is_some());
	}
}
