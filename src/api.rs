//! Market data client layered on the bearer-injecting [`Transport`].
//!
//! Every response body is decoded strictly: fields outside the documented shape fail with
//! [`Error::Decode`], and a non-empty `message` field becomes [`Error::Api`]. Non-success
//! statuses without a message are [`Error::Api`] carrying the status line.

pub mod prices;

pub use prices::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	config::Config,
	http::{self, ReqwestHttpClient, RoundTrip},
	source::TokenSource,
	transport::Transport,
};

/// J-Quants API client.
pub struct Client<B = ReqwestHttpClient>
where
	B: ?Sized + RoundTrip,
{
	transport: Transport<B>,
	config: Config,
}
impl Client<ReqwestHttpClient> {
	/// Creates a client whose requests are authorized by `source`.
	pub fn new(config: Config, source: Arc<dyn TokenSource>) -> Self {
		Self::with_transport(config, Transport::new(source))
	}
}
impl<B> Client<B>
where
	B: ?Sized + RoundTrip,
{
	/// Creates a client over a caller-assembled transport.
	pub fn with_transport(config: Config, transport: Transport<B>) -> Self {
		Self { transport, config }
	}

	/// Endpoint configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Transport every request goes through.
	pub fn transport(&self) -> &Transport<B> {
		&self.transport
	}

	/// Sends an arbitrary request through the authorizing transport.
	pub async fn execute(&self, request: Request) -> Result<Response> {
		self.transport.round_trip(request).await
	}

	pub(crate) async fn get_json<T>(&self, segments: &[&str], query: &[(&str, String)]) -> Result<T>
	where
		T: DeserializeOwned + ApiPayload,
	{
		let mut url = self.config.endpoint(segments)?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
		}

		let response = self.execute(Request::new(Method::GET, url)).await?;
		let (status, decoded) = http::read_json::<T>(response).await?;
		let code = Some(status.as_u16());
		let payload = match decoded {
			Ok(payload) => payload,
			Err(_) if !status.is_success() => return Err(status_error(status)),
			Err(source) => return Err(Error::Decode { source, status: code }),
		};

		match payload.message() {
			Some(message) if !message.is_empty() =>
				Err(Error::Api { message: message.to_owned(), status: code }),
			_ if !status.is_success() => Err(status_error(status)),
			_ => Ok(payload),
		}
	}
}
impl<B> Debug for Client<B>
where
	B: ?Sized + RoundTrip,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client").field("config", &self.config).finish_non_exhaustive()
	}
}

fn status_error(status: StatusCode) -> Error {
	Error::Api { message: format!("HTTP {status}"), status: Some(status.as_u16()) }
}

/// Response bodies that may carry a service-level error message.
pub trait ApiPayload {
	/// Error message reported by the service, if any.
	fn message(&self) -> Option<&str>;
}
