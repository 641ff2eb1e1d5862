//! J-Quants API client built around self-refreshing bearer tokens.
//!
//! The crate turns a credential (mail address + password, or a long-lived refresh token) into
//! an always-valid ID token and attaches it to every outbound request:
//!
//! - [`source`] defines the [`TokenSource`](source::TokenSource) capability with fixed,
//!   refreshing, and caching implementations.
//! - [`transport`] wraps any [`RoundTrip`](http::RoundTrip) and injects `Authorization: Bearer`.
//! - [`exchange`] talks to the `/token/auth_user` and `/token/auth_refresh` endpoints.
//! - [`api`] exposes the market data endpoints on top of the transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod date;
pub mod error;
pub mod exchange;
pub mod http;
pub mod obs;
pub mod source;
pub mod transport;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use reqwest::{
		Client as ReqwestClient, Error as ReqwestError, Method, Request, Response, StatusCode,
	};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
