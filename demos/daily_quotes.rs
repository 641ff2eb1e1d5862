//! Demonstrates logging in with a mail address + password, caching the resulting ID token, and
//! fetching daily quotes through the bearer-injecting client.
//!
//! The auth and price endpoints are served by a local mock so the demo runs offline. Point
//! [`Config::with_base_url`] at the real API and use [`Credential::load`] to talk to J-Quants.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use time::macros::date;
// self
use jquants_client::{
	api::{Client, DailyQuotesQuery},
	auth::Credential,
	config::Config,
	exchange::AuthExchange,
	source::{CachingTokenSource, RefreshTokenSource, TokenSource},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token/auth_user");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"refreshToken\":\"demo-refresh\"}");
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token/auth_refresh").query_param("refreshtoken", "demo-refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"idToken\":\"demo-id\"}");
		})
		.await;
	let quotes_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/prices/daily_quotes").header("authorization", "Bearer demo-id");
			then.status(200).header("content-type", "application/json").body(
				"{\"daily_quotes\":[{\"Code\":\"86970\",\"Date\":\"2022-09-30\",\"Open\":2047.0,\"High\":2069.0,\"Low\":2035.0,\"Close\":2045.0,\"Volume\":2202500.0,\"TurnoverValue\":4507051850.0,\"AdjustmentFactor\":1.0,\"AdjustmentOpen\":2047.0,\"AdjustmentHigh\":2069.0,\"AdjustmentLow\":2035.0,\"AdjustmentClose\":2045.0,\"AdjustmentVolume\":2202500.0}]}",
			);
		})
		.await;
	let config = Config::new().with_base_url(server.base_url());
	let credential = Credential::new("demo@example.com", "demo-password");
	let source =
		RefreshTokenSource::from_credential(AuthExchange::new(config.clone()), &credential).await?;
	let source: Arc<dyn TokenSource> = Arc::new(CachingTokenSource::new(source));
	let client = Client::new(config, source);
	let query = DailyQuotesQuery::new().code("86970").date(date!(2022 - 09 - 30));

	for _ in 0..2 {
		let page = client.prices_daily_quotes(&query).await?;

		for quote in &page.daily_quotes {
			println!("{} {} close={:?}", quote.date, quote.code, quote.close);
		}
	}

	login_mock.assert_async().await;
	refresh_mock.assert_async().await;
	quotes_mock.assert_calls_async(2).await;

	println!("Two requests were served with one ID token refresh.");

	Ok(())
}
