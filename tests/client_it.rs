// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use reqwest::{
	Method, Request, StatusCode,
	header::{AUTHORIZATION, HeaderValue},
};
use time::macros::date;
use url::Url;
// self
use jquants_client::{
	api::{Client, DailyQuotesQuery},
	auth::{InternalToken, TokenPair},
	config::Config,
	date::MarketDate,
	error::Error,
	exchange::AuthExchange,
	source::{CachingTokenSource, RefreshTokenSource, StaticTokenSource, TokenSource},
};

const QUOTES_BODY: &str = r#"{"daily_quotes":[{"Code":"86970","Date":"20220930","Open":2047.0,"High":2069.0,"Low":2035.0,"Close":2045.0,"Volume":2202500.0,"TurnoverValue":4507051850.0,"AdjustmentFactor":1.0,"AdjustmentOpen":2047.0,"AdjustmentHigh":2069.0,"AdjustmentLow":2035.0,"AdjustmentClose":2045.0,"AdjustmentVolume":2202500.0}]}"#;

fn config(server: &MockServer) -> Config {
	Config::new().with_base_url(server.base_url())
}

fn refreshing_client(server: &MockServer, refresh_token: &str) -> Client {
	let source = RefreshTokenSource::new(
		AuthExchange::new(config(server)),
		InternalToken::without_expiry(refresh_token),
	);
	let source: Arc<dyn TokenSource> = Arc::new(CachingTokenSource::new(source));

	Client::new(config(server), source)
}

#[tokio::test]
async fn daily_quotes_carry_cached_bearer_token() {
	let server = MockServer::start_async().await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/token/auth_refresh").query_param("refreshtoken", "rt1");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"idToken\":\"id1\"}");
		})
		.await;
	let quotes = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/prices/daily_quotes")
				.query_param("code", "86970")
				.query_param("date", "20220930")
				.header("authorization", "Bearer id1");
			then.status(200).header("content-type", "application/json").body(QUOTES_BODY);
		})
		.await;
	let client = refreshing_client(&server, "rt1");
	let query = DailyQuotesQuery::new().code("86970").date(date!(2022 - 09 - 30));

	for _ in 0..2 {
		let response =
			client.prices_daily_quotes(&query).await.expect("Daily quotes should decode.");

		assert_eq!(response.daily_quotes.len(), 1);
		assert_eq!(response.daily_quotes[0].date, MarketDate(date!(2022 - 09 - 30)));
		assert_eq!(response.daily_quotes[0].close, Some(2045.0));
	}

	refresh.assert_async().await;
	quotes.assert_calls_async(2).await;
}

#[tokio::test]
async fn failed_refresh_never_sends_the_request() {
	let server = MockServer::start_async().await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/token/auth_refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"idToken\":\"\",\"message\":\"invalid refresh token\"}");
		})
		.await;
	let quotes = server
		.mock_async(|when, then| {
			when.method(GET).path("/prices/daily_quotes");
			then.status(200).header("content-type", "application/json").body(QUOTES_BODY);
		})
		.await;
	let client = refreshing_client(&server, "rt1");
	let err = client
		.prices_daily_quotes(&DailyQuotesQuery::new())
		.await
		.expect_err("A failed refresh should abort the request.");

	assert!(
		matches!(err, Error::AuthExchangeFailed { message } if message == "invalid refresh token")
	);

	refresh.assert_async().await;
	quotes.assert_calls_async(0).await;
}

#[tokio::test]
async fn explicit_authorization_skips_token_source() {
	let server = MockServer::start_async().await;
	let quotes = server
		.mock_async(|when, then| {
			when.method(GET).path("/prices/daily_quotes").header("authorization", "Bearer manual");
			then.status(200).header("content-type", "application/json").body(QUOTES_BODY);
		})
		.await;
	// An empty static source fails with `TokenNotSet` if it is ever consulted.
	let source: Arc<dyn TokenSource> = Arc::new(StaticTokenSource::default());
	let client = Client::new(config(&server), source);
	let url = Url::parse(&server.url("/prices/daily_quotes")).expect("Mock URL should parse.");
	let mut request = Request::new(Method::GET, url);

	request.headers_mut().insert(AUTHORIZATION, HeaderValue::from_static("Bearer manual"));

	let response = client.execute(request).await.expect("Pre-authorized requests should pass.");

	assert_eq!(response.status(), StatusCode::OK);

	quotes.assert_async().await;

	let err = client
		.prices_daily_quotes(&DailyQuotesQuery::new())
		.await
		.expect_err("Requests without a header should consult the empty source.");

	assert!(matches!(err, Error::TokenNotSet));
}

#[tokio::test]
async fn service_messages_surface_as_api_errors() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/prices/daily_quotes");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"message\":\"The incoming token is invalid or expired.\"}");
		})
		.await;

	let source: Arc<dyn TokenSource> = Arc::new(StaticTokenSource::new(TokenPair::new(
		InternalToken::without_expiry("revoked"),
		InternalToken::default(),
	)));
	let client = Client::new(config(&server), source);
	let err = client
		.prices_daily_quotes(&DailyQuotesQuery::new())
		.await
		.expect_err("Service messages should fail the call.");

	assert!(matches!(
		err,
		Error::Api { ref message, status: Some(401) } if message.contains("invalid or expired")
	));
}

#[tokio::test]
async fn unknown_response_fields_are_decode_errors() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/prices/daily_quotes");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"daily_quotes\":[],\"unexpected\":1}");
		})
		.await;

	let source: Arc<dyn TokenSource> = Arc::new(StaticTokenSource::new(TokenPair::new(
		InternalToken::without_expiry("id"),
		InternalToken::default(),
	)));
	let client = Client::new(config(&server), source);
	let err = client
		.prices_daily_quotes(&DailyQuotesQuery::new())
		.await
		.expect_err("Unknown fields should be rejected.");

	assert!(matches!(err, Error::Decode { status: Some(200), .. }));
}

#[tokio::test]
async fn failure_statuses_without_message_are_api_errors() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/prices/daily_quotes").query_param("code", "86970");
			then.status(503).header("content-type", "application/json").body("{\"daily_quotes\":[]}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/prices/daily_quotes").query_param("code", "72030");
			then.status(502).body("<html>Bad Gateway</html>");
		})
		.await;

	let source: Arc<dyn TokenSource> = Arc::new(StaticTokenSource::new(TokenPair::new(
		InternalToken::without_expiry("id"),
		InternalToken::default(),
	)));
	let client = Client::new(config(&server), source);
	let err = client
		.prices_daily_quotes(&DailyQuotesQuery::new().code("86970"))
		.await
		.expect_err("An outage should not look like an empty page.");

	assert!(matches!(err, Error::Api { ref message, status: Some(503) } if message.contains("503")));

	let err = client
		.prices_daily_quotes(&DailyQuotesQuery::new().code("72030"))
		.await
		.expect_err("Gateway pages should fail with the status.");

	assert!(matches!(err, Error::Api { status: Some(502), .. }));
}
