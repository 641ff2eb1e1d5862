//! `GET /prices/daily_quotes`.

// self
use crate::{
	_prelude::*,
	api::{ApiPayload, Client},
	date::MarketDate,
	http::RoundTrip,
};

/// Query parameters for [`Client::prices_daily_quotes`]; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailyQuotesQuery {
	/// Issue code, e.g. `86970`.
	pub code: Option<String>,
	/// Single trading date.
	pub date: Option<MarketDate>,
	/// Range start (inclusive).
	pub from: Option<MarketDate>,
	/// Range end (inclusive).
	pub to: Option<MarketDate>,
	/// Continuation key from a previous page.
	pub pagination_key: Option<String>,
}
impl DailyQuotesQuery {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Restricts the query to one issue code.
	pub fn code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());

		self
	}

	/// Restricts the query to one trading date.
	pub fn date(mut self, date: impl Into<MarketDate>) -> Self {
		self.date = Some(date.into());

		self
	}

	/// Restricts the query to a date range.
	pub fn range(mut self, from: impl Into<MarketDate>, to: impl Into<MarketDate>) -> Self {
		self.from = Some(from.into());
		self.to = Some(to.into());

		self
	}

	/// Continues from a previous page.
	pub fn pagination_key(mut self, key: impl Into<String>) -> Self {
		self.pagination_key = Some(key.into());

		self
	}

	/// Encodes the set fields as query pairs, dates in `YYYYMMDD` form.
	pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = Vec::new();

		if let Some(code) = &self.code {
			pairs.push(("code", code.clone()));
		}
		if let Some(date) = &self.date {
			pairs.push(("date", date.compact()));
		}
		if let Some(from) = &self.from {
			pairs.push(("from", from.compact()));
		}
		if let Some(to) = &self.to {
			pairs.push(("to", to.compact()));
		}
		if let Some(key) = &self.pagination_key {
			pairs.push(("pagination_key", key.clone()));
		}

		pairs
	}
}

/// One daily OHLC quote. Price and volume fields are `None` when trading was suspended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct Quote {
	/// Issue code.
	pub code: String,
	/// Trading date.
	pub date: MarketDate,
	/// Opening price.
	pub open: Option<f64>,
	/// High price.
	pub high: Option<f64>,
	/// Low price.
	pub low: Option<f64>,
	/// Closing price.
	pub close: Option<f64>,
	/// Trading volume.
	pub volume: Option<f64>,
	/// Trading value.
	pub turnover_value: Option<f64>,
	/// Split/merge adjustment factor.
	pub adjustment_factor: Option<f64>,
	/// Adjusted opening price.
	pub adjustment_open: Option<f64>,
	/// Adjusted high price.
	pub adjustment_high: Option<f64>,
	/// Adjusted low price.
	pub adjustment_low: Option<f64>,
	/// Adjusted closing price.
	pub adjustment_close: Option<f64>,
	/// Adjusted trading volume.
	pub adjustment_volume: Option<f64>,
}

/// Body of `GET /prices/daily_quotes`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DailyQuotes {
	/// Quotes on this page.
	#[serde(default)]
	pub daily_quotes: Vec<Quote>,
	/// Service-level error message.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Key for the next page, when more results exist.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pagination_key: Option<String>,
}
impl ApiPayload for DailyQuotes {
	fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}

impl<B> Client<B>
where
	B: ?Sized + RoundTrip,
{
	/// Fetches daily quotes matching `query`.
	pub async fn prices_daily_quotes(&self, query: &DailyQuotesQuery) -> Result<DailyQuotes> {
		self.get_json(&["prices", "daily_quotes"], &query.to_pairs()).await
	}
}
