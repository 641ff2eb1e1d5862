//! Calendar date codec used by market data payloads.
//!
//! The API writes dates either compactly (`20220930`) or ISO-style (`2022-09-30`). Both decode
//! into [`MarketDate`]; encoding and display always use the ISO form.

// crates.io
use serde::{Deserializer, Serializer, de};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::_prelude::*;

const COMPACT: &[BorrowedFormatItem<'static>] = format_description!("[year][month][day]");
const ISO: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Trading date as it appears in API payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarketDate(pub Date);
impl MarketDate {
	/// Parses `YYYYMMDD` or `YYYY-MM-DD`.
	pub fn parse(raw: &str) -> Result<Self, time::error::Parse> {
		let format = if raw.contains('-') { ISO } else { COMPACT };

		Date::parse(raw, format).map(Self)
	}

	/// Formats as `YYYYMMDD`, the shape query parameters accept.
	pub fn compact(&self) -> String {
		self.0.format(COMPACT).unwrap_or_default()
	}

	/// Underlying calendar date.
	pub fn date(&self) -> Date {
		self.0
	}
}
impl From<Date> for MarketDate {
	fn from(date: Date) -> Self {
		Self(date)
	}
}
impl Display for MarketDate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let formatted = self.0.format(ISO).map_err(|_| std::fmt::Error)?;

		f.write_str(&formatted)
	}
}
impl Serialize for MarketDate {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}
impl<'de> Deserialize<'de> for MarketDate {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;

		Self::parse(&raw).map_err(|e| de::Error::custom(format!("invalid date `{raw}`: {e}")))
	}
}
