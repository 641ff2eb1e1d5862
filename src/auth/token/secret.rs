//! Bearer material that never shows up in logs.

// self
use crate::_prelude::*;

/// ID or refresh token string; empty means absent.
///
/// `Debug` and `Display` only say whether a value is present.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw token, for building the `Authorization` header or the refresh query.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when no token was issued.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	fn placeholder(&self) -> &'static str {
		if self.is_empty() { "<empty>" } else { "<redacted>" }
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret({})", self.placeholder())
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.placeholder())
	}
}
