//! Token values and the expiry policy shared by every token source.

pub mod internal;
pub mod pair;
pub mod secret;
