//! Auth-domain models: token values, expiry policy, and credentials.

pub mod credential;
pub mod token;

pub use credential::*;
pub use token::{internal::*, pair::*, secret::*};
