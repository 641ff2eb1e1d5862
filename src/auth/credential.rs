//! Credential discovery from TOML files and environment variables.
//!
//! Sources are merged in order, each later source overriding earlier ones field-by-field
//! and only with non-empty values:
//!
//! 1. `~/.jquants-api/jquants-api.toml`
//! 2. `./jquants-api.toml`
//! 3. the file named by `JQUANTS_API_CLIENT_CONFIG_FILE`
//! 4. `JQUANTS_API_MAIL_ADDRESS`, `JQUANTS_API_PASSWORD`, `JQUANTS_API_REFRESH_TOKEN`
//!
//! Credential files use a single section:
//!
//! ```toml
//! [jquants-api-client]
//! mail_address = "user@example.com"
//! password = "..."
//! refresh_token = "..."
//! ```

// std
use std::{
	env, fs,
	io::ErrorKind,
	path::{Path, PathBuf},
};
// self
use crate::{_prelude::*, error::ConfigError};

/// File name looked up in the user directory and the working directory.
pub const CREDENTIAL_FILE_NAME: &str = "jquants-api.toml";
/// Directory under `$HOME` holding the user-level credential file.
pub const CREDENTIAL_USER_DIR: &str = ".jquants-api";
/// Environment variable naming an explicit credential file.
pub const CREDENTIAL_FILE_ENV: &str = "JQUANTS_API_CLIENT_CONFIG_FILE";
/// Environment variable overriding the mail address.
pub const MAIL_ADDRESS_ENV: &str = "JQUANTS_API_MAIL_ADDRESS";
/// Environment variable overriding the password.
pub const PASSWORD_ENV: &str = "JQUANTS_API_PASSWORD";
/// Environment variable overriding the refresh token.
pub const REFRESH_TOKEN_ENV: &str = "JQUANTS_API_REFRESH_TOKEN";

/// Login material for the auth endpoints; any field may be empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credential {
	/// Account mail address used by the password exchange.
	pub mail_address: String,
	/// Account password used by the password exchange.
	pub password: String,
	/// Previously issued refresh token.
	pub refresh_token: String,
}
impl Credential {
	/// Creates a mail/password credential.
	pub fn new(mail_address: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			mail_address: mail_address.into(),
			password: password.into(),
			refresh_token: String::new(),
		}
	}

	/// Creates a credential that only carries a refresh token.
	pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
		Self { refresh_token: refresh_token.into(), ..Default::default() }
	}

	/// Returns `true` when both the mail address and password are present.
	pub fn has_login(&self) -> bool {
		!self.mail_address.is_empty() && !self.password.is_empty()
	}

	/// Returns `true` when a refresh token is present.
	pub fn has_refresh_token(&self) -> bool {
		!self.refresh_token.is_empty()
	}

	/// Overrides fields with the non-empty fields of `other`.
	pub fn overwrite(&mut self, other: Credential) {
		if !other.mail_address.is_empty() {
			self.mail_address = other.mail_address;
		}
		if !other.password.is_empty() {
			self.password = other.password;
		}
		if !other.refresh_token.is_empty() {
			self.refresh_token = other.refresh_token;
		}
	}

	/// Reads a credential file, reporting unreadable or malformed files.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let raw = fs::read_to_string(path).map_err(|source| ConfigError::CredentialRead {
			path: path.display().to_string(),
			source,
		})?;
		let file: CredentialFile = toml::from_str(&raw).map_err(|source| {
			ConfigError::CredentialParse { path: path.display().to_string(), source }
		})?;

		Ok(file.credential)
	}

	/// Discovers a credential from the default files and the process environment.
	pub fn load() -> Self {
		CredentialLoader::discover().load_with_env(|key| env::var(key).ok())
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("mail_address", &self.mail_address)
			.field("password_set", &!self.password.is_empty())
			.field("refresh_token_set", &!self.refresh_token.is_empty())
			.finish()
	}
}

#[derive(Debug, Default, Deserialize)]
struct CredentialFile {
	#[serde(rename = "jquants-api-client", default)]
	credential: Credential,
}

/// Merges credential files and environment overrides in precedence order.
#[derive(Clone, Debug, Default)]
pub struct CredentialLoader {
	/// User-level credential file.
	pub user_file: Option<PathBuf>,
	/// Working-directory credential file.
	pub current_dir_file: Option<PathBuf>,
}
impl CredentialLoader {
	/// Resolves the default file locations from the home and working directories.
	pub fn discover() -> Self {
		Self {
			user_file: dirs::home_dir()
				.map(|home| home.join(CREDENTIAL_USER_DIR).join(CREDENTIAL_FILE_NAME)),
			current_dir_file: env::current_dir().ok().map(|cwd| cwd.join(CREDENTIAL_FILE_NAME)),
		}
	}

	/// Loads and merges every source, resolving environment variables through `lookup`.
	///
	/// Missing or unreadable files are skipped.
	pub fn load_with_env<F>(&self, lookup: F) -> Credential
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut credential = Credential::default();
		let explicit_file =
			lookup(CREDENTIAL_FILE_ENV).filter(|path| !path.is_empty()).map(PathBuf::from);

		for path in [&self.user_file, &self.current_dir_file, &explicit_file].into_iter().flatten()
		{
			if let Some(found) = read_optional(path) {
				credential.overwrite(found);
			}
		}

		credential.overwrite(Credential {
			mail_address: lookup(MAIL_ADDRESS_ENV).unwrap_or_default(),
			password: lookup(PASSWORD_ENV).unwrap_or_default(),
			refresh_token: lookup(REFRESH_TOKEN_ENV).unwrap_or_default(),
		});

		credential
	}
}

fn read_optional(path: &Path) -> Option<Credential> {
	match Credential::from_file(path) {
		Ok(credential) => Some(credential),
		Err(ConfigError::CredentialRead { source, .. }) if source.kind() == ErrorKind::NotFound =>
			None,
		Err(e) => {
			#[cfg(feature = "tracing")]
			tracing::debug!(error = %e, "Skipping credential file.");
			#[cfg(not(feature = "tracing"))]
			let _ = e;

			None
		},
	}
}
