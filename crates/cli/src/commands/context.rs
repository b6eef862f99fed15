//! Per-invocation state shared by the commands
//!
//! Resolves which credential to use and builds the single Dropbox client a
//! command runs against.

use dbx_core::{Error, Profile, ProfileManager, Result};
use dbx_dropbox::DropboxClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Global options after parsing
#[derive(Debug, Clone)]
pub struct Context {
    pub output: OutputConfig,
    pub profile: String,
    token: Option<String>,
}

impl Context {
    pub fn new(output: OutputConfig, profile: String, token: Option<String>) -> Self {
        Self {
            output,
            profile,
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.output.clone())
    }

    /// Pick the credential: an explicit token wins, otherwise the stored profile
    ///
    /// When both exist the profile still supplies endpoints and timeouts.
    pub fn resolve_profile(&self, manager: &ProfileManager) -> Result<Profile> {
        let stored = match manager.get(&self.profile) {
            Ok(profile) => Some(profile),
            Err(Error::ProfileNotFound(_)) => None,
            Err(e) => return Err(e),
        };

        match (stored, &self.token) {
            (Some(mut profile), Some(token)) => {
                profile.access_token = token.clone();
                Ok(profile)
            }
            (None, Some(token)) => Ok(Profile::new(&self.profile, token.clone())),
            (Some(profile), None) => Ok(profile),
            (None, None) => Err(Error::Auth(format!(
                "no access token: pass --token, set DBX_ACCESS_TOKEN, or run 'dbx profile set {} <TOKEN>'",
                self.profile
            ))),
        }
    }

    /// Build the client, reporting failures through the formatter
    pub fn connect(&self, formatter: &Formatter) -> std::result::Result<DropboxClient, ExitCode> {
        let client = ProfileManager::new()
            .and_then(|manager| self.resolve_profile(&manager))
            .and_then(|profile| DropboxClient::new(&profile));

        client.map_err(|e| {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        })
    }
}
