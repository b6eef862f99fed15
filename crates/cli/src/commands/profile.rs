//! Profile management commands
//!
//! Profiles are named Dropbox credentials stored in the config file,
//! together with optional endpoint and timeout overrides. Tokens are never
//! printed.

use clap::Subcommand;
use serde::Serialize;

use dbx_core::{Error, Profile, ProfileManager};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Profile subcommands for managing stored credentials
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Add or update a profile
    Set(SetArgs),

    /// List all configured profiles
    List(ListArgs),

    /// Remove a profile
    Remove(RemoveArgs),
}

/// Arguments for the `profile set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Profile name (e.g., "default", "work")
    pub name: String,

    /// Dropbox access token
    pub token: String,

    /// RPC endpoint base URL
    #[arg(long, default_value = dbx_core::profile::DEFAULT_API_URL)]
    pub api_url: String,

    /// Content endpoint base URL used for uploads and downloads
    #[arg(long, default_value = dbx_core::profile::DEFAULT_CONTENT_URL)]
    pub content_url: String,
}

/// Arguments for the `profile list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show endpoints and timeouts
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `profile remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the profile to remove
    pub name: String,
}

/// JSON output for profile list
#[derive(Serialize)]
struct ProfileListOutput {
    profiles: Vec<ProfileInfo>,
}

/// Profile information for JSON output (without the token)
#[derive(Debug, Serialize)]
struct ProfileInfo {
    name: String,
    api_url: String,
    content_url: String,
    connect_timeout_ms: u64,
    read_timeout_ms: u64,
}

impl From<&Profile> for ProfileInfo {
    fn from(profile: &Profile) -> Self {
        let timeout = profile.timeout_config();
        Self {
            name: profile.name.clone(),
            api_url: profile.api_url.clone(),
            content_url: profile.content_url.clone(),
            connect_timeout_ms: timeout.connect_ms,
            read_timeout_ms: timeout.read_ms,
        }
    }
}

/// JSON output for profile set/remove operations
#[derive(Serialize)]
struct ProfileOperationOutput {
    success: bool,
    profile: String,
    message: String,
}

/// Execute a profile subcommand
pub fn execute(cmd: ProfileCommands, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let manager = match ProfileManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::GeneralError;
        }
    };

    match cmd {
        ProfileCommands::Set(args) => execute_set(args, &manager, &formatter),
        ProfileCommands::List(args) => execute_list(args, &manager, &formatter),
        ProfileCommands::Remove(args) => execute_remove(args, &manager, &formatter),
    }
}

fn report_operation(formatter: &Formatter, name: &str, message: String) {
    if formatter.is_json() {
        formatter.json(&ProfileOperationOutput {
            success: true,
            profile: name.to_string(),
            message,
        });
    } else {
        formatter.success(&message);
    }
}

fn execute_set(args: SetArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    let mut profile = Profile::new(&args.name, args.token);
    profile.api_url = args.api_url;
    profile.content_url = args.content_url;

    match manager.set(profile) {
        Ok(()) => {
            report_operation(
                formatter,
                &args.name,
                format!("Profile '{}' configured successfully", args.name),
            );
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

fn execute_list(args: ListArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    let profiles = match manager.list() {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    if formatter.is_json() {
        formatter.json(&ProfileListOutput {
            profiles: profiles.iter().map(ProfileInfo::from).collect(),
        });
    } else if profiles.is_empty() {
        formatter.println("No profiles configured.");
    } else if args.long {
        for profile in profiles.iter().map(ProfileInfo::from) {
            formatter.println(&format!(
                "{:<12} {} {} (connect: {}ms, read: {}ms)",
                profile.name,
                profile.api_url,
                profile.content_url,
                profile.connect_timeout_ms,
                profile.read_timeout_ms
            ));
        }
    } else {
        for profile in &profiles {
            formatter.println(&profile.name);
        }
    }

    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            report_operation(
                formatter,
                &args.name,
                format!("Profile '{}' removed successfully", args.name),
            );
            ExitCode::Success
        }
        Err(Error::ProfileNotFound(_)) => {
            formatter.error(&format!("Profile '{}' not found", args.name));
            ExitCode::NotFound
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbx_core::TimeoutConfig;

    #[test]
    fn test_profile_info_hides_token() {
        let mut profile = Profile::new("work", "sl.secret-token");
        profile.timeout = Some(TimeoutConfig {
            connect_ms: 1000,
            read_ms: 2000,
        });

        let info = ProfileInfo::from(&profile);
        let json = serde_json::to_string(&info).unwrap();

        assert!(!json.contains("sl.secret-token"));
        assert_eq!(info.name, "work");
        assert_eq!(info.api_url, dbx_core::profile::DEFAULT_API_URL);
        assert_eq!(info.connect_timeout_ms, 1000);
        assert_eq!(info.read_timeout_ms, 2000);
    }

    #[test]
    fn test_profile_info_default_timeouts() {
        let info = ProfileInfo::from(&Profile::new("default", "t"));
        assert_eq!(info.connect_timeout_ms, 5000);
        assert_eq!(info.read_timeout_ms, 30000);
    }
}
