//! Authenticated user profile derived from the identity provider.

use crate::discord::{DiscordGuild, DiscordUser};

/// One guild membership of the logged-in user, reduced to what the
/// authorization policy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMembership {
    pub guild_id: u64,
    pub is_administrator: bool,
}

/// The visitor behind the current session. Ephemeral: built from the Discord
/// profile and guild list fetched at login, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub display_name: String,
    pub guilds: Vec<GuildMembership>,
}

impl AuthenticatedUser {
    /// Reduce the raw Discord profile and guild list to the session profile.
    ///
    /// Guilds whose snowflake fails to parse are skipped; they could never
    /// match the institute server anyway.
    pub fn from_discord(user: &DiscordUser, guilds: &[DiscordGuild]) -> Self {
        let display_name = user
            .global_name
            .clone()
            .unwrap_or_else(|| user.username.clone());

        let guilds = guilds
            .iter()
            .filter_map(|guild| {
                guild.id.parse().ok().map(|guild_id| GuildMembership {
                    guild_id,
                    is_administrator: guild.is_administrator(),
                })
            })
            .collect();

        Self {
            id: user.id.clone(),
            display_name,
            guilds,
        }
    }
}
