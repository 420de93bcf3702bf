//! Discord identity provider client.
//!
//! Narrow contract around the OAuth2 endpoints and the two bot calls the
//! dashboard needs. Token exchange internals stay on Discord's side; this
//! module only shapes requests and decodes responses.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::errors::AppError;

const API_BASE: &str = "https://discord.com/api/v10";
const OAUTH_AUTHORIZE: &str = "https://discord.com/oauth2/authorize";
const OAUTH_TOKEN: &str = "https://discord.com/api/oauth2/token";
const OAUTH_REVOKE: &str = "https://discord.com/api/oauth2/token/revoke";

/// The ADMINISTRATOR permission bit in Discord's permission bitfield.
pub const PERMISSION_ADMINISTRATOR: u64 = 1 << 3;

/// Client for the Discord OAuth flow and bot API.
///
/// The API endpoints are fields rather than constants so tests can retarget
/// the client at a local server; production construction always uses the
/// discord.com defaults.
pub struct DiscordClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    bot_token: String,
    redirect_uri: String,
    api_base: String,
    token_url: String,
    revoke_url: String,
}

/// Successful token exchange response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// The `/users/@me` profile, reduced to the fields the dashboard shows.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

/// One entry of `/users/@me/guilds`, reduced to what the policy needs.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordGuild {
    pub id: String,
    #[serde(default, deserialize_with = "permissions_from_any")]
    pub permissions: u64,
    #[serde(default)]
    pub owner: bool,
}

impl DiscordGuild {
    /// Whether the user holds the administrator permission in this guild.
    /// Guild owners hold every permission implicitly.
    pub fn is_administrator(&self) -> bool {
        self.owner || self.permissions & PERMISSION_ADMINISTRATOR != 0
    }
}

/// Discord serializes the permission bitfield as a string in current API
/// versions and as a number in older payloads; accept both.
fn permissions_from_any<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
struct DmChannel {
    id: String,
}

impl DiscordClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client construction cannot fail with these options");

        Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            bot_token: config.bot_token.clone(),
            redirect_uri: config.redirect_uri.clone(),
            api_base: API_BASE.to_string(),
            token_url: OAUTH_TOKEN.to_string(),
            revoke_url: OAUTH_REVOKE.to_string(),
        }
    }

    /// Point every API call at a local server.
    #[cfg(test)]
    pub(crate) fn override_endpoints(&mut self, base_url: &str) {
        self.api_base = format!("{}/api/v10", base_url);
        self.token_url = format!("{}/api/oauth2/token", base_url);
        self.revoke_url = format!("{}/api/oauth2/token/revoke", base_url);
    }

    /// Authorization URL the login route redirects the browser to.
    pub fn authorize_url(&self, state: &str) -> String {
        let url = Url::parse_with_params(
            OAUTH_AUTHORIZE,
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("scope", "identify guilds"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("state", state),
            ],
        )
        .expect("static authorize URL is valid");
        url.into()
    }

    /// Exchange the callback code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Fetch the logged-in user's profile.
    pub async fn fetch_user(&self, access_token: &str) -> Result<DiscordUser, AppError> {
        let response = self
            .http
            .get(format!("{}/users/@me", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Fetch the logged-in user's guild memberships.
    pub async fn fetch_guilds(&self, access_token: &str) -> Result<Vec<DiscordGuild>, AppError> {
        let response = self
            .http
            .get(format!("{}/users/@me/guilds", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Revoke an access token on logout.
    pub async fn revoke_token(&self, access_token: &str) -> Result<(), AppError> {
        let params = [
            ("token", access_token),
            ("token_type_hint", "access_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        self.http
            .post(&self.revoke_url)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Greet the user over DM after a successful login. Uses the bot token;
    /// callers treat failure as non-fatal.
    pub async fn send_welcome_dm(&self, user_id: &str, display_name: &str) -> Result<(), AppError> {
        let channel: DmChannel = self
            .http
            .post(format!("{}/users/@me/channels", self.api_base))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&serde_json::json!({ "recipient_id": user_id }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        self.http
            .post(format!("{}/channels/{}/messages", self.api_base, channel.id))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&serde_json::json!({
                "content": format!(
                    "Hello {}. This message is to inform you that you recently logged into the moderation dashboard.",
                    display_name
                )
            }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
