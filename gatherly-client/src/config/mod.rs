use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub credentials: CredentialSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Clone)]
pub struct ApiSettings {
    /// Base URL of the deployment target, without the `/api` prefix
    /// (e.g. `https://api.gatherly.app`).
    pub base_url: String,
}

#[derive(Deserialize, Clone)]
pub struct NotificationSettings {
    /// Seconds between notification refreshes.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    30
}

#[derive(Deserialize, Clone)]
pub struct CredentialSettings {
    /// Service name under which the bearer token is filed in the OS
    /// keychain.
    #[serde(default = "default_keychain_service")]
    pub keychain_service: String,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            keychain_service: default_keychain_service(),
        }
    }
}

fn default_keychain_service() -> String {
    "gatherly".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    // Check if we're already in gatherly-client directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("gatherly-client") {
        base_path.join("config")
    } else {
        base_path.join("gatherly-client").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
