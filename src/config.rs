use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.start.gg/gql/alpha";
pub const PLACEHOLDER_TOKEN: &str = "<your token here>";

const DEFAULT_COMPLEXITY_THRESHOLD: u32 = 980;
const DEFAULT_MAX_PAGES: u32 = 50;
const DEFAULT_PER_PAGE: u32 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DATA_DIR_NAME: &str = "data";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token: String,
    pub data_dir: PathBuf,
    pub complexity_threshold: u32,
    pub max_pages: u32,
    pub per_page: u32,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let opt = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };

        let api_url = opt("STARTGG_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = opt("STARTGG_TOKEN").unwrap_or_else(|| PLACEHOLDER_TOKEN.to_string());
        let data_dir = opt("CHARFREQ_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let complexity_threshold = opt("CHARFREQ_COMPLEXITY_THRESHOLD")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_COMPLEXITY_THRESHOLD);
        let max_pages = opt("CHARFREQ_MAX_PAGES")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_PAGES)
            .clamp(1, 500);
        let per_page = opt("CHARFREQ_PER_PAGE")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, 500);
        let timeout_secs = opt("CHARFREQ_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(5, 300);

        Self {
            api_url,
            token,
            data_dir,
            complexity_threshold,
            max_pages,
            per_page,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token != PLACEHOLDER_TOKEN
    }
}

fn default_data_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DATA_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}
