pub mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Config {
        pub db_url: String,
        #[serde(default = "default_port")]
        pub port: u16,
        #[serde(default)]
        pub gemini_api_key: Option<String>,
        #[serde(default = "default_gemini_model")]
        pub gemini_model: String,
        #[serde(default)]
        pub reset_db: bool,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(config::Environment::default())
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_gemini_model() -> String {
        "gemini-1.5-flash".to_string()
    }
}

pub mod ai;
pub mod entities;
pub mod task;
pub mod web;
