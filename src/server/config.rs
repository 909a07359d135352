use crate::server::error::Error;

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| Error::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: std::env::var("GANTRY_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }
}
