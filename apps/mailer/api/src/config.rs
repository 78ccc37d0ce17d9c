use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_mailing::providers::{HttpClientConfig, PostmarkConfig, SendGridConfig};
use eyre::WrapErr;

pub use core_config::Environment;

/// Application configuration, read once at startup.
///
/// Both provider keys are required; startup stops if either is missing.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub http: HttpClientConfig,
    pub postmark: PostmarkConfig,
    pub sendgrid: SendGridConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 unless set
        let http = HttpClientConfig::from_env()?;
        let postmark = PostmarkConfig::from_env().wrap_err("Postmark is not configured")?;
        let sendgrid = SendGridConfig::from_env().wrap_err("SendGrid is not configured")?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            http,
            postmark,
            sendgrid,
        })
    }
}
