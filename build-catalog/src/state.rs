use crate::config::AppConfig;
use crate::services::catalog::Catalog;
use crate::services::changelog::ChangelogClient;
use minijinja::Environment;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Catalog,
    pub changelog: ChangelogClient,
    pub templates: Environment<'static>,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let catalog = Catalog::from_config(&config);
        let changelog = ChangelogClient::new(&config.changelog_base_url, config.upstream_timeout)?;
        let templates = crate::templates::environment()?;
        Ok(Self {
            config,
            catalog,
            changelog,
            templates,
        })
    }
}
