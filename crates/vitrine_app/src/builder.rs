use crate::config::AppConfig;
use crate::traits::VitrineApp;

/// The main entry point.  Configure with the builder methods, then `run`.
pub struct App<A: VitrineApp> {
    config: AppConfig,
    app_state: A,
}

impl<A: VitrineApp + 'static> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            app_state,
        }
    }

    /// Replaces the whole configuration, e.g. one loaded from TOML.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.window.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.window.width = width;
        self.config.window.height = height;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.config.window.resizable = resizable;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the event loop until the window closes or the app requests exit.
    pub fn run(self) -> anyhow::Result<()> {
        crate::runner::run_internal(self.config, self.app_state)
    }
}
