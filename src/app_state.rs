use crate::CannonError;
use crate::event_models::{LogEntry, LogRecord};
use crate::host::SessionHost;
use crate::plugin::CannonDamagePlugin;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub struct AppState {
    pub current_byte: Option<u64>,
    /// Complete lines consumed from the active file
    pub current_line: u64,
    pub config: AppConfig,
    pub active_file: Option<PathBuf>,
    pub host: SessionHost,
    pub plugin: CannonDamagePlugin,
    pub log_tail_task: Option<tokio::task::JoinHandle<()>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

impl AppState {
    pub fn with_config(config: AppConfig) -> Self {
        let host = SessionHost::new();
        let mut plugin = CannonDamagePlugin::new(&host);
        plugin.start_up();
        Self {
            current_byte: None,
            current_line: 0,
            config,
            active_file: None,
            host,
            plugin,
            log_tail_task: None,
        }
    }

    /// Resolve `path` against the configured log directory and start a
    /// fresh replay session for it.
    pub fn set_active_file(&mut self, path: &str) -> Result<PathBuf, CannonError> {
        let given_path = Path::new(path);
        let resolved = if given_path.is_relative() {
            Path::new(&self.config.log_directory).join(given_path)
        } else {
            given_path.to_path_buf()
        };

        if !resolved.is_file() {
            return Err(CannonError::InvalidPath { path: resolved });
        }

        // a replay is a new plugin session on a log-driven clock
        self.plugin.shut_down(&self.host);
        self.host = SessionHost::for_replay();
        self.plugin = CannonDamagePlugin::new(&self.host);
        self.plugin.start_up();

        self.current_byte = None;
        self.current_line = 0;
        self.active_file = Some(resolved.clone());
        Ok(resolved)
    }

    pub fn process_entry(&mut self, entry: LogEntry) {
        self.host.advance_clock(entry.timestamp);
        match entry.record {
            LogRecord::Event(event) => self.plugin.dispatch(&event, &self.host),
            LogRecord::ExperienceChanged(xp) => self.host.set_experience(xp),
        }
    }

    pub fn process_entries(&mut self, entries: Vec<LogEntry>) {
        for entry in entries {
            self.process_entry(entry);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub log_directory: String,
    #[serde(default = "default_tail_poll_ms")]
    pub tail_poll_ms: u64,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load("cannon-damage", None).unwrap_or_else(|e| {
            eprintln!("failed to load config, using defaults: {e}");
            AppConfig::default()
        })
    }
}

fn default_tail_poll_ms() -> u64 {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl ::std::default::Default for AppConfig {
    fn default() -> Self {
        Self {
            log_directory: ".".to_string(),
            tail_poll_ms: default_tail_poll_ms(),
            log_filter: default_log_filter(),
        }
    }
}
