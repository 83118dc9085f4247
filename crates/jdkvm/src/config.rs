use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use jdkvm_archive::Extractor;
use jdkvm_fetch::{ClientSetting, Fetcher};
use jdkvm_fs::{AtomicWriteOptions, atomic_write};
use jdkvm_platform::{EnvSync, default_env_sync, dir};
use jdkvm_store::{Lifecycle, Settings};
use serde::{Deserialize, Deserializer, Serialize};

pub const HOME_ENV: &str = "JDKVM_HOME";
pub const CONFIG_FILE: &str = "jdkvm.json";
pub const DEFAULT_INDEX: &str = "https://raw.githubusercontent.com/ystyle/jvms/new/jdkdlindex.json";

/// Persisted settings. Unset fields fall back to [`Layout`] defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub java_home: Option<PathBuf>,
    #[serde(deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub current_jdk_version: Option<String>,
    #[serde(deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
    #[serde(deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(alias = "Store", deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,
    #[serde(alias = "Download", deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub download: Option<PathBuf>,
    #[serde(deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub env_script: Option<PathBuf>,
}

fn non_empty<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<String>::deserialize(de)?;
    Ok(value.filter(|v| !v.trim().is_empty()).map(T::from))
}

impl Config {
    pub fn read(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        atomic_write(path, text.as_bytes(), AtomicWriteOptions::new())
            .with_context(|| format!("failed to save {}", path.display()))
    }
}

/// Default locations, rooted at `$JDKVM_HOME` or the user data directory.
#[derive(Clone, Debug)]
pub struct Layout {
    pub base: PathBuf,
}

impl Layout {
    pub fn detect() -> Result<Self> {
        let base = match env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            Some(home) => PathBuf::from(home),
            None => dir::user_data()
                .context("cannot determine the user data directory, set JDKVM_HOME")?
                .join("jdkvm"),
        };
        Ok(Self { base })
    }

    pub fn config_file(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path);
        }
        if env::var_os(HOME_ENV).is_some_and(|v| !v.is_empty()) {
            return Ok(self.base.join(CONFIG_FILE));
        }
        let config = dir::user_config().context("cannot determine the user config directory")?;
        Ok(config.join("jdkvm").join(CONFIG_FILE))
    }

    pub fn store(&self) -> PathBuf {
        self.base.join("store")
    }

    pub fn download(&self) -> PathBuf {
        self.base.join("download")
    }

    pub fn java_home(&self) -> PathBuf {
        if cfg!(windows) {
            if let Some(pf) = dir::program_files() {
                return pf.join("jdk");
            }
        }
        self.base.join("current")
    }

    pub fn env_script(&self) -> PathBuf {
        self.base.join("env.sh")
    }
}

/// Loaded config plus where it came from.
pub struct Context {
    pub config: Config,
    pub path: PathBuf,
    pub layout: Layout,
}

impl Context {
    pub fn load(flag: Option<PathBuf>) -> Result<Self> {
        let layout = Layout::detect()?;
        let path = layout.config_file(flag)?;
        let config = Config::read(&path)?;
        Ok(Self {
            config,
            path,
            layout,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.config.write(&self.path)?;
        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(())
    }

    pub fn java_home(&self) -> PathBuf {
        self.config.java_home.clone().unwrap_or_else(|| self.layout.java_home())
    }

    pub fn index_url(&self) -> String {
        self.config
            .original_path
            .clone()
            .unwrap_or_else(|| DEFAULT_INDEX.to_string())
    }

    pub fn settings(&self) -> Settings {
        Settings {
            store_root: self.config.store.clone().unwrap_or_else(|| self.layout.store()),
            download_dir: self
                .config
                .download
                .clone()
                .unwrap_or_else(|| self.layout.download()),
            java_home: self.java_home(),
            current: self.config.current_jdk_version.clone(),
        }
    }

    pub fn env_sync(&self) -> Box<dyn EnvSync> {
        let script = self
            .config
            .env_script
            .clone()
            .unwrap_or_else(|| self.layout.env_script());
        default_env_sync(script)
    }

    pub fn fetcher(&self, progress: bool) -> Result<Fetcher> {
        let setting = ClientSetting::default().with_proxy(self.config.proxy.clone());
        Ok(Fetcher::new(setting)
            .context("failed to build HTTP client")?
            .with_progress(progress))
    }

    pub fn lifecycle(&self, progress: bool) -> Result<Lifecycle<Fetcher, Extractor, Box<dyn EnvSync>>> {
        Ok(Lifecycle::new(
            &self.settings(),
            self.fetcher(progress)?,
            Extractor::default(),
            self.env_sync(),
        ))
    }

    /// Copy the cached current version back for saving.
    pub fn record<F, X, E>(&mut self, lifecycle: &Lifecycle<F, X, E>)
    where
        F: jdkvm_store::ArchiveFetcher,
        X: jdkvm_store::ArchiveExtractor,
        E: EnvSync,
    {
        self.config.current_jdk_version = lifecycle.current().map(String::from);
    }
}
