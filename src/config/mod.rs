use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use directories::BaseDirs;

pub const FPM_BINARY_PATH: &str = "SIMRUN_FPM_BINARY_PATH";
pub const OUTPUT_DIR: &str = "SIMRUN_OUTPUT_DIR";
pub const INDEX_PATH: &str = "SIMRUN_INDEX_PATH";
pub const LOG_FILTER: &str = "SIMRUN_LOG";

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    /// Defaults, overlaid by `.simrunrc`, overlaid by the environment.
    pub fn load() -> Self {
        let mut cfg = Self::load_from(default_config_path());

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                cfg.inner.insert(k, v);
            }
        }

        cfg
    }

    /// Defaults overlaid by the rc file at `config_path`, ignoring the environment.
    pub fn load_from(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let mut map = default_map();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(|l| l.ok()) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).map(PathBuf::from)
    }

    /// CLI value if given, else the configured value, else `fallback`.
    pub fn resolve_path(&self, cli: Option<&Path>, key: &str, fallback: &str) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.get_path(key))
            .unwrap_or_else(|| PathBuf::from(fallback))
    }

    pub fn log_filter(&self) -> String {
        self.get(LOG_FILTER).unwrap_or_else(|| "info".to_string())
    }
}

fn is_config_key(k: &str) -> bool {
    k.starts_with("SIMRUN_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("simrun").join(".simrunrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert(FPM_BINARY_PATH.into(), "fpm".into());
    m.insert(OUTPUT_DIR.into(), "output".into());
    m.insert(INDEX_PATH.into(), "index.json".into());
    m.insert(LOG_FILTER.into(), "info".into());
    m
}
