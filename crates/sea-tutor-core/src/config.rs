//! Tutor configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Local config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "sea-tutor.toml";

/// Top-level sea-tutor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Paper shape used by `paper` when none is given. The built-in SEA
    /// layout is used when unset.
    #[serde(default)]
    pub paper_shape: Option<PathBuf>,
    /// JSON-lines file attempts are appended to.
    #[serde(default = "default_attempt_log")]
    pub attempt_log: PathBuf,
    /// Directory generated papers are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Fixed seed for reproducible papers.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_attempt_log() -> PathBuf {
    PathBuf::from("./sea-tutor-data/attempts.jsonl")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./sea-tutor-papers")
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            paper_shape: None,
            attempt_log: default_attempt_log(),
            output_dir: default_output_dir(),
            seed: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    expand_vars(s, |name| std::env::var(name).ok())
}

/// Expand `${NAME}` references. Substituted values are not rescanned.
fn expand_vars(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = lookup(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
        from = start + value.len();
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `sea-tutor.toml` in the current directory
/// 2. `~/.config/sea-tutor/config.toml`
///
/// Environment variable overrides: `SEA_TUTOR_PAPER_SHAPE`,
/// `SEA_TUTOR_ATTEMPT_LOG`, `SEA_TUTOR_SEED`.
pub fn load_config() -> Result<TutorConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TutorConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => TutorConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    config.paper_shape = config.paper_shape.as_deref().map(resolve_path);
    config.attempt_log = resolve_path(&config.attempt_log);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<TutorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<TutorConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn apply_env_overrides(
    config: &mut TutorConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(shape) = var("SEA_TUTOR_PAPER_SHAPE") {
        config.paper_shape = Some(PathBuf::from(shape));
    }
    if let Some(log) = var("SEA_TUTOR_ATTEMPT_LOG") {
        config.attempt_log = PathBuf::from(log);
    }
    if let Some(seed) = var("SEA_TUTOR_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("SEA_TUTOR_SEED is not a number: {seed}"))?,
        );
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sea-tutor"))
}

/// Sample config written by `sea-tutor init`.
pub fn sample_config() -> String {
    format!(
        r#"# sea-tutor configuration

# Paper layout used by `sea-tutor paper` (omit for the built-in SEA layout).
paper_shape = "papers/sea.toml"

# Attempts are appended here as JSON lines.
attempt_log = "{}"

# Where generated papers are written.
output_dir = "{}"

# Uncomment for reproducible papers.
# seed = 42
"#,
        default_attempt_log().display(),
        default_output_dir().display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_SEA_TUTOR_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_SEA_TUTOR_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_SEA_TUTOR_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_close_${brace"), "no_close_${brace");
        std::env::remove_var("_SEA_TUTOR_TEST_VAR");
    }

    #[test]
    fn expanded_values_are_not_rescanned() {
        let vars: HashMap<&str, &str> = [("X", "${X}"), ("Y", "y")].into();
        let lookup = |name: &str| vars.get(name).map(|v| v.to_string());
        assert_eq!(expand_vars("${X}/${Y}", lookup), "${X}/y");
        assert_eq!(expand_vars("${MISSING}-${Y}", lookup), "-y");
    }

    #[test]
    fn default_config() {
        let config = TutorConfig::default();
        assert!(config.paper_shape.is_none());
        assert_eq!(config.attempt_log, PathBuf::from("./sea-tutor-data/attempts.jsonl"));
        assert!(config.seed.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: TutorConfig = toml::from_str("seed = 7\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.output_dir, default_output_dir());
    }

    #[test]
    fn sample_config_parses() {
        let config: TutorConfig = toml::from_str(&sample_config()).unwrap();
        assert_eq!(config.paper_shape, Some(PathBuf::from("papers/sea.toml")));
        assert_eq!(config.attempt_log, default_attempt_log());
    }

    #[test]
    fn env_overrides_win() {
        let vars: HashMap<&str, &str> = [
            ("SEA_TUTOR_PAPER_SHAPE", "custom.toml"),
            ("SEA_TUTOR_ATTEMPT_LOG", "/tmp/log.jsonl"),
            ("SEA_TUTOR_SEED", " 99 "),
        ]
        .into_iter()
        .collect();
        let mut config = TutorConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.paper_shape, Some(PathBuf::from("custom.toml")));
        assert_eq!(config.attempt_log, PathBuf::from("/tmp/log.jsonl"));
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn bad_seed_override_is_an_error() {
        let mut config = TutorConfig::default();
        let result = apply_env_overrides(&mut config, |k| {
            (k == "SEA_TUTOR_SEED").then(|| "forty".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(Some(&dir.path().join("missing.toml"))).is_err());

        let path = dir.path().join("sea-tutor.toml");
        std::fs::write(&path, "output_dir = \"out/${_SEA_TUTOR_CFG_DIR}\"\n").unwrap();
        std::env::set_var("_SEA_TUTOR_CFG_DIR", "papers");
        let config = parse_config_file(&path).unwrap();
        assert_eq!(resolve_path(&config.output_dir), PathBuf::from("out/papers"));
        std::env::remove_var("_SEA_TUTOR_CFG_DIR");
    }
}
