use crate::api::ClientContext;
use crate::error::{Result, TbsError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".threeblades.yaml";
pub const TOKEN_FILENAME: &str = ".threeblades.token";
pub const DEFAULT_ROOT: &str = "http://localhost:5000";
pub const DEFAULT_FORMAT: &str = "json";

/// Contents of `~/.threeblades.yaml`.
///
/// Unknown keys are kept in `extra`; that is where the per-group
/// `<group>_format` templates live.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TbsConfig {
    pub root: Option<String>,
    pub namespace: Option<String>,
    pub project: Option<String>,
    #[serde(alias = "projectID", alias = "projectid")]
    pub project_id: Option<String>,
    pub server: Option<String>,
    #[serde(alias = "serverID", alias = "serverid")]
    pub server_id: Option<String>,
    pub limit: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl TbsConfig {
    /// Load the config file, or defaults if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            TbsError::Config(format!("Error reading config file {}: {}", path.display(), e))
        })
    }

    /// The `<group>_format` template, if one is configured.
    pub fn format_for(&self, group: &str) -> Option<&str> {
        self.extra
            .get(&format!("{}_format", group))
            .and_then(serde_yaml::Value::as_str)
            .filter(|f| !f.is_empty())
    }
}

/// `$HOME/.threeblades.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
        .ok_or_else(|| TbsError::Config("Could not determine home directory".to_string()))
}

/// The token file sits next to the config file.
pub fn token_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(TOKEN_FILENAME)
}

pub fn load_token(path: &Path) -> Option<String> {
    let token = fs::read_to_string(path).ok()?;
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Writes the token readable by the owner only.
pub fn save_token(path: &Path, token: &str) -> Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(token.as_bytes())?;
    }
    #[cfg(not(unix))]
    fs::write(path, token)?;

    tracing::debug!(path = %path.display(), "token saved");
    Ok(())
}

/// Values given on the command line or in `THREEBLADES_*` variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub root: Option<String>,
    pub namespace: Option<String>,
    pub project: Option<String>,
    pub token: Option<String>,
}

/// Effective settings for one invocation: flag > env > config file > default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub root: String,
    pub namespace: String,
    pub project: Option<String>,
    pub project_id: Option<String>,
    pub server: Option<String>,
    pub server_id: Option<String>,
    pub limit: Option<u32>,
    pub token: Option<String>,
    pub file: TbsConfig,
}

fn pick(over: &Option<String>, file: &Option<String>) -> Option<String> {
    over.iter()
        .chain(file.iter())
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

impl Settings {
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let config_path = match &overrides.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };
        let file = TbsConfig::load(&config_path)?;
        Ok(Self::from_parts(overrides, config_path, file))
    }

    pub fn from_parts(overrides: &Overrides, config_path: PathBuf, file: TbsConfig) -> Self {
        let project = pick(&overrides.project, &file.project);
        // A stored project ID only belongs to the stored project name.
        let project_id = if project == pick(&None, &file.project) {
            pick(&None, &file.project_id)
        } else {
            None
        };
        let token = pick(&overrides.token, &None).or_else(|| load_token(&token_path(&config_path)));

        Self {
            root: pick(&overrides.root, &file.root).unwrap_or_else(|| DEFAULT_ROOT.to_string()),
            namespace: pick(&overrides.namespace, &file.namespace).unwrap_or_default(),
            project,
            project_id,
            server: pick(&None, &file.server),
            server_id: pick(&None, &file.server_id),
            limit: file.limit,
            token,
            config_path,
            file,
        }
    }

    /// Format flag, else `<group>_format` from the config file, else `json`.
    pub fn format_for(&self, group: &str, flag: Option<&str>) -> String {
        flag.filter(|f| !f.is_empty())
            .or_else(|| self.file.format_for(group))
            .unwrap_or(DEFAULT_FORMAT)
            .to_string()
    }

    pub fn token_path(&self) -> PathBuf {
        token_path(&self.config_path)
    }

    pub fn client_context(&self) -> ClientContext {
        ClientContext::new(self.namespace.clone())
            .with_project(self.project.clone())
            .with_project_id(self.project_id.clone())
            .with_server(self.server.clone())
            .with_server_id(self.server_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, yaml: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = TbsConfig::load(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, TbsConfig::default());
    }

    #[test]
    fn test_load_keeps_format_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "namespace: acme\nproject: demo\nserver_format: \"{{.name}}\\t{{.status}}\"\n",
        );
        let config = TbsConfig::load(&path).unwrap();
        assert_eq!(config.namespace.as_deref(), Some("acme"));
        assert_eq!(config.format_for("server"), Some("{{.name}}\t{{.status}}"));
        assert_eq!(config.format_for("project"), None);
    }

    #[test]
    fn test_load_accepts_camel_case_id_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "project: demo\nprojectID: p1\nserverID: s1\n");
        let config = TbsConfig::load(&path).unwrap();
        assert_eq!(config.project_id.as_deref(), Some("p1"));
        assert_eq!(config.server_id.as_deref(), Some("s1"));
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "namespace: [unclosed\n");
        assert!(matches!(TbsConfig::load(&path), Err(TbsError::Config(_))));
    }

    #[test]
    fn test_flag_beats_file_beats_default() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "namespace: acme\nproject: demo\n");
        let overrides = Overrides {
            config: Some(path),
            namespace: Some("other".into()),
            ..Default::default()
        };
        let settings = Settings::resolve(&overrides).unwrap();
        assert_eq!(settings.namespace, "other");
        assert_eq!(settings.project.as_deref(), Some("demo"));
        assert_eq!(settings.root, DEFAULT_ROOT);
    }

    #[test]
    fn test_project_id_seed_follows_project_name() {
        let file = TbsConfig {
            project: Some("demo".into()),
            project_id: Some("p1".into()),
            ..Default::default()
        };
        let dir = TempDir::new().unwrap();
        let same = Settings::from_parts(&Overrides::default(), dir.path().join("c.yaml"), file.clone());
        assert_eq!(same.project_id.as_deref(), Some("p1"));

        let overrides = Overrides {
            project: Some("elsewhere".into()),
            ..Default::default()
        };
        let other = Settings::from_parts(&overrides, dir.path().join("c.yaml"), file);
        assert!(other.project_id.is_none());
    }

    #[test]
    fn test_format_resolution() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "host_format: \"{{.name}}\"\n");
        let settings = Settings::resolve(&Overrides {
            config: Some(path),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(settings.format_for("host", Some("json")), "json");
        assert_eq!(settings.format_for("host", None), "{{.name}}");
        assert_eq!(settings.format_for("plan", None), "json");
    }

    #[test]
    fn test_token_roundtrip_next_to_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        let path = token_path(&config_path);
        save_token(&path, "jwt-abc").unwrap();

        let settings = Settings::from_parts(&Overrides::default(), config_path, TbsConfig::default());
        assert_eq!(settings.token.as_deref(), Some("jwt-abc"));
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TOKEN_FILENAME);
        save_token(&path, "t").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_blank_token_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TOKEN_FILENAME);
        fs::write(&path, "  \n").unwrap();
        assert!(load_token(&path).is_none());
    }
}
