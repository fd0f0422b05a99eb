//! PublishConfig entity - a named sync target attached to a site
//!
//! The backend settings are a discriminated union tagged by `type`.
//! Field names follow the camelCase keys the configuration layer persists.
//! An unknown `type` deserializes into `SyncConfig::Unsupported` so the
//! factory can reject it with `UnsupportedSyncType` instead of the parser
//! failing the whole site config.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::value_objects::{GitProtocol, GitProvider, PublishScope};
use crate::error::{SyncError, SyncResult};

/// Default ssh port; other ports switch the URL to `ssh://` form
pub const DEFAULT_SSH_PORT: u16 = 22;

/// One configured publish target of a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Unique within the site's publish list (caller-enforced)
    pub key: String,
    pub config: SyncConfig,
}

/// Backend settings, exactly one variant per PublishConfig
#[derive(Debug, Clone, PartialEq)]
pub enum SyncConfig {
    Folder(FolderConfig),
    Git(GitConfig),
    /// Legacy single-provider GitHub backend (stub)
    Github(LegacyConfig),
    /// Legacy system-git backend (stub)
    Sysgit(LegacyConfig),
    /// Unrecognized `type`; rejected by the factory
    Unsupported { kind: String },
}

impl SyncConfig {
    /// The `type` tag of this variant
    pub fn kind(&self) -> &str {
        match self {
            SyncConfig::Folder(_) => "folder",
            SyncConfig::Git(_) => "git",
            SyncConfig::Github(_) => "github",
            SyncConfig::Sysgit(_) => "sysgit",
            SyncConfig::Unsupported { kind } => kind,
        }
    }

    /// Decode from a JSON-like value carrying a `type` field
    pub fn from_value(value: Value) -> SyncResult<Self> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SyncError::InvalidConfig("missing 'type' field".to_string()))?
            .to_string();

        let config = match kind.as_str() {
            "folder" => SyncConfig::Folder(serde_json::from_value(value)?),
            "git" => SyncConfig::Git(serde_json::from_value(value)?),
            "github" => SyncConfig::Github(serde_json::from_value(value)?),
            "sysgit" => SyncConfig::Sysgit(serde_json::from_value(value)?),
            _ => SyncConfig::Unsupported { kind },
        };
        Ok(config)
    }
}

impl<'de> Deserialize<'de> for SyncConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        SyncConfig::from_value(value).map_err(D::Error::custom)
    }
}

impl Serialize for SyncConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            SyncConfig::Folder(c) => serde_json::to_value(c),
            SyncConfig::Git(c) => serde_json::to_value(c),
            SyncConfig::Github(c) | SyncConfig::Sysgit(c) => serde_json::to_value(c),
            SyncConfig::Unsupported { .. } => Ok(Value::Object(Map::new())),
        };
        let mut body = body.map_err(S::Error::custom)?;
        if let Value::Object(map) = &mut body {
            map.insert("type".to_string(), Value::String(self.kind().to_string()));
        }
        body.serialize(serializer)
    }
}

/// Local folder target
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderConfig {
    pub path: String,
    #[serde(rename = "publishScope")]
    pub publish_scope: PublishScope,
    #[serde(rename = "overrideBaseURLSwitch")]
    pub override_base_url_switch: bool,
    #[serde(rename = "overrideBaseURL")]
    pub override_base_url: String,
}

impl FolderConfig {
    /// Fails before any filesystem mutation when the destination is missing
    pub fn validate(&self) -> SyncResult<()> {
        if self.path.trim().is_empty() {
            return Err(SyncError::SyncNotConfigured { field: "path" });
        }
        Ok(())
    }

    /// Base URL override, only when switched on and non-empty
    pub fn override_base_url(&self) -> Option<&str> {
        switched_value(self.override_base_url_switch, &self.override_base_url)
    }
}

/// Universal git target (GitHub, GitLab, Forgejo, generic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    #[serde(rename = "gitProvider")]
    pub git_provider: GitProvider,
    #[serde(rename = "gitBaseUrl")]
    pub git_base_url: String,
    #[serde(rename = "gitProtocol")]
    pub git_protocol: GitProtocol,
    #[serde(rename = "sshPort", skip_serializing_if = "Option::is_none")]
    pub ssh_port: Option<u16>,
    pub username: String,
    pub repository: String,
    pub branch: String,
    pub email: String,
    #[serde(rename = "deployPrivateKey")]
    pub deploy_private_key: String,
    #[serde(rename = "deployPublicKey")]
    pub deploy_public_key: String,
    #[serde(rename = "publishScope")]
    pub publish_scope: PublishScope,
    #[serde(rename = "setCIWorkflow")]
    pub set_ci_workflow: bool,
    #[serde(rename = "CNAMESwitch")]
    pub cname_switch: bool,
    #[serde(rename = "CNAME")]
    pub cname: String,
    #[serde(rename = "overrideBaseURLSwitch")]
    pub override_base_url_switch: bool,
    #[serde(rename = "overrideBaseURL")]
    pub override_base_url: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            git_provider: GitProvider::default(),
            git_base_url: String::new(),
            git_protocol: GitProtocol::default(),
            ssh_port: None,
            username: String::new(),
            repository: String::new(),
            branch: "main".to_string(),
            email: String::new(),
            deploy_private_key: String::new(),
            deploy_public_key: String::new(),
            publish_scope: PublishScope::default(),
            set_ci_workflow: false,
            cname_switch: false,
            cname: String::new(),
            override_base_url_switch: false,
            override_base_url: String::new(),
        }
    }
}

impl GitConfig {
    /// Fails before any filesystem mutation when a required field is blank
    pub fn validate(&self) -> SyncResult<()> {
        let required: [(&'static str, &str); 5] = [
            ("gitBaseUrl", &self.git_base_url),
            ("username", &self.username),
            ("repository", &self.repository),
            ("branch", &self.branch),
            ("deployPrivateKey", &self.deploy_private_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SyncError::SyncNotConfigured { field });
            }
        }
        Ok(())
    }

    pub fn ssh_port(&self) -> u16 {
        self.ssh_port.unwrap_or(DEFAULT_SSH_PORT)
    }

    /// Whether a CI workflow is generated for this target
    pub fn wants_ci_workflow(&self) -> bool {
        self.publish_scope.is_source_only() && self.set_ci_workflow
    }

    /// CNAME content, only when switched on and non-empty
    pub fn cname(&self) -> Option<&str> {
        switched_value(self.cname_switch, &self.cname)
    }

    /// Base URL override, only when switched on and non-empty
    pub fn override_base_url(&self) -> Option<&str> {
        switched_value(self.override_base_url_switch, &self.override_base_url)
    }
}

/// Settings of a legacy backend, kept opaque
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyConfig {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn switched_value(switch: bool, value: &str) -> Option<&str> {
    let value = value.trim();
    (switch && !value.is_empty()).then_some(value)
}
