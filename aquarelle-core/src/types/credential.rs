//! API key 相关类型定义

use serde::{Deserialize, Serialize};

/// 环境变量：生成模型 API key
pub const GENERATION_KEY_ENV: &str = "GEMINI_API_KEY";
/// 环境变量：地图 API key
pub const MAPS_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// 两种 API key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    /// 图像生成模型 key
    Generation,
    /// 地图 SDK key
    Maps,
}

impl CredentialKind {
    pub const ALL: [Self; 2] = [Self::Generation, Self::Maps];

    /// 持久化存储中的固定键名
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Generation => "generation_api_key",
            Self::Maps => "maps_api_key",
        }
    }

    /// 面向用户的名称
    pub fn label(self) -> &'static str {
        match self {
            Self::Generation => "Gemini",
            Self::Maps => "Google Maps",
        }
    }

    /// 对应的环境变量名
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Generation => GENERATION_KEY_ENV,
            Self::Maps => MAPS_KEY_ENV,
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 去除首尾空白；空白字符串视为缺失
pub fn normalize_key(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 一对 API key，每次查询都重新构造
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialPair {
    pub generation_key: Option<String>,
    pub maps_key: Option<String>,
}

impl CredentialPair {
    /// 构造时规范化两个 key
    pub fn new(generation_key: Option<&str>, maps_key: Option<&str>) -> Self {
        Self {
            generation_key: normalize_key(generation_key),
            maps_key: normalize_key(maps_key),
        }
    }

    pub fn get(&self, kind: CredentialKind) -> Option<&str> {
        match kind {
            CredentialKind::Generation => self.generation_key.as_deref(),
            CredentialKind::Maps => self.maps_key.as_deref(),
        }
    }

    /// 两个 key 均存在
    pub fn is_complete(&self) -> bool {
        self.generation_key.is_some() && self.maps_key.is_some()
    }
}

// 不在 Debug 输出中暴露密钥
impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("CredentialPair")
            .field("generation_key", &redact(&self.generation_key))
            .field("maps_key", &redact(&self.maps_key))
            .finish()
    }
}

/// 静态配置层：启动时读取一次，之后不可变
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StaticCredentials(CredentialPair);

impl StaticCredentials {
    pub fn new(generation_key: Option<&str>, maps_key: Option<&str>) -> Self {
        Self(CredentialPair::new(generation_key, maps_key))
    }

    /// 没有任何静态配置
    pub fn none() -> Self {
        Self::default()
    }

    /// 读取运行时环境变量，缺失时回退到编译期注入的值
    pub fn from_env() -> Self {
        let runtime = |name: &str| std::env::var(name).ok();
        let generation = runtime(GENERATION_KEY_ENV)
            .or_else(|| option_env!("GEMINI_API_KEY").map(str::to_string));
        let maps = runtime(MAPS_KEY_ENV)
            .or_else(|| option_env!("GOOGLE_MAPS_API_KEY").map(str::to_string));

        let credentials = Self::new(generation.as_deref(), maps.as_deref());
        log::debug!(
            "Static credentials: generation={}, maps={}",
            credentials.get(CredentialKind::Generation).is_some(),
            credentials.get(CredentialKind::Maps).is_some()
        );
        credentials
    }

    pub fn get(&self, kind: CredentialKind) -> Option<&str> {
        self.0.get(kind)
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticCredentials").field(&self.0).finish()
    }
}

/// key 的来源层
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    /// 静态配置（环境变量 / 编译期）
    Config,
    /// 本地持久化存储
    Stored,
    /// 未找到
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "configuration"),
            Self::Stored => write!(f, "local storage"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// 每个 key 的来源汇总（仅用于展示，不包含 key 本身）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatus {
    pub generation: CredentialSource,
    pub maps: CredentialSource,
}

impl CredentialStatus {
    pub fn get(&self, kind: CredentialKind) -> CredentialSource {
        match kind {
            CredentialKind::Generation => self.generation,
            CredentialKind::Maps => self.maps,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.generation != CredentialSource::Missing && self.maps != CredentialSource::Missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_absent() {
        let pair = CredentialPair::new(Some("   "), Some("\t\n"));
        assert_eq!(pair, CredentialPair::default());
        assert!(!pair.is_complete());
    }

    #[test]
    fn keys_are_trimmed() {
        let pair = CredentialPair::new(Some("  AIzaKey  "), None);
        assert_eq!(pair.get(CredentialKind::Generation), Some("AIzaKey"));
        assert_eq!(pair.get(CredentialKind::Maps), None);
    }

    #[test]
    fn storage_keys_are_fixed() {
        assert_eq!(CredentialKind::Generation.storage_key(), "generation_api_key");
        assert_eq!(CredentialKind::Maps.storage_key(), "maps_api_key");
    }

    #[test]
    fn debug_redacts_keys() {
        let pair = CredentialPair::new(Some("AIzaSecret"), Some("maps-secret"));
        let debug = format!("{:?}", StaticCredentials(pair));
        assert!(!debug.contains("AIzaSecret"));
        assert!(!debug.contains("maps-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn status_serializes_camel_case() {
        let status = CredentialStatus {
            generation: CredentialSource::Config,
            maps: CredentialSource::Missing,
        };
        assert_eq!(
            serde_json::to_value(status).unwrap(),
            serde_json::json!({ "generation": "config", "maps": "missing" })
        );
        assert!(!status.is_complete());
    }
}
