//! API key 格式校验

use serde::Serialize;

/// 生成模型 key 的前缀
pub const GENERATION_KEY_PREFIX: &str = "AI";
/// 地图 key 的最小长度（字符数）
pub const MAPS_KEY_MIN_LENGTH: usize = 30;

/// 校验结果，按规则顺序记录每条违反项
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// 按固定顺序检查两个 key；前缀与长度规则只在 key 存在时检查
pub fn validate_keys(generation: &str, maps: &str) -> ValidationResult {
    let generation = generation.trim();
    let maps = maps.trim();
    let mut errors = Vec::new();

    if generation.is_empty() {
        errors.push("Generation API key is required".to_string());
    } else if !generation.starts_with(GENERATION_KEY_PREFIX) {
        errors.push(format!(
            "Generation API key should start with \"{GENERATION_KEY_PREFIX}\""
        ));
    }

    if maps.is_empty() {
        errors.push("Maps API key is required".to_string());
    } else if maps.chars().count() < MAPS_KEY_MIN_LENGTH {
        errors.push("Maps API key appears to be too short".to_string());
    }

    ValidationResult::from_errors(errors)
}
