//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use aquarelle_provider::{ImagePayload, ImageProvider, ProviderCredentials, create_provider};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 1x1 透明 PNG
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub fn tiny_png() -> ImagePayload {
    ImagePayload::from_base64("image/png", TINY_PNG_BASE64).unwrap_or_else(|e| panic!("{e}"))
}

/// 测试上下文 - 封装真实 Provider
pub struct TestContext {
    pub provider: Arc<dyn ImageProvider>,
}

impl TestContext {
    /// 创建 Gemini 测试上下文
    pub fn gemini() -> Option<Self> {
        let api_key = env::var("GEMINI_API_KEY").ok()?;
        let provider = create_provider(ProviderCredentials::Gemini { api_key }).ok()?;
        Some(Self { provider })
    }
}
