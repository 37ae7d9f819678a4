//! Gemini Provider 集成测试
//!
//! 运行方式:
//! ```bash
//! GEMINI_API_KEY=xxx cargo test -p aquarelle-provider --test gemini_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use aquarelle_provider::{GenerationOutput, GenerationRequest, ImageProvider, ProviderCredentials, create_provider};
use common::{TestContext, tiny_png};

#[tokio::test]
#[ignore = "integration test: requires GEMINI_API_KEY"]
async fn test_gemini_validate_credentials() {
    skip_if_no_credentials!("GEMINI_API_KEY");

    let ctx = require_some!(TestContext::gemini(), "创建测试上下文失败");
    let valid = require_ok!(
        ctx.provider.validate_credentials().await,
        "validate_credentials 调用失败"
    );
    assert!(valid, "凭证应该有效");

    println!("✓ validate_credentials 测试通过");
}

#[tokio::test]
#[ignore = "integration test: requires network access"]
async fn test_gemini_rejects_bogus_key() {
    // Arc<dyn ImageProvider> 没有 Debug，不能用 require_ok!
    let provider = match create_provider(ProviderCredentials::Gemini {
        api_key: "AIza-definitely-not-a-real-key".to_string(),
    }) {
        Ok(provider) => provider,
        Err(e) => panic!("创建 Provider 失败: {e}"),
    };
    let valid = require_ok!(
        provider.validate_credentials().await,
        "validate_credentials 调用失败"
    );
    assert!(!valid, "伪造的 key 不应通过验证");

    println!("✓ 无效凭证测试通过");
}

#[tokio::test]
#[ignore = "integration test: requires GEMINI_API_KEY"]
async fn test_gemini_generate() {
    skip_if_no_credentials!("GEMINI_API_KEY");

    let ctx = require_some!(TestContext::gemini(), "创建测试上下文失败");
    let request = GenerationRequest::new(
        tiny_png(),
        "Create a traditional watercolor painting of this image.",
    );
    let output = require_ok!(ctx.provider.generate(&request).await, "generate 调用失败");

    match output {
        GenerationOutput::Image(image) => {
            assert!(image.mime_type.starts_with("image/"));
            assert!(!image.data.is_empty());
            println!("✓ generate 测试通过，{} bytes", image.data.len());
        }
        GenerationOutput::Text(text) => {
            println!("✓ generate 返回纯文本: {text:?}");
        }
    }
}
