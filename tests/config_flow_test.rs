use anyhow::Result;
use dog_discoverer::domain::ports::{ConfigProvider, DogSource};
use dog_discoverer::{DiscoverEngine, TheDogApi, TomlConfig};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// 模擬 main 的接線：設定檔 → TheDogApi → 引擎
fn source_from_config(config: &TomlConfig) -> TheDogApi {
    let mut source = TheDogApi::new(config.api_endpoint().to_string());
    if let Some(key) = config.api_key() {
        source = source.with_api_key(key);
    }
    if let Some(headers) = &config.discover.headers {
        for (name, value) in headers {
            source = source.with_header(name, value);
        }
    }
    source
}

#[tokio::test]
async fn test_file_configured_discovery_sends_key_and_headers() -> Result<()> {
    std::env::set_var("CONFIG_FLOW_TEST_KEY", "live_config_key");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/images/search")
            .header("x-api-key", "live_config_key")
            .header("x-request-source", "dog-discoverer");
        then.status(200).json_body(serde_json::json!([
            {"url": "https://cdn.example.com/pug.jpg", "breeds": [{"name": "Pug"}]}
        ]));
    });

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        r#"
[discover]
endpoint = "{}"
api_key = "${{CONFIG_FLOW_TEST_KEY}}"
max_attempts = 3

[discover.headers]
x-request-source = "dog-discoverer"
"#,
        server.url("/v1/images/search")
    )?;

    let config = TomlConfig::from_file(config_file.path())?;
    assert_eq!(config.max_attempts(), 3);

    let source = source_from_config(&config);
    let image = source.fetch_random().await?;

    api_mock.assert();
    assert_eq!(image.breeds[0].name, "Pug");

    std::env::remove_var("CONFIG_FLOW_TEST_KEY");
    Ok(())
}

#[tokio::test]
async fn test_configured_attempt_bound_drives_exhaustion() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/v1/images/search");
        then.status(200).json_body(serde_json::json!([
            {"url": "https://cdn.example.com/pug.jpg", "breeds": [{"name": "Pug"}]}
        ]));
    });

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        r#"
[discover]
endpoint = "{}"
max_attempts = 3
"#,
        server.url("/v1/images/search")
    )?;

    let config = TomlConfig::from_file(config_file.path())?;
    let engine = DiscoverEngine::with_max_attempts(source_from_config(&config), config.max_attempts());

    let mut bans = dog_discoverer::core::BanList::new();
    bans.add("Pug");

    let err = engine.discover(&bans).await.unwrap_err();

    api_mock.assert_hits(3);
    assert!(matches!(
        err,
        dog_discoverer::DogError::BanListExhausted { attempts: 3 }
    ));

    Ok(())
}
