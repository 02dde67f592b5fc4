use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::SnsClientError;

/// SNS クライアントの接続設定。
///
/// アクセスキーは設定ファイルまたは呼び出し側から供給される。ファサード自身は
/// 認証情報の取得元を持たない。
#[derive(Debug, Clone, Deserialize)]
pub struct SnsClientConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// ローカルエミュレータ等に向ける場合のエンドポイント上書き。
    #[serde(default)]
    pub endpoint_url: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    /// SDK の 1 オペレーションあたりのタイムアウト（ミリ秒）。未指定ならタイムアウトなし。
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// SDK の最大試行回数。デフォルトは 1（リトライしない）。
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_max_attempts() -> u32 {
    1
}

impl SnsClientConfig {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::new(secret_access_key.into()),
            timeout_ms: None,
            max_attempts: default_max_attempts(),
        }
    }

    /// YAML ファイルから設定を読み込み、検証して返す。
    pub fn load(path: &str) -> Result<Self, SnsClientError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, SnsClientError> {
        let cfg: Self = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), SnsClientError> {
        if self.region.is_empty() {
            return Err(SnsClientError::InvalidConfig("region is required".into()));
        }
        if self.access_key_id.is_empty() {
            return Err(SnsClientError::InvalidConfig(
                "access_key_id is required".into(),
            ));
        }
        if self.secret_access_key.expose_secret().is_empty() {
            return Err(SnsClientError::InvalidConfig(
                "secret_access_key is required".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(SnsClientError::InvalidConfig(
                "max_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }
}
