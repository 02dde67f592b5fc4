use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SnsClientError {
    /// リモートサービス呼び出しの失敗。通信・認証・リクエスト不正・サービス側の拒否を区別しない。
    #[error("リモートサービスエラー ({operation}): {cause}")]
    RemoteService {
        operation: &'static str,
        #[source]
        cause: BoxError,
    },
    #[error("設定エラー: {0}")]
    InvalidConfig(String),
    #[error("設定ファイルの読み込みに失敗: {0}")]
    ReadConfig(#[from] std::io::Error),
    #[error("設定ファイルのパースに失敗: {0}")]
    ParseConfig(#[from] serde_yaml::Error),
}

impl SnsClientError {
    pub fn remote(operation: &'static str, cause: impl Into<BoxError>) -> Self {
        Self::RemoteService {
            operation,
            cause: cause.into(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteService { .. })
    }
}
