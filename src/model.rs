use serde::{Deserialize, Serialize};

/// SNS がサブスクリプション確認待ちの場合に返す値。
pub const PENDING_CONFIRMATION: &str = "pending confirmation";

/// トピック名とサービスが払い出した ARN の組。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRef {
    pub name: String,
    pub arn: String,
}

impl TopicRef {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
        }
    }

    /// 設定等で与えられた既存トピックの ARN から参照を組み立てる。
    /// 名前は ARN の末尾セグメントとする。
    pub fn from_arn(arn: impl Into<String>) -> Self {
        let arn = arn.into();
        let name = arn.rsplit(':').next().unwrap_or_default().to_string();
        Self { name, arn }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformApplication {
    pub arn: String,
    pub name: String,
    /// プラットフォーム種別（GCM, APNS 等）。
    pub platform: String,
}

impl PlatformApplication {
    pub fn new(
        arn: impl Into<String>,
        name: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            arn: arn.into(),
            name: name.into(),
            platform: platform.into(),
        }
    }

    /// `arn:aws:sns:<region>:<account>:app/<platform>/<name>` 形式の ARN から参照を組み立てる。
    pub fn from_arn(arn: impl Into<String>) -> Self {
        let arn = arn.into();
        let path = arn.rsplit(':').next().unwrap_or_default();
        let mut segments = path.split('/').skip(1);
        let platform = segments.next().unwrap_or_default().to_string();
        let name = segments.next().unwrap_or_default().to_string();
        Self {
            arn,
            name,
            platform,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEndpoint {
    pub arn: String,
    /// 所属するプラットフォームアプリケーションの ARN（参照のみ）。
    pub application_arn: String,
    pub token: String,
    pub user_data: Option<String>,
}

impl PlatformEndpoint {
    pub fn from_arn(arn: impl Into<String>, application_arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            application_arn: application_arn.into(),
            token: String::new(),
            user_data: None,
        }
    }
}

/// トピック・プロトコル・エンドポイントの組。プロトコルはローカルで検証しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub topic: TopicRef,
    pub protocol: String,
    pub endpoint: String,
}

impl Subscription {
    pub fn new(topic: TopicRef, protocol: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            topic,
            protocol: protocol.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// subscribe 直後にサービスが返したハンドル。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionHandle {
    pub subscription: Subscription,
    /// 確認待ちの場合は None。
    pub arn: Option<String>,
}

impl SubscriptionHandle {
    pub fn new(subscription: Subscription, reported: Option<String>) -> Self {
        let arn = reported.filter(|a| !a.is_empty() && a != PENDING_CONFIRMATION);
        Self { subscription, arn }
    }

    pub fn is_pending_confirmation(&self) -> bool {
        self.arn.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// publish の宛先。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    Topic(TopicRef),
    Endpoint(PlatformEndpoint),
}

impl PublishTarget {
    pub fn arn(&self) -> &str {
        match self {
            Self::Topic(t) => &t.arn,
            Self::Endpoint(e) => &e.arn,
        }
    }
}

impl From<TopicRef> for PublishTarget {
    fn from(topic: TopicRef) -> Self {
        Self::Topic(topic)
    }
}

impl From<PlatformEndpoint> for PublishTarget {
    fn from(endpoint: PlatformEndpoint) -> Self {
        Self::Endpoint(endpoint)
    }
}
