use async_trait::async_trait;

use crate::error::SnsClientError;
use crate::message::Message;
use crate::model::{
    MessageId, PlatformApplication, PlatformEndpoint, PublishTarget, SubscriptionHandle, TopicRef,
};

/// 通知サービスへのファサード。各メソッドはリモートへの 1 往復に対応し、
/// リトライやローカルでの復旧は行わない。
#[cfg_attr(any(feature = "mock", test), mockall::automock)]
#[async_trait]
pub trait NotificationClient: Send + Sync {
    async fn create_topic(&self, name: &str) -> Result<TopicRef, SnsClientError>;

    async fn delete_topic(&self, topic: &TopicRef) -> Result<(), SnsClientError>;

    /// プロトコル固有の確認（email 等）は待たない。
    async fn subscribe(
        &self,
        topic: &TopicRef,
        protocol: &str,
        endpoint: &str,
    ) -> Result<SubscriptionHandle, SnsClientError>;

    /// credential はそのまま PlatformCredential 属性として送る。
    async fn create_platform_application(
        &self,
        name: &str,
        platform: &str,
        credential: &str,
    ) -> Result<PlatformApplication, SnsClientError>;

    async fn create_platform_endpoint(
        &self,
        application: &PlatformApplication,
        token: &str,
        user_data: Option<String>,
    ) -> Result<PlatformEndpoint, SnsClientError>;

    async fn publish(
        &self,
        target: &PublishTarget,
        message: &Message,
    ) -> Result<MessageId, SnsClientError>;
}
