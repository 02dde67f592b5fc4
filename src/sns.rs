use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::operation::RequestId;
use aws_sdk_sns::primitives::Blob;
use aws_sdk_sns::types::MessageAttributeValue;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::client::NotificationClient;
use crate::config::SnsClientConfig;
use crate::error::SnsClientError;
use crate::message::{AttributeValue, Message, PreparedPublish};
use crate::model::{
    MessageId, PlatformApplication, PlatformEndpoint, PublishTarget, Subscription,
    SubscriptionHandle, TopicRef,
};

/// プラットフォームアプリケーション作成時に認証情報を渡す属性名。
pub const PLATFORM_CREDENTIAL_ATTRIBUTE: &str = "PlatformCredential";

const CREDENTIALS_PROVIDER_NAME: &str = "k1s0-sns-client";

/// aws-sdk-sns を用いた `NotificationClient` 実装。
///
/// SDK クライアントは生成時に一度だけ組み立て、全呼び出しで再利用する。
pub struct SnsNotificationClient {
    client: aws_sdk_sns::Client,
}

impl SnsNotificationClient {
    /// 設定から SDK クライアントを組み立てる。
    ///
    /// 設定が不正な場合は `SnsClientError::InvalidConfig` を返す。`InvalidConfig` を返すのは
    /// この生成処理だけで、生成後の各オペレーションの失敗はすべて
    /// `SnsClientError::RemoteService` になる。
    pub async fn new(config: &SnsClientConfig) -> Result<Self, SnsClientError> {
        config.validate()?;

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.expose_secret().clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );
        let mut config_loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts));
        if let Some(ref ep) = config.endpoint_url {
            config_loader = config_loader.endpoint_url(ep);
        }
        if let Some(timeout) = config.timeout() {
            config_loader = config_loader
                .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
        }
        let sdk_config = config_loader.load().await;

        info!(
            region = %config.region,
            endpoint_url = config.endpoint_url.as_deref().unwrap_or("default"),
            max_attempts = config.max_attempts,
            "SNS クライアント初期化"
        );
        Ok(Self::from_client(aws_sdk_sns::Client::new(&sdk_config)))
    }

    /// 呼び出し側で構成済みの SDK クライアントを包む。
    pub fn from_client(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }

}

fn remote_error<E>(operation: &'static str, err: E) -> SnsClientError
where
    E: std::error::Error + Send + Sync + 'static,
{
    warn!(operation, error = %DisplayErrorContext(&err), "SNS 呼び出し失敗");
    SnsClientError::remote(operation, err)
}

fn missing_field(operation: &'static str, field: &str) -> SnsClientError {
    warn!(operation, field, "SNS レスポンスに必須項目がありません");
    SnsClientError::remote(operation, format!("response is missing {field}"))
}

fn to_sdk_attribute(value: &AttributeValue) -> Result<MessageAttributeValue, SnsClientError> {
    let binary = match value {
        AttributeValue::Binary(bytes) => Some(Blob::new(bytes.clone())),
        _ => None,
    };
    MessageAttributeValue::builder()
        .data_type(value.data_type())
        .set_string_value(value.string_value())
        .set_binary_value(binary)
        .build()
        .map_err(|e| remote_error("Publish", e))
}

#[async_trait]
impl NotificationClient for SnsNotificationClient {
    async fn create_topic(&self, name: &str) -> Result<TopicRef, SnsClientError> {
        const OP: &str = "CreateTopic";
        let out = self
            .client
            .create_topic()
            .name(name)
            .send()
            .await
            .map_err(|e| remote_error(OP, e))?;
        let arn = out.topic_arn().ok_or_else(|| missing_field(OP, "TopicArn"))?;
        info!(
            topic = name,
            topic_arn = arn,
            request_id = out.request_id().unwrap_or_default(),
            "トピック作成完了"
        );
        Ok(TopicRef::new(name, arn))
    }

    async fn delete_topic(&self, topic: &TopicRef) -> Result<(), SnsClientError> {
        let out = self
            .client
            .delete_topic()
            .topic_arn(&topic.arn)
            .send()
            .await
            .map_err(|e| remote_error("DeleteTopic", e))?;
        info!(
            topic_arn = %topic.arn,
            request_id = out.request_id().unwrap_or_default(),
            "トピック削除完了"
        );
        Ok(())
    }

    async fn subscribe(
        &self,
        topic: &TopicRef,
        protocol: &str,
        endpoint: &str,
    ) -> Result<SubscriptionHandle, SnsClientError> {
        let out = self
            .client
            .subscribe()
            .topic_arn(&topic.arn)
            .protocol(protocol)
            .endpoint(endpoint)
            .send()
            .await
            .map_err(|e| remote_error("Subscribe", e))?;
        let handle = SubscriptionHandle::new(
            Subscription::new(topic.clone(), protocol, endpoint),
            out.subscription_arn().map(str::to_string),
        );
        info!(
            topic_arn = %topic.arn,
            protocol,
            pending_confirmation = handle.is_pending_confirmation(),
            request_id = out.request_id().unwrap_or_default(),
            "サブスクリプション登録完了"
        );
        Ok(handle)
    }

    async fn create_platform_application(
        &self,
        name: &str,
        platform: &str,
        credential: &str,
    ) -> Result<PlatformApplication, SnsClientError> {
        const OP: &str = "CreatePlatformApplication";
        let out = self
            .client
            .create_platform_application()
            .name(name)
            .platform(platform)
            .attributes(PLATFORM_CREDENTIAL_ATTRIBUTE, credential)
            .send()
            .await
            .map_err(|e| remote_error(OP, e))?;
        let arn = out
            .platform_application_arn()
            .ok_or_else(|| missing_field(OP, "PlatformApplicationArn"))?;
        info!(
            application = name,
            platform,
            application_arn = arn,
            request_id = out.request_id().unwrap_or_default(),
            "プラットフォームアプリケーション作成完了"
        );
        Ok(PlatformApplication::new(arn, name, platform))
    }

    async fn create_platform_endpoint(
        &self,
        application: &PlatformApplication,
        token: &str,
        user_data: Option<String>,
    ) -> Result<PlatformEndpoint, SnsClientError> {
        const OP: &str = "CreatePlatformEndpoint";
        let out = self
            .client
            .create_platform_endpoint()
            .platform_application_arn(&application.arn)
            .token(token)
            .set_custom_user_data(user_data.clone())
            .send()
            .await
            .map_err(|e| remote_error(OP, e))?;
        let arn = out
            .endpoint_arn()
            .ok_or_else(|| missing_field(OP, "EndpointArn"))?;
        info!(
            application_arn = %application.arn,
            endpoint_arn = arn,
            request_id = out.request_id().unwrap_or_default(),
            "プラットフォームエンドポイント作成完了"
        );
        Ok(PlatformEndpoint {
            arn: arn.to_string(),
            application_arn: application.arn.clone(),
            token: token.to_string(),
            user_data,
        })
    }

    async fn publish(
        &self,
        target: &PublishTarget,
        message: &Message,
    ) -> Result<MessageId, SnsClientError> {
        const OP: &str = "Publish";
        let prepared = PreparedPublish::new(target, message);

        let mut request = self
            .client
            .publish()
            .set_topic_arn(prepared.topic_arn)
            .set_target_arn(prepared.target_arn)
            .message(prepared.message)
            .set_message_structure(prepared.message_structure)
            .set_subject(prepared.subject);
        for (key, value) in &prepared.message_attributes {
            request = request.message_attributes(key, to_sdk_attribute(value)?);
        }

        let out = request.send().await.map_err(|e| remote_error(OP, e))?;
        let message_id = out
            .message_id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing_field(OP, "MessageId"))?;
        info!(
            target_arn = target.arn(),
            structured = message.is_structured(),
            message_id,
            request_id = out.request_id().unwrap_or_default(),
            "メッセージ送信完了"
        );
        Ok(MessageId(message_id.to_string()))
    }
}
