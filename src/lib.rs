pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod model;
pub mod sns;

pub use client::NotificationClient;
pub use config::SnsClientConfig;
pub use error::SnsClientError;
pub use message::{AttributeValue, Message, MessageBody, PreparedPublish};
pub use model::{
    MessageId, PlatformApplication, PlatformEndpoint, PublishTarget, Subscription,
    SubscriptionHandle, TopicRef,
};
pub use sns::SnsNotificationClient;

#[cfg(feature = "mock")]
pub use client::MockNotificationClient;
