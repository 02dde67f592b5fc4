use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::PublishTarget;

/// 構造化メッセージを送る際の MessageStructure の値。
pub const MESSAGE_STRUCTURE_JSON: &str = "json";

/// 構造化メッセージで全プロトコル共通のフォールバックに使うキー。
pub const DEFAULT_PROTOCOL_KEY: &str = "default";

#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Plain(String),
    /// プロトコルごとの JSON フラグメント（GCM, APNS, email 等）。
    /// フォールバック本文は常に `default` に保持し、`per_protocol` は `default` キーを持たない。
    Structured {
        default: Option<String>,
        per_protocol: BTreeMap<String, Value>,
    },
}

/// メッセージ属性の値。Number は 10 進表記の文字列で保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    String(String),
    Number(String),
    StringArray(Vec<String>),
    Binary(Vec<u8>),
}

impl AttributeValue {
    pub fn data_type(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Number(_) => "Number",
            Self::StringArray(_) => "String.Array",
            Self::Binary(_) => "Binary",
        }
    }

    /// StringValue として送る表現。Binary は None。
    pub fn string_value(&self) -> Option<String> {
        match self {
            Self::String(s) | Self::Number(s) => Some(s.clone()),
            Self::StringArray(items) => Some(
                Value::Array(items.iter().cloned().map(Value::String).collect()).to_string(),
            ),
            Self::Binary(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub body: MessageBody,
    pub subject: Option<String>,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Message {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            body: MessageBody::Plain(text.into()),
            subject: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn structured() -> Self {
        Self {
            body: MessageBody::Structured {
                default: None,
                per_protocol: BTreeMap::new(),
            },
            subject: None,
            attributes: BTreeMap::new(),
        }
    }

    /// プロトコル別のペイロードを追加する。Plain のメッセージは構造化に切り替わり、
    /// 元の本文は default として残る。キーが `default` の場合は `with_default` と同じく
    /// フォールバック本文を置き換える。
    pub fn with_protocol(mut self, protocol: impl Into<String>, payload: Value) -> Self {
        let protocol = protocol.into();
        if protocol == DEFAULT_PROTOCOL_KEY {
            let text = match payload {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return self.with_default(text);
        }
        if let MessageBody::Plain(text) = &mut self.body {
            let default = std::mem::take(text);
            self.body = MessageBody::Structured {
                default: Some(default),
                per_protocol: BTreeMap::new(),
            };
        }
        if let MessageBody::Structured { per_protocol, .. } = &mut self.body {
            per_protocol.insert(protocol, payload);
        }
        self
    }

    pub fn with_default(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        match &mut self.body {
            MessageBody::Structured { default, .. } => *default = Some(text),
            MessageBody::Plain(body) => *body = text,
        }
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// モバイルプッシュの TTL（秒）を `AWS.SNS.MOBILE.<PLATFORM>.TTL` 属性として設定する。
    pub fn with_ttl(self, platform: &str, seconds: u64) -> Self {
        let key = ttl_attribute_key(platform);
        self.with_attribute(key, AttributeValue::String(seconds.to_string()))
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.body, MessageBody::Structured { .. })
    }

    /// SNS に送る本文。構造化の場合は各フラグメントを文字列化した JSON オブジェクトになる。
    pub fn render_body(&self) -> String {
        match &self.body {
            MessageBody::Plain(text) => text.clone(),
            MessageBody::Structured {
                default,
                per_protocol,
            } => {
                let mut envelope = serde_json::Map::new();
                if let Some(text) = default {
                    envelope.insert(DEFAULT_PROTOCOL_KEY.to_string(), Value::String(text.clone()));
                }
                for (protocol, payload) in per_protocol {
                    let fragment = match payload {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    envelope.insert(protocol.clone(), Value::String(fragment));
                }
                Value::Object(envelope).to_string()
            }
        }
    }
}

pub fn ttl_attribute_key(platform: &str) -> String {
    format!("AWS.SNS.MOBILE.{}.TTL", platform.to_ascii_uppercase())
}

/// SDK に依存しない Publish リクエストの形。
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPublish {
    pub topic_arn: Option<String>,
    pub target_arn: Option<String>,
    pub message: String,
    pub message_structure: Option<String>,
    pub subject: Option<String>,
    pub message_attributes: BTreeMap<String, AttributeValue>,
}

impl PreparedPublish {
    pub fn new(target: &PublishTarget, message: &Message) -> Self {
        let (topic_arn, target_arn) = match target {
            PublishTarget::Topic(t) => (Some(t.arn.clone()), None),
            PublishTarget::Endpoint(e) => (None, Some(e.arn.clone())),
        };
        let message_structure = message
            .is_structured()
            .then(|| MESSAGE_STRUCTURE_JSON.to_string());
        Self {
            topic_arn,
            target_arn,
            message: message.render_body(),
            message_structure,
            subject: message.subject.clone(),
            message_attributes: message.attributes.clone(),
        }
    }
}
