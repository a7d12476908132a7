use std::fmt;

use chrono::Utc;
use serde::Serialize;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Server-side service selected by the `service` tag of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Login,
    Users,
    Channel,
    Channels,
}

impl Service {
    pub fn as_str(self) -> &'static str {
        match self {
            Service::Login => "login",
            Service::Users => "users",
            Service::Channel => "channel",
            Service::Channels => "channels",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request sent to the chat server.
///
/// Serializes to the shared envelope
/// `{"service": "<tag>", "data": {"timestamp": <ms>, ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "service", content = "data")]
pub enum Request {
    #[serde(rename = "login")]
    Login { user: String, timestamp: i64 },
    #[serde(rename = "users")]
    ListUsers { timestamp: i64 },
    #[serde(rename = "channel")]
    CreateChannel { channel: String, timestamp: i64 },
    #[serde(rename = "channels")]
    ListChannels { timestamp: i64 },
}

impl Request {
    pub fn login(user: impl Into<String>) -> Self {
        Request::Login {
            user: user.into(),
            timestamp: now_millis(),
        }
    }

    pub fn list_users() -> Self {
        Request::ListUsers {
            timestamp: now_millis(),
        }
    }

    pub fn create_channel(channel: impl Into<String>) -> Self {
        Request::CreateChannel {
            channel: channel.into(),
            timestamp: now_millis(),
        }
    }

    pub fn list_channels() -> Self {
        Request::ListChannels {
            timestamp: now_millis(),
        }
    }

    pub fn service(&self) -> Service {
        match self {
            Request::Login { .. } => Service::Login,
            Request::ListUsers { .. } => Service::Users,
            Request::CreateChannel { .. } => Service::Channel,
            Request::ListChannels { .. } => Service::Channels,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            Request::Login { timestamp, .. }
            | Request::ListUsers { timestamp }
            | Request::CreateChannel { timestamp, .. }
            | Request::ListChannels { timestamp } => *timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn login_serializes_into_envelope() {
        let request = Request::Login {
            user: "client-rs".to_string(),
            timestamp: 1_700_000_000_000,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "service": "login",
                "data": { "user": "client-rs", "timestamp": 1_700_000_000_000_i64 }
            })
        );
    }

    #[test]
    fn listing_requests_carry_only_timestamp() {
        let users = serde_json::to_value(Request::ListUsers { timestamp: 5 }).unwrap();
        let channels = serde_json::to_value(Request::ListChannels { timestamp: 6 }).unwrap();

        assert_eq!(users, json!({ "service": "users", "data": { "timestamp": 5 } }));
        assert_eq!(
            channels,
            json!({ "service": "channels", "data": { "timestamp": 6 } })
        );
    }

    #[test]
    fn create_channel_carries_channel_name() {
        let request = Request::CreateChannel {
            channel: "geral".to_string(),
            timestamp: 7,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["service"], "channel");
        assert_eq!(value["data"]["channel"], "geral");
        assert_eq!(value["data"]["timestamp"], 7);
    }

    #[test]
    fn timestamps_are_taken_at_construction() {
        let before = now_millis();
        let requests = [
            Request::login("alice"),
            Request::list_users(),
            Request::create_channel("geral"),
            Request::list_channels(),
        ];

        for request in &requests {
            assert!(request.timestamp() >= 0);
            assert!(request.timestamp() >= before);
        }
    }

    #[test]
    fn service_tag_matches_wire_name() {
        let request = Request::create_channel("bot-zone");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(request.service(), Service::Channel);
        assert_eq!(value["service"], request.service().as_str());
    }
}
