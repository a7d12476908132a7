use serde_json::Value;

use super::requests::Service;

/// Reply to `login` or `channel`.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement {
    /// `data.status`, the server answers `"sucesso"` or `"erro"`.
    pub status: Option<String>,
    /// `data.description`, set when the server rejects the request.
    pub description: Option<String>,
    pub raw: Value,
}

/// Reply to `users` or `channels`.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// `data.users` or `data.channels`, `Value::Null` when the server left it out.
    pub entries: Value,
    pub raw: Value,
}

/// Typed view of a server reply, chosen by the request that produced it.
///
/// Decoding never rejects valid JSON: fields the server conventionally sends
/// are picked out when present and the full document stays in `raw`.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Login(Acknowledgement),
    Users(Listing),
    Channel(Acknowledgement),
    Channels(Listing),
}

impl Reply {
    pub fn decode(service: Service, raw: Value) -> Self {
        match service {
            Service::Login => Reply::Login(acknowledgement(raw)),
            Service::Users => Reply::Users(listing(raw, "users")),
            Service::Channel => Reply::Channel(acknowledgement(raw)),
            Service::Channels => Reply::Channels(listing(raw, "channels")),
        }
    }

    pub fn service(&self) -> Service {
        match self {
            Reply::Login(_) => Service::Login,
            Reply::Users(_) => Service::Users,
            Reply::Channel(_) => Service::Channel,
            Reply::Channels(_) => Service::Channels,
        }
    }
}

fn data_field<'a>(raw: &'a Value, field: &str) -> Option<&'a Value> {
    raw.get("data").and_then(|data| data.get(field))
}

fn acknowledgement(raw: Value) -> Acknowledgement {
    let text = |field| data_field(&raw, field).and_then(Value::as_str).map(str::to_owned);
    Acknowledgement {
        status: text("status"),
        description: text("description"),
        raw,
    }
}

fn listing(raw: Value, field: &str) -> Listing {
    Listing {
        entries: data_field(&raw, field).cloned().unwrap_or(Value::Null),
        raw,
    }
}
