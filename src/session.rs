use thiserror::Error;

use crate::common::{Reply, Request, Service};
use crate::network::{ClientError, ExchangeClient};

/// Identity and channel a session announces to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: String,
    pub channel: String,
}

impl Profile {
    pub fn client() -> Self {
        Self {
            user: "client-rs".to_string(),
            channel: "geral".to_string(),
        }
    }

    pub fn bot() -> Self {
        Self {
            user: "bot123".to_string(),
            channel: "bot-zone".to_string(),
        }
    }
}

/// A session step failed; later steps were never sent.
#[derive(Debug, Error)]
#[error("{step} request failed: {source}")]
pub struct SessionError {
    pub step: Service,
    pub source: ClientError,
}

/// Replies in the order their requests were sent.
#[derive(Debug)]
pub struct SessionReport {
    pub replies: Vec<Reply>,
}

/// The scripted login → users → channel → channels run.
pub struct ChatSession<'a> {
    client: &'a mut ExchangeClient,
    profile: Profile,
}

impl<'a> ChatSession<'a> {
    pub fn new(client: &'a mut ExchangeClient, profile: Profile) -> Self {
        Self { client, profile }
    }

    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        let mut replies = Vec::with_capacity(4);

        log::info!("Sending login for '{}'", self.profile.user);
        replies.push(self.send(Request::login(&self.profile.user))?);

        log::info!("Requesting user list");
        replies.push(self.send(Request::list_users())?);

        log::info!("Creating channel '{}'", self.profile.channel);
        replies.push(self.send(Request::create_channel(&self.profile.channel))?);

        log::info!("Requesting channel list");
        replies.push(self.send(Request::list_channels())?);

        Ok(SessionReport { replies })
    }

    // Requests are built by the caller right before this, so each timestamp
    // reflects when that step started.
    fn send(&mut self, request: Request) -> Result<Reply, SessionError> {
        let step = request.service();
        log::debug!("{step} request stamped {}", request.timestamp());

        let reply = self
            .client
            .call(&request)
            .map_err(|source| SessionError { step, source })?;
        log_reply(&reply);
        Ok(reply)
    }
}

fn log_reply(reply: &Reply) {
    match reply {
        Reply::Login(ack) => log::info!("Login reply: {}", ack.raw),
        Reply::Users(listing) => log::info!("Registered users: {}", listing.entries),
        Reply::Channel(ack) => log::info!("Channel creation reply: {}", ack.raw),
        Reply::Channels(listing) => log::info!("Available channels: {}", listing.entries),
    }

    if let Reply::Users(listing) | Reply::Channels(listing) = reply {
        log::debug!("Full {} reply: {}", reply.service(), listing.raw);
    }

    if let Reply::Login(ack) | Reply::Channel(ack) = reply {
        if ack.status.as_deref() == Some("erro") {
            log::warn!(
                "Server rejected {}: {}",
                reply.service(),
                ack.description.as_deref().unwrap_or("no description")
            );
        }
    }
}
