use serde::Serialize;
use serde_json::Value;

use crate::common::{Reply, Request};

use super::error::ClientError;
use super::transport::{Timeout, build_socket};

/// Request/reply client over a single ZeroMQ REQ socket.
///
/// Exchanges strictly alternate: one request, then exactly one reply. The
/// `&mut self` receivers rule out overlapping exchanges, and a reply still
/// owed after a timeout blocks further requests.
pub struct ExchangeClient {
    // Closed before the context terminates.
    socket: zmq::Socket,
    _context: zmq::Context,
    endpoint: String,
    reply_timeout: Timeout,
    awaiting_reply: bool,
}

impl ExchangeClient {
    pub fn connect(endpoint: &str, reply_timeout: Timeout) -> Result<Self, ClientError> {
        let context = zmq::Context::new();
        let socket = build_socket(&context, endpoint, reply_timeout)?;
        log::debug!("REQ socket connecting to {endpoint} (reply timeout: {reply_timeout:?})");

        Ok(Self {
            socket,
            _context: context,
            endpoint: endpoint.to_string(),
            reply_timeout,
            awaiting_reply: false,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `request` as one JSON frame and waits for one JSON reply frame.
    pub fn exchange<T>(&mut self, request: &T) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        if self.awaiting_reply {
            return Err(ClientError::ReplyPending);
        }

        let frame = serde_json::to_vec(request).map_err(ClientError::Encode)?;
        log::debug!("-> {}", String::from_utf8_lossy(&frame));
        self.socket.send(frame.as_slice(), 0)?;
        self.awaiting_reply = true;

        let reply = match self.socket.recv_bytes(0) {
            Ok(bytes) => bytes,
            Err(zmq::Error::EAGAIN) => {
                return Err(match self.reply_timeout {
                    Timeout::Duration(limit) => ClientError::Timeout(limit),
                    Timeout::Infinite => ClientError::Transport(zmq::Error::EAGAIN),
                });
            }
            Err(err) => return Err(err.into()),
        };
        self.awaiting_reply = false;
        log::debug!("<- {}", String::from_utf8_lossy(&reply));

        serde_json::from_slice(&reply).map_err(ClientError::Decode)
    }

    /// [`exchange`](Self::exchange) with the reply decoded for the request's service.
    pub fn call(&mut self, request: &Request) -> Result<Reply, ClientError> {
        let raw = self.exchange(request)?;
        Ok(Reply::decode(request.service(), raw))
    }
}
