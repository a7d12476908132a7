//! Scripted REP peer for exercising the client over loopback TCP.

use std::thread::{self, JoinHandle};

use serde_json::Value;

pub enum StubReply {
    Send(Vec<u8>),
    /// Take the request and never answer it.
    Silent,
}

impl StubReply {
    pub fn text(body: &str) -> Self {
        StubReply::Send(body.as_bytes().to_vec())
    }
}

pub struct StubPeer {
    pub endpoint: String,
    handle: JoinHandle<Vec<Value>>,
}

impl StubPeer {
    /// Binds an ephemeral port and answers one request per script entry.
    pub fn spawn(script: Vec<StubReply>) -> Self {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::REP).unwrap();
        socket.set_rcvtimeo(5_000).unwrap();
        socket.bind("tcp://127.0.0.1:*").unwrap();
        let endpoint = socket.get_last_endpoint().unwrap().unwrap();

        let handle = thread::spawn(move || {
            let received = serve(&socket, script);
            drop(socket);
            drop(context);
            received
        });

        Self { endpoint, handle }
    }

    /// Waits for the peer to stop and returns every request it received, in order.
    pub fn finish(self) -> Vec<Value> {
        self.handle.join().unwrap()
    }
}

fn serve(socket: &zmq::Socket, script: Vec<StubReply>) -> Vec<Value> {
    let mut received = Vec::new();

    for step in script {
        let Ok(frame) = socket.recv_bytes(0) else {
            return received;
        };
        received.push(serde_json::from_slice(&frame).unwrap_or(Value::Null));

        match step {
            StubReply::Send(reply) => socket.send(reply.as_slice(), 0).unwrap(),
            StubReply::Silent => return received,
        }
    }

    // Anything arriving after the script ran out is recorded too.
    socket.set_rcvtimeo(300).unwrap();
    if let Ok(frame) = socket.recv_bytes(0) {
        received.push(serde_json::from_slice(&frame).unwrap_or(Value::Null));
    }
    received
}
