use std::time::Duration;

/// How long an exchange waits for its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeout {
    /// Block until the reply arrives.
    #[default]
    Infinite,
    Duration(Duration),
}

impl Timeout {
    /// `None` and `Some(0)` both mean no timeout.
    pub fn from_millis(millis: Option<u64>) -> Self {
        match millis {
            None | Some(0) => Timeout::Infinite,
            Some(ms) => Timeout::Duration(Duration::from_millis(ms)),
        }
    }

    /// Value for `ZMQ_RCVTIMEO`, where -1 blocks forever and 0 would not block
    /// at all, so sub-millisecond durations round up to 1.
    fn as_zmq_millis(self) -> i32 {
        match self {
            Timeout::Infinite => -1,
            Timeout::Duration(d) => i32::try_from(d.as_millis()).unwrap_or(i32::MAX).max(1),
        }
    }
}

/// Builds a REQ socket connected to `endpoint`.
///
/// ZeroMQ connects in the background, so this succeeds even when nobody is
/// listening yet. Only a malformed endpoint is reported here.
pub fn build_socket(
    context: &zmq::Context,
    endpoint: &str,
    reply_timeout: Timeout,
) -> Result<zmq::Socket, zmq::Error> {
    let socket = context.socket(zmq::REQ)?;
    // Drop unsent requests on close instead of blocking shutdown.
    socket.set_linger(0)?;
    socket.set_rcvtimeo(reply_timeout.as_zmq_millis())?;
    socket.connect(endpoint)?;
    Ok(socket)
}
