use std::time::Duration;

/// Settings for one negotiation attempt.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the signaling server; `/offer` or `/answer` is appended
    /// per message.
    pub signaling_url: String,
    /// STUN/TURN urls handed to the engine.
    pub ice_servers: Vec<String>,
    /// Upper bound on waiting for candidate gathering. The source protocol
    /// has none, so the default is unbounded.
    pub gathering_timeout: Option<Duration>,
    /// Reject signaling replies whose `type` is neither `offer` nor `answer`
    /// instead of defaulting them to answers.
    pub reject_unknown_kinds: bool,
}

impl SessionConfig {
    pub fn new(signaling_url: impl Into<String>) -> Self {
        Self {
            signaling_url: signaling_url.into(),
            ice_servers: Vec::new(),
            gathering_timeout: None,
            reject_unknown_kinds: false,
        }
    }

    pub fn with_gathering_timeout(mut self, timeout: Duration) -> Self {
        self.gathering_timeout = Some(timeout);
        self
    }
}
