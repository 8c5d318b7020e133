/// WebRTC configuration for one peer link.
#[derive(Clone)]
pub struct LinkConfig {
    pub ice_servers: Vec<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec!["stun:stun.l.google.com:19302".to_owned()],
        }
    }
}
