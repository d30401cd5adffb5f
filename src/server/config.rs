// Server configuration

#[derive(Clone)]
pub struct ServerConfig {
    pub version: String,
}
