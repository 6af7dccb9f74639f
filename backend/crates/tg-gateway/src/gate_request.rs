/// Transport-neutral view of the request fields the gate reads
#[derive(Debug, Clone, Default)]
pub struct GateRequest {
    /// `Host` header value
    pub host: Option<String>,
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
    /// Client identity for rate limiting (peer IP or forwarded address)
    pub client: String,
    pub request_id: String,
}

impl GateRequest {
    pub fn new(host: Option<&str>, authorization: Option<&str>, client: &str) -> Self {
        Self {
            host: host.map(str::to_string),
            authorization: authorization.map(str::to_string),
            client: client.to_string(),
            request_id: String::new(),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }
}
