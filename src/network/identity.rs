use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

// * ClientIdentity defines the headers every API request carries.
pub struct ClientIdentity {
    pub user_agent: String,
    pub accept_language: &'static str,
}

impl ClientIdentity {
    // * Identity of this crate, versioned from Cargo metadata.
    pub fn default_profile() -> Self {
        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            accept_language: "pt-PT,pt;q=0.9",
        }
    }

    // * Builds the default header set for the API client.
    // * Values that are not valid header text are skipped.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(ua) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(self.accept_language));
        headers
    }
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self::default_profile()
    }
}
