//! Shared failure text

pub struct CommonMessages {
    pub auth_hint: &'static str,
    pub error_generic: &'static str,
    pub tls_hint: &'static str,
}

pub const COMMON_MESSAGES: CommonMessages = CommonMessages {
    auth_hint: "💡 Check the username and password used for {url}",
    error_generic: "❌ {error}",
    tls_hint: "💡 For self-signed certificates try --no-validate-certs",
};
