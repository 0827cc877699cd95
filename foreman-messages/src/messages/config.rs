//! Connection configuration messages

pub struct ConfigMessages {
    pub args_file_invalid: &'static str,
    pub invalid_bool: &'static str,
    pub invalid_server_url: &'static str,
    pub invalid_timeout: &'static str,
    pub missing_credentials: &'static str,
    pub missing_server_url: &'static str,
}

pub const CONFIG_MESSAGES: ConfigMessages = ConfigMessages {
    args_file_invalid: "Cannot use argument file {path}: {error}",
    invalid_bool: "Invalid boolean '{value}' in {source}",
    invalid_server_url: "Invalid server URL '{url}': {error}",
    invalid_timeout: "Invalid timeout '{value}' in {source}",
    missing_credentials: "No credentials configured. Pass --username and --password, or set FOREMAN_USERNAME and FOREMAN_PASSWORD",
    missing_server_url: "No server URL configured. Pass --server-url, set FOREMAN_SERVER_URL, or add server_url to {path}",
};
