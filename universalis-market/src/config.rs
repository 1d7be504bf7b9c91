/// Default root of the Universalis REST API.
pub const UNIVERSALIS_BASE_URL: &str = "https://universalis.app/api/v2";
/// Directory of data centers and their worlds, used to classify server names.
pub const SERVER_DIRECTORY_URL: &str = "https://xivapi.com/servers/dc";
pub const DEFAULT_USER_AGENT: &str = "universalis-market";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root every market endpoint is resolved against. A trailing `/` is ignored.
    pub base_url: String,
    /// Full URL of the data center -> worlds directory.
    pub server_directory_url: String,
    pub user_agent: String,
    /// When set, endpoints taking a world or data center name look the name up in the server
    /// directory first and skip the request if it is unknown. Turning this off saves one
    /// directory request per call.
    pub validate_server_names: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: UNIVERSALIS_BASE_URL.to_string(),
            server_directory_url: SERVER_DIRECTORY_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            validate_server_names: true,
        }
    }
}

impl ClientConfig {
    pub fn with_user_agent(user_agent: impl ToString) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            ..Default::default()
        }
    }
}
