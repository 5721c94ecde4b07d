use serde::{Deserialize, Serialize};

/// A backend-managed document collection, known to the client only by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hub {
    pub name: String,
}

impl Hub {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Response body of `GET /hubs`
#[derive(Debug, Deserialize)]
pub(crate) struct HubList {
    pub hubs: Vec<Hub>,
}

/// Request body of `POST /hubs`
#[derive(Debug, Serialize)]
pub(crate) struct CreateHub<'a> {
    pub name: &'a str,
}

/// Response body of `POST /hubs`. Only the optional message is read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct HubCreated {
    #[serde(default)]
    pub message: Option<String>,
}
