use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod models {
    use super::*;

    /// A catalog entry as returned by the list operation.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GameView {
        pub id: i32,
        pub title: String,
        pub genre: String,
        pub rating: f64,
        pub image: Option<String>,
        pub trailer: String,
        pub description: String,
        pub release_date: NaiveDate,
    }

    /// Body of a create request. Every field is optional at this level so
    /// that a missing key is reported as a validation failure rather than
    /// a parse failure.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateGamePayload {
        pub title: Option<String>,
        pub genre: Option<String>,
        pub rating: Option<f64>,
        pub description: Option<String>,
        pub release_date: Option<NaiveDate>,
        pub image: Option<String>,
        pub image_file: Option<String>,
        pub image_type: Option<String>,
        pub trailer: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CreatedGame {
        pub id: i32,
        pub message: String,
    }
}

pub mod messages {
    use super::*;

    pub const GAME_CREATED: &str = "Game created";
    pub const GAME_DELETED: &str = "Game deleted";
    pub const GAME_ID_REQUIRED: &str = "Game ID required";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct MessageBody {
        pub message: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub error: String,
    }

    impl MessageBody {
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
            }
        }
    }

    impl ErrorBody {
        pub fn new(error: impl Into<String>) -> Self {
            Self {
                error: error.into(),
            }
        }
    }
}

pub use messages::*;
pub use models::*;
