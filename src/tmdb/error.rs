use json::JsonValue;

#[derive(Debug)]
/// An unsuccessful response from TMDB
pub enum TmdbError {
    /// The response carried TMDB's error object
    API {
        status: u16,
        status_code: Option<i64>,
        status_message: String,
    },
    /// The response body was not an error object
    HTTP { status: u16 },
}

impl TmdbError {
    /// Build an error from a non-success response body
    pub fn from_response(status: u16, body: &JsonValue) -> Self {
        match body["status_message"].as_str() {
            Some(msg) => Self::API {
                status,
                status_code: body["status_code"].as_i64(),
                status_message: msg.to_owned(),
            },
            None => Self::HTTP { status },
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::API { status, .. } => *status,
            Self::HTTP { status } => *status,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }
}

impl std::fmt::Display for TmdbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::API {
                status,
                status_code,
                status_message,
            } => {
                write!(f, "{} (HTTP {}", status_message, status)?;
                if let Some(code) = status_code {
                    write!(f, ", TMDB code {}", code)?;
                }
                write!(f, ")")
            }
            Self::HTTP { status } => write!(f, "HTTP {}", status),
        }
    }
}

impl std::error::Error for TmdbError {}

#[test]
fn test_tmdb_error() {
    let e = TmdbError::from_response(
        404,
        &json::object! {
            "success": false,
            "status_code": 34,
            "status_message": "The resource you requested could not be found.",
        },
    );
    assert!(e.is_not_found());
    assert_eq!(
        e.to_string(),
        "The resource you requested could not be found. (HTTP 404, TMDB code 34)"
    );
    let e = TmdbError::from_response(502, &JsonValue::Null);
    assert!(!e.is_not_found());
    assert_eq!(e.to_string(), "HTTP 502");
}
