#[derive(Debug)]
pub enum PredictionServiceError {
    Status(reqwest::StatusCode),
    Internal(String),
}

impl std::fmt::Display for PredictionServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PredictionServiceError::Status(code) => write!(f, "Unexpected status: {}", code),
            PredictionServiceError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}
