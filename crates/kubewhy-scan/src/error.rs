#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("{0} is not installed or not on PATH")]
    NotFound(String),

    #[error("{tool} failed: {stderr}")]
    Exec {
        tool: String,
        stderr: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("failed to parse {tool} output: {source}")]
    Parse {
        tool: String,
        source: serde_json::Error,
    },

    #[error("{0} was cancelled")]
    Cancelled(String),

    #[error("no canned result left for call {0}")]
    Exhausted(usize),
}

impl ScanError {
    pub(crate) fn exec(tool: &str, stderr: &[u8]) -> Self {
        ScanError::Exec {
            tool: tool.to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
            source: None,
        }
    }
}
