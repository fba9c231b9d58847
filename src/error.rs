use std::io;
use thiserror::Error;

/// Error type for cacher operations.
#[derive(Error, Debug)]
pub enum CacherError {
    /// The initial dial to the cache service failed.
    #[error("dialing {addr}: {source}")]
    Connection {
        /// Address that was dialed.
        addr: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },

    /// IO error on the connection or the operator's terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error on the wire.
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The service rejected the call itself (unknown method, bad params).
    #[error("{0}")]
    Rpc(String),

    /// A response envelope did not belong to the request just sent.
    #[error("unexpected response: expected id {expected}, got {got}")]
    UnexpectedResponse {
        /// Sequence number of the outstanding request.
        expected: u64,
        /// Sequence number carried by the response.
        got: u64,
    },

    /// The service closed the connection.
    #[error("connection is shut down")]
    Shutdown,

    /// The call went through but the service answered with `ok == false`.
    #[error("{0}")]
    Application(String),

    /// A command was missing required arguments.
    #[error("Too few arguments")]
    InvalidArguments,
}

impl CacherError {
    /// Returns `true` if the error happened in the RPC transport rather than
    /// in the service or in local validation.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CacherError::Io(_)
                | CacherError::Serde(_)
                | CacherError::Rpc(_)
                | CacherError::UnexpectedResponse { .. }
                | CacherError::Shutdown
        )
    }
}

/// Result type alias for cacher operations.
pub type Result<T> = std::result::Result<T, CacherError>;
