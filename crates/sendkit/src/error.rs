//! Error types for draft composition and delivery.

use crate::validate::Scope;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing or sending a draft.
#[derive(Debug, Error)]
pub enum Error {
    /// An address failed the validator registered for its scope.
    #[error("address {address} failed validation for scope {scope}")]
    InvalidAddress {
        /// The offending address.
        address: String,
        /// The scope whose validator rejected it.
        scope: Scope,
    },

    /// Attachment target is missing or not a regular file.
    #[error("cannot attach {path:?}: not a regular file")]
    AttachmentNotFile {
        /// The path that failed to resolve to a regular file.
        path: PathBuf,
    },

    /// Admitting the attachment would exceed the configured size budget.
    #[error("cannot attach {path:?}: combined attachment size would exceed the limit of {limit} bytes")]
    AttachmentBudget {
        /// The attachment that did not fit.
        path: PathBuf,
        /// The configured combined size limit.
        limit: u64,
    },

    /// Send attempted with no direct recipients.
    #[error("cannot send: there is no one to receive the message")]
    EmptyRecipients,

    /// The relay refused delivery to at least one recipient.
    #[error("message to {address} failed (code {code}): {reason}")]
    Send {
        /// One refused recipient.
        address: String,
        /// Reply code reported by the relay.
        code: u16,
        /// Reason reported by the relay.
        reason: String,
    },

    /// An unrecognized validator scope name was supplied.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Authentication with the relay failed, or no session is established.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// A sender is already assigned to this draft.
    #[error("a sender is already assigned to this draft")]
    AlreadyLoggedIn,

    /// The body content is unusable for the selected content kind.
    #[error("body error: {0}")]
    Body(String),

    /// Message assembly failed.
    #[error("MIME error: {0}")]
    Mime(#[from] sendkit_mime::Error),

    /// Transport-level failure (connection, protocol, or refused command).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] sendkit_smtp::Error),

    /// I/O error while reading attachment or body content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
