use thiserror::Error;

use crate::ids::PostId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("post {0} not found")]
    PostNotFound(PostId),
    #[error("commenter name must not be blank")]
    EmptyCommenterName,
    #[error("comment text must not be blank")]
    EmptyCommentText,
}
