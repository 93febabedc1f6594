use thiserror::Error;

use crate::database::record::RecordError;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("Column '{0}' cannot be used as a filter")]
    NotFilterable(String),

    #[error("Invalid ORDER clause: {0}")]
    InvalidOrder(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error(transparent)]
    InvalidValue(#[from] RecordError),
}
