use crate::error::LanesError;

pub type LanesResult<T> = Result<T, LanesError>;
