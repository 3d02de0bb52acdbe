use std::collections::HashMap;
use std::fmt;

use axum::response::{IntoResponse, Response};
use taal_core::I18nError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::resp::code::Code;
use crate::resp::r::R;

#[derive(Error)]
pub enum E {
    #[error("{0}")]
    Code(i32),
    #[error("{0}")]
    Msg(i32, HashMap<&'static str, String>),
    #[error("{0}")]
    Sys(#[from] anyhow::Error),
    #[error("{0}")]
    Val(#[from] ValidationErrors),
}

impl E {
    pub fn msg(code: Code, key: &'static str, value: impl Into<String>) -> Self {
        E::Msg(code.as_i32(), HashMap::from([(key, value.into())]))
    }
}

impl fmt::Debug for E {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            E::Code(c) => write!(f, "E({c})"),
            E::Msg(c, p) => write!(f, "E({c}, {p:?})"),
            E::Sys(e) => write!(f, "{e:?}"),
            E::Val(e) => write!(f, "{e:?}"),
        }
    }
}

impl From<I18nError> for E {
    fn from(err: I18nError) -> Self {
        match err {
            I18nError::InvalidLanguage(language) | I18nError::UnsupportedLanguage(language) => {
                E::msg(Code::UnsupportedLanguage, "language", language)
            }
            other => E::Sys(other.into()),
        }
    }
}

impl IntoResponse for E {
    fn into_response(self) -> Response {
        R::<()>::err(self).into_response()
    }
}
