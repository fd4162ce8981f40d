use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use failure::Fail;
use std::fmt;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "database error: {}", _0)]
    Database(#[cause] diesel::result::Error),
    #[fail(display = "connection pool error: {}", _0)]
    Pool(#[cause] r2d2::Error),
    #[fail(display = "question {} not found", _0)]
    UnknownQuestion(i32),
    #[fail(display = "answer to {} is not an integer: {:?}", field, value)]
    InvalidNumber { field: String, value: String },
    #[fail(display = "unable to render page: {}", _0)]
    Render(#[cause] fmt::Error),
    #[fail(display = "blocking task canceled")]
    Canceled,
    /// Server-side failure whose detail stays in the log.
    #[fail(display = "Internal server error")]
    Opaque(Box<Error>),
}

impl Error {
    /// Hides the detail of server-side failures from the client. Client
    /// errors pass through untouched.
    pub fn opaque(self) -> Self {
        match self {
            e @ Error::InvalidNumber { .. } | e @ Error::Opaque(_) => e,
            e => Error::Opaque(Box::new(e)),
        }
    }

    fn detail(&self) -> &Error {
        match self {
            Error::Opaque(inner) => inner,
            e => e,
        }
    }
}

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        Error::Database(e)
    }
}

impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::Pool(e)
    }
}

impl From<fmt::Error> for Error {
    fn from(e: fmt::Error) -> Self {
        Error::Render(e)
    }
}

impl From<BlockingError<Error>> for Error {
    fn from(e: BlockingError<Error>) -> Self {
        match e {
            BlockingError::Error(e) => e,
            BlockingError::Canceled => Error::Canceled,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidNumber { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self.detail());
        } else {
            log::warn!("{}", self.detail());
        }
        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_hides_server_errors() {
        let err = Error::UnknownQuestion(7).opaque();
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.detail().to_string(), "question 7 not found");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn opaque_keeps_client_errors() {
        let err = Error::InvalidNumber {
            field: String::from("answer1"),
            value: String::from("lots"),
        }
        .opaque();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "answer to answer1 is not an integer: \"lots\""
        );
    }

    #[test]
    fn blocking_errors_unwrap() {
        let err: Error = BlockingError::Error(Error::UnknownQuestion(3)).into();
        assert!(matches!(err, Error::UnknownQuestion(3)));
        let err: Error = BlockingError::<Error>::Canceled.into();
        assert!(matches!(err, Error::Canceled));
    }
}
