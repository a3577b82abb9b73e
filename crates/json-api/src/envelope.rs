//! Uniform JSON response envelope.
//!
//! Every product response, successful or not, is rendered as
//! `{"status": <http code>, "message": "...", "data": ...}`. `data` is omitted
//! when there is no payload.

use salvo::{
    http::StatusCode,
    prelude::{Json, Response, Scribe},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use catalog_app::products::ProductsServiceError;

const SUCCESS_MESSAGE: &str = "success";
const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Wire shape shared by success and error responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// A successful response carrying an optional payload.
#[derive(Debug)]
pub(crate) struct Reply<T> {
    status: StatusCode,
    message: String,
    data: Option<T>,
}

impl<T> Reply<T> {
    /// `200 OK` with the given payload.
    pub(crate) fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: SUCCESS_MESSAGE.to_owned(),
            data: Some(data),
        }
    }

    /// `201 Created` with the given payload.
    pub(crate) fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: SUCCESS_MESSAGE.to_owned(),
            data: Some(data),
        }
    }
}

impl Reply<()> {
    /// `200 OK` with a message and no payload.
    pub(crate) fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data: None,
        }
    }
}

impl<T> Scribe for Reply<T>
where
    T: Serialize + Send,
{
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(Envelope {
            status: self.status.as_u16(),
            message: self.message,
            data: self.data,
        }));
    }
}

/// An error rendered through the envelope.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Generic 500. The cause is expected to have been logged already.
    pub(crate) fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(Envelope::<()> {
            status: self.status.as_u16(),
            message: self.message,
            data: None,
        }));
    }
}

impl From<ProductsServiceError> for ApiError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::not_found("product not found"),
            ProductsServiceError::InvalidPrice => {
                Self::bad_request(ProductsServiceError::InvalidPrice.to_string())
            }
            ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
                Self::bad_request("invalid product payload")
            }
            ProductsServiceError::Sql(source) => {
                error!("product storage failure: {source}");

                Self::internal()
            }
        }
    }
}
