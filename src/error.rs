use gift_draw::DrawError;
use log::warn;
use rocket::{http::Status, response::Responder};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Draw(#[from] DrawError),
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("{1}")]
    Status(Status, String),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        warn!("{self}");
        Err(match self {
            // Exhausting the attempt budget is not the operator's fault;
            // the exchange itself is (or appears) unsatisfiable.
            Self::Draw(DrawError::Infeasible { .. }) => Status::UnprocessableEntity,
            Self::Draw(_) => Status::BadRequest,
            Self::Jwt(_) => Status::Unauthorized,
            Self::Status(status, _) => status,
        })
    }
}
