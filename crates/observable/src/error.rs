use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("item not found in collection")]
    ItemNotFound,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
