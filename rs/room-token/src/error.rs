#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to encode token: {0}")]
	Encode(jsonwebtoken::errors::Error),

	#[error("failed to decode token: {0}")]
	Decode(jsonwebtoken::errors::Error),

	#[error("unexpected content type: {0:?}")]
	ContentType(Option<String>),
}

pub type Result<T> = std::result::Result<T, Error>;
