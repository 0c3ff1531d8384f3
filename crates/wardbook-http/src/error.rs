/// Errors raised while building or annotating responses.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
	#[error("trigger can't be empty")]
	EmptyTrigger,

	#[error("header '{header}' holds invalid JSON: {source}")]
	InvalidTriggerHeader {
		header: &'static str,
		#[source]
		source: serde_json::Error,
	},

	#[error("malformed form body: {0}")]
	MalformedForm(#[from] serde_urlencoded::de::Error),
}

pub type Result<T> = std::result::Result<T, HttpError>;
