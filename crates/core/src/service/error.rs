use thiserror::Error;

/// Failure talking to the annotation service.
#[derive(Debug, Error)]
pub enum ServiceError {
	#[error("invalid service url `{url}`: {reason}")]
	InvalidUrl { url: String, reason: String },
	#[error("request to `{endpoint}` failed: {source}")]
	Request {
		endpoint: &'static str,
		#[source]
		source: reqwest::Error,
	},
	#[error("`{endpoint}` answered with status {status}")]
	Status { endpoint: &'static str, status: u16 },
	#[error("annotation {annotation_id} was not found in manuscript {manuscript_id}")]
	AnnotationNotFound {
		annotation_id: String,
		manuscript_id: String,
	},
	#[error("template {template_id} was not found")]
	TemplateNotFound { template_id: String },
	#[error("the service refused to delete annotation {annotation_id}")]
	DeleteRefused { annotation_id: String },
}

impl ServiceError {
	/// One line suitable for the status bar.
	#[must_use]
	pub fn summary(&self) -> String {
		match self {
			ServiceError::Request { source, .. } if source.is_timeout() => {
				"The annotation service timed out.".to_string()
			}
			ServiceError::Request { source, .. } if source.is_connect() => {
				"Could not reach the annotation service.".to_string()
			}
			ServiceError::Request { source, .. } if source.is_decode() => {
				"The annotation service sent an unexpected response.".to_string()
			}
			other => other.to_string(),
		}
	}
}
