use std::time::Duration;

use log::debug;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{AnnotationService, ServiceError, ServiceResult};
use crate::annotation::{Annotation, AnnotationResult, Manuscript, Template};
use crate::filter::{AnnotationFilter, BulkChanges};
use crate::verse::Verse;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

const USER_AGENT: &str = concat!("ayat/", env!("CARGO_PKG_VERSION"));

/// Blocking JSON client for the annotation service.
#[derive(Debug, Clone)]
pub struct HttpService {
	client: Client,
	base: Url,
}

#[derive(serde::Deserialize)]
struct NextTemplateId {
	#[serde(rename = "nextId", deserialize_with = "crate::annotation::string_or_number")]
	next_id: String,
}

impl HttpService {
	pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
		let base = normalize_base(base_url)?;
		let mut builder = Client::builder().timeout(timeout).user_agent(USER_AGENT);
		if is_loopback(&base) {
			builder = builder.no_proxy();
		}
		let client = builder.build().map_err(|source| ServiceError::Request {
			endpoint: "client",
			source,
		})?;
		Ok(Self { client, base })
	}

	#[must_use]
	pub fn base_url(&self) -> &Url {
		&self.base
	}

	fn endpoint(&self, name: &'static str) -> ServiceResult<Url> {
		self.base.join(name).map_err(|err| ServiceError::InvalidUrl {
			url: format!("{}{name}", self.base),
			reason: err.to_string(),
		})
	}

	fn get<T: DeserializeOwned>(&self, name: &'static str, query: &[(&str, &str)]) -> ServiceResult<T> {
		let url = self.endpoint(name)?;
		debug!("GET {url} {query:?}");
		let response = self
			.client
			.get(url)
			.query(query)
			.send()
			.map_err(|source| ServiceError::Request {
				endpoint: name,
				source,
			})?;
		decode(name, check_status(name, response)?)
	}

	fn post<B: Serialize + ?Sized>(&self, name: &'static str, body: &B) -> ServiceResult<Response> {
		let url = self.endpoint(name)?;
		debug!("POST {url}");
		let response = self
			.client
			.post(url)
			.json(body)
			.send()
			.map_err(|source| ServiceError::Request {
				endpoint: name,
				source,
			})?;
		check_status(name, response)
	}
}

fn check_status(name: &'static str, response: Response) -> ServiceResult<Response> {
	let status = response.status();
	if status.is_success() {
		Ok(response)
	} else {
		Err(ServiceError::Status {
			endpoint: name,
			status: status.as_u16(),
		})
	}
}

fn decode<T: DeserializeOwned>(name: &'static str, response: Response) -> ServiceResult<T> {
	response.json().map_err(|source| ServiceError::Request {
		endpoint: name,
		source,
	})
}

/// Endpoints are joined onto the base, so it must end with `/`.
fn normalize_base(base_url: &str) -> ServiceResult<Url> {
	let mut url = Url::parse(base_url.trim()).map_err(|err| ServiceError::InvalidUrl {
		url: base_url.to_string(),
		reason: err.to_string(),
	})?;
	if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
		return Err(ServiceError::InvalidUrl {
			url: base_url.to_string(),
			reason: "expected an http or https url".to_string(),
		});
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());
		url.set_path(&path);
	}
	Ok(url)
}

fn is_loopback(url: &Url) -> bool {
	matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
}

impl AnnotationService for HttpService {
	fn search_verses(&self, query: &str) -> ServiceResult<Vec<Verse>> {
		self.get("search_verse", &[("query", query)])
	}

	fn next_verse(&self, current: &str) -> ServiceResult<Option<Verse>> {
		self.get("selectNextVerse", &[("current", current)])
	}

	fn previous_verse(&self, current: &str) -> ServiceResult<Option<Verse>> {
		self.get("selectPreviousVerse", &[("current", current)])
	}

	fn manuscripts(&self) -> ServiceResult<Vec<Manuscript>> {
		self.get("get_manuscripts", &[])
	}

	fn annotations(&self, verse_key: &str) -> ServiceResult<Vec<AnnotationResult>> {
		self.get("get_annotations", &[("query", verse_key)])
	}

	fn save_annotation(&mut self, annotation: &Annotation) -> ServiceResult<()> {
		self.post("save_annotation", annotation).map(drop)
	}

	fn update_annotation(&mut self, annotation: &Annotation) -> ServiceResult<()> {
		self.post("update_annotation", annotation).map(drop)
	}

	fn delete_annotation(&mut self, annotation_id: &str, manuscript_id: &str) -> ServiceResult<bool> {
		self.get(
			"delete_annotation",
			&[("a_id", annotation_id), ("m_id", manuscript_id)],
		)
	}

	fn templates(&self, manuscript_id: &str, query: &str, recent: bool) -> ServiceResult<Vec<Template>> {
		let mut params = vec![("manuscript", manuscript_id), ("query", query)];
		if recent {
			params.push(("recent", "true"));
		}
		self.get("get_template_suggestions", &params)
	}

	fn increment_template_popularity(&mut self, template_id: &str) -> ServiceResult<()> {
		self.post(
			"increment_template_popularity",
			&json!({ "template_id": template_id }),
		)
		.map(drop)
	}

	fn save_template(&mut self, template: &Template) -> ServiceResult<()> {
		self.post("save_template", template).map(drop)
	}

	fn next_template_id(&self) -> ServiceResult<String> {
		let reply: NextTemplateId = self.get("get_next_template_id", &[])?;
		Ok(reply.next_id)
	}

	fn languages(&self, manuscript_id: &str) -> ServiceResult<Vec<String>> {
		self.get("get_languages", &[("manuscript", manuscript_id)])
	}

	fn annotation_types(&self, manuscript_id: &str) -> ServiceResult<Vec<String>> {
		self.get("get_annotation_types", &[("manuscript", manuscript_id)])
	}

	fn filter_annotations(&self, filter: &AnnotationFilter) -> ServiceResult<Vec<Annotation>> {
		let response = self.post("filter_annotations", filter)?;
		decode("filter_annotations", response)
	}

	fn save_annotations(&mut self, changes: &BulkChanges) -> ServiceResult<()> {
		self.post("save_annotations", changes).map(drop)
	}
}
