//! Mapped document types used by the integration tests

use couchdb_odm::proxy::{Document, ProxyError, Result, Value};

/// Default excerpt length of [`Article::excerpt`]
pub const EXCERPT_LENGTH: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
	name: String,
	email: Option<String>,
	tags: Vec<String>,
	visits: u32,
}

impl User {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	pub fn collection() -> &'static str {
		"users"
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn email(&self) -> Option<String> {
		self.normalized_email()
	}

	pub fn rename(&mut self, name: String) {
		self.name = name;
	}

	pub fn greet(&self, greeting: String, shout: bool) -> String {
		let message = format!("{}, {}", greeting, self.name);
		if shout {
			message.to_uppercase()
		} else {
			message
		}
	}

	/// Describe the user, recording the call in `log`
	pub fn summarize(
		&self,
		prefix: String,
		extra: Vec<Value>,
		log: &mut Vec<String>,
		limit: usize,
	) -> String {
		log.push(format!("summarized {}", self.name));
		let tags: Vec<&str> = self.tags.iter().take(limit).map(String::as_str).collect();
		format!(
			"{}{} [{}] +{}",
			prefix,
			self.name,
			tags.join(", "),
			extra.len()
		)
	}

	/// Add a tag, returning the tag count
	pub fn tag(&mut self, tag: Value) -> usize {
		let tag = match tag {
			Value::String(tag) => tag,
			other => other.to_string(),
		};
		self.tags.push(tag);
		self.tags.len()
	}

	pub fn merge_tags(&self, extra: Vec<String>) -> Vec<String> {
		let mut tags = self.tags.clone();
		tags.extend(extra);
		tags
	}

	pub fn visits_mut(&mut self) -> &mut u32 {
		&mut self.visits
	}

	fn normalized_email(&self) -> Option<String> {
		self.email.as_ref().map(|email| email.trim().to_lowercase())
	}

	pub fn revision(&self) -> u32 {
		self.visits + 1
	}
}

impl Document for User {
	const TYPE_NAME: &'static str = "Doc\\User";
	const FIELDS: &'static [&'static str] = &["name", "email", "tags", "visits"];

	fn field(&self, name: &str) -> Option<Value> {
		match name {
			"name" => Some(Value::from(self.name.clone())),
			"email" => Some(self.email.clone().map_or(Value::Null, Value::from)),
			"tags" => Some(Value::from(self.tags.clone())),
			"visits" => Some(Value::from(self.visits)),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
		match name {
			"name" => self.name = serde_json::from_value(value)?,
			"email" => self.email = serde_json::from_value(value)?,
			"tags" => self.tags = serde_json::from_value(value)?,
			"visits" => self.visits = serde_json::from_value(value)?,
			_ => return Err(ProxyError::unknown_field(Self::TYPE_NAME, name)),
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
	title: String,
	body: String,
	author: String,
	published_at: Option<String>,
}

impl Article {
	pub fn title(&self) -> String {
		self.title.clone()
	}

	pub fn word_count(&self) -> usize {
		self.body.split_whitespace().count()
	}

	pub fn reading_minutes(&self, words_per_minute: f64) -> f64 {
		self.word_count() as f64 / words_per_minute
	}

	/// Mark the article published, returning whether it was a draft
	pub fn publish(&mut self, at: Option<String>) -> bool {
		let was_draft = self.published_at.is_none();
		self.published_at = Some(at.unwrap_or_else(|| "now".to_string()));
		was_draft
	}

	pub fn excerpt(&self, max_chars: usize) -> String {
		self.body.chars().take(max_chars).collect()
	}

	pub fn published_at(&self) -> Option<&str> {
		self.published_at.as_deref()
	}
}

impl Document for Article {
	const TYPE_NAME: &'static str = "Blog\\Article";
	const FIELDS: &'static [&'static str] = &["title", "body", "author", "published_at"];

	fn field(&self, name: &str) -> Option<Value> {
		match name {
			"title" => Some(Value::from(self.title.clone())),
			"body" => Some(Value::from(self.body.clone())),
			"author" => Some(Value::from(self.author.clone())),
			"published_at" => Some(self.published_at.clone().map_or(Value::Null, Value::from)),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
		match name {
			"title" => self.title = serde_json::from_value(value)?,
			"body" => self.body = serde_json::from_value(value)?,
			"author" => self.author = serde_json::from_value(value)?,
			"published_at" => self.published_at = serde_json::from_value(value)?,
			_ => return Err(ProxyError::unknown_field(Self::TYPE_NAME, name)),
		}
		Ok(())
	}

	// The body is reloaded from storage rather than serialized. Untitled drafts keep
	// every field.
	fn sleep(&self) -> Option<Vec<String>> {
		if self.title.is_empty() {
			return None;
		}
		Some(vec!["title".to_string(), "author".to_string()])
	}
}

/// Mapping base shared by documents with a creation timestamp
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Base {
	pub created_at: Option<String>,
}

impl Document for Base {
	const TYPE_NAME: &'static str = "Doc\\Base";
	const FIELDS: &'static [&'static str] = &["created_at"];

	fn field(&self, name: &str) -> Option<Value> {
		match name {
			"created_at" => Some(self.created_at.clone().map_or(Value::Null, Value::from)),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
		match name {
			"created_at" => self.created_at = serde_json::from_value(value)?,
			_ => return Err(ProxyError::unknown_field(Self::TYPE_NAME, name)),
		}
		Ok(())
	}
}
