//! Deterministic proxy names
//!
//! A mapped type name always maps to the same proxy type name, artifact file name and
//! wrapper identifier, for a given proxy namespace.

/// Marker segment separating the proxy namespace from the real type name
pub const PROXY_MARKER: &str = "__CG__";

/// Compute the proxy type name of a mapped type
///
/// The type name is normalized first, so `Doc\User`, `\Doc\User` and `Doc::User` name the
/// same proxy type.
///
/// # Examples
///
/// ```
/// use couchdb_odm_codegen::naming::proxy_type_name;
///
/// assert_eq!(
///     proxy_type_name("Doc\\User", "ProxyNS"),
///     "ProxyNS\\__CG__\\Doc\\User"
/// );
/// assert_eq!(
///     proxy_type_name("\\Doc::User", "\\ProxyNS\\"),
///     "ProxyNS\\__CG__\\Doc\\User"
/// );
/// ```
pub fn proxy_type_name(type_name: &str, namespace: &str) -> String {
	format!(
		"{}\\{}\\{}",
		namespace.trim_matches('\\'),
		PROXY_MARKER,
		canonical_type_name(type_name)
	)
}

/// Mapped type name a proxy type name was computed from, in normalized form
///
/// ```
/// use couchdb_odm_codegen::naming::proxied_type_name;
///
/// assert_eq!(proxied_type_name("ProxyNS\\__CG__\\Doc\\User"), Some("Doc\\User"));
/// assert_eq!(proxied_type_name("Doc\\User"), None);
/// ```
pub fn proxied_type_name(proxy_type_name: &str) -> Option<&str> {
	proxy_type_name
		.split_once(&format!("\\{}\\", PROXY_MARKER))
		.map(|(_, type_name)| type_name)
}

/// Split a type name into its path segments
///
/// Both `\` and `::` separate segments.
pub fn segments(type_name: &str) -> Vec<&str> {
	type_name
		.split('\\')
		.flat_map(|part| part.split("::"))
		.filter(|segment| !segment.is_empty())
		.collect()
}

/// Normalized form of a type name: its segments joined with `\`
pub fn canonical_type_name(type_name: &str) -> String {
	segments(type_name).join("\\")
}

/// File name of the generated artifact for a mapped type
///
/// Segments are joined with `.`; a `.` or `%` inside a segment is percent-escaped so
/// distinct type names never share a file.
///
/// # Examples
///
/// ```
/// use couchdb_odm_codegen::naming::proxy_file_name;
///
/// assert_eq!(proxy_file_name("Doc\\User"), "__CG__Doc.User.rs");
/// assert_eq!(proxy_file_name("blog::Article"), "__CG__blog.Article.rs");
/// assert_eq!(proxy_file_name("Doc.User"), "__CG__Doc%2EUser.rs");
/// ```
pub fn proxy_file_name(type_name: &str) -> String {
	let escaped: Vec<String> = segments(type_name)
		.into_iter()
		.map(|segment| segment.replace('%', "%25").replace('.', "%2E"))
		.collect();
	format!("{}{}.rs", PROXY_MARKER, escaped.join("."))
}

/// Identifier of the generated wrapper struct
///
/// Every segment contributes, capitalized, so types sharing a last segment get distinct
/// wrappers. Characters not allowed in an identifier become `_`.
///
/// # Examples
///
/// ```
/// use couchdb_odm_codegen::naming::proxy_struct_name;
///
/// assert_eq!(proxy_struct_name("Doc\\User"), "DocUserProxy");
/// assert_eq!(proxy_struct_name("blog::Article"), "BlogArticleProxy");
/// assert_eq!(proxy_struct_name("Doc.User"), "Doc_UserProxy");
/// ```
pub fn proxy_struct_name(type_name: &str) -> String {
	let mut name = String::new();
	for segment in segments(type_name) {
		let mut chars = segment.chars();
		if let Some(first) = chars.next() {
			name.extend(first.to_uppercase());
			name.extend(
				chars.map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' }),
			);
		}
	}
	if name.is_empty() {
		name.push_str("Document");
	}
	name.push_str("Proxy");
	name
}
