//! Errors raised while loading graph data from the host page.

use thiserror::Error;

/// Why graph data could not be loaded.
#[derive(Debug, Error)]
pub enum GraphDataError {
	/// No `window` or `document` (not running in a browser).
	#[error("no browser document available")]
	NoDocument,
	/// The page has no element with the expected id.
	#[error("no element with id `{0}`")]
	MissingElement(String),
	/// The element exists but is not a `<script>`.
	#[error("element `{0}` is not a script element")]
	NotAScript(String),
	/// The script element's text could not be read.
	#[error("could not read text of element `{0}`")]
	Unreadable(String),
	/// The embedded text is not valid graph JSON.
	#[error("invalid graph data: {0}")]
	Parse(#[from] serde_json::Error),
}
