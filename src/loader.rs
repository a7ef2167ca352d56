//! Document loading and rendering.
//!
//! Reads OpenAPI documents from files, strings and HTTP URLs in JSON or YAML,
//! and renders filtered documents back out.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::FilterError;
use crate::types::Format;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// A parsed document together with the format it was read in.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub document: Value,
    pub format: Format,
}

/// Load a document from a file path.
///
/// The format is taken from the extension; files without a known
/// extension are tried as JSON, then YAML.
///
/// # Errors
///
/// Returns `FilterError::FileNotFound` if the file doesn't exist,
/// or a parse error if the content is neither JSON nor YAML.
pub fn load_document(path: &Path) -> Result<Loaded, FilterError> {
    if !path.exists() {
        return Err(FilterError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| FilterError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "read document");
    parse_with_hint(&content, Format::from_extension(&path.to_string_lossy()))
}

/// Load a document from a string in the given format.
///
/// # Errors
///
/// Returns `FilterError::InvalidJson` or `FilterError::InvalidYaml`.
pub fn load_document_str(content: &str, format: Format) -> Result<Value, FilterError> {
    match format {
        Format::Json => {
            serde_json::from_str(content).map_err(|source| FilterError::InvalidJson { source })
        }
        Format::Yaml => {
            serde_yaml::from_str(content).map_err(|source| FilterError::InvalidYaml { source })
        }
    }
}

/// Load a document from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `FilterError::NetworkError` if the request fails,
/// or a parse error if the body is neither JSON nor YAML.
#[cfg(feature = "remote")]
pub fn load_document_url(url: &str) -> Result<Loaded, FilterError> {
    let network = |source| FilterError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network)?;

    // Check for HTTP errors before reading the body
    let response = client
        .get(url)
        .send()
        .map_err(network)?
        .error_for_status()
        .map_err(network)?;

    let content = response.text().map_err(network)?;
    debug!(url, bytes = content.len(), "fetched document");
    parse_with_hint(&content, Format::from_extension(url))
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a document from a file path or URL.
///
/// Automatically detects whether the source is a URL or file path.
/// URL loading requires the `remote` feature.
pub fn load_document_auto(source: &str) -> Result<Loaded, FilterError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_document_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(FilterError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_document(Path::new(source))
    }
}

/// Render a document in the given format.
///
/// `pretty` only affects JSON; YAML is always block style.
pub fn render_document(
    document: &Value,
    format: Format,
    pretty: bool,
) -> Result<String, FilterError> {
    let rendered = match format {
        Format::Json if pretty => serde_json::to_string_pretty(document),
        Format::Json => serde_json::to_string(document),
        Format::Yaml => {
            return serde_yaml::to_string(document).map_err(|e| FilterError::Serialize {
                message: e.to_string(),
            })
        }
    };
    rendered.map_err(|e| FilterError::Serialize {
        message: e.to_string(),
    })
}

/// Write a rendered document to a file.
pub fn write_document(path: &Path, content: &str) -> Result<(), FilterError> {
    std::fs::write(path, content).map_err(|source| FilterError::WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "wrote document");
    Ok(())
}

fn parse_with_hint(content: &str, hint: Option<Format>) -> Result<Loaded, FilterError> {
    match hint {
        Some(format) => {
            load_document_str(content, format).map(|document| Loaded { document, format })
        }
        // Unknown extension: JSON first, YAML as fallback. Report the JSON
        // error if neither works since most specs are JSON.
        None => match load_document_str(content, Format::Json) {
            Ok(document) => Ok(Loaded {
                document,
                format: Format::Json,
            }),
            Err(json_err) => load_document_str(content, Format::Yaml)
                .map(|document| Loaded {
                    document,
                    format: Format::Yaml,
                })
                .map_err(|_| json_err),
        },
    }
}
