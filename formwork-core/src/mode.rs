//! Response mode selection

use crate::HttpRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the payload produced for a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Machine-readable JSON object
    #[default]
    Json,
    /// HTML fragment for a server-rendered page
    #[serde(alias = "html")]
    Rendered,
}

impl ResponseMode {
    /// Pick the mode for a request.
    ///
    /// AJAX requests and clients accepting `application/json` get
    /// [`ResponseMode::Json`]; everything else gets `fallback`.
    pub fn negotiate(req: &HttpRequest, fallback: ResponseMode) -> Self {
        if req.wants_json() {
            ResponseMode::Json
        } else {
            fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Json => "json",
            ResponseMode::Rendered => "rendered",
        }
    }

    /// `Content-Type` header value for this mode
    pub fn content_type(&self) -> &'static str {
        match self {
            ResponseMode::Json => "application/json; charset=utf-8",
            ResponseMode::Rendered => "text/html; charset=utf-8",
        }
    }
}

impl FromStr for ResponseMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ResponseMode::Json),
            "rendered" | "html" => Ok(ResponseMode::Rendered),
            other => Err(crate::Error::BadRequest(format!(
                "unknown response mode: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiate() {
        let ajax = HttpRequest::new("POST", "/").with_header("X-Requested-With", "xmlhttprequest");
        assert_eq!(
            ResponseMode::negotiate(&ajax, ResponseMode::Rendered),
            ResponseMode::Json
        );

        let page = HttpRequest::new("POST", "/").with_header("Accept", "text/html");
        assert_eq!(
            ResponseMode::negotiate(&page, ResponseMode::Rendered),
            ResponseMode::Rendered
        );
        assert_eq!(
            ResponseMode::negotiate(&page, ResponseMode::Json),
            ResponseMode::Json
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("JSON".parse::<ResponseMode>().unwrap(), ResponseMode::Json);
        assert_eq!("html".parse::<ResponseMode>().unwrap(), ResponseMode::Rendered);
        assert_eq!("rendered".parse::<ResponseMode>().unwrap(), ResponseMode::Rendered);
        assert!("xml".parse::<ResponseMode>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ResponseMode::Rendered).unwrap(), r#""rendered""#);
        let mode: ResponseMode = serde_json::from_str(r#""html""#).unwrap();
        assert_eq!(mode, ResponseMode::Rendered);
    }
}
