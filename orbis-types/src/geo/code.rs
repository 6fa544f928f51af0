use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CrsError;

const URN_PREFIXES: [&str; 2] = ["urn:ogc:def:crs:", "urn:x-ogc:def:crs:"];
const HTTP_PREFIXES: [&str; 2] = [
    "http://www.opengis.net/def/crs/",
    "https://www.opengis.net/def/crs/",
];
const GML_SRS_PREFIX: &str = "http://www.opengis.net/gml/srs/";

/// Normalized `authority:code` identifier of a CRS.
///
/// The many spellings of the same identifier used across OGC services are reduced to one form:
///
/// * `EPSG:4326`
/// * `urn:ogc:def:crs:EPSG::4326`, `urn:ogc:def:crs:EPSG:6.6:4326`, `urn:x-ogc:def:crs:EPSG:4326`
/// * `http://www.opengis.net/def/crs/EPSG/0/4326`
/// * `http://www.opengis.net/gml/srs/epsg.xml#4326`
///
/// all become `EPSG:4326`. Identifiers in no known form are kept whole as a code without authority. Authority and
/// code are upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CrsCode {
    authority: Option<String>,
    code: String,
}

impl CrsCode {
    /// Creates a code from its parts.
    pub fn new(authority: Option<&str>, code: &str) -> Self {
        Self {
            authority: authority.map(|a| a.trim().to_uppercase()),
            code: code.trim().to_uppercase(),
        }
    }

    /// Parses any of the supported identifier forms.
    pub fn parse(text: &str) -> Result<Self, CrsError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CrsError::InvalidCode(text.to_string()));
        }

        let lower = text.to_lowercase();

        if let Some(rest) = strip_any_prefix(text, &lower, &URN_PREFIXES) {
            // authority[:version]:code, the version part may be empty
            let parts: Vec<&str> = rest.split(':').collect();
            return match parts.as_slice() {
                [authority, .., code] if !authority.is_empty() && !code.is_empty() => {
                    Ok(Self::new(Some(authority), code))
                }
                _ => Err(CrsError::InvalidCode(text.to_string())),
            };
        }

        if let Some(rest) = strip_any_prefix(text, &lower, &HTTP_PREFIXES) {
            let parts: Vec<&str> = rest.split('/').filter(|p| !p.is_empty()).collect();
            return match parts.as_slice() {
                [authority, _version, code] => Ok(Self::new(Some(authority), code)),
                _ => Err(CrsError::InvalidCode(text.to_string())),
            };
        }

        if let Some(rest) = strip_any_prefix(text, &lower, &[GML_SRS_PREFIX]) {
            return match rest.split_once('#') {
                Some((file, code)) if !code.is_empty() => {
                    let authority = file.split('.').next().unwrap_or(file);
                    Ok(Self::new(Some(authority), code))
                }
                _ => Err(CrsError::InvalidCode(text.to_string())),
            };
        }

        match text.split_once(':') {
            Some((authority, code)) if !authority.is_empty() && !code.is_empty() => {
                Ok(Self::new(Some(authority), code))
            }
            _ => Ok(Self::new(None, text)),
        }
    }

    /// Authority, e.g. `EPSG`.
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// Code within the authority, e.g. `4326`.
    pub fn code(&self) -> &str {
        &self.code
    }
}

fn strip_any_prefix<'a>(text: &'a str, lower: &str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes
        .iter()
        .find(|prefix| lower.starts_with(*prefix))
        .and_then(|prefix| text.get(prefix.len()..))
}

impl FromStr for CrsCode {
    type Err = CrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for CrsCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.authority {
            Some(authority) => write!(f, "{authority}:{}", self.code),
            None => f.write_str(&self.code),
        }
    }
}
