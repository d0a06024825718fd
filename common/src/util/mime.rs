use std::str::FromStr;

use mime::Mime;

/// Content type stamped on extracted pages unless configured otherwise.
pub const PAGE_CONTENT_TYPE: &str = "application/png";

pub fn parse_content_type(value: &str) -> Option<Mime> {
    Mime::from_str(value.trim()).ok()
}

pub fn page_content_type(value: Option<&str>) -> Mime {
    value
        .and_then(parse_content_type)
        .or_else(|| parse_content_type(PAGE_CONTENT_TYPE))
        .unwrap_or(mime::IMAGE_PNG)
}
