//! Media type helpers shared by request encoding and response assertion.

/// The `type/subtype` part of a media type, lowercased, without parameters.
pub(crate) fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether bodies of this media type are JSON documents.
pub(crate) fn is_json(media_type: &str) -> bool {
    essence(media_type).contains("json")
}

/// Whether bodies of this media type are XML documents.
pub(crate) fn is_xml(media_type: &str) -> bool {
    let essence = essence(media_type);
    essence.ends_with("/xml") || essence.ends_with("+xml")
}

pub(crate) const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn essence_drops_parameters_and_case() {
        assert_eq!(essence("Application/JSON; charset=utf-8"), "application/json");
        assert_eq!(essence("text/plain"), "text/plain");
    }

    #[test]
    fn json_detection() {
        assert!(is_json("application/json"));
        assert!(is_json("application/problem+json"));
        assert!(is_json("text/json; charset=utf-8"));
        assert!(!is_json("application/xml"));
    }

    #[test]
    fn xml_detection() {
        assert!(is_xml("application/xml"));
        assert!(is_xml("text/xml; charset=utf-8"));
        assert!(is_xml("application/atom+xml"));
        assert!(!is_xml("application/json"));
        assert!(!is_xml("application/xml-dtd"));
    }
}
