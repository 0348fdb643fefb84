use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const EMAIL_SUBJECT: &str = "Educational Resource";
const EMAIL_BODY_INTRO: &str = "Here is the resource you generated:";
pub const SHARE_TITLE: &str = "Educational Resource";

// Characters left alone by JavaScript's encodeURIComponent.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds a `mailto:` link with no recipient, carrying the resource as the body.
pub fn compose_mailto(resource_text: &str) -> String {
    let body = format!("{EMAIL_BODY_INTRO}\n\n{resource_text}");
    format!(
        "mailto:?subject={}&body={}",
        encode_component(EMAIL_SUBJECT),
        encode_component(&body)
    )
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailto_encodes_subject_and_body() {
        let uri = compose_mailto("# Plan\n- a & b");
        assert_eq!(
            uri,
            "mailto:?subject=Educational%20Resource&body=Here%20is%20the%20resource%20you%20generated%3A%0A%0A%23%20Plan%0A-%20a%20%26%20b"
        );
    }

    #[test]
    fn mailto_keeps_unreserved_marks_and_encodes_utf8() {
        let uri = compose_mailto("(it's) ~fine~ – ok");
        assert!(uri.ends_with("(it's)%20~fine~%20%E2%80%93%20ok"));
    }
}
