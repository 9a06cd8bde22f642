//! Small helpers over quick-xml events.

use quick_xml::events::BytesStart;

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of the first attribute whose local name is `local`, unescaped.
pub(crate) fn attr(e: &BytesStart, local: &[u8]) -> Option<String> {
    find_attr(e, |key| local_name(key) == local)
}

/// Value of a namespaced attribute, e.g. `r:id` but not a bare `id`.
pub(crate) fn prefixed_attr(e: &BytesStart, local: &[u8]) -> Option<String> {
    find_attr(e, |key| key.contains(&b':') && local_name(key) == local)
}

fn find_attr(e: &BytesStart, matches: impl Fn(&[u8]) -> bool) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| matches(a.key.as_ref()))
        .map(|a| match a.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&a.value).into_owned(),
        })
}

/// Parse an EMU length attribute.
pub(crate) fn emu_attr(e: &BytesStart, local: &[u8]) -> Option<u64> {
    attr(e, local).and_then(|v| v.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_attributes() {
        let e = BytesStart::from_content(
            r#"p:sldId id="256" r:id="rId2" name="A &amp; B" cx="914400""#,
            7,
        );
        assert_eq!(attr(&e, b"id").as_deref(), Some("256"));
        assert_eq!(prefixed_attr(&e, b"id").as_deref(), Some("rId2"));
        assert_eq!(attr(&e, b"name").as_deref(), Some("A & B"));
        assert_eq!(emu_attr(&e, b"cx"), Some(914400));
        assert_eq!(emu_attr(&e, b"cy"), None);
    }
}
