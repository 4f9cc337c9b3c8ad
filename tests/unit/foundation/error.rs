use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StickreelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StickreelError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(
        StickreelError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        StickreelError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StickreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
