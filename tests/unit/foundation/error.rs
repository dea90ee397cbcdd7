use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CatenaError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CatenaError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        CatenaError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CatenaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
