use proptest::prelude::*;
use standtree_model::{derive_key, CatalogPath, DERIVED_KEY_MAX_LEN};

fn key_segment() -> impl Strategy<Value = String> {
    // Keep segments compatible with the canonical `/`-joined form.
    proptest::string::string_regex("[a-z][a-z0-9_]{0,12}").unwrap()
}

fn segments(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(key_segment(), 0..=max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn path_text_form_roundtrips(segs in segments(6)) {
        let path = CatalogPath::from_segments(segs.clone());
        let reparsed = CatalogPath::parse(&path.to_string()).expect("parse");
        prop_assert_eq!(reparsed.segments(), segs.as_slice());
    }

    #[test]
    fn set_at_keeps_prefix_below_level(
        segs in segments(6),
        level in 0usize..8,
        value in key_segment(),
    ) {
        let path = CatalogPath::from_segments(segs.clone());
        let changed = path.set_at(level, value.clone());

        let kept = level.min(segs.len());
        // entries below the changed level are untouched
        prop_assert_eq!(&changed.segments()[..kept], &segs[..kept]);
        // the new value sits at the end, nothing deeper survives
        prop_assert_eq!(changed.len(), kept + 1);
        prop_assert_eq!(changed.last(), Some(value.as_str()));
    }

    #[test]
    fn truncate_then_extend_is_prefix_stable(
        segs in segments(6),
        level in 0usize..8,
        extension in key_segment(),
    ) {
        let path = CatalogPath::from_segments(segs.clone());
        let rebuilt = path.truncated(level).child(extension);
        let kept = level.min(segs.len());
        prop_assert_eq!(&rebuilt.segments()[..kept], &segs[..kept]);
    }

    #[test]
    fn derived_keys_are_bounded_ascii(label in "\\PC{1,80}") {
        prop_assume!(!label.trim().is_empty());
        let key = derive_key(&label).expect("non-empty label derives");
        prop_assert!(!key.is_empty());
        prop_assert!(key.len() <= DERIVED_KEY_MAX_LEN);
        prop_assert!(key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }
}
