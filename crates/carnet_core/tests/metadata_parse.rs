use carnet_core::parse_message;

#[test]
fn tags_and_trailing_url_are_extracted_in_order() {
    let parsed = parse_message("#a# #b# rest https://x.com");
    assert_eq!(parsed.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(parsed.url.as_deref(), Some("https://x.com"));
    assert_eq!(parsed.body, "rest");
}

#[test]
fn plain_message_keeps_trimmed_body_and_no_url() {
    let parsed = parse_message("  remember the bread  ");
    assert!(parsed.tags.is_empty());
    assert_eq!(parsed.category, None);
    assert_eq!(parsed.url, None);
    assert_eq!(parsed.body, "remember the bread");
}

#[test]
fn reassembly_loses_only_extracted_markers() {
    let raw = "#tag# first part\nsecond part with #inline# marker";
    let parsed = parse_message(raw);
    assert_eq!(parsed.tags, vec!["tag".to_string()]);
    assert_eq!(parsed.url, None);
    assert_eq!(parsed.body, "first part\nsecond part with #inline# marker");
}

#[test]
fn category_grammar_runs_after_tags_and_defaults_to_none() {
    let with_category = parse_message("#t# $home$ water the plants");
    assert_eq!(with_category.tags, vec!["t".to_string()]);
    assert_eq!(with_category.category, Some(vec!["home".to_string()]));
    assert_eq!(with_category.body, "water the plants");

    let without_category = parse_message("#t# water the plants");
    assert_eq!(without_category.category, None);
}

#[test]
fn category_before_tags_is_not_consumed_as_category() {
    // The tag run is scanned first; a leading $...$ blocks it, and the
    // category run then consumes the $...$ prefix.
    let parsed = parse_message("$cat$ #late# body");
    assert!(parsed.tags.is_empty());
    assert_eq!(parsed.category, Some(vec!["cat".to_string()]));
    assert_eq!(parsed.body, "#late# body");
}

#[test]
fn earlier_urls_stay_embedded_in_body() {
    let parsed = parse_message("compare https://a.example with https://b.example now");
    assert_eq!(parsed.url, None);
    assert_eq!(
        parsed.body,
        "compare https://a.example with https://b.example now"
    );
}
