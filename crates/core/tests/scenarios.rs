//! End-to-end scenarios against the public API, one per literal example
//! in the format-directive and hierarchy specification this crate follows.

use multiout_core::{
    close_container, close_instance, close_list, emit, open_container, open_instance, open_list, Arg,
    CollectingSink, FlagSet, Handle, InfoTableBuilder, MemorySink, SharedSink, Style,
};

#[test]
fn s1_json_pretty_list_round_trips_through_a_conforming_parser() {
    let sink = SharedSink::new();
    let mut h = Handle::builder(Style::Json).flags(FlagSet::PRETTY).sink(sink.clone()).build();

    open_container(&mut h, "top").unwrap();
    open_container(&mut h, "data").unwrap();
    open_list(&mut h, "item").unwrap();

    open_instance(&mut h, "item").unwrap();
    emit(&mut h, "{:name/%s}", &[Arg::Str("gum".into())]).unwrap();
    close_instance(&mut h, "item").unwrap();

    open_instance(&mut h, "item").unwrap();
    emit(&mut h, "{:name/%s}", &[Arg::Str("rope".into())]).unwrap();
    close_instance(&mut h, "item").unwrap();

    close_list(&mut h, "item").unwrap();
    close_container(&mut h, "data").unwrap();
    close_container(&mut h, "top").unwrap();

    assert_eq!(h.depth(), 0);
    let parsed: serde_json::Value = serde_json::from_str(&sink.as_str()).unwrap();
    let items = parsed["top"]["data"]["item"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "gum");
    assert_eq!(items[1]["name"], "rope");
}

#[test]
fn s2_xml_same_sequence_produces_matched_tags() {
    let sink = SharedSink::new();
    let mut h = Handle::builder(Style::Xml).sink(sink.clone()).build();

    open_container(&mut h, "top").unwrap();
    open_container(&mut h, "data").unwrap();
    open_list(&mut h, "item").unwrap();

    open_instance(&mut h, "item").unwrap();
    emit(&mut h, "{:name/%s}", &[Arg::Str("gum".into())]).unwrap();
    close_instance(&mut h, "item").unwrap();

    open_instance(&mut h, "item").unwrap();
    emit(&mut h, "{:name/%s}", &[Arg::Str("rope".into())]).unwrap();
    close_instance(&mut h, "item").unwrap();

    close_list(&mut h, "item").unwrap();
    close_container(&mut h, "data").unwrap();
    close_container(&mut h, "top").unwrap();

    assert_eq!(
        sink.as_str(),
        "<top><data><item><name>gum</name></item><item><name>rope</name></item></data></top>"
    );
}

#[test]
fn s3_text_label_and_value_with_trailing_colon() {
    let sink = SharedSink::new();
    let mut h = Handle::builder(Style::Text).sink(sink.clone()).build();
    emit(&mut h, "{L:Item} '{:name/%s}':\n", &[Arg::Str("gum".into())]).unwrap();
    assert_eq!(sink.as_str(), "Item 'gum':\n");
}

#[test]
fn s4_json_quoting_default_vs_forced() {
    let sink = SharedSink::new();
    let mut h = Handle::builder(Style::Json).sink(sink.clone()).build();
    emit(&mut h, "{:sold/%u}", &[Arg::UInt(1412)]).unwrap();
    assert_eq!(sink.as_str(), "\"sold\":1412");

    let sink2 = SharedSink::new();
    let mut h2 = Handle::builder(Style::Json).sink(sink2.clone()).build();
    emit(&mut h2, "{Q:sold/%u}", &[Arg::UInt(1412)]).unwrap();
    assert_eq!(sink2.as_str(), "\"sold\":\"1412\"");
}

#[test]
fn s5_html_with_xpath_and_info_attributes() {
    let info = InfoTableBuilder::new()
        .entry(
            multiout_core::InfoEntry::new("name")
                .with_type("string")
                .with_help("Name of the item"),
        )
        .build();

    let sink = SharedSink::new();
    let mut h = Handle::builder(Style::Html)
        .flags(FlagSet::XPATH | FlagSet::INFO)
        .info_table(info)
        .sink(sink.clone())
        .build();

    open_container(&mut h, "top").unwrap();
    open_container(&mut h, "data").unwrap();
    open_list(&mut h, "item").unwrap();
    open_instance(&mut h, "item").unwrap();

    emit(&mut h, "{:name/%s}", &[Arg::Str("gum".into())]).unwrap();

    let out = sink.as_str();
    assert!(out.contains(r#"data-tag="name""#));
    assert!(out.contains(r#"data-xpath="/top/data/item/name""#));
    assert!(out.contains(r#"data-type="string""#));
    assert!(out.contains(r#"data-help="Name of the item""#));
}

#[test]
fn s6_warning_on_mismatched_close_does_not_alter_output() {
    let sink = SharedSink::new();
    let mut h = Handle::builder(Style::Xml)
        .flags(FlagSet::WARN)
        .warnings(CollectingSink::default())
        .sink(sink.clone())
        .build();

    open_container(&mut h, "right").unwrap();
    close_container(&mut h, "wrong").unwrap();

    assert_eq!(h.depth(), 0);
    assert_eq!(sink.as_str(), "<right></right>");
}

#[test]
fn empty_format_string_produces_no_output_and_no_error() {
    let mut h = Handle::builder(Style::Text).sink(MemorySink::new()).build();
    let out = emit(&mut h, "", &[]).unwrap();
    assert_eq!(out, "");
}

#[test]
fn directive_with_no_content_or_format_emits_empty_value() {
    let sink = SharedSink::new();
    let mut h = Handle::builder(Style::Json).sink(sink.clone()).build();
    // No explicit print/encode format means the implicit `%s` default
    // still pulls one (here empty) argument from the caller, same as
    // any other unqualified value field.
    emit(&mut h, "{:}", &[Arg::Str(String::new())]).unwrap();
    assert_eq!(sink.as_str(), "\"\":\"\"");
}

#[test]
fn trailing_open_escape_at_end_of_string_is_a_literal_brace() {
    let mut h = Handle::builder(Style::Text).sink(MemorySink::new()).build();
    let out = emit(&mut h, "{{", &[]).unwrap();
    assert_eq!(out, "{");
}

#[test]
fn set_flags_then_clear_flags_returns_to_prior_state() {
    let mut h = Handle::builder(Style::Text).build();
    let before = h.flags();
    h.set_flags(FlagSet::PRETTY | FlagSet::WARN);
    h.clear_flags(FlagSet::PRETTY | FlagSet::WARN);
    assert_eq!(h.flags(), before);
}
