//! Property-based tests fuzzing the directive tokenizer and the
//! hierarchy stack's balanced open/close invariant.

use proptest::prelude::*;

use multiout_core::directive;
use multiout_core::{
    close_container, close_instance, close_list, emit, open_container, open_instance, open_list, Arg, Handle,
    MemorySink, Style,
};

proptest! {
    /// The directive parser never panics on arbitrary input and never
    /// claims to have consumed more bytes than it was given.
    #[test]
    fn directive_parse_never_overruns_its_input(body in ".{0,64}") {
        let (_, consumed) = directive::parse(&body, |_| {});
        prop_assert!(consumed <= body.len());
    }

    /// A `}`-terminated directive always consumes exactly through that
    /// closing brace; an unterminated one consumes to the end.
    #[test]
    fn directive_parse_stops_at_first_unescaped_close_brace(
        prefix in "[A-Za-z0-9 _/:]{0,20}",
        suffix in "[A-Za-z0-9 ]{0,20}",
    ) {
        let body = format!("{prefix}}}{suffix}");
        let (_, consumed) = directive::parse(&body, |_| {});
        prop_assert_eq!(consumed, prefix.len() + 1);
    }

    /// Any balanced sequence of container opens/closes returns the
    /// hierarchy stack to depth 0, regardless of style or nesting depth.
    #[test]
    fn balanced_container_nesting_returns_to_depth_zero(depth in 1usize..16) {
        let mut h = Handle::builder(Style::Xml).sink(MemorySink::new()).build();
        for n in 0..depth {
            open_container(&mut h, &format!("level{n}")).unwrap();
        }
        for n in (0..depth).rev() {
            close_container(&mut h, &format!("level{n}")).unwrap();
        }
        prop_assert_eq!(h.depth(), 0);
    }

    /// A literal-only format string (no brace constructs) round-trips
    /// unchanged through `emit` for TEXT style, whatever characters
    /// (including bare `%`) it contains.
    #[test]
    fn literal_only_text_round_trips_through_emit(text in "[^{}]{0,80}") {
        let mut h = Handle::builder(Style::Text).sink(MemorySink::new()).build();
        let out = emit(&mut h, &text, &[]).unwrap();
        prop_assert_eq!(out, text);
    }

    /// Interleaved list/instance opens and closes around a fixed-depth
    /// container nest always balance back to zero, and never panic.
    #[test]
    fn list_of_instances_balances_regardless_of_count(count in 0usize..20) {
        let mut h = Handle::builder(Style::Json).sink(MemorySink::new()).build();
        open_container(&mut h, "top").unwrap();
        open_list(&mut h, "item").unwrap();
        for _ in 0..count {
            open_instance(&mut h, "item").unwrap();
            emit(&mut h, "{:name/%s}", &[Arg::Str("x".into())]).unwrap();
            close_instance(&mut h, "item").unwrap();
        }
        close_list(&mut h, "item").unwrap();
        close_container(&mut h, "top").unwrap();
        prop_assert_eq!(h.depth(), 0);
    }
}
