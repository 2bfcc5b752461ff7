//! Property-based tests for the lexer/parser.
//!
//! Covers the two universal properties spec §8 states in terms of arbitrary
//! inputs rather than fixed examples: date-separator independence and
//! round-trip stability of numeric lexemes.
//!
//! Run with: cargo test -p beanlex-parser --test property_tests

use beanlex_core::{Builder, DefaultBuilder};
use beanlex_parser::Lexer;
use beanlex_parser::Token;
use proptest::prelude::*;

fn arb_date_parts() -> impl Strategy<Value = (u32, u32, u32)> {
    (2000u32..2100u32, 1u32..13u32, 1u32..29u32)
}

fn arb_separator() -> impl Strategy<Value = char> {
    prop_oneof![Just('-'), Just('/')]
}

proptest! {
    #[test]
    fn date_separator_choice_does_not_affect_parsed_value(
        (y, m, d) in arb_date_parts(),
        sep1 in arb_separator(),
        sep2 in arb_separator(),
    ) {
        let text_a = format!("{y:04}{sep1}{m:02}{sep1}{d:02}");
        let text_b = format!("{y:04}{sep2}{m:02}{sep2}{d:02}");
        let mut builder = DefaultBuilder::new();
        let loc = beanlex_core::location::SourceLoc::point("t.bean", 1, 1);
        let date_a = builder.date(&text_a, &loc);
        let date_b = builder.date(&text_b, &loc);
        prop_assert_eq!(date_a, date_b);
        prop_assert!(builder.errors().is_empty());
    }

    #[test]
    fn numeric_lexeme_round_trips_through_the_builder(
        sign in prop_oneof![Just(""), Just("-"), Just("+")],
        whole in 0u32..1_000_000u32,
        frac in 0u32..1_000u32,
    ) {
        let text = format!("{sign}{whole}.{frac:03}");
        let mut builder = DefaultBuilder::new();
        let loc = beanlex_core::location::SourceLoc::point("t.bean", 1, 1);
        let first = builder.number(&text, &loc);
        let rendered = first.to_string();
        let second = builder.number(&rendered, &loc);
        prop_assert_eq!(first, second);
        prop_assert!(builder.errors().is_empty());
    }

    #[test]
    fn numeric_lexeme_re_lexes_to_an_identical_number_token(
        whole in 0u32..1_000_000u32,
        frac in 0u32..1_000u32,
    ) {
        let text = format!("{whole}.{frac:03}");
        let source = format!("{text}\n");
        let mut tokens = Lexer::new(&source, "t.bean", 0);
        let (tok, _) = tokens.next().expect("one token before EOL");
        prop_assert_eq!(tok, Token::Number(text.as_str()));
    }
}
