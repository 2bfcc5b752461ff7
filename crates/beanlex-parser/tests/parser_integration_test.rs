//! Integration tests for the parser crate.
//!
//! Covers every directive type, the §8 end-to-end scenarios, and the
//! universal properties (line-token reset, indent/flag disambiguation,
//! error recovery) from a black-box, builder-facing angle.

use beanlex_core::{DefaultBuilder, Directive};
use beanlex_parser::parse;

fn parse_ok(source: &str) -> Vec<Directive> {
    let mut builder = DefaultBuilder::new();
    let errors = parse(source, "t.bean", 0, &mut builder);
    assert!(errors.is_empty(), "expected no errors, got: {errors:?}");
    builder.into_result().unwrap()
}

#[test]
fn open_directive() {
    let directives = parse_ok("2014-01-01 open Assets:Cash USD\n");
    assert_eq!(directives.len(), 1);
    match &directives[0] {
        Directive::Open(open) => {
            assert_eq!(open.account.as_str(), "Assets:Cash");
            assert_eq!(open.currencies.len(), 1);
            assert_eq!(open.currencies[0].as_str(), "USD");
        }
        other => panic!("expected open, got {other:?}"),
    }
}

#[test]
fn open_with_multiple_currencies() {
    let directives = parse_ok("2014-01-01 open Assets:Cash USD, EUR, GBP\n");
    match &directives[0] {
        Directive::Open(open) => assert_eq!(open.currencies.len(), 3),
        other => panic!("expected open, got {other:?}"),
    }
}

#[test]
fn close_directive() {
    let directives = parse_ok("2014-12-31 close Assets:Cash\n");
    match &directives[0] {
        Directive::Close(close) => assert_eq!(close.account.as_str(), "Assets:Cash"),
        other => panic!("expected close, got {other:?}"),
    }
}

#[test]
fn pad_directive() {
    let directives = parse_ok("2014-01-01 pad Assets:Checking Equity:Opening-Balances\n");
    match &directives[0] {
        Directive::Pad(pad) => {
            assert_eq!(pad.account.as_str(), "Assets:Checking");
            assert_eq!(pad.source_account.as_str(), "Equity:Opening-Balances");
        }
        other => panic!("expected pad, got {other:?}"),
    }
}

#[test]
fn check_directive() {
    let directives = parse_ok("2014-01-31 check Assets:Checking 1000.00 USD\n");
    match &directives[0] {
        Directive::Check(check) => {
            assert_eq!(check.account.as_str(), "Assets:Checking");
            assert_eq!(check.amount.number.to_string(), "1000.00");
        }
        other => panic!("expected check, got {other:?}"),
    }
}

#[test]
fn price_directive() {
    let directives = parse_ok("2014-01-15 price AAPL 185.50 USD\n");
    match &directives[0] {
        Directive::Price(price) => {
            assert_eq!(price.currency.as_str(), "AAPL");
            assert_eq!(price.amount.currency.as_str(), "USD");
        }
        other => panic!("expected price, got {other:?}"),
    }
}

#[test]
fn event_directive() {
    let directives = parse_ok("2014-01-01 event \"location\" \"Paris\"\n");
    match &directives[0] {
        Directive::Event(event) => {
            assert_eq!(event.name, "location");
            assert_eq!(event.value, "Paris");
        }
        other => panic!("expected event, got {other:?}"),
    }
}

#[test]
fn note_directive() {
    let directives = parse_ok(r#"2014-01-01 note Assets:Cash "reconciled by hand""#);
    match &directives[0] {
        Directive::Note(note) => assert_eq!(note.comment, "reconciled by hand"),
        other => panic!("expected note, got {other:?}"),
    }
}

#[test]
fn document_directive() {
    let directives = parse_ok(r#"2014-01-01 document Assets:Cash "statement.pdf""#);
    match &directives[0] {
        Directive::Document(doc) => assert_eq!(doc.filename, "statement.pdf"),
        other => panic!("expected document, got {other:?}"),
    }
}

#[test]
fn transaction_single_string_form() {
    let source = "2014-02-03 * \"Payee\"\n  Assets:Cash   100.00 USD\n  Expenses:Food\n";
    let directives = parse_ok(source);
    assert_eq!(directives.len(), 1);
    match &directives[0] {
        Directive::Transaction(txn) => {
            assert_eq!(txn.payee, None);
            assert_eq!(txn.narration, "Payee");
            assert_eq!(txn.postings.len(), 2);
            assert_eq!(txn.postings[1].position, None);
        }
        other => panic!("expected transaction, got {other:?}"),
    }
}

#[test]
fn transaction_piped_form_with_tags_links_and_total_price() {
    let source = "2014-02-03 * \"Payee\" | \"Narr\" #tag ^link\n  Assets:X  1 USD @@ 2 CAD\n";
    let directives = parse_ok(source);
    match &directives[0] {
        Directive::Transaction(txn) => {
            assert_eq!(txn.payee, Some("Payee".to_string()));
            assert_eq!(txn.narration, "Narr");
            assert_eq!(txn.tags, vec!["tag".to_string()]);
            assert_eq!(txn.links, vec!["link".to_string()]);
            assert_eq!(txn.postings.len(), 1);
            assert!(txn.postings[0].price_is_total);
        }
        other => panic!("expected transaction, got {other:?}"),
    }
}

#[test]
fn transaction_per_unit_price_is_not_total() {
    let source = "2014-02-03 * \"Payee\" | \"Narr\"\n  Assets:X  1 USD @ 2 CAD\n";
    let directives = parse_ok(source);
    match &directives[0] {
        Directive::Transaction(txn) => assert!(!txn.postings[0].price_is_total),
        other => panic!("expected transaction, got {other:?}"),
    }
}

#[test]
fn posting_with_lot_cost_and_date() {
    let source =
        "2014-02-03 * \"Buy\"\n  Assets:Brokerage  10 HOOL {500 USD / 2014-01-15}\n  Assets:Cash\n";
    let directives = parse_ok(source);
    match &directives[0] {
        Directive::Transaction(txn) => {
            let lot = txn.postings[0]
                .position
                .as_ref()
                .and_then(|p| p.lot.as_ref())
                .expect("lot annotation");
            assert_eq!(lot.amount.currency.as_str(), "USD");
            assert_eq!(
                lot.date,
                Some(chrono::NaiveDate::from_ymd_opt(2014, 1, 15).unwrap())
            );
        }
        other => panic!("expected transaction, got {other:?}"),
    }
}

#[test]
fn txn_keyword_is_equivalent_to_star() {
    let source = "2014-01-01 txn \"Lunch\"\n  Assets:Cash  -10 USD\n  Expenses:Food\n";
    let directives = parse_ok(source);
    match &directives[0] {
        Directive::Transaction(txn) => assert_eq!(txn.flag, '*'),
        other => panic!("expected transaction, got {other:?}"),
    }
}

#[test]
fn posting_flag_overrides_transaction_flag() {
    let source = "2014-01-01 * \"Lunch\"\n  ! Assets:Cash  -10 USD\n  Expenses:Food\n";
    let directives = parse_ok(source);
    match &directives[0] {
        Directive::Transaction(txn) => assert_eq!(txn.postings[0].flag, Some('!')),
        other => panic!("expected transaction, got {other:?}"),
    }
}

#[test]
fn heading_line_is_skipped_and_next_directive_still_parses() {
    let source = "* This is a heading\n2014-01-01 close Assets:Cash\n";
    let directives = parse_ok(source);
    assert_eq!(directives.len(), 1);
    assert!(matches!(&directives[0], Directive::Close(_)));
}

#[test]
fn org_mode_subheading_is_skipped() {
    let directives = parse_ok("** Subheading\n2014-01-01 close Assets:Cash\n");
    assert_eq!(directives.len(), 1);
}

#[test]
fn comment_only_line_is_skipped() {
    let directives = parse_ok("; just a comment\n2014-01-01 close Assets:Cash\n");
    assert_eq!(directives.len(), 1);
}

#[test]
fn blank_line_between_directives_is_ignored() {
    let directives = parse_ok("2014-01-01 close Assets:Cash\n\n2014-01-02 close Assets:Bank\n");
    assert_eq!(directives.len(), 2);
}

#[test]
fn pushtag_and_poptag_bracket_a_transaction() {
    let source = "pushtag #trip\n2014-01-01 * \"x\"\n  Assets:Cash  -1 USD\n  Expenses:Misc\npoptag #trip\n";
    let mut builder = DefaultBuilder::new();
    let errors = parse(source, "t.bean", 0, &mut builder);
    assert!(errors.is_empty());
    let directives = builder.into_result().unwrap();
    match &directives[0] {
        Directive::Transaction(txn) => assert_eq!(txn.tags, vec!["trip".to_string()]),
        other => panic!("expected transaction, got {other:?}"),
    }
}

#[test]
fn option_directive_is_recorded_by_builder() {
    let mut builder = DefaultBuilder::new();
    let errors = parse("option \"title\" \"My Ledger\"\n", "t.bean", 0, &mut builder);
    assert!(errors.is_empty());
    assert_eq!(builder.options().len(), 1);
    assert_eq!(builder.options()[0].name, "title");
    assert_eq!(builder.options()[0].value, "My Ledger");
}

#[test]
fn single_garbage_line_produces_one_error_and_recovers() {
    let source = "2014-01-01 open ???\n2014-01-02 close Assets:Cash\n";
    let mut builder = DefaultBuilder::new();
    let errors = parse(source, "t.bean", 0, &mut builder);
    assert_eq!(errors.len(), 1, "expected exactly one error, got {errors:?}");
    let directives = builder.into_result().unwrap();
    assert_eq!(directives.len(), 1);
    assert!(matches!(&directives[0], Directive::Close(_)));
}

#[test]
fn surrounding_directives_survive_in_order_around_an_error() {
    let source = "2014-01-01 close Assets:A\n2014-01-02 ???\n2014-01-03 close Assets:B\n";
    let mut builder = DefaultBuilder::new();
    let errors = parse(source, "t.bean", 0, &mut builder);
    assert_eq!(errors.len(), 1);
    let directives = builder.into_result().unwrap();
    assert_eq!(directives.len(), 2);
    let accounts: Vec<&str> = directives
        .iter()
        .map(|d| match d {
            Directive::Close(c) => c.account.as_str(),
            _ => panic!("expected close"),
        })
        .collect();
    assert_eq!(accounts, vec!["Assets:A", "Assets:B"]);
}

#[test]
fn date_separator_independence() {
    let a = parse_ok("2014-01-02 close Assets:Cash\n");
    let b = parse_ok("2014/01/02 close Assets:Cash\n");
    let c = parse_ok("2014-01/02 close Assets:Cash\n");
    assert_eq!(a[0].date(), b[0].date());
    assert_eq!(a[0].date(), c[0].date());
}

#[test]
fn first_line_offset_shifts_reported_directive_line() {
    let mut builder = DefaultBuilder::new();
    let errors = parse("2014-01-01 close Assets:Cash\n", "included.bean", 41, &mut builder);
    assert!(errors.is_empty());
    let directives = builder.into_result().unwrap();
    assert_eq!(directives[0].loc().line(), 42);
}

#[test]
fn account_outside_transaction_is_a_syntax_error() {
    let source = "Assets:Cash\n2014-01-01 close Assets:Bank\n";
    let mut builder = DefaultBuilder::new();
    let errors = parse(source, "t.bean", 0, &mut builder);
    assert_eq!(errors.len(), 1);
    let directives = builder.into_result().unwrap();
    assert_eq!(directives.len(), 1);
}
