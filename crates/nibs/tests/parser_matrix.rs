//! Tibs parser scenario coverage: JSON compatibility, the non-JSON
//! extensions, surrogate handling, and positioned errors.

use nibs::{tibs, Value};

#[test]
fn leading_whitespace_and_trailing_commas() {
    assert_eq!(
        tibs::decode(b"  [1, 2, 3,]").unwrap(),
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(
        tibs::decode(b"{\"a\":1,}").unwrap(),
        Value::Map(vec![(Value::Str("a".into()), Value::Int(1))])
    );
}

#[test]
fn bmp_escape_decodes_to_utf8() {
    let value = tibs::decode(b"\"a\\u00e9b\"").unwrap();
    assert_eq!(value, Value::Str("a\u{e9}b".into()));
    let Value::Str(s) = value else { panic!() };
    assert_eq!(s.as_bytes(), [0x61, 0xc3, 0xa9, 0x62]);
}

#[test]
fn surrogate_pair_combines_to_one_code_point() {
    let value = tibs::decode(b"\"\\uD83D\\uDE00\"").unwrap();
    let Value::Str(s) = value else { panic!() };
    assert_eq!(s, "\u{1f600}");
    assert_eq!(s.as_bytes(), [0xf0, 0x9f, 0x98, 0x80]);
}

#[test]
fn unpaired_surrogates_become_question_marks() {
    // High surrogate at end of string.
    assert_eq!(
        tibs::decode(b"\"x\\uD83D\"").unwrap(),
        Value::Str("x?".into())
    );
    // High surrogate followed by a non-surrogate escape.
    assert_eq!(
        tibs::decode(b"\"\\uD83D\\u0041\"").unwrap(),
        Value::Str("?A".into())
    );
    // High surrogate followed by a raw character.
    assert_eq!(
        tibs::decode(b"\"\\uD83Dz\"").unwrap(),
        Value::Str("?z".into())
    );
    // Lone low surrogate.
    assert_eq!(
        tibs::decode(b"\"\\uDE00\"").unwrap(),
        Value::Str("?".into())
    );
    // Two high surrogates then a valid pair.
    assert_eq!(
        tibs::decode(b"\"\\uD83D\\uD83D\\uDE00\"").unwrap(),
        Value::Str("?\u{1f600}".into())
    );
}

#[test]
fn json_escapes() {
    assert_eq!(
        tibs::decode(br#""\\ \" \/ \b \f \n \r \t""#).unwrap(),
        Value::Str("\\ \" / \u{8} \u{c} \n \r \t".into())
    );
}

#[test]
fn scope_and_ref_scenarios() {
    assert_eq!(
        tibs::decode(b"(1,&0)").unwrap(),
        Value::Scope(Box::new(Value::Int(1)), vec![Value::Ref(0)])
    );
    let scoped = tibs::decode(b"([&0,&1,&0],\"dup\",42)").unwrap();
    assert_eq!(
        scoped.resolve_refs(&[]),
        Value::List(vec![
            Value::Str("dup".into()),
            Value::Int(42),
            Value::Str("dup".into()),
        ])
    );
}

#[test]
fn error_positions() {
    // Trailing garbage after a complete value.
    let err = tibs::decode(b"12 34").unwrap_err();
    assert_eq!(err.index(), 3);

    // Unterminated string.
    let err = tibs::decode(b"\"abc").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected EOS at index 4 (row 1 / col 5)");

    // Bad escape.
    let err = tibs::decode(b"\"a\\q\"").unwrap_err();
    assert_eq!(err.index(), 3);

    // Bad unicode escape digit.
    let err = tibs::decode(b"\"\\u00zz\"").unwrap_err();
    assert_eq!(err.index(), 5);

    // Bad hex digit in a byte literal.
    let err = tibs::decode(b"<0x>").unwrap_err();
    assert_eq!(err.index(), 2);

    // Missing value in a map.
    let err = tibs::decode(b"{\"a\":}").unwrap_err();
    assert_eq!(err.index(), 5);

    // Bare minus.
    let err = tibs::decode(b"-").unwrap_err();
    assert_eq!(err.index(), 1);

    // Ref without digits.
    let err = tibs::decode(b"&x").unwrap_err();
    assert_eq!(err.index(), 1);
}

#[test]
fn rejects_leading_commas_and_bare_words() {
    assert!(tibs::decode(b"[,1]").is_err());
    assert!(tibs::decode(b"{,}").is_err());
    assert!(tibs::decode(b"truth").is_err());
    assert!(tibs::decode(b"").is_err());
}

#[test]
fn nested_document_parses_to_expected_tree() {
    let text = br#"
        {
          "ints": [0, -1, 500],
          "floats": [3.14, inf, -inf],
          "blob": <de ad be ef>,
          "indexed": [#1, 2],
          "scoped": ("x", 1)
        }
    "#;
    let value = tibs::decode(text).unwrap();
    let Value::Map(pairs) = &value else { panic!() };
    assert_eq!(pairs.len(), 5);
    assert_eq!(
        pairs[2],
        (
            Value::Str("blob".into()),
            Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]),
        )
    );
    assert_eq!(
        pairs[3],
        (
            Value::Str("indexed".into()),
            Value::Array(vec![Value::Int(1), Value::Int(2)]),
        )
    );
}

#[test]
fn parse_then_print_is_stable_for_canonical_text() {
    let cases: &[&str] = &[
        "[1,2,3]",
        "{\"a\":[true,false,null]}",
        "[#1,2]",
        "{#\"k\":1}",
        "<0102>",
        "(1,&0)",
        "[inf,-inf,nan]",
        "-9223372036854775808",
    ];
    for case in cases {
        let value = tibs::decode(case.as_bytes()).unwrap();
        assert_eq!(tibs::encode(&value), *case, "stable print for {case}");
    }
}
