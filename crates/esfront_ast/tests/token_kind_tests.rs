//! Token kind table regression tests.
//!
//! Pins the display name of every token kind so that renames are deliberate.

use esfront_ast::token_kind::{keyword_kind, TokenKind, TOKEN_KINDS};

const EXPECTED_NAMES: &[(TokenKind, &str)] = &[
    (TokenKind::Eof, "EOF"),
    (TokenKind::Illegal, "Illegal"),
    (TokenKind::Identifier, "Identifier"),
    (TokenKind::PrivateName, "PrivateName"),
    (TokenKind::Num, "Num"),
    (TokenKind::BigInt, "BigInt"),
    (TokenKind::String, "String"),
    (TokenKind::RegExp, "RegExp"),
    (TokenKind::TemplateStart, "`"),
    (TokenKind::TemplateSpan, "TemplateSpan"),
    (TokenKind::JsxName, "JsxName"),
    (TokenKind::JsxString, "JsxString"),
    (TokenKind::JsxText, "JsxText"),
    (TokenKind::LBrace, "{"),
    (TokenKind::RBrace, "}"),
    (TokenKind::LParen, "("),
    (TokenKind::RParen, ")"),
    (TokenKind::LBracket, "["),
    (TokenKind::RBracket, "]"),
    (TokenKind::Semi, ";"),
    (TokenKind::Comma, ","),
    (TokenKind::Dot, "."),
    (TokenKind::Ellipsis, "..."),
    (TokenKind::QuestionDot, "?."),
    (TokenKind::Question, "?"),
    (TokenKind::Colon, ":"),
    (TokenKind::Arrow, "=>"),
    (TokenKind::Eq, "="),
    (TokenKind::PlusEq, "+="),
    (TokenKind::MinusEq, "-="),
    (TokenKind::StarEq, "*="),
    (TokenKind::SlashEq, "/="),
    (TokenKind::PercentEq, "%="),
    (TokenKind::StarStarEq, "**="),
    (TokenKind::ShlEq, "<<="),
    (TokenKind::ShrEq, ">>="),
    (TokenKind::UShrEq, ">>>="),
    (TokenKind::BitAndEq, "&="),
    (TokenKind::BitOrEq, "|="),
    (TokenKind::BitXorEq, "^="),
    (TokenKind::AndAndEq, "&&="),
    (TokenKind::OrOrEq, "||="),
    (TokenKind::NullishEq, "??="),
    (TokenKind::Nullish, "??"),
    (TokenKind::OrOr, "||"),
    (TokenKind::AndAnd, "&&"),
    (TokenKind::BitOr, "|"),
    (TokenKind::BitXor, "^"),
    (TokenKind::BitAnd, "&"),
    (TokenKind::EqEq, "=="),
    (TokenKind::NotEq, "!="),
    (TokenKind::EqEqEq, "==="),
    (TokenKind::NotEqEq, "!=="),
    (TokenKind::Lt, "<"),
    (TokenKind::Gt, ">"),
    (TokenKind::LtEq, "<="),
    (TokenKind::GtEq, ">="),
    (TokenKind::Shl, "<<"),
    (TokenKind::Shr, ">>"),
    (TokenKind::UShr, ">>>"),
    (TokenKind::Plus, "+"),
    (TokenKind::Minus, "-"),
    (TokenKind::Star, "*"),
    (TokenKind::Slash, "/"),
    (TokenKind::Percent, "%"),
    (TokenKind::StarStar, "**"),
    (TokenKind::Bang, "!"),
    (TokenKind::Tilde, "~"),
    (TokenKind::PlusPlus, "++"),
    (TokenKind::MinusMinus, "--"),
    (TokenKind::Break, "break"),
    (TokenKind::Case, "case"),
    (TokenKind::Catch, "catch"),
    (TokenKind::Class, "class"),
    (TokenKind::Const, "const"),
    (TokenKind::Continue, "continue"),
    (TokenKind::Debugger, "debugger"),
    (TokenKind::Default, "default"),
    (TokenKind::Delete, "delete"),
    (TokenKind::Do, "do"),
    (TokenKind::Else, "else"),
    (TokenKind::Enum, "enum"),
    (TokenKind::Export, "export"),
    (TokenKind::Extends, "extends"),
    (TokenKind::False, "false"),
    (TokenKind::Finally, "finally"),
    (TokenKind::For, "for"),
    (TokenKind::Function, "function"),
    (TokenKind::If, "if"),
    (TokenKind::Import, "import"),
    (TokenKind::In, "in"),
    (TokenKind::Instanceof, "instanceof"),
    (TokenKind::New, "new"),
    (TokenKind::Null, "null"),
    (TokenKind::Return, "return"),
    (TokenKind::Super, "super"),
    (TokenKind::Switch, "switch"),
    (TokenKind::This, "this"),
    (TokenKind::Throw, "throw"),
    (TokenKind::True, "true"),
    (TokenKind::Try, "try"),
    (TokenKind::Typeof, "typeof"),
    (TokenKind::Var, "var"),
    (TokenKind::Void, "void"),
    (TokenKind::While, "while"),
    (TokenKind::With, "with"),
    (TokenKind::Async, "async"),
    (TokenKind::Await, "await"),
    (TokenKind::Yield, "yield"),
    (TokenKind::Let, "let"),
    (TokenKind::Static, "static"),
    (TokenKind::Of, "of"),
    (TokenKind::Get, "get"),
    (TokenKind::Set, "set"),
    (TokenKind::As, "as"),
    (TokenKind::Satisfies, "satisfies"),
    (TokenKind::Type, "type"),
    (TokenKind::Interface, "interface"),
    (TokenKind::Implements, "implements"),
    (TokenKind::Public, "public"),
    (TokenKind::Private, "private"),
    (TokenKind::Protected, "protected"),
    (TokenKind::Readonly, "readonly"),
    (TokenKind::Abstract, "abstract"),
    (TokenKind::Keyof, "keyof"),
];

#[test]
fn test_every_token_name_is_pinned() {
    assert_eq!(EXPECTED_NAMES.len(), TokenKind::COUNT);
    for &(kind, name) in EXPECTED_NAMES {
        assert_eq!(TOKEN_KINDS[kind as usize].name, name, "{:?}", kind);
        assert_eq!(kind.to_string(), name);
    }
}

#[test]
fn test_names_are_unique() {
    let mut names: Vec<&str> = TOKEN_KINDS.iter().map(|info| info.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), TokenKind::COUNT);
}

#[test]
fn test_every_keyword_round_trips_through_the_map() {
    for kind in TokenKind::ALL {
        if kind.is_keyword() || kind.is_contextual() {
            assert_eq!(keyword_kind(kind.name()), Some(kind));
        } else {
            assert_eq!(keyword_kind(kind.name()), None, "{:?}", kind);
        }
    }
}

#[test]
fn test_binary_operators_have_precedence() {
    let binary = [
        TokenKind::Nullish,
        TokenKind::OrOr,
        TokenKind::AndAnd,
        TokenKind::BitOr,
        TokenKind::BitXor,
        TokenKind::BitAnd,
        TokenKind::EqEqEq,
        TokenKind::Lt,
        TokenKind::In,
        TokenKind::Instanceof,
        TokenKind::Shl,
        TokenKind::Plus,
        TokenKind::Percent,
        TokenKind::StarStar,
    ];
    for kind in binary {
        assert!(kind.precedence() > 0, "{:?}", kind);
    }
    assert!(TokenKind::StarStar.precedence() > TokenKind::Star.precedence());
    assert!(TokenKind::Shl.precedence() > TokenKind::Lt.precedence());
    assert_eq!(TokenKind::As.precedence(), TokenKind::Lt.precedence());
    assert_eq!(TokenKind::Eq.precedence(), 0);
    assert_eq!(TokenKind::Bang.precedence(), 0);
}

#[test]
fn test_regexp_context_flags() {
    // After these tokens a `/` starts a regular expression.
    for kind in [TokenKind::LParen, TokenKind::Comma, TokenKind::Eq, TokenKind::Return, TokenKind::Typeof] {
        assert!(kind.before_expr(), "{:?}", kind);
    }
    // After these it is a division.
    for kind in [TokenKind::RParen, TokenKind::RBracket, TokenKind::Identifier, TokenKind::Num, TokenKind::This] {
        assert!(!kind.before_expr(), "{:?}", kind);
    }
}
