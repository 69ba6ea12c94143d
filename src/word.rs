use crate::dict::Dict;

pub type Vint = i64;
pub type Vstr = arcstr::ArcStr;
pub type Vvec = rpds::Vector<Word>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordKind {
    // integer literal
    Push,
    True,
    False,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Lt,
    Gt,
    Ne,
    BitAnd,
    BitOr,
    Invert,
    // pop and print
    Pop,
    Dup,
    Drop,
    Swap,
    Over,
    Spin,
    Emit,
    Cr,
    If,
    Else,
    Then,
    Colon,
    Semicolon,
    // user-defined word reference
    Udf,
    EndOfInput,
    Illegal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub kind: WordKind,
    pub text: Vstr,
}

impl Word {
    pub fn new(kind: WordKind, text: &str) -> Word {
        Word {
            kind,
            text: Vstr::from(text),
        }
    }
}

pub fn builtin(lexeme: &str) -> Option<WordKind> {
    let kind = match lexeme {
        "+" => WordKind::Add,
        "-" => WordKind::Sub,
        "*" => WordKind::Mul,
        "/" => WordKind::Div,
        "%" | "mod" => WordKind::Rem,
        "=" => WordKind::Eq,
        "<" => WordKind::Lt,
        ">" => WordKind::Gt,
        "!=" => WordKind::Ne,
        "and" => WordKind::BitAnd,
        "or" => WordKind::BitOr,
        "invert" => WordKind::Invert,
        "true" => WordKind::True,
        "false" => WordKind::False,
        "pop" | "." => WordKind::Pop,
        "dup" => WordKind::Dup,
        "drop" => WordKind::Drop,
        "swap" => WordKind::Swap,
        "over" => WordKind::Over,
        "spin" => WordKind::Spin,
        "emit" => WordKind::Emit,
        "cr" => WordKind::Cr,
        "if" => WordKind::If,
        "else" => WordKind::Else,
        "then" => WordKind::Then,
        ":" => WordKind::Colon,
        ";" => WordKind::Semicolon,
        _ => return None,
    };
    Some(kind)
}

/// Built-ins always win over a same-named dictionary entry,
/// user definitions can not shadow them.
pub fn classify(lexeme: &str, dict: &Dict) -> WordKind {
    if let Some(kind) = builtin(lexeme) {
        kind
    } else if dict.contains_key(lexeme) {
        WordKind::Udf
    } else {
        WordKind::Illegal
    }
}

// tests ---------------------------------------------------------------------

#[cfg(test)]
use crate::dict::Definition;

#[test]
fn test_classify_builtin() {
    let dict = Dict::new();
    assert_eq!(WordKind::Add, classify("+", &dict));
    assert_eq!(WordKind::Rem, classify("%", &dict));
    assert_eq!(WordKind::Rem, classify("mod", &dict));
    assert_eq!(WordKind::Pop, classify(".", &dict));
    assert_eq!(WordKind::Pop, classify("pop", &dict));
    assert_eq!(WordKind::Ne, classify("!=", &dict));
    assert_eq!(WordKind::Colon, classify(":", &dict));
    assert_eq!(WordKind::Illegal, classify("nonsense", &dict));
}

#[test]
fn test_classify_udf() {
    let mut dict = Dict::new();
    dict.insert_mut(Vstr::from("double"), Definition::parse(Vec::new()).unwrap());
    assert_eq!(WordKind::Udf, classify("double", &dict));
    assert_eq!(WordKind::Illegal, classify("triple", &dict));
}

#[test]
fn test_builtin_wins_over_udf() {
    let mut dict = Dict::new();
    dict.insert_mut(Vstr::from("dup"), Definition::parse(Vec::new()).unwrap());
    assert_eq!(WordKind::Dup, classify("dup", &dict));
}
