use crate::error::*;
use crate::word::{Vstr, Word, WordKind};

/// Name to definition map, last definition for a name wins.
pub type Dict = rpds::RedBlackTreeMap<Vstr, Definition>;

#[derive(Clone, Debug, PartialEq)]
pub enum DefItem {
    Plain(Word),
    If {
        consequent: Vec<Word>,
        alternate: Vec<Word>,
    },
}

/// Parsed body of a user-defined word. Conditionals are first-class
/// items with both branches captured, never inferred from the token
/// positions at expansion time.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    items: Vec<DefItem>,
}

impl Definition {
    pub fn parse(body: Vec<Word>) -> Vresult1<Definition> {
        let mut items = Vec::new();
        let mut it = body.into_iter();
        while let Some(w) = it.next() {
            match w.kind {
                WordKind::If => {
                    let mut consequent = Vec::new();
                    let mut alternate = Vec::new();
                    let mut in_alternate = false;
                    loop {
                        let w = it.next().ok_or(Verr::ControlFlowError)?;
                        match w.kind {
                            // nested conditionals are not supported
                            WordKind::If => return Err(Verr::ControlFlowError),
                            WordKind::Then => break,
                            WordKind::Else => {
                                if in_alternate {
                                    return Err(Verr::ControlFlowError);
                                }
                                in_alternate = true;
                            }
                            _ => {
                                if in_alternate {
                                    alternate.push(w);
                                } else {
                                    consequent.push(w);
                                }
                            }
                        }
                    }
                    items.push(DefItem::If {
                        consequent,
                        alternate,
                    });
                }
                WordKind::Else | WordKind::Then => return Err(Verr::ControlFlowError),
                _ => items.push(DefItem::Plain(w)),
            }
        }
        Ok(Definition { items })
    }

    pub fn items(&self) -> &[DefItem] {
        &self.items
    }
}

// tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn w(kind: WordKind, text: &str) -> Word {
        Word::new(kind, text)
    }

    #[test]
    fn test_parse_plain() {
        let def = Definition::parse(vec![w(WordKind::Dup, "dup"), w(WordKind::Add, "+")]).unwrap();
        assert_eq!(2, def.items().len());
        assert_eq!(DefItem::Plain(w(WordKind::Dup, "dup")), def.items()[0]);
    }

    #[test]
    fn test_parse_conditional() {
        let def = Definition::parse(vec![
            w(WordKind::If, "if"),
            w(WordKind::Push, "-1"),
            w(WordKind::Else, "else"),
            w(WordKind::Push, "0"),
            w(WordKind::Then, "then"),
        ])
        .unwrap();
        assert_eq!(
            &[DefItem::If {
                consequent: vec![w(WordKind::Push, "-1")],
                alternate: vec![w(WordKind::Push, "0")],
            }],
            def.items()
        );
    }

    #[test]
    fn test_parse_conditional_no_else() {
        let def = Definition::parse(vec![
            w(WordKind::If, "if"),
            w(WordKind::Push, "1"),
            w(WordKind::Then, "then"),
        ])
        .unwrap();
        assert_eq!(
            &[DefItem::If {
                consequent: vec![w(WordKind::Push, "1")],
                alternate: vec![],
            }],
            def.items()
        );
    }

    #[test]
    fn test_parse_malformed_conditional() {
        let nested = vec![
            w(WordKind::If, "if"),
            w(WordKind::If, "if"),
            w(WordKind::Then, "then"),
            w(WordKind::Then, "then"),
        ];
        assert_eq!(Err(Verr::ControlFlowError), Definition::parse(nested));
        let unterminated = vec![w(WordKind::If, "if"), w(WordKind::Push, "1")];
        assert_eq!(
            Err(Verr::ControlFlowError),
            Definition::parse(unterminated)
        );
        let stray_else = vec![w(WordKind::Else, "else")];
        assert_eq!(Err(Verr::ControlFlowError), Definition::parse(stray_else));
        let double_else = vec![
            w(WordKind::If, "if"),
            w(WordKind::Else, "else"),
            w(WordKind::Else, "else"),
            w(WordKind::Then, "then"),
        ];
        assert_eq!(Err(Verr::ControlFlowError), Definition::parse(double_else));
    }
}
