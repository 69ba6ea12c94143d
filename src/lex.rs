use crate::dict::Dict;
use crate::error::*;
use crate::word::{classify, Vstr, Word, WordKind};

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
    pub pos: usize,
    pub len: usize,
}

#[derive(Clone, Debug)]
pub struct Lex {
    cursor: Location,
    buffer: String,
    path: Option<String>,
    last: Option<Location>,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    // trailing ? supports predicate-style names like buzz?
    is_ident_start(c) || c == '?'
}

impl Lex {
    pub fn from_str(s: &str) -> Self {
        Self::from_string(s.to_string())
    }

    pub fn from_string(s: String) -> Self {
        Self {
            cursor: Location {
                line: 1,
                col: 1,
                pos: 0,
                len: 0,
            },
            buffer: s,
            path: None,
            last: None,
        }
    }

    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let buf = std::fs::read_to_string(path)?;
        let mut lex = Self::from_string(buf);
        lex.path = Some(path.to_string());
        Ok(lex)
    }

    pub fn error_location(&self) -> String {
        let mut buf = String::new();
        if let Some((_tok, l)) = self.last_token() {
            if let Some(s) = self.buffer.lines().nth(l.line - 1) {
                let name = self.path.as_ref().map(|p| p.as_str()).unwrap_or("<buffer>");
                buf = format!("{}:{}:{}:\n{}\n", name, l.line, l.col, s);
                for _ in 1..l.col {
                    buf.push('-');
                }
                buf.push('^');
            }
        }
        buf
    }

    pub fn last_token(&self) -> Option<(&str, &Location)> {
        self.last.as_ref().map(|loc| {
            let start = loc.pos;
            let end = start + loc.len;
            (&self.buffer[start..end], loc)
        })
    }

    fn peek(&self) -> Option<char> {
        self.buffer[self.cursor.pos..].chars().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut it = self.buffer[self.cursor.pos..].chars();
        it.next()?;
        it.next()
    }

    fn take(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor.pos += c.len_utf8();
        if c == '\n' {
            self.cursor.line += 1;
            self.cursor.col = 1;
        } else {
            self.cursor.col += 1;
        }
        Some(c)
    }

    fn skip_whitespaces(&mut self) -> Option<char> {
        loop {
            let c = self.peek()?;
            if c.is_ascii_whitespace() {
                self.take();
            } else {
                break Some(c);
            }
        }
    }

    fn mark(&self) -> (usize, Location) {
        (self.cursor.pos, self.cursor.clone())
    }

    fn lexeme(&mut self, start: usize, mut loc: Location) -> &str {
        loc.len = self.cursor.pos - start;
        self.last = Some(loc);
        &self.buffer[start..self.cursor.pos]
    }

    fn read_number(&mut self) -> Word {
        let (start, loc) = self.mark();
        if self.peek() == Some('-') {
            self.take();
        }
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.take();
        }
        let w = self.lexeme(start, loc);
        Word::new(WordKind::Push, w)
    }

    fn read_ident(&mut self) -> (usize, Location) {
        let (start, loc) = self.mark();
        while let Some(c) = self.peek() {
            if !is_ident_char(c) {
                break;
            }
            self.take();
        }
        (start, loc)
    }

    fn read_symbol(&mut self) -> (usize, Location) {
        let (start, loc) = self.mark();
        let c = self.take();
        if c == Some('!') && self.peek() == Some('=') {
            self.take();
        }
        (start, loc)
    }

    /// Produce the next classified word. End of input yields the
    /// end-of-input word forever after.
    pub fn next(&mut self, dict: &Dict) -> Word {
        let c = match self.skip_whitespaces() {
            None => return Word::new(WordKind::EndOfInput, ""),
            Some(c) => c,
        };
        if c.is_ascii_digit() {
            return self.read_number();
        }
        if c == '-' && self.peek2().map_or(false, |c| c.is_ascii_digit()) {
            return self.read_number();
        }
        if is_ident_start(c) {
            let (start, loc) = self.read_ident();
            let w = self.lexeme(start, loc);
            let kind = classify(w, dict);
            return Word::new(kind, w);
        }
        match c {
            ':' | ';' | '.' | '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' => {
                let (start, loc) = self.read_symbol();
                let w = self.lexeme(start, loc);
                let kind = classify(w, dict);
                Word::new(kind, w)
            }
            _ => {
                let (start, loc) = self.mark();
                self.take();
                let w = self.lexeme(start, loc);
                Word::new(WordKind::Illegal, w)
            }
        }
    }

    /// Read the name following a definition-start token.
    pub fn next_name(&mut self) -> Vresult1<Vstr> {
        match self.skip_whitespaces() {
            Some(c) if is_ident_start(c) => {
                let (start, loc) = self.read_ident();
                let w = self.lexeme(start, loc);
                Ok(Vstr::from(w))
            }
            _ => Err(Verr::ExpectingName),
        }
    }
}

// tests ---------------------------------------------------------------------

#[cfg(test)]
fn lex_kinds(s: &str) -> Vec<WordKind> {
    let dict = Dict::new();
    let mut lex = Lex::from_str(s);
    let mut kinds = Vec::new();
    loop {
        let w = lex.next(&dict);
        if w.kind == WordKind::EndOfInput {
            break kinds;
        }
        kinds.push(w.kind);
    }
}

#[test]
fn test_lex_ws() {
    let dict = Dict::new();
    let mut lex = Lex::from_str("\n\t  ");
    assert_eq!(WordKind::EndOfInput, lex.next(&dict).kind);
    // end of input is idempotent
    assert_eq!(WordKind::EndOfInput, lex.next(&dict).kind);
    assert_eq!(None, lex.last_token());
}

#[test]
fn test_lex_num() {
    let dict = Dict::new();
    let mut lex = Lex::from_str("42 -1 - -x 007");
    assert_eq!(Word::new(WordKind::Push, "42"), lex.next(&dict));
    assert_eq!(Word::new(WordKind::Push, "-1"), lex.next(&dict));
    assert_eq!(Word::new(WordKind::Sub, "-"), lex.next(&dict));
    assert_eq!(Word::new(WordKind::Sub, "-"), lex.next(&dict));
    assert_eq!(WordKind::Illegal, lex.next(&dict).kind);
    assert_eq!(Word::new(WordKind::Push, "007"), lex.next(&dict));
    // -- starts a symbol, then a number follows
    let mut lex = Lex::from_str("--1");
    assert_eq!(Word::new(WordKind::Sub, "-"), lex.next(&dict));
    assert_eq!(Word::new(WordKind::Push, "-1"), lex.next(&dict));
}

#[test]
fn test_lex_ident() {
    let dict = Dict::new();
    let mut lex = Lex::from_str("dup buzz? _tmp swap");
    assert_eq!(Word::new(WordKind::Dup, "dup"), lex.next(&dict));
    assert_eq!(Word::new(WordKind::Illegal, "buzz?"), lex.next(&dict));
    assert_eq!(Word::new(WordKind::Illegal, "_tmp"), lex.next(&dict));
    assert_eq!(Word::new(WordKind::Swap, "swap"), lex.next(&dict));
}

#[test]
fn test_lex_symbols() {
    assert_eq!(
        vec![
            WordKind::Colon,
            WordKind::Semicolon,
            WordKind::Pop,
            WordKind::Add,
            WordKind::Mul,
            WordKind::Div,
            WordKind::Rem,
            WordKind::Lt,
            WordKind::Gt,
            WordKind::Eq,
            WordKind::Ne,
        ],
        lex_kinds(": ; . + * / % < > = !=")
    );
    // symbols need no separating whitespace from numbers
    assert_eq!(vec![WordKind::Push, WordKind::Push, WordKind::Add], lex_kinds("1 2+"));
}

#[test]
fn test_lex_illegal() {
    let dict = Dict::new();
    let mut lex = Lex::from_str("1 @ 2 !");
    lex.next(&dict);
    assert_eq!(Word::new(WordKind::Illegal, "@"), lex.next(&dict));
    lex.next(&dict);
    assert_eq!(Word::new(WordKind::Illegal, "!"), lex.next(&dict));
}

#[test]
fn test_lex_location() {
    let dict = Dict::new();
    let mut lex = Lex::from_str(" abcde \n123");
    lex.next(&dict);
    let (s, loc) = lex.last_token().unwrap();
    assert_eq!("abcde", s);
    assert_eq!(5, loc.len);
    assert_eq!(1, loc.line);
    assert_eq!(2, loc.col);
    lex.next(&dict);
    let (s, loc) = lex.last_token().unwrap();
    assert_eq!("123", s);
    assert_eq!(2, loc.line);
    assert_eq!(1, loc.col);
}

#[test]
fn test_lex_next_name() {
    let mut lex = Lex::from_str("  double dup");
    assert_eq!(Ok(Vstr::from("double")), lex.next_name());
    let mut lex = Lex::from_str(" 5");
    assert_eq!(Err(Verr::ExpectingName), lex.next_name());
    let mut lex = Lex::from_str("");
    assert_eq!(Err(Verr::ExpectingName), lex.next_name());
}
