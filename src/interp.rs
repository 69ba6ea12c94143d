use crate::dict::{DefItem, Definition, Dict};
use crate::error::*;
use crate::eval;
use crate::lex::Lex;
use crate::word::{Vint, Vstr, Vvec, Word, WordKind};

// expansion depth guard, a body referring to an earlier binding of its
// own name is legal, unbounded mutual expansion is not
const MAX_EXPAND_DEPTH: usize = 64;

#[derive(Clone)]
pub struct ErrorContext {
    pub err: Verr,
    pub location: String,
}

/// One interpreter session: the dictionary, the parameter stack and the
/// accumulated, fully expanded program. The tokenizer writes the dictionary
/// through `eval`, the evaluator never touches it.
#[derive(Default, Clone)]
pub struct Interp {
    dict: Dict,
    stack: Vec<Vint>,
    program: Vvec,
    console: Option<String>,
    last_error: Option<ErrorContext>,
}

impl Interp {
    pub fn boot() -> Interp {
        #[allow(unused_mut)]
        let mut xs = Interp::default();
        #[cfg(not(feature = "stdio"))]
        {
            xs.console = Some(String::new());
        }
        xs
    }

    pub fn capture_stdout(&mut self) {
        if self.console.is_none() {
            self.console = Some(String::new());
        }
    }

    pub fn console(&mut self) -> Option<&mut String> {
        self.console.as_mut()
    }

    pub fn print(&mut self, msg: &str) {
        #[cfg(not(feature = "stdio"))]
        if let Some(out) = self.console.as_mut() {
            out.push_str(msg);
        }
        #[cfg(feature = "stdio")]
        if let Some(out) = self.console.as_mut() {
            out.push_str(msg)
        } else {
            print!("{}", msg);
        }
    }

    pub fn log_error(&mut self, mut msg: String) {
        msg.push('\n');
        self.print(&msg);
    }

    pub fn last_error(&self) -> &Option<ErrorContext> {
        &self.last_error
    }

    pub fn dict(&self) -> &Dict {
        &self.dict
    }

    pub fn stack(&self) -> &[Vint] {
        &self.stack
    }

    pub fn push_data(&mut self, n: Vint) {
        self.stack.push(n);
    }

    pub fn pop_data(&mut self) -> Vresult1<Vint> {
        self.stack.pop().ok_or(Verr::StackUnderflow)
    }

    pub fn top_data(&self) -> Option<&Vint> {
        self.stack.last()
    }

    /// Interpret a chunk of source text. New words fold into the persistent
    /// stack one at a time, the source is never re-evaluated from scratch.
    pub fn eval(&mut self, source: &str) -> Vresult {
        self.eval_lex(Lex::from_str(source))
    }

    pub fn eval_file(&mut self, path: &str) -> Vresult {
        let lex = Lex::from_file(path).map_err(|e| Verr::IOError {
            filename: Vstr::from(path),
            reason: Vstr::from(e.to_string()),
        })?;
        self.eval_lex(lex)
    }

    fn eval_lex(&mut self, mut lex: Lex) -> Vresult {
        self.last_error = None;
        let result = self.feed(&mut lex);
        if let Err(e) = result.as_ref() {
            self.report(e.clone(), &lex);
        }
        result
    }

    fn report(&mut self, err: Verr, lex: &Lex) {
        let location = lex.error_location();
        self.log_error(format!("error: {:?}\n{}", &err, &location));
        self.last_error = Some(ErrorContext { err, location });
    }

    fn feed(&mut self, lex: &mut Lex) -> Vresult {
        loop {
            let w = lex.next(&self.dict);
            match w.kind {
                WordKind::EndOfInput => break OK,
                WordKind::Colon => self.read_definition(lex)?,
                WordKind::Illegal => {
                    // recoverable, evaluation of the token is skipped
                    self.report(Verr::IllegalToken(w.text.clone()), lex);
                }
                _ => self.run_word(&w, 0)?,
            }
        }
    }

    /// Capture `: name <word>* ;`. The body is parsed structurally and
    /// registered under the name, overwriting any previous definition.
    /// End of input before the terminator is a parse error and the
    /// partial definition is discarded.
    fn read_definition(&mut self, lex: &mut Lex) -> Vresult {
        let name = lex.next_name()?;
        let mut body = Vec::new();
        loop {
            let w = lex.next(&self.dict);
            match w.kind {
                WordKind::Semicolon => break,
                WordKind::EndOfInput => return Err(Verr::UnterminatedDefinition(name)),
                _ => body.push(w),
            }
        }
        let def = Definition::parse(body)?;
        self.dict.insert_mut(name, def);
        OK
    }

    fn run_word(&mut self, w: &Word, depth: usize) -> Vresult {
        if w.kind == WordKind::Udf {
            if depth >= MAX_EXPAND_DEPTH {
                return Err(Verr::RecursiveDefinition(w.text.clone()));
            }
            let def = self
                .dict
                .get(w.text.as_str())
                .cloned()
                .ok_or_else(|| Verr::UnknownWord(w.text.clone()))?;
            return self.expand(&def, depth + 1);
        }
        self.program.push_back_mut(w.clone());
        let mut out = String::new();
        let result = eval::fold(&mut self.stack, w, &mut out);
        if !out.is_empty() {
            self.print(&out);
        }
        result
    }

    /// Splice a definition body in place of its reference. A conditional
    /// item inspects the value on top of the live stack, without popping,
    /// and splices exactly one branch. The branch decision happens here,
    /// once, the evaluator only ever sees the flat selected sequence.
    fn expand(&mut self, def: &Definition, depth: usize) -> Vresult {
        for item in def.items() {
            match item {
                DefItem::Plain(w) => self.run_word(w, depth)?,
                DefItem::If {
                    consequent,
                    alternate,
                } => {
                    let top = *self.stack.last().ok_or(Verr::StackUnderflow)?;
                    let branch = if top != eval::FALSE {
                        consequent
                    } else {
                        alternate
                    };
                    for w in branch {
                        self.run_word(w, depth)?;
                    }
                }
            }
        }
        OK
    }

    /// Re-execute the accumulated program from an empty stack. Provided for
    /// compatibility with the evaluate-everything-per-token model.
    pub fn replay(&self) -> Vresult1<Vec<Vint>> {
        eval::execute(self.program.iter())
    }
}
