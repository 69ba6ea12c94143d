use crate::word::Vstr;

use std::fmt;

#[derive(PartialEq, Clone)]
pub enum Verr {
    UnknownWord(Vstr),
    IllegalToken(Vstr),
    IntegerParseError(Vstr),
    ExpectingName,
    UnterminatedDefinition(Vstr),
    ControlFlowError,
    RecursiveDefinition(Vstr),
    StackUnderflow,
    DivisionByZero,
    IOError { filename: Vstr, reason: Vstr },
}

impl fmt::Debug for Verr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verr::UnknownWord(s) => write!(f, "unknown word {}", s),
            Verr::IllegalToken(s) => write!(f, "illegal token {:?}", s),
            Verr::IntegerParseError(s) => write!(f, "malformed integer literal {:?}", s),
            Verr::ExpectingName => f.write_str("expecting a word name"),
            Verr::UnterminatedDefinition(s) => {
                write!(f, "definition of {} is missing the terminating ;", s)
            }
            Verr::ControlFlowError => f.write_str("ControlFlowError"),
            Verr::RecursiveDefinition(s) => write!(f, "recursive expansion of {}", s),
            Verr::StackUnderflow => f.write_str("StackUnderflow"),
            Verr::DivisionByZero => f.write_str("division by zero"),
            Verr::IOError { filename, reason } => write!(f, "{}: {}", filename, reason),
        }
    }
}

pub type Vresult = Vresult1<()>;

pub type Vresult1<T> = Result<T, Verr>;

pub const OK: Vresult = Ok(());
