pub mod word;
pub mod error;
pub mod lex;
pub mod dict;
pub mod eval;
pub mod interp;
#[cfg(feature = "stdio")]
pub mod repl;

pub mod prelude {
    pub type Vorth = crate::interp::Interp;
    pub use crate::error::{Verr, Vresult};
    pub use crate::word::{Vint, Word, WordKind};
}
