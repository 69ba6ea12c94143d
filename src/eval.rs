use crate::error::*;
use crate::word::{Vint, Word, WordKind};

pub const TRUE: Vint = -1;
pub const FALSE: Vint = 0;

fn flag(x: bool) -> Vint {
    if x {
        TRUE
    } else {
        FALSE
    }
}

fn pop(stack: &mut Vec<Vint>) -> Vresult1<Vint> {
    stack.pop().ok_or(Verr::StackUnderflow)
}

// a b op computes a op b: the second-popped value is the left operand
fn binary_op(stack: &mut Vec<Vint>, op: fn(Vint, Vint) -> Vresult1<Vint>) -> Vresult {
    let b = pop(stack)?;
    let a = pop(stack)?;
    let c = op(a, b)?;
    stack.push(c);
    OK
}

/// Execute one word against the stack, appending any printed text to `out`.
/// User-defined references must be expanded away before they get here,
/// the evaluator performs no dictionary lookups and has no control flow.
pub fn fold(stack: &mut Vec<Vint>, word: &Word, out: &mut String) -> Vresult {
    match word.kind {
        WordKind::Push => {
            let n: Vint = word
                .text
                .parse()
                .map_err(|_| Verr::IntegerParseError(word.text.clone()))?;
            stack.push(n);
            OK
        }
        WordKind::True => {
            stack.push(TRUE);
            OK
        }
        WordKind::False => {
            stack.push(FALSE);
            OK
        }
        WordKind::Add => binary_op(stack, |a, b| Ok(a.wrapping_add(b))),
        WordKind::Sub => binary_op(stack, |a, b| Ok(a.wrapping_sub(b))),
        WordKind::Mul => binary_op(stack, |a, b| Ok(a.wrapping_mul(b))),
        WordKind::Div => binary_op(stack, |a, b| {
            if b == 0 {
                Err(Verr::DivisionByZero)
            } else {
                Ok(a.wrapping_div(b))
            }
        }),
        WordKind::Rem => binary_op(stack, |a, b| {
            if b == 0 {
                Err(Verr::DivisionByZero)
            } else {
                Ok(a.wrapping_rem(b))
            }
        }),
        WordKind::Eq => binary_op(stack, |a, b| Ok(flag(a == b))),
        WordKind::Lt => binary_op(stack, |a, b| Ok(flag(a < b))),
        WordKind::Gt => binary_op(stack, |a, b| Ok(flag(a > b))),
        WordKind::Ne => binary_op(stack, |a, b| Ok(flag(a != b))),
        WordKind::BitAnd => binary_op(stack, |a, b| Ok(a & b)),
        WordKind::BitOr => binary_op(stack, |a, b| Ok(a | b)),
        WordKind::Invert => {
            let a = pop(stack)?;
            stack.push(!a);
            OK
        }
        WordKind::Dup => {
            let a = *stack.last().ok_or(Verr::StackUnderflow)?;
            stack.push(a);
            OK
        }
        WordKind::Drop => {
            pop(stack)?;
            OK
        }
        WordKind::Swap => {
            let b = pop(stack)?;
            let a = pop(stack)?;
            stack.push(b);
            stack.push(a);
            OK
        }
        WordKind::Over => {
            if stack.len() < 2 {
                return Err(Verr::StackUnderflow);
            }
            let a = stack[stack.len() - 2];
            stack.push(a);
            OK
        }
        WordKind::Spin => {
            // a b c spin leaves b c a
            let n1 = pop(stack)?;
            let n2 = pop(stack)?;
            let n3 = pop(stack)?;
            stack.push(n2);
            stack.push(n1);
            stack.push(n3);
            OK
        }
        WordKind::Pop => {
            let n = pop(stack)?;
            out.push_str(&n.to_string());
            out.push('\n');
            OK
        }
        WordKind::Emit => {
            let n = pop(stack)?;
            let c = char::from_u32(n as u32).unwrap_or('\u{fffd}');
            out.push(c);
            OK
        }
        WordKind::Cr => {
            out.push('\n');
            OK
        }
        WordKind::EndOfInput => OK,
        WordKind::If | WordKind::Else | WordKind::Then => Err(Verr::ControlFlowError),
        WordKind::Colon | WordKind::Semicolon => Err(Verr::ControlFlowError),
        WordKind::Udf | WordKind::Illegal => Err(Verr::UnknownWord(word.text.clone())),
    }
}

/// Execute a complete word sequence from scratch, returning the final stack.
pub fn execute<'a, I>(words: I) -> Vresult1<Vec<Vint>>
where
    I: IntoIterator<Item = &'a Word>,
{
    let mut stack = Vec::new();
    let mut out = String::new();
    for w in words {
        fold(&mut stack, w, &mut out)?;
    }
    Ok(stack)
}

// tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Dict;
    use crate::lex::Lex;
    use crate::word::Vstr;

    fn run(s: &str) -> Vresult1<Vec<Vint>> {
        let dict = Dict::new();
        let mut lex = Lex::from_str(s);
        let mut words = Vec::new();
        loop {
            let w = lex.next(&dict);
            if w.kind == WordKind::EndOfInput {
                break;
            }
            words.push(w);
        }
        execute(words.iter())
    }

    #[test]
    fn test_arith_order() {
        assert_eq!(Ok(vec![1]), run("5 4 -"));
        assert_eq!(Ok(vec![-1]), run("4 5 -"));
        assert_eq!(Ok(vec![0]), run("1 -1 +"));
        assert_eq!(Ok(vec![20]), run("4 5 *"));
        assert_eq!(Ok(vec![4]), run("20 5 /"));
        assert_eq!(Ok(vec![-4]), run("-20 5 /"));
        assert_eq!(Ok(vec![2]), run("8 3 mod"));
        assert_eq!(Ok(vec![2]), run("8 3 %"));
        assert_eq!(Ok(vec![-2]), run("-8 3 mod"));
        assert_eq!(Err(Verr::DivisionByZero), run("1 0 /"));
        assert_eq!(Err(Verr::DivisionByZero), run("1 0 mod"));
        assert_eq!(Err(Verr::StackUnderflow), run("1 +"));
        assert_eq!(Err(Verr::StackUnderflow), run("+"));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(Ok(vec![TRUE]), run("1 2 <"));
        assert_eq!(Ok(vec![FALSE]), run("2 1 <"));
        assert_eq!(Ok(vec![TRUE]), run("2 1 >"));
        assert_eq!(Ok(vec![TRUE]), run("7 7 ="));
        assert_eq!(Ok(vec![FALSE]), run("7 8 ="));
        assert_eq!(Ok(vec![TRUE]), run("7 8 !="));
        assert_eq!(Ok(vec![FALSE]), run("7 7 !="));
    }

    #[test]
    fn test_booleans_and_bitwise() {
        assert_eq!(Ok(vec![TRUE]), run("true"));
        assert_eq!(Ok(vec![FALSE]), run("false"));
        assert_eq!(Ok(vec![FALSE]), run("true false and"));
        assert_eq!(Ok(vec![TRUE]), run("true false or"));
        assert_eq!(Ok(vec![TRUE]), run("false invert"));
        assert_eq!(Ok(vec![42]), run("42 invert invert"));
        assert_eq!(Ok(vec![-43]), run("42 invert"));
    }

    #[test]
    fn test_stack_ops() {
        assert_eq!(Ok(vec![420, 420]), run("420 dup"));
        assert_eq!(Ok(vec![1]), run("1 2 drop"));
        assert_eq!(Ok(vec![2, 1]), run("1 2 swap"));
        assert_eq!(Ok(vec![1, 2, 1]), run("1 2 over"));
        assert_eq!(Ok(vec![2, 3, 1]), run("1 2 3 spin"));
        // spin is a three-cycle
        assert_eq!(Ok(vec![1, 2, 3]), run("1 2 3 spin spin spin"));
        assert_eq!(Err(Verr::StackUnderflow), run("dup"));
        assert_eq!(Err(Verr::StackUnderflow), run("drop"));
        assert_eq!(Err(Verr::StackUnderflow), run("1 swap"));
        assert_eq!(Err(Verr::StackUnderflow), run("1 over"));
        assert_eq!(Err(Verr::StackUnderflow), run("1 2 spin"));
    }

    #[test]
    fn test_output_words() {
        let words = vec![
            Word::new(WordKind::Push, "72"),
            Word::new(WordKind::Emit, "emit"),
            Word::new(WordKind::Push, "33"),
            Word::new(WordKind::Pop, "pop"),
            Word::new(WordKind::Cr, "cr"),
        ];
        let mut stack = Vec::new();
        let mut out = String::new();
        for w in &words {
            fold(&mut stack, w, &mut out).unwrap();
        }
        assert_eq!("H33\n\n", out);
        assert!(stack.is_empty());
        assert_eq!(Err(Verr::StackUnderflow), run("pop"));
        assert_eq!(Err(Verr::StackUnderflow), run("emit"));
    }

    #[test]
    fn test_fatal_words() {
        let udf = Word::new(WordKind::Udf, "double");
        assert_eq!(
            Err(Verr::UnknownWord(Vstr::from("double"))),
            execute(std::iter::once(&udf))
        );
        assert_eq!(Err(Verr::ControlFlowError), run("1 if 2 then"));
        assert_eq!(Err(Verr::ControlFlowError), run(";"));
        let bad = Word::new(WordKind::Push, "12x");
        assert_eq!(
            Err(Verr::IntegerParseError(Vstr::from("12x"))),
            execute(std::iter::once(&bad))
        );
    }
}
