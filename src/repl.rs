use crate::{CalcFloat, Session};
use log::warn;
use std::io::{self, BufRead, Write};

/// Prompt that is written before each line is read.
pub const PROMPT: &str = "> ";

/// Reads statements line by line from `input` and executes them in `session` until the input
/// ends. Values are written to `output` with `{:?}`, errors with their message. A line that is
/// not valid UTF-8 is reported like any other failing statement.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use stackcalc::{repl, Session};
/// let mut session = Session::<f64>::new();
/// let mut output = Vec::new();
/// repl(&mut session, "x = 3\nx * 2\n".as_bytes(), &mut output)?;
/// assert_eq!(String::from_utf8(output)?, "> > 6.0\n> \n");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Only failures of reading from `input` or writing to `output` end the loop early.
///
pub fn repl<T, R, W>(session: &mut Session<T>, mut input: R, mut output: W) -> io::Result<()>
where
    T: CalcFloat,
    R: BufRead,
    W: Write,
{
    let mut bytes = Vec::new();
    loop {
        output.write_all(PROMPT.as_bytes())?;
        output.flush()?;
        bytes.clear();
        if input.read_until(b'\n', &mut bytes)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line,
            Err(e) => {
                warn!("skipping line with invalid UTF-8, {e}");
                writeln!(output, "line is not valid UTF-8")?;
                continue;
            }
        };
        match session.exec_line(line.trim()) {
            Ok(Some(x)) => writeln!(output, "{x:?}")?,
            Ok(None) => (),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
    writeln!(output)?;
    Ok(())
}
