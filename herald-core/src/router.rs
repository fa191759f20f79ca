use crate::command::{AliasTable, LoadedCommand};

use herald::arguments::{ArgumentsExt, OwnedArguments};

/// Splits a raw argument string into tokens.
///
/// Tokens are separated by spaces. A section enclosed in double
/// quotes forms a single token, the quotes themselves are not part
/// of it.
pub fn parse_args(input: &str) -> OwnedArguments {
    let mut args = Vec::new();

    let mut start = 0;
    let mut esc = false;
    for (i, b) in input.bytes().enumerate() {
        match b {
            b if b == b' ' && !esc => {
                args.push(&input[start..i]);
                start = i + 1;
            }
            b'"' => {
                if esc {
                    args.push(&input[start + 1..i]);
                    start = i + 1;
                }
                esc = !esc;
            }
            _ => (),
        }
    }

    args.push(&input[start..]);

    args.into_iter().filter(|arg| !arg.is_empty()).collect()
}

/// Walks the alias table along the leading arguments and returns
/// the deepest matching command.
///
/// Matched tokens are consumed from `args`, everything after the
/// deepest match stays as the argument list of the invocation.
/// Returns `None` if the first token matches no top-level command.
pub fn find_command<'a, A>(commands: &'a AliasTable, args: &mut A) -> Option<&'a LoadedCommand>
where
    A: ArgumentsExt,
{
    let head = args.pop()?;
    let mut command = commands.get(&head)?;

    while let Some(arg) = args.get(0) {
        match command.sub_commands().get(arg) {
            Some(cmd) => {
                args.pop();
                command = cmd;
            }
            None => break,
        }
    }

    Some(command)
}
