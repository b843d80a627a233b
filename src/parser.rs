/// A parsed input line: the argument vector plus redirection targets and
/// the background marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub args: Vec<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub background: bool,
}

/// Splits a line into a command record. Returns `None` for blank lines,
/// comment lines (leading `#`) and lines with no arguments left after
/// redirection tokens are consumed.
///
/// `<` and `>` each take the following token as a file path. A standalone
/// `&` marks background execution only when it is the final token;
/// anywhere else it is an ordinary argument.
pub fn parse_line(line: &str) -> Option<CommandRecord> {
    if line.starts_with('#') {
        return None;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut args = Vec::new();
    let mut input_file = None;
    let mut output_file = None;
    let mut background = false;

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "<" => {
                i += 1;
                input_file = tokens.get(i).map(|s| s.to_string());
            }
            ">" => {
                i += 1;
                output_file = tokens.get(i).map(|s| s.to_string());
            }
            "&" if i + 1 == tokens.len() => background = true,
            token => args.push(token.to_string()),
        }
        i += 1;
    }

    if args.is_empty() {
        return None;
    }

    Some(CommandRecord {
        args,
        input_file,
        output_file,
        background,
    })
}
