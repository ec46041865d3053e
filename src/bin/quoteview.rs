use std::env;
use std::fs;
use std::process;

use quotelen::{decode, measure};

fn usage() {
    eprintln!(
        "Usage: quoteview <file> [start_line [end_line]]\n\n\
         Prints literal lines as: <lineno>|<raw>|<decoded>|<encoded>|  <content>  '<value>'\n\
         Blank lines are skipped. start_line/end_line are 1-based inclusive."
    );
}

fn parse_line_arg(arg: Option<&String>, name: &str) -> Option<usize> {
    match arg.map(|s| s.parse::<usize>()) {
        None => None,
        Some(Ok(v)) => Some(v),
        Some(Err(_)) => {
            eprintln!("error: {name} must be an integer");
            process::exit(2);
        }
    }
}

/// One output row: measurements, the literal as written, then its decoded value.
fn render(lineno: usize, line: &str) -> Result<Option<String>, String> {
    let Some(t) = measure(lineno, line).map_err(|e| e.to_string())? else {
        return Ok(None);
    };
    let value = decode(line).map_err(|e| format!("line {lineno}: {e}"))?;
    Ok(Some(format!("{t}  {line}  '{value}'")))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        usage();
        process::exit(2);
    }

    let file = &args[1];
    let start = parse_line_arg(args.get(2), "start_line");
    let end = parse_line_arg(args.get(3), "end_line");

    let bytes = match fs::read(file) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: failed to read {file}: {e}");
            process::exit(1);
        }
    };

    if bytes.contains(&0) {
        eprintln!("error: binary file rejected (NUL byte found)");
        process::exit(1);
    }

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(_) => {
            eprintln!("error: non-UTF8 file rejected");
            process::exit(1);
        }
    };

    let lines: Vec<&str> = text.lines().collect();

    if lines.is_empty() {
        return;
    }

    let (start_line, end_line) = match (start, end) {
        (None, None) => (1, lines.len()),
        (Some(s), None) => (s, s),
        (Some(s), Some(e)) => (s, e),
        (None, Some(_)) => {
            eprintln!("error: end_line requires start_line");
            process::exit(2);
        }
    };

    if start_line == 0 {
        eprintln!("error: start_line is 1-based (must be >= 1)");
        process::exit(2);
    }

    if end_line < start_line {
        eprintln!("error: end_line must be >= start_line");
        process::exit(2);
    }

    if end_line > lines.len() {
        eprintln!(
            "error: end_line {end_line} is beyond EOF (file has {} line(s))",
            lines.len()
        );
        process::exit(2);
    }

    for (idx, line) in lines
        .iter()
        .enumerate()
        .skip(start_line - 1)
        .take(end_line - start_line + 1)
    {
        match render(idx + 1, line) {
            Ok(Some(row)) => println!("{row}"),
            Ok(None) => {}
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(2);
            }
        }
    }
}
