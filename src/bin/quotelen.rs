use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use quotelen::tally_text;

fn usage() {
    eprintln!(
        "Usage: quotelen [--encode] [--totals] <file|->\n\n\
         Reads one double-quoted literal per line (escapes: \\\" \\\\ \\xHH)\n\
         and prints total raw length minus total decoded length.\n\
         Blank lines are skipped. Use '-' to read from stdin.\n\n\
         With --encode, prints total re-encoded length minus total raw length.\n\
         With --totals, prints every total and both differences.\n"
    );
}

fn read_input(file: &str) -> io::Result<Vec<u8>> {
    if file == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(file)
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut encode = false;
    let mut totals = false;

    let mut idx = 1;
    while idx < args.len() {
        match args[idx].as_str() {
            "--encode" => {
                encode = true;
                idx += 1;
            }
            "--totals" => {
                totals = true;
                idx += 1;
            }
            "--help" | "-h" => {
                usage();
                return;
            }
            s if s.starts_with('-') && s.len() > 1 => {
                eprintln!("error: unknown flag {s}");
                usage();
                process::exit(2);
            }
            _ => break,
        }
    }

    if idx + 1 != args.len() {
        usage();
        process::exit(2);
    }
    let file = &args[idx];

    let bytes = match read_input(file) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: failed to read {file}: {e}");
            process::exit(1);
        }
    };

    if bytes.contains(&0) {
        eprintln!("error: binary input rejected (NUL byte found)");
        process::exit(1);
    }

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(_) => {
            eprintln!("error: non-UTF8 input rejected");
            process::exit(1);
        }
    };

    let acc = match tally_text(&text) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    if totals {
        println!("literals: {}", acc.literals());
        println!("raw: {}", acc.raw_total());
        println!("decoded: {}", acc.decoded_total());
        println!("encoded: {}", acc.encoded_total());
        println!("difference: {}", acc.difference());
        println!("encoded_difference: {}", acc.encoded_difference());
    } else if encode {
        println!("{}", acc.encoded_difference());
    } else {
        println!("{}", acc.difference());
    }
}
