use crate::lexer;
use crate::source::StringSource;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::Editor;

pub fn run_repl() {
    println!("bifil REPL");
    println!("Type '.exit' to quit, '.tokens' to toggle token dump mode");
    println!("End a line with '\\' to continue it on the next one");

    let mut rl = match Editor::<(), rustyline::history::FileHistory>::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("{} cannot start the line editor: {}", "Error:".red().bold(), e);
            return;
        }
    };
    let mut input_buffer = String::new();
    let mut continuation = false;
    let mut dump_tokens = false;

    loop {
        let prompt = if continuation { "... " } else { ">>> " };
        match rl.readline(prompt) {
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    println!("Cannot add history entry: {:?}", e);
                }

                match line.trim() {
                    ".exit" if !continuation => break,
                    ".tokens" if !continuation => {
                        dump_tokens = !dump_tokens;
                        println!("Token dump {}", if dump_tokens { "on" } else { "off" });
                        continue;
                    }
                    _ => {}
                }

                let trimmed = line.trim_end();
                if let Some(stripped) = trimmed.strip_suffix('\\') {
                    input_buffer.push_str(stripped);
                    input_buffer.push('\n');
                    continuation = true;
                    continue;
                }
                input_buffer.push_str(&line);
                continuation = false;

                if dump_tokens {
                    print_tokens(&input_buffer);
                } else if let Err(error) = crate::run_source(StringSource::new(&input_buffer)) {
                    crate::report(&error);
                }
                input_buffer.clear();
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
}

fn print_tokens(source: &str) {
    match lexer::lex(source) {
        Ok(tokens) => {
            println!("Tokens:");
            for token in tokens {
                println!("  {}", token);
            }
        }
        Err(e) => {
            eprintln!("{}", "Lexer error:".red().bold());
            eprintln!("{}", e);
        }
    }
}
