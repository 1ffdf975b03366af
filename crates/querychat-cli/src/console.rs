//! CLI console utilities

use colored::*;
use std::io::{self, BufRead, Write};

/// CLI console for formatted output
pub struct Console {
    verbose: bool,
}

impl Console {
    /// Create a new console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print the session banner
    pub fn banner(&self, database: &str) {
        println!();
        println!("{}", "querychat".bold().underline());
        println!(
            "Connected to {}. Ask a question, or type {} to leave.",
            database.cyan(),
            "quit".dimmed()
        );
        println!();
    }

    /// Print the model's answer
    pub fn answer(&self, text: &str) {
        println!();
        println!("{}", text);
        println!();
    }

    /// Read one line of user input. Returns `None` on end of input.
    pub fn input(&self) -> io::Result<Option<String>> {
        print!("{} ", "You:".blue().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
