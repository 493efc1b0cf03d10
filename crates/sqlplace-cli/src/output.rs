//! Terminal output formatting for the sqlplace CLI.
//!
//! Status lines go to stderr so that `sqlplace bind` output stays pipeable.

use console::style;

/// Write bound SQL to stdout, unstyled, so it can be piped into a client.
pub fn print_sql(sql: &str) {
    println!("{sql}");
}

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    eprintln!("\n{}", style(text).bold().cyan());
    eprintln!("{}", style("=".repeat(text.len())).dim());
}

/// Print a status line prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    eprintln!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    eprintln!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print one placeholder row of `sqlplace inspect`: span, marker text, kind.
pub fn print_placeholder(span: &str, marker: &str, kind: &str) {
    eprintln!("  {:>9}  {}  {}", style(span).dim(), style(marker).bold(), style(kind).cyan());
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    eprintln!("  {}: {}", style(key).dim(), value);
}
