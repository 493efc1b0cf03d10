use anyhow::Result;

use sqlplace_core::scanner;

use crate::output;

/// List the placeholders of a template with their offsets.
///
/// Array placeholders without a usable suffix are flagged, since binding them
/// would fail with a missing element type.
pub fn run(template: &str) -> Result<()> {
    output::print_header("sqlplace inspect");

    let placeholders = scanner::scan(template);
    if placeholders.is_empty() {
        output::print_warning("No placeholders found");
        return Ok(());
    }

    for placeholder in &placeholders {
        let spec = &placeholder.spec;
        let span = format!("{}..{}", placeholder.offset, placeholder.end);
        output::print_placeholder(&span, &spec.to_string(), &spec.kind.to_string());
        if spec.kind.is_array() && spec.suffix.is_none() {
            output::print_warning(&format!(
                "{spec} at offset {} has no element type or bracket list",
                placeholder.offset
            ));
        }
    }

    output::print_success(&format!("{} placeholder(s)", placeholders.len()));
    Ok(())
}
