/// Standard output utilities for consistent command formatting
use colored::*;
use std::fmt::Display;

pub fn section_header_with_line(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Display an info message
pub fn info(message: &str) {
    println!("{} {}", "●".blue(), message);
}

/// Display a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Display an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let prefix = if is_last { "└─" } else { "├─" };
    if let Some(val) = value {
        println!("{} {}: {}", prefix.dimmed(), label, val);
    } else {
        println!("{} {}", prefix.dimmed(), label);
    }
}

/// Tree section with nested items
pub fn tree_section(title: &str, items: Vec<(&str, String)>, is_last: bool) {
    tree_item(is_last, title, None);
    let continuation = if is_last { "   " } else { "│  " };
    let count = items.len();
    for (i, (label, value)) in items.into_iter().enumerate() {
        let prefix = if i + 1 == count { "└─" } else { "├─" };
        println!("{}{} {}: {}", continuation.dimmed(), prefix.dimmed(), label, value);
    }
}

/// Format a number with thousands separators
pub fn format_number<T: Display>(n: T) -> String {
    let s = n.to_string();

    let (is_negative, digits) = if let Some(stripped) = s.strip_prefix('-') {
        (true, stripped)
    } else {
        (false, s.as_str())
    };

    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    let formatted: String = result.chars().rev().collect();
    if is_negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}
