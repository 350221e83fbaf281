// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Collapse every run of whitespace (including newlines) into one space and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Escape characters that LaTeX treats as markup.
pub fn escape_latex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape for arguments of hyperref's `\url`, `\href` and `\nolinkurl`,
/// which take `_` and `~` literally but still need `%` and `#` escaped.
pub fn escape_latex_url(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '#') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Truncate for log lines, respecting char boundaries.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}

pub async fn read_file_safe(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Senior \n\t Engineer  "), "Senior Engineer");
        assert_eq!(clean_text("\n\n"), "");
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.pdf"), Some("pdf".to_string()));
        assert_eq!(
            get_file_extension("Resume.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("R&D 100%"), "R\\&D 100\\%");
        assert_eq!(escape_latex("a_b #1"), "a\\_b \\#1");
        assert_eq!(escape_latex("plain"), "plain");
    }

    #[test]
    fn test_escape_latex_url() {
        assert_eq!(
            escape_latex_url("https://ada.dev/~ada_l?q=1%20#top"),
            "https://ada.dev/~ada_l?q=1\\%20\\#top"
        );
        assert_eq!(escape_latex_url("ada_l@example.com"), "ada_l@example.com");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("abc", 3), "abc");
    }
}
