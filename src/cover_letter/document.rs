// src/cover_letter/document.rs
//! LaTeX letter rendering and compilation.

use super::profile::ApplicantProfile;
use crate::config::TypesettingConfig;
use crate::error::{AssistError, Result};
use crate::utils::{escape_latex, escape_latex_url, preview};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{error, info, warn};

/// Template line before which body paragraphs are inserted.
pub const BODY_MARKER: &str = "\\vspace{0.5cm}";
const CLOSING_PHRASE: &str = "Sincerely,";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub company_name: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
}

/// Body paragraphs worth typesetting: the greeting (first) and sign-off
/// (last) are dropped, as is any paragraph carrying the closing phrase.
pub fn body_paragraphs(letter: &str) -> Vec<&str> {
    let paragraphs: Vec<&str> = letter.split("\n\n").collect();
    if paragraphs.len() < 3 {
        return Vec::new();
    }

    paragraphs[1..paragraphs.len() - 1]
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty() && !p.contains(CLOSING_PHRASE))
        .collect()
}

/// Fill the template's `#field` placeholders and insert the letter body.
///
/// `#email` and `#websiteUrl` are meant for hyperref arguments (`\href`,
/// `\url`, `\nolinkurl`) and get the URL escape; every other field is
/// escaped as running text.
pub fn render_letter(
    template: &str,
    profile: &ApplicantProfile,
    recipient: &Recipient,
    letter: &str,
) -> String {
    let fields = [
        ("#firstName", escape_latex(&profile.first_name)),
        ("#lastName", escape_latex(&profile.last_name)),
        ("#websiteUrl", escape_latex_url(&profile.website_url)),
        ("#email", escape_latex_url(&profile.email)),
        ("#phoneNumber", escape_latex(&profile.phone_number)),
        ("#fullName", escape_latex(&profile.full_name())),
        ("#address1", escape_latex(&recipient.address1)),
        ("#address2", escape_latex(&recipient.address2)),
        ("#companyName", escape_latex(&recipient.company_name)),
    ];

    let body: Vec<String> = body_paragraphs(letter)
        .into_iter()
        .map(|p| format!("\\lettercontent{{{}}}", escape_latex(p)))
        .collect();

    let mut out = String::with_capacity(template.len() + letter.len());
    for line in template.lines() {
        if line.trim() == BODY_MARKER {
            for paragraph in &body {
                out.push_str(paragraph);
                out.push('\n');
            }
        }

        out.push_str(&fill_fields(line, &fields));
        out.push('\n');
    }
    out
}

/// Single left-to-right pass, so a value that itself contains `#field` text
/// is never substituted again. Values are inserted as given.
fn fill_fields(line: &str, fields: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(pos) = rest.find('#') {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match fields.iter().find(|(field, _)| candidate.starts_with(field)) {
            Some((field, value)) => {
                out.push_str(value);
                rest = &candidate[field.len()..];
            }
            None => {
                out.push('#');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Runs the external LaTeX compiler in a throwaway workspace directory.
#[derive(Debug, Clone)]
pub struct Typesetter {
    config: TypesettingConfig,
}

impl Typesetter {
    pub fn new(config: TypesettingConfig) -> Self {
        Self { config }
    }

    /// Compile `tex` and return the path of the produced PDF in the output
    /// directory. A non-zero exit status is an error carrying the compiler log.
    pub async fn compile(&self, tex: &str, job_name: &str) -> Result<PathBuf> {
        let output_dir = &self.config.output_dir;
        let workspace = output_dir.join(format!("tmp_letter_{}", uuid::Uuid::new_v4()));

        tokio::fs::create_dir_all(&workspace)
            .await
            .map_err(|e| typesetting_io("create workspace", &workspace, e))?;

        let result = self.compile_in(&workspace, tex, job_name).await;

        if let Err(e) = tokio::fs::remove_dir_all(&workspace).await {
            warn!("Failed to remove workspace {}: {}", workspace.display(), e);
        }
        result
    }

    async fn compile_in(&self, workspace: &Path, tex: &str, job_name: &str) -> Result<PathBuf> {
        let tex_path = workspace.join(format!("{}.tex", job_name));
        tokio::fs::write(&tex_path, tex)
            .await
            .map_err(|e| typesetting_io("write", &tex_path, e))?;

        info!(
            "Compiling {} with {}",
            tex_path.display(),
            self.config.command
        );

        let output = Command::new(&self.config.command)
            .args(&self.config.args)
            .arg(format!("-output-directory={}", workspace.display()))
            .arg(&tex_path)
            .output()
            .await
            .map_err(|e| {
                error!("Failed to execute {}: {}", self.config.command, e);
                AssistError::Typesetting(format!(
                    "failed to execute '{}': {}",
                    self.config.command, e
                ))
            })?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("{} exited with {}", self.config.command, output.status);
            return Err(AssistError::Typesetting(format!(
                "{} exited with {}: stderr={}, stdout={}",
                self.config.command,
                output.status,
                preview(stderr.trim(), 500),
                preview(stdout.trim(), 500)
            )));
        }

        let produced = workspace.join(format!("{}.pdf", job_name));
        if !produced.exists() {
            return Err(AssistError::Typesetting(format!(
                "{} reported success but produced no PDF",
                self.config.command
            )));
        }

        let final_path = self.config.output_dir.join(format!(
            "{}_{}.pdf",
            job_name,
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        ));
        tokio::fs::rename(&produced, &final_path)
            .await
            .map_err(|e| typesetting_io("move", &final_path, e))?;

        info!("Letter compiled to {}", final_path.display());
        Ok(final_path)
    }
}

fn typesetting_io(action: &str, path: &Path, e: std::io::Error) -> AssistError {
    AssistError::Typesetting(format!("failed to {} {}: {}", action, path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\\name{#fullName}\n\\contact{#email}{#phoneNumber}\nTo: #companyName, #address1\n\\vspace{0.5cm}\n\\closing{#firstName}\n";

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            website_url: "https://ada.dev".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "+41 00".to_string(),
        }
    }

    fn recipient() -> Recipient {
        Recipient {
            company_name: "Smith & Sons".to_string(),
            address1: "Bahnhofstrasse 45".to_string(),
            address2: "8001 Zurich".to_string(),
        }
    }

    #[test]
    fn test_body_paragraphs_drop_greeting_closing_and_signoff() {
        let letter = "Dear team,\n\nFirst point.\n\nSecond point.\n\nSincerely,\nAda\n\nAda Lovelace";
        assert_eq!(body_paragraphs(letter), vec!["First point.", "Second point."]);
        assert!(body_paragraphs("Only one paragraph").is_empty());
    }

    #[test]
    fn test_render_fills_fields_and_inserts_body() {
        let letter = "Dear team,\n\nI ship 100% of my tasks.\n\nBest regards";
        let tex = render_letter(TEMPLATE, &profile(), &recipient(), letter);

        assert!(tex.contains("\\name{Ada Lovelace}"));
        assert!(tex.contains("To: Smith \\& Sons, Bahnhofstrasse 45"));
        assert!(tex.contains("\\closing{Ada}"));
        assert!(tex.contains("\\lettercontent{I ship 100\\% of my tasks.}\n\\vspace{0.5cm}"));
        assert!(!tex.contains("Dear team"));
    }

    #[test]
    fn test_field_values_are_not_substituted_twice() {
        let line = fill_fields(
            "#firstName / #lastName / #unknown",
            &[
                ("#firstName", "#lastName".to_string()),
                ("#lastName", "Lovelace".to_string()),
            ],
        );
        assert_eq!(line, "#lastName / Lovelace / #unknown");

        let mut applicant = profile();
        applicant.first_name = "#lastName".to_string();
        let tex = render_letter("#firstName", &applicant, &recipient(), "");
        assert_eq!(tex, "\\#lastName\n");
    }

    #[test]
    fn test_link_fields_keep_underscores_and_tildes() {
        let mut applicant = profile();
        applicant.email = "ada_l@example.com".to_string();
        applicant.website_url = "https://ada.dev/~ada_l#cv".to_string();

        let tex = render_letter(
            "\\href{mailto:#email}{\\nolinkurl{#email}} \\url{#websiteUrl} #lastName",
            &applicant,
            &recipient(),
            "",
        );

        assert_eq!(
            tex,
            "\\href{mailto:ada_l@example.com}{\\nolinkurl{ada_l@example.com}} \\url{https://ada.dev/~ada_l\\#cv} Lovelace\n"
        );
    }

    #[test]
    fn test_bundled_template_gets_body_once() {
        let template = include_str!("../../templates/template.tex");
        let letter = "Dear team,\n\nOnly paragraph.\n\nBest,\nAda";
        let tex = render_letter(template, &profile(), &recipient(), letter);

        assert_eq!(tex.matches("\\lettercontent{Only paragraph.}").count(), 1);
        assert!(tex.contains("\\newcommand{\\lettercontent}[1]{#1"));
        assert!(!tex.contains("#fullName"));
    }

    fn typesetter(dir: &Path, command: &str, args: Vec<String>) -> Typesetter {
        Typesetter::new(TypesettingConfig {
            command: command.to_string(),
            args,
            template_path: PathBuf::from("unused.tex"),
            output_dir: dir.to_path_buf(),
        })
    }

    #[tokio::test]
    async fn test_compile_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = typesetter(dir.path(), "false", Vec::new())
            .compile("\\documentclass{letter}", "coverletter")
            .await;

        assert!(matches!(result, Err(AssistError::Typesetting(_))));
        // workspace is cleaned up even on failure
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_compiler_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = typesetter(dir.path(), "definitely-not-a-latex-binary", Vec::new())
            .compile("x", "coverletter")
            .await;

        match result {
            Err(AssistError::Typesetting(message)) => {
                assert!(message.contains("definitely-not-a-latex-binary"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_compile_success_moves_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let script = r#"out="${1#-output-directory=}"; base=$(basename "$2" .tex); printf '%%PDF-1.4' > "$out/$base.pdf""#;
        let setter = typesetter(
            dir.path(),
            "sh",
            vec!["-c".to_string(), script.to_string(), "sh".to_string()],
        );

        let pdf = setter.compile("\\documentclass{letter}", "coverletter").await.unwrap();

        assert!(pdf.starts_with(dir.path()));
        assert_eq!(std::fs::read(&pdf).unwrap(), b"%PDF-1.4");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
