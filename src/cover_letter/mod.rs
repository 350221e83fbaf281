// src/cover_letter/mod.rs
pub mod document;
pub mod generator;
pub mod profile;

pub use document::{body_paragraphs, render_letter, Recipient, Typesetter};
pub use generator::{ComposedLetter, CoverLetterService, LetterTarget};
pub use profile::ApplicantProfile;
