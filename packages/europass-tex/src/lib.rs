//! Europass to LaTeX - Convert Europass CV documents to LaTeX.
//!
//! This crate reads a Europass "SkillsPassport" CV, either as plain XML or
//! as the attachment embedded in a Europass PDF export, and renders it as a
//! LaTeX document ready for typesetting.
//!
//! # Example
//!
//! ```
//! use europass_tex::{convert_xml, RenderOptions};
//!
//! let xml = "<SkillsPassport><LearnerInfo><Identification>\
//!            <PersonName><FirstName>Jane</FirstName><Surname>Doe</Surname></PersonName>\
//!            <ContactInfo><Address><Contact><Country><Code>BE</Code></Country></Contact></Address></ContactInfo>\
//!            </Identification></LearnerInfo></SkillsPassport>";
//!
//! let latex = convert_xml(xml, &RenderOptions::default()).unwrap();
//! assert!(latex.contains(r"\name{Jane Doe}"));
//! ```
//!
//! # Architecture
//!
//! The converter is organized into several modules:
//!
//! - [`config`]: Configuration constants, render options and validation
//! - [`error`]: Error types and Result alias
//! - [`tree`]: Generic document tree and breadth-first key search
//! - [`latex`]: Field text to LaTeX conversion and date/address formatting
//! - [`container`]: Reading XML files and PDF attachments
//! - [`cv`]: Typed CV sections, their extraction and the document writer
//! - [`cli`]: Command-line interface
//! - [`converter`]: Main converter service

pub mod cli;
pub mod config;
pub mod container;
pub mod converter;
pub mod cv;
pub mod error;
pub mod latex;
pub mod tree;

// Re-export main functions
pub use converter::{convert_file, convert_xml, parse_tree};

// Re-export commonly used items
pub use config::RenderOptions;
pub use cv::CurriculumVitae;
pub use error::{ConvertError, OptionalField, Result};
pub use tree::{GenericNode, Scope};
