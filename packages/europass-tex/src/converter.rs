//! Main converter service that ties all components together.

use std::path::Path;

use roxmltree::Document;

use crate::config::{RenderOptions, ROOT_ELEMENT};
use crate::container::load_xml;
use crate::cv::{extract_cv, render_document};
use crate::error::{ConvertError, Result};
use crate::tree::GenericNode;

/// Parse CV XML into the generic tree.
///
/// # Errors
/// - `ConvertError::XmlParse` if the text is not well-formed XML
/// - `ConvertError::UnexpectedRoot` unless the root element is `SkillsPassport`
///
/// # Examples
/// ```
/// use europass_tex::converter::parse_tree;
///
/// let tree = parse_tree(r#"<SkillsPassport locale="en"><LearnerInfo/></SkillsPassport>"#).unwrap();
/// assert_eq!(tree.name(), Some("SkillsPassport"));
///
/// assert!(parse_tree("<html/>").is_err());
/// ```
pub fn parse_tree(xml: &str) -> Result<GenericNode> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let name = root.tag_name().name();
    if name != ROOT_ELEMENT {
        return Err(ConvertError::UnexpectedRoot {
            expected: ROOT_ELEMENT.to_string(),
            found: name.to_string(),
        });
    }

    GenericNode::from_xml(root)?.ok_or_else(|| {
        ConvertError::StructuralMismatch("root element produced no node".to_string())
    })
}

/// Convert CV XML text into a LaTeX document.
pub fn convert_xml(xml: &str, options: &RenderOptions) -> Result<String> {
    let tree = parse_tree(xml)?;
    let cv = extract_cv(&tree)?;
    tracing::debug!(
        education = cv.education.len(),
        work_experience = cv.work_experience.len(),
        achievements = cv.achievements.len(),
        "Extracted CV sections"
    );

    Ok(render_document(&cv, options))
}

/// Convert a `.xml` or `.pdf` CV file into a LaTeX document.
///
/// # Arguments
/// * `path` - The input file, XML or a PDF carrying the XML as attachment
/// * `options` - Rendering options for the document
pub fn convert_file(path: &Path, options: &RenderOptions) -> Result<String> {
    tracing::info!(path = %path.display(), "Converting CV");
    let xml = load_xml(path)?;
    convert_xml(&xml, options)
}
