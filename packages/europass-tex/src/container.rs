//! Loading the CV document from its container file.
//!
//! A `.xml` file is read as is. A `.pdf` file is a Europass PDF export that
//! carries the XML as its single embedded-file attachment.

use std::path::Path;

use lopdf::{Dictionary, Document, Object};

use crate::error::{ConvertError, Result};

/// Maximum nesting of `/Kids` nodes followed in the embedded-files name tree.
const MAX_NAME_TREE_DEPTH: usize = 32;

/// UTF-8 byte order mark.
const BOM: char = '\u{feff}';

/// Kind of input file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Xml,
    Pdf,
}

impl InputKind {
    /// Classify a path by its extension (case-insensitive).
    ///
    /// # Errors
    /// Returns `ConvertError::UnsupportedInput` for any other extension.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use europass_tex::container::InputKind;
    ///
    /// assert_eq!(InputKind::from_path(Path::new("cv.XML")).unwrap(), InputKind::Xml);
    /// assert_eq!(InputKind::from_path(Path::new("cv.pdf")).unwrap(), InputKind::Pdf);
    /// assert!(InputKind::from_path(Path::new("cv.docx")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xml") => Ok(Self::Xml),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(ConvertError::UnsupportedInput(path.display().to_string())),
        }
    }
}

/// A file embedded in a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub data: Vec<u8>,
}

/// Extract every embedded file from a PDF, in name-tree order.
///
/// Filtered streams are decoded. A PDF without an embedded-files tree has
/// no attachments.
///
/// # Errors
/// Returns `ConvertError::Pdf` if the document cannot be parsed or an
/// attachment stream cannot be decoded, and `ConvertError::StructuralMismatch`
/// if the name tree is malformed.
pub fn extract_attachments(bytes: &[u8]) -> Result<Vec<Attachment>> {
    let doc = Document::load_mem(bytes)?;

    let Some(tree) = embedded_files_tree(&doc)? else {
        return Ok(Vec::new());
    };

    let mut attachments = Vec::new();
    collect_attachments(&doc, tree, 0, &mut attachments)?;
    Ok(attachments)
}

/// Locate `/Root /Names /EmbeddedFiles`, if present.
fn embedded_files_tree(doc: &Document) -> Result<Option<&Dictionary>> {
    let catalog = doc.catalog()?;

    let Ok(names) = catalog.get(b"Names") else {
        return Ok(None);
    };
    let names = doc.dereference(names)?.1.as_dict()?;

    let Ok(tree) = names.get(b"EmbeddedFiles") else {
        return Ok(None);
    };
    Ok(Some(doc.dereference(tree)?.1.as_dict()?))
}

/// Walk one name-tree node: its `/Names` leaf pairs, then its `/Kids`.
fn collect_attachments(
    doc: &Document,
    node: &Dictionary,
    depth: usize,
    out: &mut Vec<Attachment>,
) -> Result<()> {
    if depth > MAX_NAME_TREE_DEPTH {
        return Err(ConvertError::StructuralMismatch(
            "embedded-files name tree is nested too deeply".to_string(),
        ));
    }

    if let Ok(names) = node.get(b"Names") {
        let names = doc.dereference(names)?.1.as_array()?;
        for pair in names.chunks(2) {
            let [key, spec] = pair else {
                return Err(ConvertError::StructuralMismatch(
                    "embedded-files name array has an odd length".to_string(),
                ));
            };
            out.push(read_filespec(doc, key, spec)?);
        }
    }

    if let Ok(kids) = node.get(b"Kids") {
        for kid in doc.dereference(kids)?.1.as_array()? {
            let kid = doc.dereference(kid)?.1.as_dict()?;
            collect_attachments(doc, kid, depth + 1, out)?;
        }
    }

    Ok(())
}

/// Read one file specification and its embedded stream.
fn read_filespec(doc: &Document, key: &Object, spec: &Object) -> Result<Attachment> {
    let spec = doc.dereference(spec)?.1.as_dict()?;

    let name = [b"UF".as_slice(), b"F".as_slice()]
        .iter()
        .find_map(|field| spec.get(field).ok().and_then(|o| o.as_str().ok()))
        .or_else(|| doc.dereference(key).ok().and_then(|(_, o)| o.as_str().ok()))
        .map(|raw| String::from_utf8_lossy(raw).into_owned())
        .unwrap_or_default();

    let embedded = doc.dereference(spec.get(b"EF")?)?.1.as_dict()?;
    let stream = doc.dereference(embedded.get(b"F")?)?.1.as_stream()?;

    let data = if stream.dict.has(b"Filter") {
        stream.decompressed_content()?
    } else {
        stream.content.clone()
    };

    Ok(Attachment { name, data })
}

/// Decode document bytes as UTF-8, dropping a leading byte order mark.
///
/// Invalid sequences are replaced rather than rejected, with a warning.
pub fn bytes_to_string(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                valid_up_to = e.utf8_error().valid_up_to(),
                "Document is not valid UTF-8, replacing invalid sequences"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    match text.strip_prefix(BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Load the CV XML text from a `.xml` or `.pdf` file.
///
/// # Errors
/// - `ConvertError::UnsupportedInput` for other file types
/// - `ConvertError::Io` if the file cannot be read
/// - `ConvertError::AttachmentCount` unless a PDF holds exactly one attachment
pub fn load_xml(path: &Path) -> Result<String> {
    let kind = InputKind::from_path(path)?;
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), ?kind, size = bytes.len(), "Read input file");

    let bytes = match kind {
        InputKind::Xml => bytes,
        InputKind::Pdf => {
            let mut attachments = extract_attachments(&bytes)?;
            if attachments.len() != 1 {
                return Err(ConvertError::AttachmentCount {
                    count: attachments.len(),
                });
            }
            let attachment = attachments.remove(0);
            tracing::debug!(name = %attachment.name, size = attachment.data.len(), "Using PDF attachment");
            attachment.data
        }
    };

    Ok(bytes_to_string(bytes))
}
