//! CV sections: typed model, extraction from the generic tree, LaTeX output.

mod extract;
mod types;
mod writer;

pub use extract::extract_cv;
pub use types::{Achievement, Contact, CurriculumVitae, Experience, Header, Headline};
pub use writer::render_document;
