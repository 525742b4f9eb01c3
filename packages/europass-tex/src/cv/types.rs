//! Typed CV sections.
//!
//! Every string field holds a LaTeX-ready fragment, so the writer only has
//! to place fields, never to escape them.

use serde::Serialize;

/// A labelled contact entry (telephone, instant messaging).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Use of the contact, e.g. "Mobile" or "Skype". Empty when absent.
    pub label: String,

    /// The number or handle itself.
    pub value: String,
}

/// Personal details shown at the top of the CV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub first_name: String,
    pub surname: String,
    pub address_line: String,
    pub postal_code: String,
    pub municipality: String,
    pub country: String,
    pub country_code: String,
    pub email: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telephones: Vec<Contact>,

    /// Website URLs, kept verbatim for `\url{}`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub websites: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instant_messaging: Vec<Contact>,
}

impl Header {
    /// First name and surname joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }
}

/// The headline section: a free section name and its text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub name: String,
    pub text: String,
}

/// One work experience or education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Experience {
    /// Rendered period, e.g. "2018/01 -- 2020/03".
    pub period: String,

    /// Position held or qualification title.
    pub title: String,

    /// Employer or organisation name.
    pub organisation: String,

    /// Address suffix of the organisation, e.g. ", Ghent, (Belgium)".
    pub address: String,

    pub activities: String,
}

/// One entry of the additional information section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
}

/// A complete CV, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CurriculumVitae {
    pub header: Header,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<Headline>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_related_skills: Option<String>,

    pub education: Vec<Experience>,
    pub work_experience: Vec<Experience>,
    pub achievements: Vec<Achievement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let header = Header {
            first_name: "Jane".to_string(),
            surname: "Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(header.full_name(), "Jane Doe");
    }

    #[test]
    fn test_serialize_skips_absent_sections() {
        let cv = CurriculumVitae::default();
        let yaml = serde_yaml_ng::to_string(&cv).unwrap();
        assert!(yaml.contains("header:"));
        assert!(!yaml.contains("headline"));
        assert!(!yaml.contains("job_related_skills"));
        assert!(!yaml.contains("telephones"));
        assert!(yaml.contains("education: []"));
    }
}
