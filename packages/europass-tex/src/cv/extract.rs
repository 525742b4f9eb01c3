//! Extraction of the typed CV sections from the generic document tree.
//!
//! Fields are located by key search rather than by schema path, so the
//! extraction tolerates the layout differences between Europass versions.
//! Required fields fail with `KeyNotFound`; optional ones come out empty.

use super::types::{Achievement, Contact, CurriculumVitae, Experience, Header, Headline};
use crate::error::{OptionalField, Result};
use crate::latex::{format_organisation_address, format_period, latex_text};
use crate::tree::{Entry, GenericNode, Scope};

/// Extract a complete CV from the transformed `SkillsPassport` root.
///
/// # Errors
/// - `ConvertError::KeyNotFound` when a required field is missing
/// - `ConvertError::StructuralMismatch` when a field has an unexpected shape
/// - `ConvertError::UnsupportedMarkup` when field text holds an unknown tag
pub fn extract_cv(root: &GenericNode) -> Result<CurriculumVitae> {
    let document = Entry::Node(root);

    Ok(CurriculumVitae {
        header: extract_header(&document)?,
        headline: extract_headline(&document)?,
        job_related_skills: extract_skills(&document)?,
        education: extract_items(&document, "EducationList", extract_education)?,
        work_experience: extract_items(&document, "WorkExperienceList", extract_work)?,
        achievements: extract_items(&document, "AchievementList", extract_achievement)?,
    })
}

/// Optional field text converted to LaTeX, empty when absent.
fn field<'a>(scope: &impl Scope<'a>, key: &str) -> Result<String> {
    latex_text(scope.text(key).optional()?)
}

/// Optional text of `inner` within the value found under `outer`.
fn nested_field<'a>(scope: &impl Scope<'a>, outer: &str, inner: &str) -> Result<String> {
    match scope.find(outer).optional()? {
        Some(value) => field(&value, inner),
        None => Ok(String::new()),
    }
}

/// Map every element of an optional list to a section item.
fn extract_items<'a, T>(
    scope: &impl Scope<'a>,
    key: &str,
    extract: fn(Entry<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let Some(list) = scope.find(key).optional()? else {
        return Ok(Vec::new());
    };
    list.elements()?.into_iter().map(extract).collect()
}

fn extract_header<'a>(document: &impl Scope<'a>) -> Result<Header> {
    let identification = document.find("Identification")?;
    let country = identification.find("Country")?;

    Ok(Header {
        first_name: field(&identification, "FirstName")?,
        surname: field(&identification, "Surname")?,
        address_line: field(&identification, "AddressLine")?,
        postal_code: field(&identification, "PostalCode")?,
        municipality: field(&identification, "Municipality")?,
        country: field(&country, "Label")?,
        country_code: field(&country, "Code")?,
        email: field(&identification, "Email")?,
        telephones: extract_items(&identification, "TelephoneList", extract_contact)?,
        websites: extract_items(&identification, "WebsiteList", extract_website)?,
        instant_messaging: extract_items(&identification, "InstantMessagingList", extract_contact)?,
    })
}

fn extract_contact(item: Entry<'_>) -> Result<Contact> {
    Ok(Contact {
        label: field(&item, "Label")?,
        value: latex_text(Some(item.text("Contact")?))?,
    })
}

/// Website URLs are placed in `\url{}`, which takes its argument verbatim.
fn extract_website(item: Entry<'_>) -> Result<String> {
    Ok(item.text("Contact")?.to_string())
}

fn extract_headline<'a>(document: &impl Scope<'a>) -> Result<Option<Headline>> {
    let Some(headline) = document.find("Headline").optional()? else {
        return Ok(None);
    };

    Ok(Some(Headline {
        name: nested_field(&headline, "Type", "Label")?,
        text: nested_field(&headline, "Description", "Label")?,
    }))
}

fn extract_skills<'a>(document: &impl Scope<'a>) -> Result<Option<String>> {
    let Some(skills) = document.find("Skills").optional()? else {
        return Ok(None);
    };
    skills
        .text("JobRelated")
        .optional()?
        .map(|text| latex_text(Some(text)))
        .transpose()
}

fn extract_work(item: Entry<'_>) -> Result<Experience> {
    let employer = item.find("Employer")?;

    Ok(Experience {
        period: format_period(item.find("Period")?)?,
        title: field(&item, "Position")?,
        organisation: field(&employer, "Name")?,
        address: format_organisation_address(employer)?,
        activities: field(&item, "Activities")?,
    })
}

fn extract_education(item: Entry<'_>) -> Result<Experience> {
    let organisation = item.find("Organisation")?;

    Ok(Experience {
        period: format_period(item.find("Period")?)?,
        title: field(&item, "Title")?,
        organisation: field(&organisation, "Name")?,
        address: format_organisation_address(organisation)?,
        activities: field(&item, "Activities")?,
    })
}

fn extract_achievement(item: Entry<'_>) -> Result<Achievement> {
    Ok(Achievement {
        title: field(&item.find("Title")?, "Label")?,
        description: field(&item, "Description")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn transform(xml: &str) -> GenericNode {
        let doc = Document::parse(xml).unwrap();
        GenericNode::from_xml(doc.root_element()).unwrap().unwrap()
    }

    fn passport(learner_info: &str) -> GenericNode {
        transform(&format!(
            "<SkillsPassport><LearnerInfo>{learner_info}</LearnerInfo></SkillsPassport>"
        ))
    }

    const IDENTIFICATION: &str = "<Identification>\
        <PersonName><FirstName>Jane</FirstName><Surname>Doe</Surname></PersonName>\
        <ContactInfo>\
          <Address><Contact>\
            <AddressLine>Rue_Haute 1</AddressLine><PostalCode>1000</PostalCode>\
            <Municipality>Brussels</Municipality>\
            <Country><Code>BE</Code><Label>Belgium</Label></Country>\
          </Contact></Address>\
          <Email><Contact>jane@example.com</Contact></Email>\
          <TelephoneList>\
            <Telephone><Contact>+32 2 555 01 01</Contact><Use><Code>work</Code><Label>Work</Label></Use></Telephone>\
            <Telephone><Contact>+32 470 00 00 00</Contact><Use><Code>mobile</Code><Label>Mobile</Label></Use></Telephone>\
          </TelephoneList>\
          <WebsiteList>\
            <Website><Contact>https://www.linkedin.com/in/jane_doe</Contact></Website>\
          </WebsiteList>\
          <InstantMessagingList>\
            <InstantMessaging><Contact>jane.doe</Contact><Use><Code>skype</Code><Label>Skype</Label></Use></InstantMessaging>\
          </InstantMessagingList>\
        </ContactInfo>\
        </Identification>";

    #[test]
    fn test_extract_header() {
        let cv = extract_cv(&passport(IDENTIFICATION)).unwrap();
        let header = cv.header;

        assert_eq!(header.first_name, "Jane");
        assert_eq!(header.surname, "Doe");
        assert_eq!(header.address_line, r"Rue\_Haute 1");
        assert_eq!(header.postal_code, "1000");
        assert_eq!(header.municipality, "Brussels");
        assert_eq!(header.country, "Belgium");
        assert_eq!(header.country_code, "BE");
        assert_eq!(header.email, "jane@example.com");
        assert_eq!(
            header.telephones,
            vec![
                Contact {
                    label: "Work".to_string(),
                    value: "+32 2 555 01 01".to_string(),
                },
                Contact {
                    label: "Mobile".to_string(),
                    value: "+32 470 00 00 00".to_string(),
                },
            ]
        );
        assert_eq!(header.websites, vec!["https://www.linkedin.com/in/jane_doe"]);
        assert_eq!(header.instant_messaging[0].value, "jane.doe");
    }

    #[test]
    fn test_missing_identification_is_fatal() {
        let result = extract_cv(&passport("<Headline/>"));
        assert!(matches!(result, Err(ConvertError::KeyNotFound(key)) if key == "Identification"));
    }

    #[test]
    fn test_missing_country_is_fatal() {
        let result = extract_cv(&passport(
            "<Identification><PersonName><Surname>Doe</Surname></PersonName></Identification>",
        ));
        assert!(matches!(result, Err(ConvertError::KeyNotFound(key)) if key == "Country"));
    }

    #[test]
    fn test_optional_sections_absent() {
        let cv = extract_cv(&passport(
            "<Identification><Country><Code>BE</Code></Country></Identification>",
        ))
        .unwrap();

        assert_eq!(cv.header.first_name, "");
        assert_eq!(cv.header.country, "");
        assert_eq!(cv.header.country_code, "BE");
        assert!(cv.header.telephones.is_empty());
        assert!(cv.headline.is_none());
        assert!(cv.job_related_skills.is_none());
        assert!(cv.education.is_empty());
        assert!(cv.work_experience.is_empty());
        assert!(cv.achievements.is_empty());
    }

    #[test]
    fn test_extract_headline_and_skills() {
        let cv = extract_cv(&passport(&format!(
            "{IDENTIFICATION}\
             <Headline><Type><Code>personal_statement</Code><Label>Personal statement</Label></Type>\
             <Description><Label>Engineer &amp; maker</Label></Description></Headline>\
             <Skills><Other><Description>ignored</Description></Other>\
             <JobRelated><Description>&lt;em&gt;Rust&lt;/em&gt;</Description></JobRelated></Skills>"
        )))
        .unwrap();

        assert_eq!(
            cv.headline,
            Some(Headline {
                name: "Personal statement".to_string(),
                text: r"Engineer \& maker".to_string(),
            })
        );
        assert_eq!(cv.job_related_skills.as_deref(), Some(r"\textit{Rust}"));
    }

    #[test]
    fn test_extract_work_experience() {
        let cv = extract_cv(&passport(&format!(
            "{IDENTIFICATION}<WorkExperienceList>\
             <WorkExperience>\
               <Period><From year=\"2018\" month=\"--01\"/><To year=\"2020\" month=\"--03\"/></Period>\
               <Position><Label>Developer</Label></Position>\
               <Activities>Built things</Activities>\
               <Employer><Name>Acme_Corp</Name><ContactInfo><Address><Contact>\
                 <Municipality>Ghent</Municipality><Country><Code>BE</Code><Label>Belgium</Label></Country>\
               </Contact></Address></ContactInfo></Employer>\
             </WorkExperience>\
             <WorkExperience>\
               <Period><From year=\"2020\" month=\"--04\"/><Current>true</Current></Period>\
               <Employer><Name>Solo</Name></Employer>\
             </WorkExperience>\
             </WorkExperienceList>"
        )))
        .unwrap();

        assert_eq!(
            cv.work_experience,
            vec![
                Experience {
                    period: "2018/01 -- 2020/03".to_string(),
                    title: "Developer".to_string(),
                    organisation: r"Acme\_Corp".to_string(),
                    address: ", Ghent, (Belgium)".to_string(),
                    activities: "Built things".to_string(),
                },
                Experience {
                    period: "2020/04".to_string(),
                    title: String::new(),
                    organisation: "Solo".to_string(),
                    address: String::new(),
                    activities: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_work_experience_requires_employer() {
        let result = extract_cv(&passport(&format!(
            "{IDENTIFICATION}<WorkExperienceList><WorkExperience>\
             <Period><From year=\"2018\"/></Period></WorkExperience></WorkExperienceList>"
        )));
        assert!(matches!(result, Err(ConvertError::KeyNotFound(key)) if key == "Employer"));
    }

    #[test]
    fn test_extract_education() {
        let cv = extract_cv(&passport(&format!(
            "{IDENTIFICATION}<EducationList><Education>\
             <Period><From year=\"2012\"/><To year=\"2017\"/></Period>\
             <Title>MSc Computer Science</Title>\
             <Organisation><Name>Ghent University</Name></Organisation>\
             </Education></EducationList>"
        )))
        .unwrap();

        assert_eq!(cv.education.len(), 1);
        assert_eq!(cv.education[0].period, "2012 -- 2017");
        assert_eq!(cv.education[0].title, "MSc Computer Science");
        assert_eq!(cv.education[0].organisation, "Ghent University");
    }

    #[test]
    fn test_extract_achievements() {
        let cv = extract_cv(&passport(&format!(
            "{IDENTIFICATION}<AchievementList><Achievement>\
             <Title><Code>projects</Code><Label>Projects</Label></Title>\
             <Description>See https://example.org</Description>\
             </Achievement></AchievementList>"
        )))
        .unwrap();

        assert_eq!(
            cv.achievements,
            vec![Achievement {
                title: "Projects".to_string(),
                description: r"See \href{https://example.org}{https://example.org}".to_string(),
            }]
        );
    }

    #[test]
    fn test_unsupported_markup_in_field_is_fatal() {
        let result = extract_cv(&passport(&format!(
            "{IDENTIFICATION}<Skills><JobRelated><Description>&lt;table&gt;</Description></JobRelated></Skills>"
        )));
        assert!(matches!(result, Err(ConvertError::UnsupportedMarkup(tag)) if tag == "table"));
    }
}
