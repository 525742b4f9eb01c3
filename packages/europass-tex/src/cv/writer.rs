//! LaTeX document writer for extracted CVs.
//!
//! The document is assembled from independent blocks (preamble, header,
//! one block per section, footer) joined by blank lines. Sections without
//! content are left out.

use super::types::{Achievement, CurriculumVitae, Experience, Header};
use crate::config::{
    RenderOptions, ACHIEVEMENTS_TITLE, EDUCATION_TITLE, SKILLS_TITLE, WORK_EXPERIENCE_TITLE,
};

/// Line break inside the centered header block.
const LINE_BREAK: &str = "\\\\";

/// Separator between items on the contact line.
const CONTACT_SEPARATOR: &str = " // ";

/// Render a complete LaTeX document.
///
/// # Examples
/// ```
/// use europass_tex::config::RenderOptions;
/// use europass_tex::cv::{render_document, CurriculumVitae};
///
/// let latex = render_document(&CurriculumVitae::default(), &RenderOptions::default());
/// assert!(latex.starts_with("\\documentclass[a4paper,11pt]{article}"));
/// assert!(latex.trim_end().ends_with("\\end{document}"));
/// ```
#[must_use]
pub fn render_document(cv: &CurriculumVitae, options: &RenderOptions) -> String {
    let mut blocks = vec![preamble(&cv.header, options), header_block(&cv.header)];

    if let Some(headline) = &cv.headline {
        blocks.push(section(&headline.name, &headline.text));
    }
    if let Some(skills) = &cv.job_related_skills {
        blocks.push(section(SKILLS_TITLE, skills));
    }
    if !cv.education.is_empty() {
        blocks.push(experience_section(EDUCATION_TITLE, &cv.education));
    }
    if !cv.work_experience.is_empty() {
        blocks.push(experience_section(WORK_EXPERIENCE_TITLE, &cv.work_experience));
    }
    if !cv.achievements.is_empty() {
        blocks.push(achievement_section(&cv.achievements));
    }

    blocks.push(footer(options));
    blocks.join("\n")
}

fn preamble(header: &Header, options: &RenderOptions) -> String {
    let color = &options.accent_color;
    let name = header.full_name();

    format!(
        r"\documentclass[a4paper,11pt]{{article}}

\usepackage{{lmodern}}
\usepackage{{anyfontsize}}
\usepackage{{textcomp}}
\renewcommand{{\familydefault}}{{\sfdefault}}

\usepackage{{sectsty}}
\usepackage{{xcolor}}

\sectionfont{{\color[HTML]{{{color}}}}}
\subsectionfont{{\color[HTML]{{{color}}}}}

\usepackage[english]{{babel}}

\usepackage{{hyperref}}
\usepackage[cm]{{fullpage}}

\usepackage{{ifthen}}
\usepackage{{multicol}}
\usepackage{{graphicx}}
\usepackage{{subcaption}}

\newcommand{{\name}}[1]{{{{\Huge{{}}#1}}}}
\newcommand{{\address}}[1]{{{{\large{{}}#1}}}}
\newcommand{{\phone}}[1]{{Phone: \texttt{{#1}}}}
\newcommand{{\email}}[1]{{Email: \texttt{{#1}}}}
\newcommand{{\skype}}[1]{{Skype: \texttt{{#1}}}}
\newcommand{{\linkedin}}[1]{{LinkedIn: \url{{#1}}}}
\newcommand{{\personalweb}}[1]{{Website: \url{{#1}}}}

\renewcommand{{\abstractname}}{{}}

\usepackage{{fancyhdr}}
\setlength{{\headheight}}{{15.2pt}}
\pagestyle{{fancy}}
\renewcommand{{\headrulewidth}}{{0pt}}
\rhead{{\ifthenelse{{\value{{page}}=1}}{{}}{{{name}}}}}
\lhead{{\ifthenelse{{\value{{page}}=1}}{{}}{{Curriculum vitae}}}}

\begin{{document}}
"
    )
}

/// Centered block with name, address, contact line and websites.
fn header_block(header: &Header) -> String {
    let mut lines = vec![
        r"\begin{center}".to_string(),
        format!(r"\name{{{}}}{LINE_BREAK}%", header.full_name()),
        format!(
            r"\address{{{}, {}, {} {} ({})}}{LINE_BREAK}%",
            header.address_line,
            header.postal_code,
            header.municipality,
            header.country,
            header.country_code
        ),
    ];

    let contact_line = contact_line(header);
    if !contact_line.is_empty() {
        lines.push(format!("{contact_line}{LINE_BREAK}%"));
    }

    let websites: Vec<String> = header.websites.iter().map(|url| website(url)).collect();
    if !websites.is_empty() {
        lines.push(websites.join(LINE_BREAK));
    }

    lines.push(r"\end{center}".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Telephones, email and the first instant-messaging handle.
fn contact_line(header: &Header) -> String {
    let mut parts = Vec::new();

    let phones: Vec<String> = header
        .telephones
        .iter()
        .map(|phone| format!(r"\phone{{{}}}", phone.value))
        .collect();
    if !phones.is_empty() {
        parts.push(phones.join(LINE_BREAK));
    }
    if !header.email.is_empty() {
        parts.push(format!(r"\email{{{}}}", header.email));
    }
    if let Some(handle) = header.instant_messaging.first() {
        parts.push(format!(r"\skype{{{}}}", handle.value));
    }

    parts.join(CONTACT_SEPARATOR)
}

/// LinkedIn profiles get their own label, any other URL is a personal website.
fn website(url: &str) -> String {
    if url.to_lowercase().contains("linkedin.com") {
        format!(r"\linkedin{{{url}}}")
    } else {
        format!(r"\personalweb{{{url}}}")
    }
}

fn section(title: &str, body: &str) -> String {
    format!("\\section{{{title}}}\n\n{body}\n")
}

fn experience_section(title: &str, items: &[Experience]) -> String {
    let mut out = format!("\\section{{{title}}}\n");
    for item in items {
        out.push_str(&format!(
            "\\subsection{{{} {}}}\n\n\\textbf{{{}{}}}\n\n{}\n",
            item.period, item.title, item.organisation, item.address, item.activities
        ));
    }
    out
}

fn achievement_section(items: &[Achievement]) -> String {
    let mut out = format!("\\section{{{ACHIEVEMENTS_TITLE}}}\n");
    for item in items {
        out.push_str(&format!(
            "\\subsection{{{}}}\n\n{}\n",
            item.title, item.description
        ));
    }
    out
}

fn footer(options: &RenderOptions) -> String {
    let mut out = String::from("%% FOOTER %%\n\n");
    for include in &options.include_files {
        out.push_str(&format!("\\input{{{include}}}\n"));
    }
    if options.table_of_contents {
        out.push_str("\n\\setcounter{tocdepth}{1}\n\\tableofcontents\n");
    }
    out.push_str("\n\\end{document}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::types::{Contact, Headline};
    use pretty_assertions::assert_eq;

    fn header() -> Header {
        Header {
            first_name: "Jane".to_string(),
            surname: "Doe".to_string(),
            address_line: "Rue Haute 1".to_string(),
            postal_code: "1000".to_string(),
            municipality: "Brussels".to_string(),
            country: "Belgium".to_string(),
            country_code: "BE".to_string(),
            email: "jane@example.com".to_string(),
            telephones: vec![
                Contact {
                    label: "Work".to_string(),
                    value: "+32 2 555 01 01".to_string(),
                },
                Contact {
                    label: "Mobile".to_string(),
                    value: "+32 470 00 00 00".to_string(),
                },
            ],
            websites: vec![
                "https://www.LinkedIn.com/in/jane".to_string(),
                "https://jane.example.org".to_string(),
            ],
            instant_messaging: vec![Contact {
                label: "Skype".to_string(),
                value: "jane.doe".to_string(),
            }],
        }
    }

    #[test]
    fn test_header_block() {
        assert_eq!(
            header_block(&header()),
            "\\begin{center}\n\
             \\name{Jane Doe}\\\\%\n\
             \\address{Rue Haute 1, 1000, Brussels Belgium (BE)}\\\\%\n\
             \\phone{+32 2 555 01 01}\\\\\\phone{+32 470 00 00 00} // \\email{jane@example.com} // \\skype{jane.doe}\\\\%\n\
             \\linkedin{https://www.LinkedIn.com/in/jane}\\\\\\personalweb{https://jane.example.org}\n\
             \\end{center}\n"
        );
    }

    #[test]
    fn test_contact_line_without_instant_messaging() {
        let header = Header {
            instant_messaging: Vec::new(),
            telephones: Vec::new(),
            ..header()
        };
        assert_eq!(contact_line(&header), r"\email{jane@example.com}");
    }

    #[test]
    fn test_contact_line_empty() {
        assert_eq!(contact_line(&Header::default()), "");
        assert!(!header_block(&Header::default()).contains("//"));
    }

    #[test]
    fn test_website_classification() {
        assert_eq!(website("https://linkedin.com/in/x"), r"\linkedin{https://linkedin.com/in/x}");
        assert_eq!(website("https://x.org"), r"\personalweb{https://x.org}");
    }

    #[test]
    fn test_preamble_uses_accent_color_and_name() {
        let options = RenderOptions::default().with_accent_color("336699").unwrap();
        let preamble = preamble(&header(), &options);
        assert!(preamble.contains(r"\sectionfont{\color[HTML]{336699}}"));
        assert!(preamble.contains(r"\subsectionfont{\color[HTML]{336699}}"));
        assert!(preamble.contains(r"\rhead{\ifthenelse{\value{page}=1}{}{Jane Doe}}"));
        assert!(preamble.contains(r"\newcommand{\name}[1]{{\Huge{}#1}}"));
        assert!(preamble.trim_end().ends_with(r"\begin{document}"));
    }

    #[test]
    fn test_experience_section() {
        let items = vec![Experience {
            period: "2018/01 -- 2020/03".to_string(),
            title: "Developer".to_string(),
            organisation: "Acme".to_string(),
            address: ", Ghent, (Belgium)".to_string(),
            activities: "Built things".to_string(),
        }];
        assert_eq!(
            experience_section(WORK_EXPERIENCE_TITLE, &items),
            "\\section{Work Experience}\n\
             \\subsection{2018/01 -- 2020/03 Developer}\n\n\
             \\textbf{Acme, Ghent, (Belgium)}\n\n\
             Built things\n"
        );
    }

    #[test]
    fn test_achievement_section() {
        let items = vec![Achievement {
            title: "Projects".to_string(),
            description: "Many".to_string(),
        }];
        assert_eq!(
            achievement_section(&items),
            "\\section{Additional Information}\n\\subsection{Projects}\n\nMany\n"
        );
    }

    #[test]
    fn test_footer_with_includes_and_toc() {
        let options = RenderOptions::default()
            .with_include("electronics")
            .with_include("hobbies");
        assert_eq!(
            footer(&options),
            "%% FOOTER %%\n\n\
             \\input{electronics}\n\
             \\input{hobbies}\n\n\
             \\setcounter{tocdepth}{1}\n\
             \\tableofcontents\n\n\
             \\end{document}\n"
        );
    }

    #[test]
    fn test_footer_without_toc() {
        let options = RenderOptions {
            table_of_contents: false,
            ..Default::default()
        };
        assert_eq!(footer(&options), "%% FOOTER %%\n\n\n\\end{document}\n");
    }

    #[test]
    fn test_section_order() {
        let cv = CurriculumVitae {
            header: header(),
            headline: Some(Headline {
                name: "Personal statement".to_string(),
                text: "Hello".to_string(),
            }),
            job_related_skills: Some("Rust".to_string()),
            education: vec![Experience::default()],
            work_experience: vec![Experience::default()],
            achievements: vec![Achievement::default()],
        };
        let latex = render_document(&cv, &RenderOptions::default());

        let positions: Vec<usize> = [
            r"\begin{center}",
            r"\section{Personal statement}",
            r"\section{Skills: Job related}",
            r"\section{Education and Training}",
            r"\section{Work Experience}",
            r"\section{Additional Information}",
            r"\tableofcontents",
            r"\end{document}",
        ]
        .iter()
        .map(|needle| latex.find(needle).unwrap())
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_absent_sections_are_omitted() {
        let latex = render_document(&CurriculumVitae::default(), &RenderOptions::default());
        assert!(!latex.contains(r"\section{"));
        assert!(!latex.contains(r"\subsection{"));
        assert!(latex.contains(r"\tableofcontents"));
    }
}
