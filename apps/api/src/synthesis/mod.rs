//! Document synthesis — pure transform from a `CvDocument` into a
//! sanitized HTML fragment ready for persistence or export.
//!
//! Rendering rules:
//! - Fixed section order: Summary → Experience → Education → Skills → Projects.
//! - A list section is omitted when no entry has a non-blank primary field
//!   (title / degree / name); individual blank-primary entries are skipped
//!   even inside a rendered section.
//! - Every free-text value is HTML-escaped before insertion, no exceptions.

use crate::models::cv::{is_blank, CvDocument};

/// Character limit for the rendered summary.
pub const SUMMARY_LIMIT: usize = 300;
/// Character limit for short-form contexts (saved-document snippets).
pub const SUMMARY_LIMIT_SHORT: usize = 160;

const ELLIPSIS: char = '…';
const CONTACT_SEPARATOR: &str = " | ";

/// Escapes `&`, `<`, and `>` for safe HTML insertion. `&` first so escaped
/// entities are not double-escaped.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Collapses internal whitespace runs to single spaces and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapses whitespace, then truncates to `limit` characters total with
/// the last character being an ellipsis when truncation occurred. Input at
/// or under the limit comes back collapsed but otherwise untouched.
pub fn clip_summary(s: &str, limit: usize) -> String {
    let collapsed = collapse_whitespace(s);
    if collapsed.chars().count() <= limit {
        return collapsed;
    }
    let mut clipped: String = collapsed.chars().take(limit.saturating_sub(1)).collect();
    clipped.push(ELLIPSIS);
    clipped
}

/// Renders `"{start} – {end}"`. When `current` is set the end token is the
/// literal "Present" and any stored end date is ignored for display (the
/// model keeps it). Blank halves are dropped rather than rendered as a
/// dangling dash.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start = start.trim();
    let end = if current { "Present" } else { end.trim() };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} – {end}"),
    }
}

/// Joins the non-blank parts with the part separator, escaping each.
fn meta_line(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !is_blank(p))
        .map(|p| escape_html(p.trim()))
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

/// Synthesizes the full document. Pure: same document in, same string out.
pub fn synthesize(doc: &CvDocument) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"cv\">\n");

    render_header(doc, &mut out);
    render_summary(doc, &mut out);
    render_experience(doc, &mut out);
    render_education(doc, &mut out);
    render_skills(doc, &mut out);
    render_projects(doc, &mut out);

    out.push_str("</div>\n");
    out
}

fn render_header(doc: &CvDocument, out: &mut String) {
    let name = if is_blank(&doc.personal.full_name) {
        "Your Name".to_string()
    } else {
        escape_html(doc.personal.full_name.trim())
    };
    out.push_str("<header>\n");
    out.push_str(&format!("<h1>{name}</h1>\n"));

    // Fixed contact order: email, phone, location, linkedin, github.
    let contact = meta_line(&[
        &doc.personal.email,
        &doc.personal.phone,
        &doc.personal.location,
        &doc.personal.linkedin,
        &doc.personal.github,
    ]);
    if !contact.is_empty() {
        out.push_str(&format!("<p class=\"contact\">{contact}</p>\n"));
    }
    out.push_str("</header>\n");
}

fn render_summary(doc: &CvDocument, out: &mut String) {
    if is_blank(&doc.personal.summary) {
        return;
    }
    let summary = escape_html(&clip_summary(&doc.personal.summary, SUMMARY_LIMIT));
    out.push_str("<section class=\"summary\">\n<h2>Summary</h2>\n");
    out.push_str(&format!("<p>{summary}</p>\n"));
    out.push_str("</section>\n");
}

fn render_experience(doc: &CvDocument, out: &mut String) {
    let entries: Vec<_> = doc
        .experience
        .iter()
        .filter(|e| !is_blank(&e.title))
        .collect();
    if entries.is_empty() {
        return;
    }
    out.push_str("<section class=\"experience\">\n<h2>Experience</h2>\n");
    for entry in entries {
        out.push_str(&format!("<h3>{}</h3>\n", escape_html(entry.title.trim())));
        let dates = format_date_range(&entry.start_date, &entry.end_date, entry.current);
        let meta = meta_line(&[&entry.company, &entry.location, &dates]);
        if !meta.is_empty() {
            out.push_str(&format!("<p class=\"meta\">{meta}</p>\n"));
        }
        if !is_blank(&entry.description) {
            out.push_str(&format!("<p>{}</p>\n", escape_html(entry.description.trim())));
        }
    }
    out.push_str("</section>\n");
}

fn render_education(doc: &CvDocument, out: &mut String) {
    let entries: Vec<_> = doc
        .education
        .iter()
        .filter(|e| !is_blank(&e.degree))
        .collect();
    if entries.is_empty() {
        return;
    }
    out.push_str("<section class=\"education\">\n<h2>Education</h2>\n");
    for entry in entries {
        out.push_str(&format!("<h3>{}</h3>\n", escape_html(entry.degree.trim())));
        let meta = meta_line(&[&entry.institution, &entry.location, &entry.graduation_date]);
        if !meta.is_empty() {
            out.push_str(&format!("<p class=\"meta\">{meta}</p>\n"));
        }
        if !is_blank(&entry.gpa) {
            out.push_str(&format!("<p>GPA: {}</p>\n", escape_html(entry.gpa.trim())));
        }
    }
    out.push_str("</section>\n");
}

fn render_skills(doc: &CvDocument, out: &mut String) {
    let skills = &doc.skills;
    if is_blank(&skills.technical) && is_blank(&skills.soft) && is_blank(&skills.languages) {
        return;
    }
    out.push_str("<section class=\"skills\">\n<h2>Skills</h2>\n");
    for (label, value) in [
        ("Technical", &skills.technical),
        ("Soft", &skills.soft),
        ("Languages", &skills.languages),
    ] {
        if !is_blank(value) {
            out.push_str(&format!(
                "<p><strong>{label}:</strong> {}</p>\n",
                escape_html(value.trim())
            ));
        }
    }
    out.push_str("</section>\n");
}

fn render_projects(doc: &CvDocument, out: &mut String) {
    let entries: Vec<_> = doc
        .projects
        .iter()
        .filter(|p| !is_blank(&p.name))
        .collect();
    if entries.is_empty() {
        return;
    }
    out.push_str("<section class=\"projects\">\n<h2>Projects</h2>\n");
    for entry in entries {
        out.push_str(&format!("<h3>{}</h3>\n", escape_html(entry.name.trim())));
        if !is_blank(&entry.description) {
            out.push_str(&format!("<p>{}</p>\n", escape_html(entry.description.trim())));
        }
        let links = meta_line(&[&entry.github, &entry.link]);
        if !links.is_empty() {
            out.push_str(&format!("<p class=\"meta\">{links}</p>\n"));
        }
    }
    out.push_str("</section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{EducationEntry, ExperienceEntry, ProjectEntry};

    fn doc_with_name(name: &str) -> CvDocument {
        let mut doc = CvDocument::new();
        doc.personal.full_name = name.to_string();
        doc
    }

    #[test]
    fn test_escape_html_covers_the_three_characters() {
        assert_eq!(escape_html("a & b <c> d"), "a &amp; b &lt;c&gt; d");
    }

    #[test]
    fn test_escape_html_does_not_double_escape() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_collapse_whitespace_runs() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn test_clip_summary_under_limit_is_only_collapsed() {
        assert_eq!(clip_summary("short  summary", 300), "short summary");
    }

    #[test]
    fn test_clip_summary_350_chars_yields_300_ending_in_ellipsis() {
        let long = "x".repeat(350);
        let clipped = clip_summary(&long, SUMMARY_LIMIT);
        assert_eq!(clipped.chars().count(), 300);
        assert_eq!(clipped.chars().last(), Some('…'));
    }

    #[test]
    fn test_clip_summary_exactly_at_limit_untouched() {
        let exact = "y".repeat(300);
        assert_eq!(clip_summary(&exact, SUMMARY_LIMIT), exact);
    }

    #[test]
    fn test_clip_summary_short_form_limit() {
        let long = "z".repeat(200);
        let clipped = clip_summary(&long, SUMMARY_LIMIT_SHORT);
        assert_eq!(clipped.chars().count(), 160);
    }

    #[test]
    fn test_format_date_range_current_renders_present_and_ignores_end() {
        assert_eq!(format_date_range("2021", "2022", true), "2021 – Present");
    }

    #[test]
    fn test_format_date_range_blank_halves() {
        assert_eq!(format_date_range("", "", false), "");
        assert_eq!(format_date_range("2021", "", false), "2021");
        assert_eq!(format_date_range("", "2023", false), "2023");
        assert_eq!(format_date_range("2021", "2023", false), "2021 – 2023");
    }

    #[test]
    fn test_header_falls_back_to_placeholder_name() {
        let output = synthesize(&CvDocument::new());
        assert!(output.contains("<h1>Your Name</h1>"));
    }

    #[test]
    fn test_contact_line_fixed_order_skipping_blanks() {
        let mut doc = doc_with_name("Jane");
        doc.personal.email = "j@e.com".to_string();
        doc.personal.location = "Berlin".to_string();
        doc.personal.github = "github.com/jane".to_string();
        let output = synthesize(&doc);
        assert!(output.contains("j@e.com | Berlin | github.com/jane"));
    }

    #[test]
    fn test_no_raw_specials_from_free_text_fields() {
        let mut doc = doc_with_name("<script>&Jane</script>");
        doc.personal.summary = "Shipped <b>bold</b> & fast".to_string();
        doc.experience[0].title = "Engineer <3".to_string();
        doc.experience[0].description = "a < b > c & d".to_string();
        doc.skills.technical = "C++ & <Rust>".to_string();

        let output = synthesize(&doc);
        // Strip the structural tags we emit ourselves, then look for leaks.
        let free_text: String = output
            .lines()
            .map(|l| {
                l.replace("<div class=\"cv\">", "")
                    .replace("</div>", "")
                    .replace("<header>", "")
                    .replace("</header>", "")
                    .replace("<section class=\"summary\">", "")
                    .replace("<section class=\"experience\">", "")
                    .replace("<section class=\"skills\">", "")
                    .replace("</section>", "")
                    .replace("<h1>", "")
                    .replace("</h1>", "")
                    .replace("<h2>", "")
                    .replace("</h2>", "")
                    .replace("<h3>", "")
                    .replace("</h3>", "")
                    .replace("<p class=\"meta\">", "")
                    .replace("<p class=\"contact\">", "")
                    .replace("<p><strong>", "")
                    .replace(":</strong>", "")
                    .replace("<p>", "")
                    .replace("</p>", "")
            })
            .collect();
        assert!(!free_text.contains('<'), "raw < leaked: {free_text}");
        assert!(!free_text.contains('>'), "raw > leaked: {free_text}");
        assert!(!output.contains("<script>"));
    }

    #[test]
    fn test_experience_section_omitted_iff_all_titles_blank() {
        let mut doc = doc_with_name("Jane");
        doc.experience = vec![
            ExperienceEntry {
                id: 1,
                company: "Acme".to_string(),
                ..Default::default()
            },
            ExperienceEntry {
                id: 2,
                ..Default::default()
            },
        ];
        assert!(!synthesize(&doc).contains("<h2>Experience</h2>"));

        doc.experience[1].title = "Engineer".to_string();
        assert!(synthesize(&doc).contains("<h2>Experience</h2>"));
    }

    #[test]
    fn test_blank_primary_entries_skipped_inside_rendered_section() {
        let mut doc = doc_with_name("Jane");
        doc.experience = vec![
            ExperienceEntry {
                id: 1,
                title: "Engineer".to_string(),
                ..Default::default()
            },
            ExperienceEntry {
                id: 2,
                company: "Ghost Corp".to_string(),
                ..Default::default()
            },
        ];
        let output = synthesize(&doc);
        assert!(output.contains("Engineer"));
        assert!(!output.contains("Ghost Corp"));
    }

    #[test]
    fn test_education_section_keyed_on_degree() {
        let mut doc = doc_with_name("Jane");
        doc.education = vec![EducationEntry {
            id: 1,
            institution: "MIT".to_string(),
            ..Default::default()
        }];
        assert!(!synthesize(&doc).contains("<h2>Education</h2>"));

        doc.education[0].degree = "B.Sc.".to_string();
        assert!(synthesize(&doc).contains("<h2>Education</h2>"));
    }

    #[test]
    fn test_skills_section_omitted_only_when_all_three_blank() {
        let mut doc = doc_with_name("Jane");
        assert!(!synthesize(&doc).contains("<h2>Skills</h2>"));

        doc.skills.languages = "English, German".to_string();
        let output = synthesize(&doc);
        assert!(output.contains("<h2>Skills</h2>"));
        assert!(output.contains("Languages"));
        assert!(!output.contains("Technical"));
    }

    #[test]
    fn test_projects_section_keyed_on_name() {
        let mut doc = doc_with_name("Jane");
        doc.projects = vec![ProjectEntry {
            id: 1,
            description: "orphan description".to_string(),
            ..Default::default()
        }];
        assert!(!synthesize(&doc).contains("<h2>Projects</h2>"));

        doc.projects[0].name = "cv-engine".to_string();
        assert!(synthesize(&doc).contains("<h2>Projects</h2>"));
    }

    #[test]
    fn test_sections_render_in_fixed_order() {
        let mut doc = doc_with_name("Jane");
        doc.personal.summary = "Summary text".to_string();
        doc.experience[0].title = "Engineer".to_string();
        doc.education[0].degree = "B.Sc.".to_string();
        doc.skills.soft = "Communication".to_string();
        doc.projects[0].name = "cv-engine".to_string();

        let output = synthesize(&doc);
        let positions: Vec<usize> = [
            "<h2>Summary</h2>",
            "<h2>Experience</h2>",
            "<h2>Education</h2>",
            "<h2>Skills</h2>",
            "<h2>Projects</h2>",
        ]
        .iter()
        .map(|h| output.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let mut doc = doc_with_name("Jane");
        doc.personal.summary = "Same in, same out".to_string();
        assert_eq!(synthesize(&doc), synthesize(&doc));
    }
}
