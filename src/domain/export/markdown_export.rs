use super::request::ExportRequest;

/// Renders the plain Markdown download: a fixed header block followed by the
/// plan content exactly as stored.
pub fn render_markdown(request: &ExportRequest) -> String {
    format!(
        "# {}\n\n**Grade/Level:** {} | **Duration:** {} | **Created:** {}\n\n---\n\n{}",
        request.title(),
        request.grade,
        request.duration,
        request.created_label(),
        request.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(content: &str, created_at: Option<&str>) -> ExportRequest {
        ExportRequest {
            subject: "Math".to_string(),
            topic: "Algebra".to_string(),
            grade: "Grade 8".to_string(),
            duration: "45 minutes".to_string(),
            content: content.to_string(),
            created_at: created_at.map(str::to_string),
        }
    }

    #[test]
    fn header_block_precedes_content() {
        let out = render_markdown(&request("# Intro\n- Variables", Some("2024-01-01")));
        assert_eq!(
            out,
            "# Math - Algebra\n\n\
             **Grade/Level:** Grade 8 | **Duration:** 45 minutes | **Created:** 2024-01-01\n\n\
             ---\n\n\
             # Intro\n- Variables"
        );
    }

    #[test]
    fn missing_created_at_uses_placeholder() {
        let out = render_markdown(&request("", None));
        assert!(out.contains("**Created:** N/A"));
        assert!(out.ends_with("---\n\n"));
    }

    proptest! {
        #[test]
        fn prop_content_is_reproduced_verbatim(content in "(?s).{0,300}") {
            let req = request(&content, Some("2024-01-01"));
            let out = render_markdown(&req);
            let header_len = render_markdown(&request("", Some("2024-01-01"))).len();
            prop_assert_eq!(&out[header_len..], content.as_str());
        }
    }
}
