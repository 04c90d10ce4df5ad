use serde_json::json;

use super::*;
use crate::content::ContentDocument;

fn site(value: serde_json::Value) -> SiteContent {
    ContentDocument::from_value(value).site()
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

fn rendered_text(page: &PageView, width: usize) -> Vec<String> {
    render_page(page, width, &Theme::default())
        .lines
        .iter()
        .map(line_text)
        .collect()
}

#[test]
fn empty_site_builds_an_empty_page() {
    let page = build_page(&SiteContent::default());
    assert!(page.blocks.is_empty());
    let result = render_page(&page, 40, &Theme::default());
    assert_eq!(result.total_lines, 0);
}

#[test]
fn projects_link_titles_only_when_a_url_is_present() {
    let page = build_page(&site(json!({
        "sections": { "projects": { "title": "Work", "items": [
            { "title": "Linked", "url": "https://example.com/linked", "description": "d", "tech_stack": "Rust" },
            { "title": "Plain", "description": "e" }
        ] } }
    })));

    assert_eq!(page.blocks[0], Block::Heading("Work".into()));
    assert_eq!(
        page.blocks[1],
        Block::Subheading(vec![Inline::Link {
            text: "Linked".into(),
            href: "https://example.com/linked".into(),
            external: true,
        }])
    );
    assert_eq!(
        page.blocks[3],
        Block::Paragraph(vec![
            Inline::Strong("Tech Stack: ".into()),
            Inline::Text("Rust".into())
        ])
    );
    assert!(page
        .blocks
        .contains(&Block::Subheading(vec![Inline::Text("Plain".into())])));
}

#[test]
fn contact_section_links_email_linkedin_and_meeting() {
    let page = build_page(&site(json!({
        "sections": { "contact": {
            "email": "ada@example.com",
            "linkedin_url": "https://l.in/ada",
            "cal_url": "https://cal.example/ada"
        } }
    })));

    assert_eq!(page.blocks[0], Block::Heading("Contact".into()));
    let Block::Paragraph(intro) = &page.blocks[1] else {
        panic!("expected the contact paragraph, got {:?}", page.blocks[1]);
    };
    assert!(intro.contains(&Inline::Link {
        text: "ada@example.com".into(),
        href: "mailto:ada@example.com".into(),
        external: false,
    }));
    assert!(intro.contains(&Inline::Link {
        text: "LinkedIn".into(),
        href: "https://l.in/ada".into(),
        external: true,
    }));
    assert_eq!(page.blocks.len(), 4, "intro, blank and meeting paragraph");
}

#[test]
fn contact_without_meeting_link_has_a_single_paragraph() {
    let page = build_page(&site(json!({ "sections": { "contact": { "email": "a@b.c" } } })));
    assert_eq!(page.blocks.len(), 2);
}

#[test]
fn sidebar_profiles_show_chips_and_default_missing_hrefs() {
    let page = build_page(&site(json!({
        "sidebar": {
            "name": "Ada",
            "nav": { "profiles": [ { "type": "github", "chip": "gh", "label": "GitHub" } ] }
        }
    })));
    assert_eq!(page.blocks[0], Block::Heading("Ada".into()));
    assert_eq!(
        page.blocks[1],
        Block::Bullet(vec![
            Inline::Strong("[gh]".into()),
            Inline::Text(" ".into()),
            Inline::Link {
                text: "GitHub".into(),
                href: "#".into(),
                external: false
            },
        ])
    );
    assert_eq!(page.blocks[2], Block::Rule);
}

#[test]
fn passthrough_sections_and_footer_are_rendered() {
    let page = build_page(&site(json!({
        "sections": {
            "chat": { "title": "Chat", "description": "Ask me" },
            "assistant_landing": { "description": "Landing" }
        },
        "footer": { "text": "Bye" }
    })));
    let text = rendered_text(&page, 40);
    assert!(text.contains(&"Ask me".to_string()));
    assert!(text.contains(&"Assistant".to_string()));
    assert_eq!(text.last().map(String::as_str), Some("Bye"));
}

#[test]
fn paragraphs_wrap_to_the_given_width() {
    let page = PageView {
        blocks: vec![Block::Paragraph(vec![Inline::Text(
            "the quick brown fox jumps over the lazy dog".into(),
        )])],
    };
    let text = rendered_text(&page, 15);
    assert!(text.len() > 1);
    for line in &text {
        assert!(line.chars().count() <= 15, "line too wide: {line:?}");
        assert!(!line.starts_with(' '), "wrapped line keeps leading space: {line:?}");
    }
    assert_eq!(text.join(" "), "the quick brown fox jumps over the lazy dog");
}

#[test]
fn bullets_indent_continuation_lines() {
    let page = PageView {
        blocks: vec![Block::Bullet(vec![Inline::Text(
            "alpha beta gamma delta".into(),
        )])],
    };
    let text = rendered_text(&page, 12);
    assert_eq!(text[0], "• alpha beta");
    assert_eq!(text[1], "  gamma");
    assert_eq!(text[2], "  delta");
}

#[test]
fn headings_are_underlined_to_their_width() {
    let page = PageView {
        blocks: vec![Block::Heading("Projects".into())],
    };
    assert_eq!(rendered_text(&page, 40), vec!["Projects", "========"]);
}

#[test]
fn external_links_show_their_target() {
    let page = PageView {
        blocks: vec![Block::Paragraph(vec![Inline::link(
            "Site",
            "https://example.com",
        )])],
    };
    assert_eq!(rendered_text(&page, 80), vec!["Site <https://example.com>"]);
}
