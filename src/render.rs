use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::content::{BlurbSection, SiteContent};
use crate::theme::Theme;

const CONTACT_INTRO: &str =
    "For opportunities, collaborations, or technical discussions, reach me at ";
const MEETING_INTRO: &str = "To schedule a meeting directly, use: ";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageView {
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Subheading(Vec<Inline>),
    Paragraph(Vec<Inline>),
    Bullet(Vec<Inline>),
    Rule,
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Link {
        text: String,
        href: String,
        external: bool,
    },
}

impl Inline {
    fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        let href = if href.is_empty() { "#".to_string() } else { href };
        let external = href.starts_with("http");
        Inline::Link {
            text: text.into(),
            href,
            external,
        }
    }
}

/// Build the page in site order. Sections that are absent are left out;
/// absent fields inside a present section are skipped.
pub fn build_page(site: &SiteContent) -> PageView {
    let mut page = PageBuilder::default();
    page.sidebar(site);
    page.topbar(site);
    if let Some(summary) = &site.sections.summary {
        page.heading(&summary.title, "Summary");
        for (idx, paragraph) in summary.paragraphs.iter().enumerate() {
            if idx > 0 {
                page.push(Block::Blank);
            }
            page.push(Block::Paragraph(vec![Inline::text(paragraph)]));
        }
        page.push(Block::Blank);
    }
    if let Some(chat) = &site.sections.chat {
        page.blurb(chat, "Chat");
    }
    if let Some(research) = &site.sections.research_interests {
        page.heading(&research.title, "Research Interests");
        for item in &research.items {
            page.push(Block::Bullet(vec![Inline::text(item)]));
        }
        page.push(Block::Blank);
    }
    if let Some(projects) = &site.sections.projects {
        page.heading(&projects.title, "Projects");
        for project in &projects.items {
            let title = if project.url.is_empty() {
                Inline::text(&project.title)
            } else {
                Inline::link(&project.title, &project.url)
            };
            page.push(Block::Subheading(vec![title]));
            page.push(Block::Paragraph(vec![Inline::text(&project.description)]));
            page.push(Block::Paragraph(vec![
                Inline::Strong("Tech Stack: ".into()),
                Inline::text(&project.tech_stack),
            ]));
            page.push(Block::Blank);
        }
    }
    if let Some(contact) = &site.sections.contact {
        page.heading(&contact.title, "Contact");
        let mut intro = vec![Inline::text(CONTACT_INTRO)];
        if !contact.email.is_empty() {
            intro.push(Inline::link(
                &contact.email,
                format!("mailto:{}", contact.email),
            ));
        }
        intro.push(Inline::text(" or via "));
        if !contact.linkedin_url.is_empty() {
            intro.push(Inline::link("LinkedIn", &contact.linkedin_url));
        }
        intro.push(Inline::text("."));
        page.push(Block::Paragraph(intro));
        if !contact.cal_url.is_empty() {
            page.push(Block::Blank);
            page.push(Block::Paragraph(vec![
                Inline::text(MEETING_INTRO),
                Inline::link(&contact.cal_url, &contact.cal_url),
                Inline::text("."),
            ]));
        }
        page.push(Block::Blank);
    }
    if let Some(landing) = &site.sections.assistant_landing {
        page.blurb(landing, "Assistant");
    }
    if let Some(footer) = &site.footer {
        page.push(Block::Rule);
        page.push(Block::Paragraph(vec![Inline::text(&footer.text)]));
    }
    page.finish()
}

#[derive(Default)]
struct PageBuilder {
    blocks: Vec<Block>,
}

impl PageBuilder {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn heading(&mut self, title: &str, fallback: &str) {
        let title = if title.is_empty() { fallback } else { title };
        self.push(Block::Heading(title.to_string()));
    }

    fn sidebar(&mut self, site: &SiteContent) {
        let sidebar = &site.sidebar;
        let start = self.blocks.len();
        if !sidebar.name.is_empty() {
            self.push(Block::Heading(sidebar.name.clone()));
        }
        for line in sidebar.headline_lines.iter().chain(&sidebar.degree_lines) {
            self.push(Block::Paragraph(vec![Inline::text(line)]));
        }
        for detail in [&sidebar.location, &sidebar.employer] {
            if !detail.is_empty() {
                self.push(Block::Paragraph(vec![Inline::text(detail)]));
            }
        }
        for item in &sidebar.nav.main {
            self.push(Block::Bullet(vec![Inline::link(&item.label, &item.href)]));
        }
        for profile in &sidebar.nav.profiles {
            self.push(Block::Bullet(vec![
                Inline::Strong(format!("[{}]", profile.chip)),
                Inline::text(" "),
                Inline::link(&profile.label, &profile.href),
            ]));
        }
        if self.blocks.len() > start {
            self.push(Block::Rule);
        }
    }

    fn topbar(&mut self, site: &SiteContent) {
        let topbar = &site.topbar;
        let mut line = Vec::new();
        if !topbar.name.is_empty() {
            line.push(Inline::Strong(topbar.name.clone()));
        }
        if !topbar.subtitle.is_empty() {
            if !line.is_empty() {
                line.push(Inline::text(" · "));
            }
            line.push(Inline::text(&topbar.subtitle));
        }
        if !line.is_empty() {
            self.push(Block::Paragraph(line));
            self.push(Block::Blank);
        }
    }

    fn blurb(&mut self, section: &BlurbSection, fallback: &str) {
        self.heading(&section.title, fallback);
        if !section.description.is_empty() {
            self.push(Block::Paragraph(vec![Inline::text(&section.description)]));
        }
        self.push(Block::Blank);
    }

    fn finish(mut self) -> PageView {
        while matches!(self.blocks.last(), Some(Block::Blank)) {
            self.blocks.pop();
        }
        PageView {
            blocks: self.blocks,
        }
    }
}

#[derive(Debug)]
pub struct RenderResult {
    pub lines: Vec<Line<'static>>,
    pub total_lines: usize,
}

pub fn render_page(page: &PageView, width: usize, theme: &Theme) -> RenderResult {
    let width = width.max(1);
    let mut lines = Vec::new();

    for block in &page.blocks {
        match block {
            Block::Heading(title) => {
                let fragments = tokenize(title, theme.heading_style());
                let wrapped = wrap_fragments(&fragments, "", "", width);
                let underline_width = wrapped.last().map(line_width).unwrap_or(0);
                lines.extend(wrapped);
                lines.push(Line::from(Span::styled(
                    "=".repeat(underline_width.max(1)),
                    theme.heading_style(),
                )));
            }
            Block::Subheading(inlines) => {
                let fragments = collect_fragments(inlines, theme, Modifier::BOLD);
                lines.extend(wrap_fragments(&fragments, "", "", width));
            }
            Block::Paragraph(inlines) => {
                let fragments = collect_fragments(inlines, theme, Modifier::empty());
                lines.extend(wrap_fragments(&fragments, "", "", width));
            }
            Block::Bullet(inlines) => {
                let fragments = collect_fragments(inlines, theme, Modifier::empty());
                lines.extend(wrap_fragments(&fragments, "• ", "  ", width));
            }
            Block::Rule => {
                lines.push(Line::from(Span::styled(
                    "─".repeat(width),
                    theme.muted_style(),
                )));
            }
            Block::Blank => lines.push(Line::from("")),
        }
    }

    let total_lines = lines.len();
    RenderResult { lines, total_lines }
}

#[derive(Clone, Debug)]
struct Fragment {
    text: String,
    style: Style,
    width: usize,
    whitespace: bool,
}

fn collect_fragments(inlines: &[Inline], theme: &Theme, modifier: Modifier) -> Vec<Fragment> {
    let base = Style::default().add_modifier(modifier);
    let mut fragments = Vec::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => fragments.extend(tokenize(text, base)),
            Inline::Strong(text) => {
                fragments.extend(tokenize(text, base.add_modifier(Modifier::BOLD)))
            }
            Inline::Link { text, href, .. } => {
                fragments.extend(tokenize(text, base.patch(theme.link_style())));
                if href != text && !href.starts_with('#') && !href.starts_with("mailto:") {
                    fragments.extend(tokenize(&format!(" <{href}>"), theme.muted_style()));
                }
            }
        }
    }
    fragments
}

/// Split text into alternating word and whitespace runs. Newlines count as
/// whitespace; the preview reflows everything.
fn tokenize(text: &str, style: Style) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut current_is_space = false;

    for ch in text.chars() {
        let is_space = ch.is_whitespace();
        if !current.is_empty() && is_space != current_is_space {
            fragments.push(fragment(std::mem::take(&mut current), style, current_is_space));
        }
        current_is_space = is_space;
        current.push(if is_space { ' ' } else { ch });
    }
    if !current.is_empty() {
        fragments.push(fragment(current, style, current_is_space));
    }
    fragments
}

fn fragment(text: String, style: Style, whitespace: bool) -> Fragment {
    let width = text.width();
    Fragment {
        text,
        style,
        width,
        whitespace,
    }
}

fn wrap_fragments(
    fragments: &[Fragment],
    first_prefix: &str,
    continuation_prefix: &str,
    width: usize,
) -> Vec<Line<'static>> {
    let mut outputs = Vec::new();
    let mut builder = LineBuilder::new(first_prefix);
    let mut pending_whitespace: Vec<&Fragment> = Vec::new();

    for fragment in fragments {
        if fragment.whitespace {
            pending_whitespace.push(fragment);
            continue;
        }
        let whitespace_width: usize = pending_whitespace.iter().map(|item| item.width).sum();
        if builder.width > builder.prefix_width
            && builder.width + whitespace_width + fragment.width > width
        {
            pending_whitespace.clear();
            outputs.push(builder.build_line());
            builder = LineBuilder::new(continuation_prefix);
        }
        if builder.width > builder.prefix_width {
            for space in pending_whitespace.drain(..) {
                builder.push(space);
            }
        } else {
            pending_whitespace.clear();
        }
        builder.push(fragment);
    }

    outputs.push(builder.build_line());
    outputs
}

struct LineBuilder {
    spans: Vec<Span<'static>>,
    width: usize,
    prefix_width: usize,
}

impl LineBuilder {
    fn new(prefix: &str) -> Self {
        let prefix_width = prefix.width();
        let spans = if prefix.is_empty() {
            Vec::new()
        } else {
            vec![Span::raw(prefix.to_string())]
        };
        Self {
            spans,
            width: prefix_width,
            prefix_width,
        }
    }

    fn push(&mut self, fragment: &Fragment) {
        self.width += fragment.width;
        if let Some(last) = self.spans.last_mut()
            && last.style == fragment.style
        {
            last.content.to_mut().push_str(&fragment.text);
            return;
        }
        self.spans
            .push(Span::styled(fragment.text.clone(), fragment.style));
    }

    fn build_line(self) -> Line<'static> {
        Line::from(self.spans)
    }
}

fn line_width(line: &Line<'_>) -> usize {
    line.spans
        .iter()
        .map(|span| span.content.as_ref().width())
        .sum()
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
