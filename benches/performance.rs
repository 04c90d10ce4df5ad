use folio_tui::{
    content::ContentDocument,
    editor::{self, EditorSession},
    editor_display::FormDisplay,
    render,
    theme::Theme,
};
use serde_json::{Value, json};
use std::time::{Duration, Instant};

/// Performance benchmark suite for the folio editor
///
/// Run with: cargo test --release --bench performance -- --nocapture
///
/// This measures:
/// - Populating the form from a document
/// - Collecting the form back into a document
/// - Exporting as pretty JSON
/// - Rendering the site preview and the form
const SMALL_DOC_PROJECTS: usize = 5;
const LARGE_DOC_PROJECTS: usize = 500;
const HUGE_DOC_PROJECTS: usize = 5000;

const ITERATIONS: usize = 100;

const SAMPLE_WORDS: [&str; 24] = [
    "Lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "minim",
    "veniam",
    "quis",
    "nostrud",
];

fn words(seed: usize, count: usize) -> String {
    (0..count)
        .map(|i| SAMPLE_WORDS[(seed + i * 7) % SAMPLE_WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a site document with the given number of projects plus the usual
/// sidebar, summary and contact sections.
fn create_test_document(num_projects: usize) -> ContentDocument {
    let projects: Vec<Value> = (0..num_projects)
        .map(|i| {
            let url = if i % 3 == 0 {
                String::new()
            } else {
                format!("https://example.com/p/{i}")
            };
            json!({
                "title": format!("Project {i}"),
                "url": url,
                "description": words(i, 30),
                "tech_stack": words(i + 3, 4),
                "extra": { "stars": i }
            })
        })
        .collect();
    let paragraphs: Vec<String> = (0..10).map(|i| words(i, 60)).collect();
    let interests: Vec<String> = (0..20).map(|i| words(i, 5)).collect();

    ContentDocument::from_value(json!({
        "sidebar": {
            "name": "Ada Lovelace",
            "headline_lines": ["Analyst", "Metaphysician"],
            "degree_lines": ["Mathematics"],
            "location": "London",
            "employer": "Analytical Engine Co.",
            "nav": {
                "main": [ { "label": "Home", "href": "#home" } ],
                "profiles": [
                    { "type": "linkedin", "chip": "in", "label": "LinkedIn", "href": "https://linkedin.com/in/ada" },
                    { "type": "github", "chip": "gh", "label": "GitHub", "href": "https://github.com/ada" },
                    { "type": "email", "chip": "@", "label": "Email", "href": "mailto:ada@example.com" }
                ]
            }
        },
        "topbar": { "name": "Ada Lovelace", "subtitle": "Notes" },
        "sections": {
            "summary": { "title": "Summary", "paragraphs": paragraphs },
            "research_interests": { "items": interests },
            "projects": { "title": "Projects", "items": projects },
            "contact": { "email": "ada@example.com", "cal_url": "https://cal.example/ada" }
        },
        "footer": { "text": "Built with care" }
    }))
}

struct BenchmarkResult {
    name: String,
    iterations: usize,
    total_duration: Duration,
    avg_duration: Duration,
    min_duration: Duration,
    max_duration: Duration,
}

impl BenchmarkResult {
    fn print(&self) {
        println!("\n{}", "=".repeat(70));
        println!("Benchmark: {}", self.name);
        println!("{}", "=".repeat(70));
        println!("Iterations:     {}", self.iterations);
        println!("Total time:     {:?}", self.total_duration);
        println!("Average:        {:?}", self.avg_duration);
        println!("Min:            {:?}", self.min_duration);
        println!("Max:            {:?}", self.max_duration);
        println!(
            "Ops/sec:        {:.2}",
            1.0 / self.avg_duration.as_secs_f64().max(f64::EPSILON)
        );

        if self.avg_duration.as_millis() > 100 {
            println!("\n⚠️  WARNING: Average duration > 100ms (user-perceptible lag)");
        } else if self.avg_duration.as_millis() > 16 {
            println!("\n⚠️  WARNING: Average duration > 16ms (may drop frames)");
        }
    }
}

fn benchmark<F>(name: &str, iterations: usize, mut f: F) -> BenchmarkResult
where
    F: FnMut(),
{
    let mut durations = Vec::with_capacity(iterations);

    // Warmup
    for _ in 0..10 {
        f();
    }

    for _ in 0..iterations {
        let start = Instant::now();
        f();
        durations.push(start.elapsed());
    }

    let total_duration: Duration = durations.iter().sum();
    let avg_duration = total_duration / iterations as u32;
    let min_duration = durations.iter().min().copied().unwrap_or_default();
    let max_duration = durations.iter().max().copied().unwrap_or_default();

    BenchmarkResult {
        name: name.to_string(),
        iterations,
        total_duration,
        avg_duration,
        min_duration,
        max_duration,
    }
}

fn documents() -> Vec<(&'static str, ContentDocument, usize)> {
    vec![
        (
            "Small (5 projects)",
            create_test_document(SMALL_DOC_PROJECTS),
            ITERATIONS,
        ),
        (
            "Large (500 projects)",
            create_test_document(LARGE_DOC_PROJECTS),
            ITERATIONS,
        ),
        (
            "Huge (5000 projects)",
            create_test_document(HUGE_DOC_PROJECTS),
            10,
        ),
    ]
}

#[test]
fn bench_populate_and_collect() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║           POPULATE / COLLECT BENCHMARKS                        ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    for (name, doc, iterations) in documents() {
        benchmark(&format!("populate - {name}"), iterations, || {
            let _ = editor::populate(&doc);
        })
        .print();

        let fields = editor::populate(&doc);
        benchmark(&format!("collect - {name}"), iterations, || {
            let _ = editor::collect(&fields, &doc);
        })
        .print();
    }
}

#[test]
fn bench_export_json() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║           EXPORT BENCHMARKS                                    ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    for (name, doc, iterations) in documents() {
        let mut session = EditorSession::with_document(doc, "bench");
        benchmark(&format!("export_json - {name}"), iterations, || {
            let _ = session.export_json();
        })
        .print();
    }
}

#[test]
fn bench_preview_rendering() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║           PREVIEW RENDERING BENCHMARKS                         ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let theme = Theme::default();
    for (name, doc, iterations) in documents() {
        let site = doc.site();
        benchmark(&format!("build_page - {name}"), iterations, || {
            let _ = render::build_page(&site);
        })
        .print();

        let page = render::build_page(&site);
        for width in [40, 80, 160] {
            benchmark(
                &format!("render_page width {width} - {name}"),
                iterations,
                || {
                    let _ = render::render_page(&page, width, &theme);
                },
            )
            .print();
        }
    }
}

#[test]
fn bench_live_preview_flow() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║           LIVE PREVIEW FLOW (edit → collect → render)          ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let theme = Theme::default();
    for (name, doc, iterations) in documents() {
        let mut session = EditorSession::with_document(doc, "bench");
        benchmark(&format!("keystroke + preview - {name}"), iterations, || {
            session.fields_mut().summary.push('x');
            let site = session.preview().site();
            let page = render::build_page(&site);
            let _ = render::render_page(&page, 80, &theme);
        })
        .print();
    }
}

#[test]
fn bench_form_rendering() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║           FORM RENDERING BENCHMARKS                            ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let theme = Theme::default();
    for (name, doc, iterations) in documents() {
        let mut display = FormDisplay::new(EditorSession::with_document(doc, "bench"));
        benchmark(&format!("render_form - {name}"), iterations, || {
            let _ = display.render_form(80, &theme);
        })
        .print();

        benchmark(&format!("focus cycle - {name}"), iterations, || {
            display.focus_next();
            display.insert_char('a');
            display.backspace();
        })
        .print();
    }
}
