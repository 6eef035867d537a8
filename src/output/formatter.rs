//! Output formatters: console, JSON, Markdown and HTML renderings of a report

use crate::config::OutputFormat;
use crate::error::{GapAnalyzerError, Result};
use crate::output::report::*;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with embedded styling
pub struct HtmlFormatter {
    include_styles: bool,
    detailed: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Gap Analysis</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .keyword { display: inline-block; background: #f8f9fa; border-left: 4px solid #dc3545; padding: 4px 10px; margin: 4px; border-radius: 4px; }
        .keyword.matched { border-left-color: #28a745; }
        .success { background: #e6f4ea; border-left: 4px solid #28a745; padding: 15px; border-radius: 6px; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Gap Analysis</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Match Score</h2>
            <h3>{{ headline }} <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
        </div>

        <div class="section">
            <h2>Missing Skills / Keywords</h2>
            {% if missing_skills.is_empty() %}
            <p class="success">{{ no_gap_message }}</p>
            {% else %}
            <p>{% for skill in missing_skills %}<span class="keyword">{{ skill }}</span>{% endfor %}</p>
            {% endif %}
        </div>

        {% if detailed %}
        <div class="section">
            <h2>Matched Keywords</h2>
            <p>{% for keyword in matched_keywords %}<span class="keyword matched">{{ keyword }}</span>{% endfor %}</p>
            <p>Job keywords: {{ job_keyword_count }} | Resume keywords: {{ resume_keyword_count }} | TF-IDF vocabulary: {{ vocabulary_size }} terms</p>
        </div>
        {% endif %}

        <div class="metadata">
            <p><strong>Generated by Resume Gap Analyzer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_source }} | <strong>Stopwords:</strong> {{ stopword_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    detailed: bool,
    generated_at: String,
    processing_time: u64,
    headline: String,
    score_class: &'static str,
    score_label: String,
    missing_skills: &'a [String],
    matched_keywords: &'a [String],
    no_gap_message: &'static str,
    job_keyword_count: usize,
    resume_keyword_count: usize,
    vocabulary_size: usize,
    version: &'a str,
    resume_file: &'a str,
    job_source: &'a str,
    stopword_source: &'a str,
}

fn format_timestamp(report: &AnalysisReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_band_badge(&self, band: MatchBand) -> String {
        let color = match band {
            MatchBand::Excellent => Color::Green,
            MatchBand::Good => Color::BrightGreen,
            MatchBand::Fair => Color::Yellow,
            MatchBand::Poor => Color::Red,
        };
        let label = band.to_string().to_uppercase();

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME GAP ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Match Score", 2));
        output.push_str(&format!(
            "{} {}\n",
            self.colorize(&report.headline(), Color::Cyan),
            self.format_band_badge(report.match_summary.band)
        ));

        output.push_str(&self.format_header("❌ Missing Skills / Keywords", 2));
        if report.gap_analysis.has_gaps() {
            output.push_str(&format!("{}\n", self.colorize(&report.gap_line(), Color::Yellow)));
        } else {
            output.push_str(&format!("{} 🎯\n", self.colorize(NO_GAP_MESSAGE, Color::Green)));
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!(
                "Keywords: {} in job, {} in resume, {} shared\n",
                report.gap_analysis.job_keyword_count,
                report.gap_analysis.resume_keyword_count,
                report.gap_analysis.matched_keywords.len()
            ));
            if !report.gap_analysis.matched_keywords.is_empty() {
                output.push_str(&format!(
                    "Matched: {}\n",
                    self.colorize(&report.gap_analysis.matched_keywords.join(", "), Color::Green)
                ));
            }
            output.push_str(&format!(
                "TF-IDF vocabulary: {} terms | cosine similarity: {:.6}\n",
                report.match_summary.vocabulary_size, report.match_summary.cosine_similarity
            ));
            if !report.match_summary.top_job_terms.is_empty() {
                let terms: Vec<String> = report
                    .match_summary
                    .top_job_terms
                    .iter()
                    .map(|t| format!("{} ({:.3})", t.term, t.weight))
                    .collect();
                output.push_str(&format!("Top job terms: {}\n", terms.join(", ")));
            }
            output.push_str(&format!(
                "Resume: {} ({} chars) | Job: {} ({} chars)\n",
                report.metadata.resume_file.as_deref().unwrap_or("-"),
                report.metadata.resume_characters,
                report.metadata.job_source.as_deref().unwrap_or("-"),
                report.metadata.job_characters
            ));
            output.push_str(&format!("Stopwords: {}\n", report.metadata.stopword_source));
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Gap Analyzer v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.analyzer_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_band_badge(band: MatchBand) -> &'static str {
        match band {
            MatchBand::Excellent => "🟢 Excellent",
            MatchBand::Good => "🟡 Good",
            MatchBand::Fair => "🟠 Fair",
            MatchBand::Poor => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::from("# Resume Gap Analysis\n\n");

        output.push_str("## Match Score\n\n");
        output.push_str(&format!(
            "**{}** ({})\n\n",
            report.headline(),
            Self::markdown_band_badge(report.match_summary.band)
        ));

        output.push_str("## Missing Skills / Keywords\n\n");
        if report.gap_analysis.has_gaps() {
            output.push_str(&format!("`{}`\n\n", report.gap_analysis.missing_skills.join("`, `")));
        } else {
            output.push_str(&format!("{} 🎯\n\n", NO_GAP_MESSAGE));
        }

        if !report.gap_analysis.matched_keywords.is_empty() {
            output.push_str("## Matched Keywords\n\n");
            output.push_str(&format!("{}\n\n", report.gap_analysis.matched_keywords.join(", ")));
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str("| Field | Value |\n|---|---|\n");
            output.push_str(&format!("| Generated | {} |\n", format_timestamp(report)));
            output.push_str(&format!(
                "| Resume | {} |\n",
                report.metadata.resume_file.as_deref().unwrap_or("-")
            ));
            output.push_str(&format!(
                "| Job description | {} |\n",
                report.metadata.job_source.as_deref().unwrap_or("-")
            ));
            output.push_str(&format!("| TF-IDF vocabulary | {} terms |\n", report.match_summary.vocabulary_size));
            output.push_str(&format!("| Stopwords | {} |\n", report.metadata.stopword_source));
            output.push_str(&format!("| Processing time | {}ms |\n", report.metadata.processing_time_ms));
            output.push_str(&format!(
                "\n*Generated by Resume Gap Analyzer v{}*\n",
                report.metadata.analyzer_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, detailed: bool) -> Self {
        Self {
            include_styles,
            detailed,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let score_class = match report.match_summary.band {
            MatchBand::Excellent => "score-excellent",
            MatchBand::Good => "score-good",
            MatchBand::Fair => "score-fair",
            MatchBand::Poor => "score-poor",
        };

        let template = HtmlTemplate {
            include_styles: self.include_styles,
            detailed: self.detailed,
            generated_at: format_timestamp(report),
            processing_time: report.metadata.processing_time_ms,
            headline: report.headline(),
            score_class,
            score_label: report.match_summary.band.to_string(),
            missing_skills: &report.gap_analysis.missing_skills,
            matched_keywords: &report.gap_analysis.matched_keywords,
            no_gap_message: NO_GAP_MESSAGE,
            job_keyword_count: report.gap_analysis.job_keyword_count,
            resume_keyword_count: report.gap_analysis.resume_keyword_count,
            vocabulary_size: report.match_summary.vocabulary_size,
            version: &report.metadata.analyzer_version,
            resume_file: report.metadata.resume_file.as_deref().unwrap_or("-"),
            job_source: report.metadata.job_source.as_deref().unwrap_or("-"),
            stopword_source: &report.metadata.stopword_source,
        };

        template
            .render()
            .map_err(|e| GapAnalyzerError::OutputFormatting(format!("Failed to render HTML report: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles, detailed),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_gap_analysis{}.{}", base_name, timestamp_suffix, extension)
}
