use colored::Colorize;
use serde_json::{Value, json};
use typist::{RunReport, TypingConfig};

use super::OutputFormat;

pub fn report_json(report: &RunReport, config: &TypingConfig) -> Value {
	json!({
		"ok": true,
		"url": config.url,
		"selector": config.selector.to_string(),
		"stages": report.stages.iter().map(|stage| stage.as_str()).collect::<Vec<_>>(),
		"bulkWritten": report.bulk_written,
		"charsTyped": report.chars_typed,
		"delayMs": config.delay_ms,
		"typingElapsedMs": u64::try_from(report.typing_elapsed.as_millis()).unwrap_or(u64::MAX),
		"fieldValue": report.field_value,
		"submitted": report.submitted,
	})
}

pub fn report_text(report: &RunReport, config: &TypingConfig) -> String {
	let elapsed = report.typing_elapsed.as_secs_f64();
	let rate = if elapsed > 0.0 {
		report.chars_typed as f64 / elapsed
	} else {
		0.0
	};

	let mut lines = vec![format!("{} {} ({})", "Typed into".green().bold(), config.selector, config.url)];
	lines.push(format!(
		"  {} characters in {:.3}s ({:.1} chars/s, {}ms delay)",
		report.chars_typed, elapsed, rate, config.delay_ms
	));
	if report.bulk_written {
		lines.push("  bulk write: yes (field holds the payload twice)".to_string());
	}
	if let Some(value) = &report.field_value {
		lines.push(format!("  field length: {} characters", value.chars().count()));
	}
	lines.push(if report.submitted {
		format!("  submitted with {}", config.submit_key)
	} else {
		"  not submitted".dimmed().to_string()
	});
	lines.join("\n")
}

pub fn print_report(report: &RunReport, config: &TypingConfig, format: OutputFormat) {
	match format {
		OutputFormat::Text => println!("{}", report_text(report, config)),
		OutputFormat::Json => println!("{}", report_json(report, config)),
	}
}
