use anyhow::Result;
use ayat_tui::SessionOutcome;

/// Print a plain-text summary of the session.
pub(crate) fn print_plain(outcome: &SessionOutcome) {
	match &outcome.last_verse {
		Some(verse) => println!("Last verse: {verse}"),
		None => println!("No verse was opened"),
	}
	println!("Verses visited: {}", outcome.verses_visited);
	println!("Annotations saved: {}", outcome.annotations_saved);
	println!("Annotations deleted: {}", outcome.annotations_deleted);
	if outcome.templates_saved > 0 {
		println!("Templates saved: {}", outcome.templates_saved);
	}
	if outcome.bulk_saves > 0 {
		println!("Bulk saves: {}", outcome.bulk_saves);
	}
}

/// Format the session outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SessionOutcome) -> Result<String> {
	Ok(serde_json::to_string_pretty(outcome)?)
}

/// Print the JSON representation of the session outcome.
pub(crate) fn print_json(outcome: &SessionOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use serde_json::Value;

	use super::*;

	#[test]
	fn json_format_includes_counters() {
		let outcome = SessionOutcome {
			last_verse: Some("1:7".into()),
			verses_visited: 3,
			annotations_saved: 2,
			..SessionOutcome::default()
		};

		let json = format_outcome_json(&outcome).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["last_verse"], "1:7");
		assert_eq!(value["verses_visited"], 3);
		assert_eq!(value["annotations_saved"], 2);
		assert_eq!(value["bulk_saves"], 0);
	}

	#[test]
	fn json_format_keeps_missing_verse_as_null() {
		let json = format_outcome_json(&SessionOutcome::default()).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert!(value["last_verse"].is_null());
	}
}
