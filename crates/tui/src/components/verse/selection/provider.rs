use ayat_core::selection::{
	DisplaySegments, NodeOffset, RawSelection, SelectionProvider, SelectionRange,
};
use ayat_core::verse::{VerseText, utf16_len};

/// What the verse pane currently shows as selected, reported the way a
/// renderer would: relative to the spans it drew.
#[derive(Debug, Clone)]
pub(crate) struct PaneSelection {
	nodes: Vec<String>,
	selection: Option<(usize, String)>,
}

impl PaneSelection {
	/// Snapshot the rendered spans and the text between `bounds`.
	///
	/// Bounds that do not fall on character boundaries report no selection.
	pub(crate) fn new(
		segments: &DisplaySegments,
		verse: &VerseText,
		bounds: Option<(usize, usize)>,
	) -> Self {
		let selection = bounds.and_then(|(start, end)| {
			let range = SelectionRange::new(start, end).ok()?;
			let text = verse.slice(range).ok()?;
			Some((start, text.to_string()))
		});
		Self {
			nodes: segments.parts().iter().map(|part| (*part).to_string()).collect(),
			selection,
		}
	}
}

impl SelectionProvider for PaneSelection {
	fn current_selection(&self) -> Option<RawSelection> {
		let (start, text) = self.selection.as_ref()?;
		Some(RawSelection {
			nodes: self.nodes.clone(),
			anchor: locate(&self.nodes, *start),
			text: text.clone(),
		})
	}
}

/// Node containing `offset`; a boundary belongs to the node that starts there.
fn locate(nodes: &[String], offset: usize) -> NodeOffset {
	let mut preceding = 0usize;
	for (index, node) in nodes.iter().enumerate() {
		let len = utf16_len(node);
		if offset < preceding + len || index + 1 == nodes.len() {
			return NodeOffset {
				node: index,
				offset: offset.saturating_sub(preceding),
			};
		}
		preceding += len;
	}
	NodeOffset::default()
}
