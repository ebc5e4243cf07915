//! Render diff — what changed in the buffer, line by line.
//!
//! Every buffer mutation journals the minimal set of line-level edits needed
//! to bring a view up to date. Replaying the events in order against a copy
//! of the previous line list reproduces the new buffer exactly, so a host
//! never has to re-derive buffer state.
//!
//! Events are delivered after the whole intent finished. Sinks observe; they
//! never get a handle back into the editor.

/// One line-level change to the buffer.
///
/// Indices refer to the line list as it stands *after* every earlier event in
/// the same batch has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// The line at `index` now reads `text`.
    LineReplaced { index: usize, text: String },
    /// A new line `text` was inserted so that it now sits at `index`.
    LineInserted { index: usize, text: String },
    /// The line at `index` was removed.
    LineRemoved { index: usize },
}

impl RenderEvent {
    /// The line index this event touches.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::LineReplaced { index, .. }
            | Self::LineInserted { index, .. }
            | Self::LineRemoved { index } => *index,
        }
    }

    /// Replay this event on a plain list of lines.
    ///
    /// Out-of-range indices are ignored; a list kept in sync from the first
    /// event never produces one.
    pub fn apply_to(&self, lines: &mut Vec<String>) {
        match self {
            Self::LineReplaced { index, text } => {
                if let Some(line) = lines.get_mut(*index) {
                    line.clone_from(text);
                }
            }
            Self::LineInserted { index, text } => {
                if *index <= lines.len() {
                    lines.insert(*index, text.clone());
                }
            }
            Self::LineRemoved { index } => {
                if *index < lines.len() {
                    lines.remove(*index);
                }
            }
        }
    }
}

/// Receiver of render events — the host's presentation layer.
pub trait RenderSink {
    /// Handle a single event.
    fn render(&mut self, event: &RenderEvent);

    /// Handle a batch in order.
    fn render_all(&mut self, events: &[RenderEvent]) {
        for event in events {
            self.render(event);
        }
    }
}

impl<F: FnMut(&RenderEvent)> RenderSink for F {
    fn render(&mut self, event: &RenderEvent) {
        self(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn replay_batch_in_order() {
        let mut view = lines(&["hello", "world"]);
        let events = [
            RenderEvent::LineReplaced { index: 0, text: "hel".into() },
            RenderEvent::LineInserted { index: 1, text: "lo".into() },
            RenderEvent::LineRemoved { index: 2 },
        ];
        for e in &events {
            e.apply_to(&mut view);
        }
        assert_eq!(view, lines(&["hel", "lo"]));
    }

    #[test]
    fn out_of_range_events_are_ignored() {
        let mut view = lines(&["a"]);
        RenderEvent::LineRemoved { index: 3 }.apply_to(&mut view);
        RenderEvent::LineInserted { index: 5, text: "x".into() }.apply_to(&mut view);
        RenderEvent::LineReplaced { index: 1, text: "y".into() }.apply_to(&mut view);
        assert_eq!(view, lines(&["a"]));
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        let mut sink = |e: &RenderEvent| seen.push(e.index());
        sink.render_all(&[
            RenderEvent::LineRemoved { index: 4 },
            RenderEvent::LineInserted { index: 2, text: String::new() },
        ]);
        assert_eq!(seen, vec![4, 2]);
    }
}
