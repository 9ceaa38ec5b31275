use colored::Colorize;
use datitos_runtime::{occurrences, Runtime, RuntimeEvent, Severity, Toast};
use std::io::Write;

/// Body lines shown per page in the interactive console.
const PAGE_LINES: usize = 12;

/// Render state for the content surface. The only state is the scroll
/// offset, reset whenever a section enters.
#[derive(Debug, Default)]
pub struct View {
    scroll: usize,
    interactive: bool,
}

impl View {
    /// Scripted mode: full body, no paging, no bell.
    pub fn scripted() -> Self {
        Self {
            scroll: 0,
            interactive: false,
        }
    }

    /// Console mode: paged body, audio cue as a terminal bell.
    pub fn interactive() -> Self {
        Self {
            scroll: 0,
            interactive: true,
        }
    }

    pub fn scroll_down(&mut self, runtime: &Runtime) {
        let body_len = runtime.database.sections[runtime.current_section()].body.len();
        if self.scroll + PAGE_LINES < body_len {
            self.scroll += PAGE_LINES;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(PAGE_LINES);
    }

    fn render_event(&mut self, runtime: &Runtime, event: &RuntimeEvent) {
        match event {
            RuntimeEvent::ScrollTop => self.scroll = 0,
            RuntimeEvent::SectionEntered(section_id) => self.render_section(runtime, *section_id),
            RuntimeEvent::FragmentChanged(name) => println!("#{}", name),
            RuntimeEvent::AudioCue => {
                if self.interactive {
                    // Best effort; a terminal without a bell stays silent.
                    print!("\x07");
                    let _ = std::io::stdout().flush();
                }
            }
            RuntimeEvent::Notified(toast) => render_toast(toast),
        }
    }

    fn render_section(&self, runtime: &Runtime, section_id: usize) {
        let database = &runtime.database;
        let query = runtime
            .highlight()
            .filter(|highlight| highlight.section == section_id)
            .map(|highlight| highlight.query.clone());

        println!(
            "-> {}: {}",
            database.section_name(section_id),
            mark(database.section_title(section_id), query.as_deref())
        );

        let body = &database.sections[section_id].body;
        let window = if self.interactive {
            self.scroll..body.len().min(self.scroll + PAGE_LINES)
        } else {
            0..body.len()
        };
        let remaining = body.len() - window.end;

        for &line_id in &body[window] {
            println!("{}", mark(&database.strings[line_id], query.as_deref()));
        }

        if remaining > 0 {
            println!("({} more lines, `d` to scroll)", remaining);
        }
    }
}

/// Drains the runtime's pending events into the terminal.
pub fn render_pending(runtime: &mut Runtime, view: &mut View) {
    for event in runtime.take_events() {
        view.render_event(runtime, &event);
    }
}

pub fn render_toast(toast: &Toast) {
    let tag = format!("[{}]", toast.severity);
    let tag = match toast.severity {
        Severity::Info => tag.cyan(),
        Severity::Warning => tag.yellow(),
        Severity::Error => tag.red(),
    };
    println!("{} {}", tag, toast.message);
}

pub fn render_status(runtime: &Runtime) {
    let database = &runtime.database;
    println!("section: {}", database.section_name(runtime.current_section()));
    match runtime.fragment() {
        Some(fragment) => println!("fragment: #{}", fragment),
        None => println!("fragment: (none)"),
    }

    let entries: Vec<String> = runtime
        .menu()
        .iter()
        .map(|entry| {
            let name = database.section_name(entry.section);
            if entry.active {
                format!("[{}]", name)
            } else {
                name.to_string()
            }
        })
        .collect();
    println!("menu: {}", entries.join(" "));
}

/// Wraps each occurrence of `query` in visual markers. Computed per draw;
/// nothing is stored back, so expired highlights simply stop appearing.
fn mark(text: &str, query: Option<&str>) -> String {
    let Some(query) = query else {
        return text.to_string();
    };

    let ranges = occurrences(text, query);
    if ranges.is_empty() {
        return text.to_string();
    }

    let mut marked = String::with_capacity(text.len() + ranges.len() * 4);
    let mut cursor = 0;
    for (start, end) in ranges {
        marked.push_str(&text[cursor..start]);
        marked.push('«');
        marked.push_str(&text[start..end]);
        marked.push('»');
        cursor = end;
    }
    marked.push_str(&text[cursor..]);
    marked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_wraps_each_occurrence() {
        assert_eq!(
            mark("bar in a barn", Some("bar")),
            "«bar» in a «bar»n"
        );
    }

    #[test]
    fn test_mark_is_case_insensitive_but_preserves_text() {
        assert_eq!(mark("Foo Bar", Some("bar")), "Foo «Bar»");
    }

    #[test]
    fn test_mark_without_query_or_match() {
        assert_eq!(mark("plain", None), "plain");
        assert_eq!(mark("plain", Some("zzz")), "plain");
    }
}
