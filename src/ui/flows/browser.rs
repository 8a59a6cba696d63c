use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use log::{debug, warn};
use std::time::{Duration, Instant};

use crate::app::{FilterKind, FilterOption, SessionState};
use crate::error::Result;
use crate::present::rule_detail;
use crate::ui::screens::{
    columns::flatten, render_browser, render_columns, render_detail, render_help, render_picker,
    Viewport,
};
use crate::ui::{TerminalGuard, UiRoute};
use crate::view::column_groups;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Which overlay, if any, currently owns the keyboard.
#[derive(Clone, Debug)]
enum Mode {
    Table,
    Search,
    GoTo {
        buffer: String,
    },
    Picker {
        kind: FilterKind,
        options: Vec<FilterOption>,
        selected: usize,
    },
    Columns {
        selected: usize,
    },
    Detail {
        index: usize,
        scroll: u16,
    },
    Help {
        scroll: u16,
    },
}

enum Step {
    Stay,
    Switch(Mode),
    Quit,
}

/// Run the interactive table until the user quits.
pub fn run_browser(session: &mut SessionState) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let mut mode = Mode::Table;
    let mut viewport = Viewport::default();

    loop {
        let model = session.page_model();
        guard.draw(|f| {
            let size = f.size();
            render_browser(
                f,
                size,
                session,
                &model,
                &mut viewport,
                matches!(mode, Mode::Search),
            );

            match &mode {
                Mode::Picker {
                    kind,
                    options,
                    selected,
                } => render_picker(
                    f,
                    size,
                    *kind,
                    options,
                    session.filter_value(*kind),
                    *selected,
                ),
                Mode::Columns { selected } => {
                    let groups =
                        column_groups(session.dataset().columns(), &session.view_state().columns);
                    render_columns(f, size, &groups, *selected);
                }
                Mode::Detail { index, scroll } => {
                    if let Some(rule) = session.dataset().get(*index) {
                        render_detail(f, size, &rule_detail(rule), *scroll);
                    }
                }
                Mode::Help { scroll } => {
                    render_help(f, size, session.dataset().columns(), *scroll);
                }
                Mode::Table | Mode::Search | Mode::GoTo { .. } => {}
            }
        })?;

        let timeout = session
            .search_debouncer()
            .time_until_due(Instant::now())
            .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    guard.restore()?;
                    return Ok(());
                }
                match handle_key(session, &mut mode, key) {
                    Step::Stay => {}
                    Step::Switch(next) => {
                        debug!("Switching to {:?}", route_of(&next));
                        mode = next;
                    }
                    Step::Quit => {
                        guard.restore()?;
                        return Ok(());
                    }
                }
            }
        }

        session.tick(Instant::now());
    }
}

fn route_of(mode: &Mode) -> UiRoute {
    match mode {
        Mode::Table | Mode::GoTo { .. } => UiRoute::Browser,
        Mode::Search => UiRoute::Search,
        Mode::Picker { .. } => UiRoute::Picker,
        Mode::Columns { .. } => UiRoute::Columns,
        Mode::Detail { .. } => UiRoute::Detail,
        Mode::Help { .. } => UiRoute::Help,
    }
}

fn handle_key(session: &mut SessionState, mode: &mut Mode, key: KeyEvent) -> Step {
    match mode {
        Mode::Table => handle_table_key(session, key),
        Mode::Search => handle_search_key(session, key),
        Mode::GoTo { buffer } => handle_goto_key(session, buffer, key),
        Mode::Picker {
            kind,
            options,
            selected,
        } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *selected = selected.checked_sub(1).unwrap_or(options.len().saturating_sub(1));
                Step::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *selected = (*selected + 1) % options.len().max(1);
                Step::Stay
            }
            KeyCode::Enter => {
                let value = options.get(*selected).and_then(|option| option.value.clone());
                session.set_filter(*kind, value);
                Step::Switch(Mode::Table)
            }
            KeyCode::Esc => Step::Switch(Mode::Table),
            _ => Step::Stay,
        },
        Mode::Columns { selected } => {
            let groups = column_groups(session.dataset().columns(), &session.view_state().columns);
            let keys: Vec<String> = flatten(&groups)
                .into_iter()
                .map(|toggle| toggle.key.clone())
                .collect();
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    *selected = selected.checked_sub(1).unwrap_or(keys.len().saturating_sub(1));
                    Step::Stay
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *selected = (*selected + 1) % keys.len().max(1);
                    Step::Stay
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(column) = keys.get(*selected) {
                        session.toggle_column(column);
                    }
                    Step::Stay
                }
                KeyCode::Esc | KeyCode::Char('c') => Step::Switch(Mode::Table),
                _ => Step::Stay,
            }
        }
        Mode::Detail { scroll, .. } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *scroll = scroll.saturating_sub(1);
                Step::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *scroll = scroll.saturating_add(1);
                Step::Stay
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Step::Switch(Mode::Table),
            _ => Step::Stay,
        },
        Mode::Help { scroll } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *scroll = scroll.saturating_sub(1);
                Step::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *scroll = scroll.saturating_add(1);
                Step::Stay
            }
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Step::Switch(Mode::Table),
            _ => Step::Stay,
        },
    }
}

fn handle_table_key(session: &mut SessionState, key: KeyEvent) -> Step {
    session.clear_status();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => session.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => session.move_selection(1),
        KeyCode::Left | KeyCode::Char('h') => session.move_column_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => session.move_column_cursor(1),
        KeyCode::Char('s') => session.sort_by_cursor(),
        KeyCode::Char('n') | KeyCode::PageDown | KeyCode::Char(']') => session.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp | KeyCode::Char('[') => session.previous_page(),
        KeyCode::Home => session.go_to_page(1),
        KeyCode::End => session.last_page(),
        KeyCode::Char('z') => session.cycle_page_size(),
        KeyCode::Char('u') => session.toggle_unique(),
        KeyCode::Char('x') => session.clear_filters(),
        KeyCode::Char('e') => {
            if let Err(err) = session.export() {
                warn!("Export failed: {err}");
                session.set_status(format!("Export failed: {err}"));
            }
        }
        KeyCode::Char('/') => {
            session.set_status(format!(
                "{}: type to filter • Enter apply • Esc done • Ctrl+U clear",
                UiRoute::Search.title()
            ));
            return Step::Switch(Mode::Search);
        }
        KeyCode::Char('g') => {
            session.set_status("Go to page: _");
            return Step::Switch(Mode::GoTo {
                buffer: String::new(),
            });
        }
        KeyCode::Char(digit @ '1'..='4') => {
            let kind = FilterKind::ALL[digit as usize - '1' as usize];
            let options = session.filter_options(kind);
            let active = session.filter_value(kind);
            let selected = options
                .iter()
                .position(|option| option.value.as_deref() == active)
                .unwrap_or(0);
            return Step::Switch(Mode::Picker {
                kind,
                options,
                selected,
            });
        }
        KeyCode::Char('c') => return Step::Switch(Mode::Columns { selected: 0 }),
        KeyCode::Char('?') => return Step::Switch(Mode::Help { scroll: 0 }),
        KeyCode::Enter => {
            if let Some(index) = session.selected_index() {
                return Step::Switch(Mode::Detail { index, scroll: 0 });
            }
        }
        KeyCode::Char('q') | KeyCode::Esc => return Step::Quit,
        _ => {}
    }
    Step::Stay
}

fn handle_search_key(session: &mut SessionState, key: KeyEvent) -> Step {
    match key.code {
        KeyCode::Enter => {
            session.clear_status();
            session.commit_search();
            Step::Switch(Mode::Table)
        }
        KeyCode::Esc => {
            session.clear_status();
            Step::Switch(Mode::Table)
        }
        KeyCode::Backspace => {
            session.pop_search_char();
            Step::Stay
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.clear_search();
            Step::Stay
        }
        KeyCode::Char(ch) => {
            session.push_search_char(ch);
            Step::Stay
        }
        _ => Step::Stay,
    }
}

fn handle_goto_key(session: &mut SessionState, buffer: &mut String, key: KeyEvent) -> Step {
    match key.code {
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            buffer.push(ch);
            session.set_status(format!("Go to page: {buffer}_"));
            Step::Stay
        }
        KeyCode::Backspace => {
            buffer.pop();
            session.set_status(format!("Go to page: {buffer}_"));
            Step::Stay
        }
        KeyCode::Enter => {
            let total = session.view().total_pages;
            match buffer.parse::<usize>() {
                Ok(page) if (1..=total).contains(&page) => {
                    session.clear_status();
                    session.go_to_page(page);
                }
                _ => session.set_status(format!("Page must be between 1 and {total}")),
            }
            Step::Switch(Mode::Table)
        }
        KeyCode::Esc => {
            session.clear_status();
            Step::Switch(Mode::Table)
        }
        _ => Step::Stay,
    }
}
