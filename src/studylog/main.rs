use std::path::PathBuf;

use clap::Parser;
use colored::*;
use studylog::draft::DraftSession;
use studylog::error::{Result, StudylogError};
use studylog::files::StagedFile;
use studylog::model::Entry;
use studylog::store::fs::FileSlot;
use studylog::store::{EntryStore, StorageSlot};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let slot = FileSlot::default_location()?;
    let mut store = EntryStore::open(slot);

    let outcome = match cli.command {
        Some(Commands::Add {
            topic,
            notes,
            files,
        }) => handle_add(&mut store, topic, notes, files),
        Some(Commands::View { index }) => handle_view(&store, index),
        Some(Commands::Edit {
            index,
            topic,
            notes,
            files,
        }) => handle_edit(&mut store, index, topic, notes, files),
        Some(Commands::Delete { index }) => handle_delete(&mut store, index),
        Some(Commands::List) | None => handle_list(&store),
    };

    report_persistence(&store);
    outcome
}

fn handle_add<S: StorageSlot>(
    store: &mut EntryStore<S>,
    topic_words: Vec<String>,
    notes: Option<String>,
    files: Vec<PathBuf>,
) -> Result<()> {
    let mut draft = DraftSession::new();
    draft.set_topic(topic_words.join(" "));
    if let Some(notes) = notes {
        draft.set_notes(notes);
    }
    for path in &files {
        draft.stage_file(StagedFile::from_path(path)?);
    }

    let id = draft.submit(store)?;
    if let Some(entry) = store.get(id) {
        println!("{}", format!("Added: {}", entry.topic).green());
    }
    Ok(())
}

fn handle_edit<S: StorageSlot>(
    store: &mut EntryStore<S>,
    index: usize,
    topic: Option<String>,
    notes: Option<String>,
    files: Vec<PathBuf>,
) -> Result<()> {
    let entry = resolve_index(store, index)?;
    let had_files = !entry.files.is_empty();

    let mut draft = DraftSession::new();
    draft.begin_edit(entry);
    if let Some(topic) = topic {
        draft.set_topic(topic);
    }
    if let Some(notes) = notes {
        draft.set_notes(notes);
    }
    for path in &files {
        draft.stage_file(StagedFile::from_path(path)?);
    }

    if had_files && draft.staged().is_empty() {
        eprintln!(
            "{}",
            "Warning: previous attachments are dropped unless re-attached with --file".yellow()
        );
    }

    let id = draft.submit(store)?;
    if let Some(entry) = store.get(id) {
        println!("{}", format!("Updated: {}", entry.topic).green());
    }
    Ok(())
}

fn handle_delete<S: StorageSlot>(store: &mut EntryStore<S>, index: usize) -> Result<()> {
    let id = resolve_index(store, index)?.id;
    let removed = store.delete(id)?;
    println!("{}", format!("Deleted: {}", removed.topic).green());
    Ok(())
}

fn handle_view<S: StorageSlot>(store: &EntryStore<S>, index: usize) -> Result<()> {
    let entry = resolve_index(store, index)?;

    println!("{} {}", format!("{}.", index).yellow(), entry.topic.bold());
    println!(
        "{}",
        entry
            .date
            .format("%Y-%m-%d %H:%M UTC")
            .to_string()
            .dimmed()
    );
    if !entry.notes.is_empty() {
        println!("--------------------------------");
        println!("{}", entry.notes);
    }
    if !entry.files.is_empty() {
        println!("--------------------------------");
        for file in &entry.files {
            let label = format!(
                "{} ({}, {})",
                file.name,
                file.content_type,
                format_size(file.size)
            );
            match &file.preview {
                Some(preview) => println!("  {} -> {}", label, preview.underline()),
                None => println!("  {}", label),
            }
        }
    }
    Ok(())
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn handle_list<S: StorageSlot>(store: &EntryStore<S>) -> Result<()> {
    let entries = store.entries();
    if entries.is_empty() {
        println!("No study sessions recorded.");
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        let idx_str = format!("{}. ", i + 1);

        let attach_note = match entry.files.len() {
            0 => String::new(),
            1 => " [1 file]".to_string(),
            n => format!(" [{} files]", n),
        };

        let notes_preview: String = entry
            .notes
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let label = if notes_preview.is_empty() {
            entry.topic.clone()
        } else {
            format!("{} {}", entry.topic, notes_preview)
        };

        let fixed_width = 4 + idx_str.width() + attach_note.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label_display = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label_display.width());

        println!(
            "    {}{}{}{}{}",
            idx_str,
            label_display,
            " ".repeat(padding),
            attach_note.cyan(),
            format_time_ago(entry.date).dimmed()
        );
    }
    Ok(())
}

fn resolve_index<S: StorageSlot>(store: &EntryStore<S>, index: usize) -> Result<&Entry> {
    index
        .checked_sub(1)
        .and_then(|i| store.entries().get(i))
        .ok_or_else(|| StudylogError::Usage(format!("No entry at index {}", index)))
}

fn report_persistence<S: StorageSlot>(store: &EntryStore<S>) {
    if let Some(fault) = store.persistence_fault() {
        eprintln!(
            "{}",
            format!(
                "Warning: entries are not durably saved this session ({})",
                fault.detail
            )
            .yellow()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let duration = chrono::Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
