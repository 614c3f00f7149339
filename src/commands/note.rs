//! `concord note` commands - register and list notes

use chrono::Utc;

use concord_core::error::Result;
use concord_core::format::OutputFormat;
use concord_core::records::NoteRecord;

use crate::cli::Cli;
use crate::commands::helpers::open_store;

/// Register a note
pub fn add(cli: &Cli, id: &str, title: &str, author: Option<&str>) -> Result<()> {
    let (db, _) = open_store(cli)?;

    let note = NoteRecord {
        id: id.to_string(),
        title: title.to_string(),
        author: author.map(str::to_string),
        created: Utc::now(),
    };
    db.insert_note(&note)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&note)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Added note {}", note.id);
            }
        }
    }
    Ok(())
}

/// List notes, optionally only those without any assignment
pub fn list(cli: &Cli, unassigned: bool) -> Result<()> {
    let (db, _) = open_store(cli)?;

    let notes = if unassigned {
        db.unassigned_notes()?
    } else {
        db.list_notes()?
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&notes)?);
        }
        OutputFormat::Human => {
            for note in &notes {
                match &note.author {
                    Some(author) => println!("{}  {}  ({})", note.id, note.title, author),
                    None => println!("{}  {}", note.id, note.title),
                }
            }
            if !cli.quiet {
                eprintln!("{} note(s)", notes.len());
            }
        }
    }
    Ok(())
}
