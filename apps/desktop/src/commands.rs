//! Line commands typed by the user at the composer prompt.

use anyhow::{anyhow, bail, Result};
use shared::domain::{WordId, WORD_ELEMENT_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    AddWord,
    RemoveWord(WordId),
    /// Pick `device` from the menu of `word_id`.
    ChooseDevice {
        word_id: WordId,
        device: String,
    },
    /// Click a word control.
    Activate(WordId),
    Clear,
    Show,
    Generate,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add                    add a word control
  remove <word>          remove a word control
  menu <word> <device>   pick a device from a word's menu (rhyme, alliteration)
  click <word>           click a word control
  clear                  remove every word and link
  show                   print the canvas and links
  generate               send the poem specification for generation
  help                   print this help
  quit                   exit";

pub fn parse_command(line: &str) -> Result<Option<UiCommand>> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => UiCommand::AddWord,
        "remove" | "rm" => UiCommand::RemoveWord(parse_word(parts.next())?),
        "menu" => {
            let word_id = parse_word(parts.next())?;
            let device = parts
                .next()
                .ok_or_else(|| anyhow!("menu needs a device name"))?
                .to_ascii_lowercase();
            UiCommand::ChooseDevice { word_id, device }
        }
        "click" => UiCommand::Activate(parse_word(parts.next())?),
        "clear" => UiCommand::Clear,
        "show" => UiCommand::Show,
        "generate" | "gen" => UiCommand::Generate,
        "help" | "?" => UiCommand::Help,
        "quit" | "exit" => UiCommand::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    if let Some(extra) = parts.next() {
        bail!("unexpected argument '{extra}'");
    }
    Ok(Some(command))
}

/// Accepts either a bare id (`3`) or an element id (`w3`).
fn parse_word(raw: Option<&str>) -> Result<WordId> {
    let raw = raw.ok_or_else(|| anyhow!("missing word id"))?;
    let digits = raw.strip_prefix(WORD_ELEMENT_PREFIX).unwrap_or(raw);
    digits
        .parse::<u64>()
        .map(WordId)
        .map_err(|_| anyhow!("'{raw}' is not a word id"))
}
