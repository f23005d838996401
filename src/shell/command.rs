//! Shell command grammar, parsed with clap from the tokens of one line.

use crate::core::wizard::WizardList;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::models::Screen;
use crate::models::record::RecordId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "admindesk",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    Help,
    Screens,
    Use {
        screen: Screen,
    },
    List,
    /// `filter <field> <value>`, `filter <field>` (clears it), `filter clear`
    Filter {
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },
    Page {
        target: String,
    },
    Add,
    Edit {
        id: RecordId,
    },
    Set {
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    Submit,
    Cancel,
    Draft,
    Del {
        id: RecordId,
    },
    Columns,
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },
    Slots {
        id: RecordId,
        #[command(subcommand)]
        action: Option<SlotAction>,
    },
    Wizard {
        #[command(subcommand)]
        action: WizardAction,
    },
    Export {
        format: ExportFormat,
        file: PathBuf,
        #[arg(long, short = 'f')]
        force: bool,
    },
    Log,
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ColumnAction {
    Add { label: String },
    Rename { id: String, label: String },
    Toggle { id: String },
    Remove { id: String },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SlotAction {
    Set {
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum WizardAction {
    Start,
    Edit {
        id: RecordId,
    },
    Set {
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    Push {
        #[command(subcommand)]
        item: PushItem,
    },
    Remove {
        list: WizardList,
        index: usize,
    },
    Next,
    Back,
    Show,
    Finish,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum PushItem {
    Highlight {
        text: String,
    },
    Section {
        title: String,
        #[arg(default_value = "")]
        summary: String,
    },
    Faq {
        question: String,
        answer: String,
    },
}

/// Page cursor movement of the `page` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Number(usize),
    Next,
    Prev,
}

impl PageTarget {
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "next" | "n" => Ok(PageTarget::Next),
            "prev" | "p" => Ok(PageTarget::Prev),
            other => other
                .parse::<usize>()
                .map(PageTarget::Number)
                .map_err(|_| {
                    AppError::InvalidCommand(format!(
                        "page: expected a number, next or prev, got '{raw}'"
                    ))
                }),
        }
    }
}

pub fn parse_tokens(tokens: &[String]) -> AppResult<ShellCommand> {
    ShellLine::try_parse_from(tokens)
        .map(|line| line.command)
        .map_err(|e| {
            let rendered = e.to_string();
            let first = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            AppError::InvalidCommand(first)
        })
}

pub const HELP: &str = "\
Screens
  screens                          list the admin screens
  use <screen>                     switch screen
  list                             show the current page
  filter <field> <value>           filter by substring (case-insensitive)
  filter <field> | filter clear    drop one filter / all filters
  page <n>|next|prev               move the page cursor
Records
  add | edit <id>                  open the form
  set <field> <value>              edit a form field
  draft                            show the open form
  submit | cancel                  commit or discard the form
  del <id>                         delete a record
Columns
  columns                          show the column editor
  column add <label>               append a custom column
  column rename <id> <label>       relabel a column
  column toggle <id>               show/hide a column
  column remove <id>               drop a column
Facilities
  slots <id>                       slot-booking view of a facility
  slots <id> set <field> <value>   update one facility setting
Courses
  wizard start | wizard edit <id>
  wizard set <field> <value>
  wizard push highlight <text>
  wizard push section <title> [summary]
  wizard push faq <question> <answer>
  wizard remove <list> <index>
  wizard next | back | show | finish
Other
  export csv|json <file> [-f]      export the filtered records
  log                              show the session log
  quit | exit
";
