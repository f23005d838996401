//! Line-oriented admin session over one workspace.

use crate::config::Config;
use crate::core::list::Submitted;
use crate::core::wizard::BackOutcome;
use crate::core::workspace::{ColumnEdit, Workspace};
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::models::Screen;
use crate::shell::command::{
    ColumnAction, HELP, PageTarget, PushItem, ShellCommand, SlotAction, WizardAction,
    parse_tokens,
};
use crate::shell::lexer::tokenize;
use crate::ui::messages::{error, header, info, success, warning};
use crate::ui::render::{render_slots, render_wizard};
use crate::utils::formatting::yes_no;
use crate::utils::table::Table;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Errors are reported and the session goes on.
    Interactive { prompt: bool },
    /// The first failing command ends the session with its error.
    Script,
}

pub struct Session<'a> {
    ws: Workspace,
    cfg: &'a Config,
}

impl<'a> Session<'a> {
    pub fn new(ws: Workspace, cfg: &'a Config) -> Self {
        Self { ws, cfg }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.ws
    }

    /// Read commands until end of input or `quit`.
    ///
    /// Overwrite confirmations of `export` are read from the same input.
    pub fn run<B: BufRead>(&mut self, mut input: B, mode: Mode) -> AppResult<()> {
        let mut line_no = 0usize;
        loop {
            if let Mode::Interactive { prompt: true } = mode {
                print!("admindesk [{}]> ", self.ws.active());
                io::stdout().flush().ok();
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            line_no += 1;

            match self.execute(&line, &mut input) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => match mode {
                    Mode::Script => {
                        return Err(AppError::InvalidCommand(format!(
                            "line {line_no}: `{}`: {e}",
                            line.trim()
                        )));
                    }
                    Mode::Interactive { .. } => error(e),
                },
            }
        }
        Ok(())
    }

    /// Execute one line. Blank lines and `#` comments are ignored.
    pub fn execute<B: BufRead>(&mut self, line: &str, input: &mut B) -> AppResult<Flow> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Flow::Continue);
        }
        let tokens = tokenize(trimmed)?;
        let command = parse_tokens(&tokens)?;
        self.dispatch(command, input)
    }

    fn dispatch<B: BufRead>(&mut self, command: ShellCommand, input: &mut B) -> AppResult<Flow> {
        match command {
            ShellCommand::Help => print!("{HELP}"),
            ShellCommand::Screens => self.print_screens(),
            ShellCommand::Use { screen } => {
                self.ws.set_active(screen);
                self.print_list();
            }
            ShellCommand::List => self.print_list(),
            ShellCommand::Filter { field, value } => {
                match (field.as_str(), value) {
                    ("clear", None) => self.ws.current_mut().clear_filters(),
                    (_, value) => self
                        .ws
                        .current_mut()
                        .set_filter(&field, &value.unwrap_or_default())?,
                }
                self.print_list();
            }
            ShellCommand::Page { target } => {
                let view = self.ws.current_mut();
                match PageTarget::parse(&target)? {
                    PageTarget::Number(n) => view.set_page(n),
                    PageTarget::Next => view.next_page(),
                    PageTarget::Prev => view.prev_page(),
                };
                self.print_list();
            }
            ShellCommand::Add => {
                self.ws.current_mut().open_add()?;
                self.print_form()?;
            }
            ShellCommand::Edit { id } => {
                self.ws.current_mut().open_edit(id)?;
                self.print_form()?;
            }
            ShellCommand::Set { field, value } => self.ws.current_mut().set_field(&field, &value)?,
            ShellCommand::Draft => self.print_form()?,
            ShellCommand::Submit => self.submit()?,
            ShellCommand::Cancel => {
                if self.ws.current_mut().cancel() {
                    info("Form discarded.");
                } else {
                    warning("No form is open.");
                }
            }
            ShellCommand::Del { id } => {
                self.ws.delete(id)?;
                success(format!("{} #{id} deleted.", self.ws.current().kind()));
                self.print_list();
            }
            ShellCommand::Columns => self.print_columns(),
            ShellCommand::Column { action } => {
                let edit = match action {
                    ColumnAction::Add { label } => ColumnEdit::Add(label),
                    ColumnAction::Rename { id, label } => ColumnEdit::Rename { id, label },
                    ColumnAction::Toggle { id } => ColumnEdit::Toggle(id),
                    ColumnAction::Remove { id } => ColumnEdit::Remove(id),
                };
                let message = self.ws.edit_columns(edit)?;
                success(format!("Column {message}"));
            }
            ShellCommand::Slots { id, action } => {
                let facility = match action {
                    None => self.ws.facility(id)?,
                    Some(SlotAction::Set { field, value }) => {
                        let updated = self.ws.update_slot(id, &field, &value)?;
                        success(format!("Facility #{id} updated."));
                        updated
                    }
                };
                print!("{}", render_slots(&facility));
            }
            ShellCommand::Wizard { action } => self.wizard(action)?,
            ShellCommand::Export {
                format,
                file,
                force,
            } => {
                ensure_writable(&file, force, input)?;
                self.ws.export(format, &file)?;
            }
            ShellCommand::Log => {
                if self.ws.audit().is_empty() {
                    info("No operations recorded in this session.");
                } else {
                    header("Session log");
                    print!("{}", self.ws.audit().render());
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn submit(&mut self) -> AppResult<()> {
        match self.ws.submit() {
            Ok(outcome) => {
                let kind = self.ws.current().kind();
                match outcome {
                    Submitted::Added(id) => success(format!("{kind} #{id} added.")),
                    Submitted::Updated(id) => success(format!("{kind} #{id} updated.")),
                }
                self.print_list();
                Ok(())
            }
            Err(AppError::Validation(errors)) => {
                self.print_form()?;
                Err(AppError::Validation(errors))
            }
            Err(e) => Err(e),
        }
    }

    fn wizard(&mut self, action: WizardAction) -> AppResult<()> {
        match action {
            WizardAction::Start => {
                print!("{}", render_wizard(self.ws.start_wizard()));
            }
            WizardAction::Edit { id } => {
                print!("{}", render_wizard(self.ws.edit_in_wizard(id)?));
            }
            WizardAction::Set { field, value } => self.ws.wizard_mut()?.set_field(&field, &value)?,
            WizardAction::Push { item } => {
                let wizard = self.ws.wizard_mut()?;
                match item {
                    PushItem::Highlight { text } => wizard.push_highlight(&text),
                    PushItem::Section { title, summary } => wizard.push_section(&title, &summary),
                    PushItem::Faq { question, answer } => wizard.push_faq(&question, &answer),
                }
            }
            WizardAction::Remove { list, index } => self.ws.wizard_mut()?.remove_item(list, index)?,
            WizardAction::Next => {
                let moved = self.ws.wizard_next();
                self.print_wizard()?;
                moved?;
            }
            WizardAction::Back => match self.ws.wizard_back()? {
                BackOutcome::Moved(_) => self.print_wizard()?,
                BackOutcome::Exited => info("Wizard closed, draft discarded."),
            },
            WizardAction::Show => self.print_wizard()?,
            WizardAction::Finish => match self.ws.finish_wizard() {
                Ok(outcome) => {
                    let verb = match outcome {
                        Submitted::Added(_) => "created",
                        Submitted::Updated(_) => "updated",
                    };
                    success(format!("Course #{} {verb}.", outcome.id()));
                }
                Err(e) => {
                    if self.ws.wizard().is_some() {
                        self.print_wizard()?;
                    }
                    return Err(e);
                }
            },
        }
        Ok(())
    }

    // ------------------------------------------------
    // Output
    // ------------------------------------------------

    fn print_list(&self) {
        let screen = self.ws.active();
        print!("{}", self.ws.current().render_list(screen.title(), self.cfg));
    }

    fn print_form(&self) -> AppResult<()> {
        let form = self.ws.current().render_form().ok_or(AppError::NoOpenForm)?;
        print!("{form}");
        Ok(())
    }

    fn print_wizard(&self) -> AppResult<()> {
        let wizard = self.ws.wizard().ok_or(AppError::NoWizard)?;
        print!("{}", render_wizard(wizard));
        Ok(())
    }

    fn print_screens(&self) {
        for screen in Screen::ALL {
            let marker = if screen == self.ws.active() { "*" } else { " " };
            println!(
                "{marker} {:<16} {} record(s)",
                screen.as_str(),
                self.ws.screen(screen).len()
            );
        }
    }

    fn print_columns(&self) {
        let mut table = Table::new(
            ["ID", "Label", "Visible", "Custom"].map(String::from),
            self.cfg.max_cell_width,
        );
        for c in self.ws.current().columns().fields() {
            table.add_row(vec![
                c.id.clone(),
                c.label.clone(),
                yes_no(c.enabled),
                yes_no(c.custom),
            ]);
        }
        print!("{}", table.render(&self.cfg.separator_char));
    }
}
