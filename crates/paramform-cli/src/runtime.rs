// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use paramform_app::{
    ConfirmPrompt, EditableField, EditorCommand, EditorError, EditorEvent, ParameterEditor,
    PlatformMetadata, RecommendationService, RowKey, format_depth,
};
use std::io::{BufRead, Write};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
enum ReplInput {
    Editor(EditorCommand),
    SaveActive,
    List,
    Submit,
    Help,
    Quit,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end over a [`ParameterEditor`].
pub struct Repl<'a> {
    editor: ParameterEditor,
    service: &'a mut dyn RecommendationService,
    metadata: PlatformMetadata,
}

impl<'a> Repl<'a> {
    pub fn new(
        editor: ParameterEditor,
        service: &'a mut dyn RecommendationService,
        metadata: PlatformMetadata,
    ) -> Self {
        Self {
            editor,
            service,
            metadata,
        }
    }

    pub fn editor(&self) -> &ParameterEditor {
        &self.editor
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Provider Platform Form -- type `help` for commands")?;
        self.render_table(out)?;
        for line in input.lines() {
            let line = line.context("read command from stdin")?;
            if self.execute(&line, out)? == Flow::Quit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let input = match parse_input(line) {
            Ok(input) => input,
            Err(error) => {
                writeln!(out, "error: {error}")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?input, "repl input");

        match input {
            ReplInput::Blank => {}
            ReplInput::Help => print_help(out)?,
            ReplInput::Quit => return Ok(Flow::Quit),
            ReplInput::List => self.render_table(out)?,
            ReplInput::Submit => self.submit(out)?,
            ReplInput::SaveActive => match self.editor.session().editing_key() {
                Some(key) => self.apply(EditorCommand::Save(key), out)?,
                None => writeln!(out, "error: {}", EditorError::NotEditing)?,
            },
            ReplInput::Editor(command) => self.apply(command, out)?,
        }
        Ok(Flow::Continue)
    }

    fn apply<W: Write>(&mut self, command: EditorCommand, out: &mut W) -> Result<()> {
        match self.editor.dispatch(command, &mut *self.service) {
            Ok(events) => {
                let mut table_changed = false;
                for event in &events {
                    table_changed |= self.report(event, out)?;
                }
                if table_changed {
                    self.render_table(out)?;
                }
            }
            Err(EditorError::Validation(errors)) => {
                for error in errors {
                    writeln!(out, "  {}: {}", error.field.title(), error.message)?;
                }
            }
            Err(error) => writeln!(out, "error: {error}")?,
        }
        Ok(())
    }

    /// Prints one event; returns whether the table should be redrawn.
    fn report<W: Write>(&self, event: &EditorEvent, out: &mut W) -> Result<bool> {
        match event {
            EditorEvent::ConfirmRequested(prompt) => {
                writeln!(out, "{} [yes/no]", prompt.title())?;
                Ok(false)
            }
            EditorEvent::ConfirmDismissed(ConfirmPrompt::DeleteRow(key)) => {
                writeln!(out, "kept row {key}")?;
                Ok(false)
            }
            EditorEvent::ConfirmDismissed(ConfirmPrompt::CancelEdit(key)) => {
                writeln!(out, "still editing row {key}")?;
                Ok(false)
            }
            EditorEvent::DraftChanged(_) => Ok(false),
            EditorEvent::RecommendationsUpdated { query, count } => {
                writeln!(out, "{count} recommendation(s) for {query:?}")?;
                self.render_recommendations(out)?;
                Ok(false)
            }
            EditorEvent::RowAdded(_)
            | EditorEvent::RowRemoved(_)
            | EditorEvent::RowSaved(_)
            | EditorEvent::EditStarted(_)
            | EditorEvent::EditEnded(_)
            | EditorEvent::PageChanged(_) => Ok(true),
        }
    }

    fn submit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let submission = self.editor.submission(self.metadata.clone());
        let json = serde_json::to_string_pretty(&submission).context("encode submission")?;
        info!(
            rows = submission.platform_parameters.len(),
            "submission assembled"
        );
        writeln!(out, "{json}")?;
        Ok(())
    }

    fn render_table<W: Write>(&self, out: &mut W) -> Result<()> {
        let session = self.editor.session();
        writeln!(
            out,
            "{:<5} {:<20} {:<36} {:<8} operation",
            "key",
            EditableField::ParameterName.title(),
            EditableField::StandardName.title(),
            EditableField::ParameterDepth.title(),
        )?;
        for row in self.editor.visible_rows() {
            let (name, standard, depth, operation) = match session.draft() {
                Some(draft) if session.is_editing(row.key) => (
                    format!("[{}]", draft.display(EditableField::ParameterName)),
                    format!("[{}]", draft.display(EditableField::StandardName)),
                    format!("[{}]", draft.display(EditableField::ParameterDepth)),
                    "recommend | save | cancel".to_owned(),
                ),
                _ => (
                    row.parameter_name.clone(),
                    row.standard_name.clone(),
                    format_depth(row.parameter_depth),
                    self.row_operations(),
                ),
            };
            writeln!(
                out,
                "{:<5} {:<20} {:<36} {:<8} {}",
                row.key.to_string(),
                name,
                standard,
                depth,
                operation
            )?;
        }
        if self.editor.rows().is_empty() {
            writeln!(out, "(no parameters -- `add` to create one)")?;
        }
        writeln!(
            out,
            "page {}/{} ({} per page)",
            self.editor.page(),
            self.editor.page_count(),
            self.editor.page_size()
        )?;
        Ok(())
    }

    fn row_operations(&self) -> String {
        let edit = if self.editor.can_edit() { "edit" } else { "-" };
        if self.editor.can_delete() {
            format!("{edit} | delete")
        } else {
            edit.to_owned()
        }
    }

    fn render_recommendations<W: Write>(&self, out: &mut W) -> Result<()> {
        let bridge = self.editor.recommendations();
        if !bridge.show_recommendations() {
            return Ok(());
        }
        writeln!(out, "Recommended Standard Names")?;
        for candidate in bridge.candidates() {
            writeln!(out, "{:>3}. {}", candidate.key, candidate.standard_name)?;
            if !candidate.description.is_empty() {
                writeln!(out, "     {}", candidate.description)?;
            }
        }
        Ok(())
    }
}

fn parse_input(line: &str) -> Result<ReplInput> {
    let trimmed = line.trim();
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };
    let input = match verb {
        "" => ReplInput::Blank,
        "help" | "?" => ReplInput::Help,
        "quit" | "exit" => ReplInput::Quit,
        "list" | "ls" => ReplInput::List,
        "submit" => ReplInput::Submit,
        "add" => ReplInput::Editor(EditorCommand::Add),
        "edit" => ReplInput::Editor(EditorCommand::Edit(parse_key(rest)?)),
        "delete" | "rm" => ReplInput::Editor(EditorCommand::RequestDelete(parse_key(rest)?)),
        "save" if rest.is_empty() => ReplInput::SaveActive,
        "save" => ReplInput::Editor(EditorCommand::Save(parse_key(rest)?)),
        "cancel" => ReplInput::Editor(EditorCommand::RequestCancel),
        "yes" | "y" => ReplInput::Editor(EditorCommand::Confirm),
        "no" | "n" => ReplInput::Editor(EditorCommand::Dismiss),
        "recommend" | "rec" => ReplInput::Editor(EditorCommand::Recommend),
        "page" => {
            let page = rest
                .parse::<usize>()
                .map_err(|_| anyhow!("page expects a page number, got {rest:?}"))?;
            ReplInput::Editor(EditorCommand::ChangePage(page))
        }
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            let field = EditableField::parse(field).ok_or_else(|| {
                anyhow!(
                    "unknown field {field:?}; use parameter_name, standard_name, or parameter_depth"
                )
            })?;
            ReplInput::Editor(EditorCommand::SetField(field, value.to_owned()))
        }
        unknown => {
            return Err(anyhow!(
                "unknown command {unknown:?}; type `help` to list commands"
            ));
        }
    };
    Ok(input)
}

fn parse_key(raw: &str) -> Result<RowKey> {
    if raw.is_empty() {
        return Err(anyhow!("missing row key"));
    }
    Ok(raw.parse::<RowKey>()?)
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "  list                      Show the parameter table")?;
    writeln!(out, "  add                       Append an empty parameter row")?;
    writeln!(out, "  edit <key>                Start editing a row")?;
    writeln!(
        out,
        "  set <field> <value>       Set name, standard_name, or depth on the edited row"
    )?;
    writeln!(out, "  recommend                 Suggest standard names for the draft")?;
    writeln!(out, "  save                      Commit the edited row")?;
    writeln!(out, "  cancel                    Discard the edit (asks first)")?;
    writeln!(out, "  delete <key>              Remove a row (asks first)")?;
    writeln!(out, "  yes | no                  Answer a pending question")?;
    writeln!(out, "  page <n>                  Show another page of rows")?;
    writeln!(out, "  submit                    Print the merged submission JSON")?;
    writeln!(out, "  quit                      Leave")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Flow, ReplInput, Repl, parse_input};
    use anyhow::Result;
    use paramform_app::{
        EditableField, EditorCommand, EditorSettings, ParameterEditor, PlatformMetadata, RowKey,
    };
    use paramform_testkit::{FailingService, FixedService, sample_entries};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn transcript(repl: &mut Repl<'_>, script: &str) -> Result<String> {
        let mut out = Vec::new();
        repl.run(Cursor::new(script.to_owned()), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn parse_input_understands_commands() -> Result<()> {
        assert_eq!(parse_input("  ")?, ReplInput::Blank);
        assert_eq!(
            parse_input("edit 3")?,
            ReplInput::Editor(EditorCommand::Edit(RowKey::new(3)))
        );
        assert_eq!(
            parse_input("set standard_name sea water temp")?,
            ReplInput::Editor(EditorCommand::SetField(
                EditableField::StandardName,
                "sea water temp".to_owned()
            ))
        );
        assert_eq!(
            parse_input("set depth")?,
            ReplInput::Editor(EditorCommand::SetField(
                EditableField::ParameterDepth,
                String::new()
            ))
        );
        assert_eq!(parse_input("save")?, ReplInput::SaveActive);
        assert_eq!(
            parse_input("page 2")?,
            ReplInput::Editor(EditorCommand::ChangePage(2))
        );
        Ok(())
    }

    #[test]
    fn parse_input_rejects_bad_arguments() {
        assert!(parse_input("edit").is_err());
        assert!(parse_input("edit zero").is_err());
        assert!(parse_input("set colour red").is_err());
        assert!(parse_input("page last").is_err());
        let error = parse_input("frobnicate").expect_err("unknown verb should fail");
        assert!(error.to_string().contains("type `help`"));
    }

    #[test]
    fn edit_save_flow_updates_the_table() -> Result<()> {
        let mut service = FixedService::new();
        let mut repl = Repl::new(
            ParameterEditor::default(),
            &mut service,
            PlatformMetadata::default(),
        );
        let output = transcript(
            &mut repl,
            "edit 1\nset name WTMP\nset standard_name sea_water_temperature\nset depth 2\nsave\nquit\n",
        )?;
        assert!(output.contains("recommend | save | cancel"));
        assert!(output.contains("WTMP"));
        let row = &repl.editor().rows()[0];
        assert_eq!(row.parameter_name, "WTMP");
        assert_eq!(row.parameter_depth, 2.0);
        assert!(repl.editor().can_edit());
        Ok(())
    }

    #[test]
    fn validation_errors_are_listed_per_field() -> Result<()> {
        let mut service = FixedService::new();
        let mut repl = Repl::new(
            ParameterEditor::default(),
            &mut service,
            PlatformMetadata::default(),
        );
        let output = transcript(&mut repl, "edit 1\nset depth\nsave\n")?;
        assert!(output.contains("Incoming Name: Please Input Incoming Name!"));
        assert!(output.contains("Standard Name: Please Input Standard Name!"));
        assert!(output.contains("Depth: Please Input Depth!"));
        assert!(!repl.editor().can_edit());
        Ok(())
    }

    #[test]
    fn delete_asks_before_removing() -> Result<()> {
        let mut service = FixedService::new();
        let mut repl = Repl::new(
            ParameterEditor::default(),
            &mut service,
            PlatformMetadata::default(),
        );
        let output = transcript(&mut repl, "add\ndelete 2\nno\ndelete 2\nyes\n")?;
        assert!(output.contains("Sure to delete? [yes/no]"));
        assert!(output.contains("kept row 2"));
        let keys: Vec<_> = repl.editor().rows().iter().map(|row| row.key).collect();
        assert_eq!(keys, vec![RowKey::new(1)]);
        Ok(())
    }

    #[test]
    fn recommend_prints_candidates_for_the_draft() -> Result<()> {
        let mut service = FixedService::new().respond("temperature", sample_entries()[..2].to_vec());
        let mut repl = Repl::new(
            ParameterEditor::default(),
            &mut service,
            PlatformMetadata::default(),
        );
        let output = transcript(
            &mut repl,
            "recommend\nedit 1\nset standard_name temperature\nrecommend\n",
        )?;
        assert!(output.contains("error: no row is being edited"));
        assert!(output.contains("2 recommendation(s) for \"temperature\""));
        assert!(output.contains("  1. sea_water_temperature"));
        assert!(output.contains("  2. air_temperature"));
        drop(repl);
        assert_eq!(service.queries, vec!["temperature"]);
        Ok(())
    }

    #[test]
    fn failing_service_shows_an_empty_panel() -> Result<()> {
        let mut service = FailingService;
        let mut repl = Repl::new(
            ParameterEditor::default(),
            &mut service,
            PlatformMetadata::default(),
        );
        let output = transcript(&mut repl, "edit 1\nset standard_name wind\nrec\n")?;
        assert!(output.contains("0 recommendation(s) for \"wind\""));
        assert!(output.contains("Recommended Standard Names"));
        assert!(repl.editor().recommendations().show_recommendations());
        Ok(())
    }

    #[test]
    fn submit_prints_merged_json() -> Result<()> {
        let mut service = FixedService::new();
        let metadata = PlatformMetadata {
            org_name: "NOAA".to_owned(),
            ..PlatformMetadata::default()
        };
        let mut repl = Repl::new(ParameterEditor::default(), &mut service, metadata);
        let mut out = Vec::new();
        assert_eq!(repl.execute("submit", &mut out)?, Flow::Continue);
        let json: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(json["orgName"], "NOAA");
        assert_eq!(json["platform_parameters"][0]["key"], "1");
        Ok(())
    }

    #[test]
    fn page_change_abandons_the_edit() -> Result<()> {
        let mut service = FixedService::new();
        let editor = ParameterEditor::new(EditorSettings {
            page_size: 1,
            ..EditorSettings::default()
        });
        let mut repl = Repl::new(editor, &mut service, PlatformMetadata::default());
        let output = transcript(&mut repl, "add\nedit 1\nset name draft\npage 2\n")?;
        assert!(output.contains("page 2/2 (1 per page)"));
        assert!(repl.editor().can_edit());
        assert_eq!(repl.editor().rows()[0].parameter_name, "");
        Ok(())
    }
}
