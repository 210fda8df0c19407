use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use calboard_core::config::CalboardConfig;
use calboard_core::submission::{
    AbstractRepository, AbstractSubmission, FileAbstractRepository, FormMode, Route,
    SubmissionForm, SubmitOutcome, find_by_param,
};
use owo_colors::OwoColorize;

use crate::render::{Render, TerminalNotifier, print_validation_errors};

fn repository(config: &CalboardConfig) -> Arc<FileAbstractRepository> {
    Arc::new(FileAbstractRepository::new(config.abstracts_path()))
}

fn read_values(file: &Path) -> Result<AbstractSubmission> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read {}", file.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid submission in {}", file.display()))
}

async fn submit(form: &mut SubmissionForm, values: AbstractSubmission) -> Result<()> {
    match form.submit(values).await {
        SubmitOutcome::Saved(_) => Ok(()),
        SubmitOutcome::Invalid(errors) => {
            print_validation_errors(&errors);
            anyhow::bail!("Submission not saved");
        }
        SubmitOutcome::Failed => anyhow::bail!("Submission not saved"),
    }
}

pub async fn create(config: &CalboardConfig, file: &Path) -> Result<()> {
    let values = read_values(file)?;
    let mut form = SubmissionForm::new(
        repository(config),
        Arc::new(TerminalNotifier),
        FormMode::Create,
    );
    submit(&mut form, values).await
}

pub async fn edit(config: &CalboardConfig, id: &str, file: &Path) -> Result<()> {
    let values = read_values(file)?;
    let mut form = SubmissionForm::new(
        repository(config),
        Arc::new(TerminalNotifier),
        FormMode::Edit(id.to_string()),
    );

    if let Some(Route::Root) = form.load().await {
        anyhow::bail!("Nothing to edit");
    }
    submit(&mut form, values).await
}

pub async fn show(config: &CalboardConfig, id: Option<&str>) -> Result<()> {
    let records = repository(config).list().await?;

    match id {
        Some(id) => {
            let record = find_by_param(&records, id)
                .with_context(|| format!("Submission '{id}' not found"))?;
            println!("{}", record.render());
            println!();
            println!("{}", record.submission.abstract_text);
        }
        None if records.is_empty() => println!("{}", "No submissions".dimmed()),
        None => {
            for record in &records {
                println!("{}", record.render());
                println!();
            }
        }
    }

    Ok(())
}
