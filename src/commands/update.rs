use anyhow::Result;
use calboard_core::EventColor;
use calboard_core::config::CalboardConfig;

use crate::render::print_validation_errors;
use crate::utils::dates::parse_when;

/// Fields given on the command line; everything else keeps its value.
#[derive(Debug, Default)]
pub struct Changes {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub color: Option<EventColor>,
}

pub async fn run(config: &CalboardConfig, id: &str, changes: Changes) -> Result<()> {
    let mut page = super::open_page(config).await?;
    super::select_event(&mut page, id)?;

    let Some(event) = page.selected_event() else {
        anyhow::bail!("Event '{id}' not found");
    };
    let mut draft = event.to_draft();

    if let Some(title) = changes.title {
        draft.title = title;
    }
    if let Some(start) = changes.start {
        let when = parse_when(&start)?;
        draft.start = when.at;
        draft.all_day = when.all_day;
    }
    if let Some(end) = changes.end {
        draft.end = parse_when(&end)?.at;
    }
    if let Some(description) = changes.description {
        draft.description = (!description.is_empty()).then_some(description);
    }
    if let Some(color) = changes.color {
        draft.color = color;
    }

    match page.submit_event(draft) {
        Ok(handle) => handle.await?,
        Err(errors) => {
            print_validation_errors(&errors);
            anyhow::bail!("Event not updated");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calboard_core::EventDraft;

    #[tokio::test]
    async fn test_empty_description_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalboardConfig {
            data_dir: dir.path().to_path_buf(),
            ..CalboardConfig::default()
        };

        let mut page = super::super::open_page(&config).await.unwrap();
        let start = parse_when("2025-03-20T09:00").unwrap().at;
        let mut draft = EventDraft::new("Standup", start, start + chrono::Duration::hours(1));
        draft.description = Some("room 4".to_string());
        page.submit_event(draft).unwrap().await.unwrap();
        let id = page.events()[0].id.clone();

        let changes = Changes {
            description: Some(String::new()),
            ..Changes::default()
        };
        run(&config, &id, changes).await.unwrap();

        let reopened = super::super::open_page(&config).await.unwrap();
        assert_eq!(reopened.events()[0].description, None);
        assert_eq!(reopened.events()[0].title, "Standup");
    }
}
