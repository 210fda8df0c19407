use anyhow::Result;
use calboard_core::config::CalboardConfig;

pub async fn run(config: &CalboardConfig, id: &str) -> Result<()> {
    let mut page = super::open_page(config).await?;
    super::select_event(&mut page, id)?;

    if let Some(handle) = page.delete_selected() {
        handle.await?;
    }

    if page.events().iter().any(|e| e.id == id) {
        anyhow::bail!("Event '{id}' was not deleted");
    }

    Ok(())
}
