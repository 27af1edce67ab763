//! Link command handlers

use anyhow::{bail, Context, Result};

use biolink_core::ordering::{self, Direction};
use biolink_core::{LinkItem, LinkPatch};

use crate::api::AdminApi;
use crate::output::{short_id, Output};

/// List all links in page order
pub async fn list(api: &dyn AdminApi, output: &Output) -> Result<()> {
    let links = api.list_links().await.context("Failed to fetch links")?;
    output.print_links(&links);
    Ok(())
}

/// Show a single link
pub async fn show(api: &dyn AdminApi, id: String, output: &Output) -> Result<()> {
    let id = resolve_id(api, &id).await?;
    let link = api.get_link(&id).await.context("Failed to fetch link")?;
    output.print_link(&link);
    Ok(())
}

/// Create a new visible link at the end of the list
pub async fn add(api: &dyn AdminApi, title: String, url: String, output: &Output) -> Result<()> {
    if title.trim().is_empty() || url.trim().is_empty() {
        bail!("Title and URL are required");
    }

    let link = LinkItem::new(title, url);
    let created = api
        .create_link(&link)
        .await
        .context("Failed to create link")?;

    output.success(&format!("Created link: {}", created.id));
    output.print_link(&created);
    Ok(())
}

/// Edit a link's title and/or URL
///
/// Without flags the fields are prompted for interactively. Only fields that
/// actually changed are sent.
pub async fn edit(
    api: &dyn AdminApi,
    id: String,
    title: Option<String>,
    url: Option<String>,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(api, &id).await?;
    let original = api.get_link(&id).await.context("Failed to fetch link")?;

    let mut edited = original.clone();
    if title.is_none() && url.is_none() {
        println!("Editing link: {}", original.id);
        println!("Press Enter to keep current value, or type new value.\n");
        if let Some(new_title) = prompt_with_default("Title", &original.title)? {
            edited.title = new_title;
        }
        if let Some(new_url) = prompt_with_default("URL", &original.url)? {
            edited.url = new_url;
        }
    } else {
        if let Some(title) = title {
            edited.title = title;
        }
        if let Some(url) = url {
            edited.url = url;
        }
    }

    let patch = LinkPatch::diff(&original, &edited);
    if patch.is_empty() {
        output.message("No changes.");
        return Ok(());
    }

    let updated = api
        .update_link(&id, &patch)
        .await
        .context("Failed to update link")?;

    output.success("Link updated");
    output.print_link(&updated);
    Ok(())
}

/// Flip a link between visible and hidden
pub async fn toggle(api: &dyn AdminApi, id: String, output: &Output) -> Result<()> {
    let id = resolve_id(api, &id).await?;
    let link = api.get_link(&id).await.context("Failed to fetch link")?;

    let updated = api
        .update_link(&id, &LinkPatch::hidden(!link.hidden))
        .await
        .context("Failed to update link")?;

    let state = if updated.hidden { "hidden" } else { "visible" };
    output.success(&format!("'{}' is now {}", updated.title, state));
    Ok(())
}

/// Delete a link
pub async fn delete(api: &dyn AdminApi, id: String, output: &Output) -> Result<()> {
    let id = resolve_id(api, &id).await?;
    let ack = api
        .delete_link(&id)
        .await
        .context("Failed to delete link")?;

    output.success(&format!("{}: {}", ack.message, id));
    Ok(())
}

/// Move a link one position up or down
///
/// The new order is computed locally and submitted as a full replace.
/// Moving past either end does nothing and sends no request.
pub async fn move_link(
    api: &dyn AdminApi,
    id: String,
    direction: Direction,
    output: &Output,
) -> Result<()> {
    let links = api.list_links().await.context("Failed to fetch links")?;
    let id = resolve_in(&links, &id)?.id.clone();

    let Some(reordered) = ordering::moved_by_id(&links, &id, direction) else {
        let edge = match direction {
            Direction::Up => "top",
            Direction::Down => "bottom",
        };
        output.message(&format!("Link {} is already at the {}.", short_id(&id), edge));
        return Ok(());
    };

    api.replace_links(&reordered)
        .await
        .context("Failed to reorder links")?;

    let position = reordered
        .iter()
        .position(|l| l.id == id)
        .map(|p| p + 1)
        .unwrap_or_default();
    output.success(&format!(
        "Moved {} {} to position {}",
        short_id(&id),
        direction,
        position
    ));
    Ok(())
}

/// Resolve a full id or unique id prefix against the server's list
async fn resolve_id(api: &dyn AdminApi, id: &str) -> Result<String> {
    let links = api.list_links().await.context("Failed to fetch links")?;
    Ok(resolve_in(&links, id)?.id.clone())
}

fn resolve_in<'a>(links: &'a [LinkItem], id: &str) -> Result<&'a LinkItem> {
    if let Some(exact) = links.iter().find(|l| l.id == id) {
        return Ok(exact);
    }

    let matches: Vec<_> = links.iter().filter(|l| l.id.starts_with(id)).collect();
    match matches.as_slice() {
        [] => bail!("No link found matching: {}", id),
        [single] => Ok(single),
        _ => {
            eprintln!("Multiple links match '{}':", id);
            for link in &matches {
                eprintln!("  {} - {}", link.id, link.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Prompt with a default value, returns None if user keeps default
fn prompt_with_default(prompt: &str, default: &str) -> Result<Option<String>> {
    use std::io::{self, Write};

    if default.is_empty() {
        print!("{}: ", prompt);
    } else {
        print!("{} [{}]: ", prompt, default);
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{sample_links, FakeApi};
    use crate::output::OutputFormat;
    use biolink_core::Settings;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn ids(links: &[LinkItem]) -> Vec<String> {
        links.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_resolve_exact_and_prefix() {
        let links = vec![
            LinkItem::with_id("abc123", "A", "https://a.example"),
            LinkItem::with_id("abd456", "B", "https://b.example"),
            LinkItem::with_id("ab", "C", "https://c.example"),
        ];

        // An exact id wins even when it is also a prefix of others
        assert_eq!(resolve_in(&links, "ab").unwrap().title, "C");
        assert_eq!(resolve_in(&links, "abd").unwrap().title, "B");
        assert!(resolve_in(&links, "zz").is_err());
        assert!(resolve_in(&links[..2], "ab").is_err());
    }

    #[tokio::test]
    async fn test_add_rejects_blank_fields_without_request() {
        let api = FakeApi::new(vec![], Settings::default());

        let err = add(&api, "".into(), "https://x.example".into(), &quiet())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Title and URL are required");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_appends() {
        let api = FakeApi::new(sample_links(), Settings::default());

        add(&api, "D".into(), "https://d.example".into(), &quiet())
            .await
            .unwrap();

        let links = api.links();
        assert_eq!(links.len(), 4);
        assert_eq!(links[3].title, "D");
        assert!(!links[3].hidden);
    }

    #[tokio::test]
    async fn test_edit_sends_only_changes() {
        let api = FakeApi::new(sample_links(), Settings::default());

        edit(&api, "2".into(), Some("B".into()), None, &quiet())
            .await
            .unwrap();
        assert!(api.writes().is_empty());

        edit(&api, "2".into(), None, Some("https://b2.example".into()), &quiet())
            .await
            .unwrap();
        assert_eq!(api.writes(), vec!["PUT /links/2"]);
        assert_eq!(api.links()[1].url, "https://b2.example");
        assert_eq!(api.links()[1].title, "B");
    }

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let api = FakeApi::new(sample_links(), Settings::default());

        toggle(&api, "1".into(), &quiet()).await.unwrap();
        assert!(api.links()[0].hidden);
        toggle(&api, "1".into(), &quiet()).await.unwrap();
        assert_eq!(api.links(), sample_links());
    }

    #[tokio::test]
    async fn test_delete_missing_fails() {
        let api = FakeApi::new(sample_links(), Settings::default());

        assert!(delete(&api, "9".into(), &quiet()).await.is_err());
        assert!(api.writes().is_empty());

        delete(&api, "3".into(), &quiet()).await.unwrap();
        assert_eq!(ids(&api.links()), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_move() {
        let api = FakeApi::new(sample_links(), Settings::default());

        move_link(&api, "3".into(), Direction::Up, &quiet())
            .await
            .unwrap();
        assert_eq!(ids(&api.links()), vec!["1", "3", "2"]);
        assert_eq!(api.writes(), vec!["PUT /links"]);
    }

    #[tokio::test]
    async fn test_move_at_boundary_sends_nothing() {
        let api = FakeApi::new(sample_links(), Settings::default());

        move_link(&api, "1".into(), Direction::Up, &quiet())
            .await
            .unwrap();
        move_link(&api, "3".into(), Direction::Down, &quiet())
            .await
            .unwrap();

        assert!(api.writes().is_empty());
        assert_eq!(api.links(), sample_links());
    }
}
