/// Folder resolution: locate a list's bookmark folder, creating it on first use
use crate::config::ExtensionConfig;
use crate::error::Result;
use crate::link::Folder;
use crate::store::{BookmarkStore, CreateDetails};

/// Find the folder titled `folder_title`, creating it when missing.
///
/// Algorithm:
/// 1. Fetch the whole tree
/// 2. Find the well-known top-level folder (`root_folder_title`) under the
///    root. If it is missing the host is in a state we can't work with:
///    warn and return `Ok(None)` without creating anything
/// 3. If `parent_folder_title` is given and a folder with that title exists
///    in the top-level folder, search there instead; otherwise stay in the
///    top-level folder
/// 4. Return the first child folder whose title equals `folder_title`
///    exactly (case-sensitive)
/// 5. Otherwise create it in the search scope and return the new folder
///
/// Host rejections are returned as errors.
pub async fn resolve_or_create_folder<S>(
    store: &S,
    config: &ExtensionConfig,
    folder_title: &str,
    parent_folder_title: Option<&str>,
) -> Result<Option<Folder>>
where
    S: BookmarkStore + ?Sized,
{
    let tree = store.get_tree().await?;

    let Some(default_folder) = tree.child_folder(&config.root_folder_title) else {
        log::warn!(
            "Could not find expected root folder '{}'.",
            config.root_folder_title
        );
        return Ok(None);
    };

    let scope = parent_folder_title
        .and_then(|title| default_folder.child_folder(title))
        .unwrap_or(default_folder);

    if let Some(existing) = scope.child_folder(folder_title) {
        log::debug!("Resolved folder '{}' ({})", folder_title, existing.id);
        return Ok(Some(existing.clone()));
    }

    log::debug!("Creating folder '{}' under '{}'", folder_title, scope.title);
    let created = store
        .create(CreateDetails::folder(&scope.id, folder_title))
        .await?;

    Ok(created.into_folder())
}
