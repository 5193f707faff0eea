/// Data structures for the reading list: links and the bookmark tree they come from
use serde::{Deserialize, Serialize};

/// A reading list entry as the UI sees it.
///
/// A link without an `id` is unsaved: it only exists in memory and has no
/// bookmark behind it yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Link {
        Link {
            url: url.into(),
            title: None,
            id: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Link {
        self.title = Some(title.into());
        self
    }

    /// Title shown to the user, falling back to the URL
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.url,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}

impl From<Bookmark> for Link {
    fn from(bookmark: Bookmark) -> Link {
        Link {
            url: bookmark.url,
            title: Some(bookmark.title),
            id: Some(bookmark.id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    pub id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub children: Vec<BookmarkNode>,
}

impl Folder {
    /// First direct child folder with exactly this title
    pub fn child_folder(&self, title: &str) -> Option<&Folder> {
        self.children.iter().find_map(|child| match child {
            BookmarkNode::Folder(folder) if folder.title == title => Some(folder),
            _ => None,
        })
    }

    /// Direct child bookmarks, in host order. Sub-folders and separators are skipped.
    pub fn bookmarks(&self) -> impl Iterator<Item = &Bookmark> {
        self.children.iter().filter_map(|child| match child {
            BookmarkNode::Bookmark(bookmark) => Some(bookmark),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BookmarkNode {
    Folder(Folder),
    Bookmark(Bookmark),
    Separator { id: String, parent_id: Option<String> },
}

impl BookmarkNode {
    pub fn id(&self) -> &str {
        match self {
            BookmarkNode::Folder(folder) => &folder.id,
            BookmarkNode::Bookmark(bookmark) => &bookmark.id,
            BookmarkNode::Separator { id, .. } => id,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            BookmarkNode::Folder(folder) => folder.parent_id.as_deref(),
            BookmarkNode::Bookmark(bookmark) => bookmark.parent_id.as_deref(),
            BookmarkNode::Separator { parent_id, .. } => parent_id.as_deref(),
        }
    }

    pub fn into_folder(self) -> Option<Folder> {
        match self {
            BookmarkNode::Folder(folder) => Some(folder),
            _ => None,
        }
    }

    pub fn into_bookmark(self) -> Option<Bookmark> {
        match self {
            BookmarkNode::Bookmark(bookmark) => Some(bookmark),
            _ => None,
        }
    }
}

/// The host's `BookmarkTreeNode` as it arrives over the bridge.
///
/// Firefox sets `type`; Chrome leaves it out, in which case a node without a
/// `url` is a folder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<RawNode>>,
}

impl From<RawNode> for BookmarkNode {
    fn from(raw: RawNode) -> BookmarkNode {
        match (raw.node_type.as_deref(), raw.url) {
            (Some("separator"), _) => BookmarkNode::Separator {
                id: raw.id,
                parent_id: raw.parent_id,
            },
            (Some("folder"), _) | (_, None) => BookmarkNode::Folder(Folder {
                id: raw.id,
                parent_id: raw.parent_id,
                title: raw.title,
                children: raw
                    .children
                    .unwrap_or_default()
                    .into_iter()
                    .map(BookmarkNode::from)
                    .collect(),
            }),
            (_, Some(url)) => BookmarkNode::Bookmark(Bookmark {
                id: raw.id,
                parent_id: raw.parent_id,
                title: raw.title,
                url,
            }),
        }
    }
}
